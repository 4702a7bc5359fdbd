//! Module for the Qibla bearing of a location.

use noor::{
  prayer::timezone_for,
  qibla::{angle_difference, is_aligned, qibla_bearing, Direction},
};

use super::*;

/// Options for [`Commands::Qibla`].
#[derive(Args, Clone)]
pub struct QiblaOptions {
  /// Latitude in degrees, north positive
  #[arg(allow_negative_numbers = true)]
  pub latitude: f64,

  /// Longitude in degrees, east positive
  #[arg(allow_negative_numbers = true)]
  pub longitude: f64,

  /// Current compass heading in degrees
  #[arg(long, allow_negative_numbers = true)]
  pub heading: Option<f64>,
}

/// Function for the [`Commands::Qibla`] in the CLI.
pub fn qibla(options: QiblaOptions) -> Result<()> {
  let QiblaOptions { latitude, longitude, heading } = options;
  if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
    return Err(NoordError::InvalidCoordinates { latitude, longitude });
  }

  let bearing = qibla_bearing(latitude, longitude);
  success(format!("Qibla bearing: {bearing:.2}° from true north"));
  info(format!("Timezone: {}", timezone_for(latitude, longitude)));

  if let Some(heading) = heading {
    let difference = angle_difference(bearing, heading);
    let direction = Direction::from_difference(difference);
    if is_aligned(difference) {
      success(direction);
    } else {
      let side = if difference > 0.0 { "right" } else { "left" };
      warning(format!("{direction}: turn {:.1}° {side}", difference.abs()));
    }
  }
  Ok(())
}
