//! Qibla direction: great-circle bearing towards the Kaaba and compass alignment helpers.
//!
//! Angles are in degrees. A bearing is clockwise from true north in `[0, 360)`; an angle
//! difference is how far the reader must turn, positive to the right, normalized to
//! `(-180, 180]`.

use super::*;

/// Latitude of the Kaaba.
pub const KAABA_LATITUDE: f64 = 21.4225;
/// Longitude of the Kaaba.
pub const KAABA_LONGITUDE: f64 = 39.8262;
/// Largest deviation still counted as facing the Qibla.
pub const ALIGNMENT_TOLERANCE: f64 = 5.0;

/// Initial great-circle bearing from the observer to the Kaaba.
pub fn qibla_bearing(latitude: f64, longitude: f64) -> f64 {
  let lat1 = latitude.to_radians();
  let lat2 = KAABA_LATITUDE.to_radians();
  let delta_lon = (KAABA_LONGITUDE - longitude).to_radians();

  let x = delta_lon.sin();
  let y = lat1.cos() * lat2.tan() - lat1.sin() * delta_lon.cos();
  let bearing = x.atan2(y).to_degrees();
  normalize_bearing(bearing)
}

/// Maps any angle into `[0, 360)`.
pub fn normalize_bearing(degrees: f64) -> f64 {
  let normalized = ((degrees % 360.0) + 360.0) % 360.0;
  // -1e-15 lands on 360.0 after the float addition
  if normalized >= 360.0 {
    0.0
  } else {
    normalized
  }
}

/// Maps a signed angle difference into `(-180, 180]`.
pub fn normalize_angle(difference: f64) -> f64 {
  let normalized = normalize_bearing(difference);
  if normalized > 180.0 {
    normalized - 360.0
  } else {
    normalized
  }
}

/// How far the reader must turn from `heading` to face `bearing`, positive to the right.
pub fn angle_difference(bearing: f64, heading: f64) -> f64 { normalize_angle(bearing - heading) }

/// Whether the reader is within [`ALIGNMENT_TOLERANCE`] of the Qibla.
pub fn is_aligned(difference: f64) -> bool {
  normalize_angle(difference).abs() <= ALIGNMENT_TOLERANCE
}

/// Turning instruction for an angle difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  /// Within 5°
  Facing,
  /// 5° to 22.5° left
  SlightlyLeft,
  /// 5° to 22.5° right
  SlightlyRight,
  /// 22.5° to 45° left
  TurnLeft,
  /// 22.5° to 45° right
  TurnRight,
  /// 45° to 135° left
  ToYourLeft,
  /// 45° to 135° right
  ToYourRight,
  /// More than 135° either way
  Behind,
}

impl Direction {
  /// Classifies an angle difference into a turning band.
  pub fn from_difference(difference: f64) -> Self {
    let angle = normalize_angle(difference);
    let right = angle > 0.0;
    match angle.abs() {
      a if a <= ALIGNMENT_TOLERANCE => Direction::Facing,
      a if a <= 22.5 => if right { Direction::SlightlyRight } else { Direction::SlightlyLeft },
      a if a <= 45.0 => if right { Direction::TurnRight } else { Direction::TurnLeft },
      a if a <= 135.0 => if right { Direction::ToYourRight } else { Direction::ToYourLeft },
      _ => Direction::Behind,
    }
  }
}

impl Display for Direction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let label = match self {
      Direction::Facing => "Facing Qibla",
      Direction::SlightlyLeft => "Slightly Left",
      Direction::SlightlyRight => "Slightly Right",
      Direction::TurnLeft => "Turn Left",
      Direction::TurnRight => "Turn Right",
      Direction::ToYourLeft => "To Your Left",
      Direction::ToYourRight => "To Your Right",
      Direction::Behind => "Behind You",
    };
    write!(f, "{label}")
  }
}
