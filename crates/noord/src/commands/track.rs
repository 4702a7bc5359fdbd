//! Module for recording night prayers and reviewing streaks.

use chrono::{Local, NaiveDate};
use noor::tracking::{heatmap_weeks, Intensity, Prayer, TrackingState, MAX_POINTS};

use super::*;

/// Tracking operations
#[derive(Subcommand, Clone)]
pub enum TrackCommands {
  /// Flip one prayer on a date
  Toggle {
    /// `YYYY-MM-DD` or `today`
    date: String,

    /// `tahajjud1`..`tahajjud4` (or `1`..`4`) or `witr`
    prayer: String,
  },

  /// Show streaks and totals
  Stats,

  /// Draw the activity heatmap, one line per week
  Heatmap {
    /// Number of weeks to show
    #[arg(long, default_value_t = 12)]
    weeks: u32,

    /// Last day of the heatmap, `YYYY-MM-DD` or `today`
    #[arg(long, default_value = "today")]
    until: String,
  },
}

/// Parses `YYYY-MM-DD` or `today`.
fn parse_date(input: &str) -> Result<NaiveDate> {
  if input.eq_ignore_ascii_case("today") {
    return Ok(Local::now().date_naive());
  }
  Ok(NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(NoorError::from)?)
}

/// Heatmap cell for a shade.
fn cell(intensity: Intensity) -> console::StyledObject<&'static str> {
  match intensity {
    Intensity::None => style("·").dim(),
    Intensity::Low => style("░").green(),
    Intensity::Medium => style("▒").green(),
    Intensity::High => style("▓").green(),
    Intensity::Full => style("█").green().bold(),
  }
}

/// Function for the [`Commands::Track`] in the CLI.
pub fn track(context: &Context, cmd: TrackCommands) -> Result<()> {
  let store = context.store()?;
  let mut state = TrackingState::load(&store)?;

  match cmd {
    TrackCommands::Toggle { date, prayer } => {
      let date = parse_date(&date)?;
      let prayer = prayer.parse::<Prayer>()?;
      let done = state.toggle(date, prayer);
      state.save(&store)?;
      let verb = if done { "Marked" } else { "Unmarked" };
      success(format!(
        "{verb} {prayer} on {date} ({}/{MAX_POINTS} points)",
        state.points(date)
      ));
    },
    TrackCommands::Stats => {
      let stats = state.stats();
      info(format!("Current streak: {} nights", stats.current_streak));
      list(&[
        format!("Best streak: {} nights", stats.best_streak),
        format!("Nights prayed: {}", stats.total_nights),
        format!("Perfect nights: {}", stats.perfect_nights),
        format!("Total points: {}", stats.total_points),
        format!("Average points: {:.1}", stats.average_points),
      ]);
    },
    TrackCommands::Heatmap { weeks, until } => {
      let until = parse_date(&until)?;
      for week in heatmap_weeks(until, weeks) {
        let cells: Vec<String> = week
          .iter()
          .map(|&day| cell(Intensity::from_points(state.points(day))).to_string())
          .collect();
        println!("{} {}", week[0].format("%Y-%m-%d"), cells.join(""));
      }
    },
  }
  Ok(())
}
