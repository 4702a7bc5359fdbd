use chrono::NaiveDate;
use noor::{
  settings::{Settings, ThemeId},
  tracking::{heatmap_weeks, Intensity, Prayer, TrackingState, MAX_POINTS},
};

use super::*;

fn date(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

#[traced_test]
#[test]
fn test_week_of_tracking() -> TestResult<()> {
  let (config, _dir) = create_test_config();
  let store = open_store(&config);

  let mut state = TrackingState::load(store.as_ref())?;
  for day in ["2024-03-04", "2024-03-05", "2024-03-06"] {
    for prayer in Prayer::ALL {
      state.toggle(date(day), prayer);
    }
  }
  // a recorded night with nothing done breaks the streak
  state.toggle(date("2024-03-07"), Prayer::Witr);
  state.toggle(date("2024-03-07"), Prayer::Witr);
  state.toggle(date("2024-03-08"), Prayer::Tahajjud1);
  state.toggle(date("2024-03-09"), "witr".parse()?);
  state.save(store.as_ref())?;

  let state = TrackingState::load(store.as_ref())?;
  assert_eq!(state.records.len(), 6);
  assert_eq!(state.points(date("2024-03-04")), MAX_POINTS);
  assert_eq!(state.points(date("2024-03-07")), 0);

  let stats = state.stats();
  assert_eq!(stats.current_streak, 2);
  assert_eq!(stats.best_streak, 3);
  assert_eq!(stats.total_nights, 5);
  assert_eq!(stats.perfect_nights, 3);
  assert_eq!(stats.total_points, 3 * MAX_POINTS + 2 + 1);
  assert!((stats.average_points - 30.0 / 5.0).abs() < f64::EPSILON);

  let weeks = heatmap_weeks(date("2024-03-09"), 2);
  assert_eq!(weeks.len(), 2);
  assert_eq!(weeks[1][6], date("2024-03-09"));
  let shades: Vec<Intensity> =
    weeks[1].iter().map(|&day| Intensity::from_points(state.points(day))).collect();
  assert_eq!(shades, vec![
    Intensity::None,
    Intensity::Full,
    Intensity::Full,
    Intensity::Full,
    Intensity::None,
    Intensity::Low,
    Intensity::Low,
  ]);
  Ok(())
}

#[traced_test]
#[test]
fn test_slices_are_independent() -> TestResult<()> {
  let (config, _dir) = create_test_config();
  let store = open_store(&config);

  let mut settings = Settings::load(store.as_ref())?;
  settings.set_theme(ThemeId::EmeraldLight);
  settings.save(store.as_ref())?;

  let mut tracking = TrackingState::load(store.as_ref())?;
  tracking.toggle(date("2024-03-10"), Prayer::Tahajjud2);
  tracking.save(store.as_ref())?;

  TrackingState::clear(store.as_ref())?;
  assert!(TrackingState::load(store.as_ref())?.records.is_empty());
  assert_eq!(Settings::load(store.as_ref())?.theme(), ThemeId::EmeraldLight);
  Ok(())
}
