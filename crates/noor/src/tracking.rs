//! Night-prayer (Qiyam) tracking: daily records, points and streak statistics.
//!
//! Each calendar date has one [`PrayerRecord`] with four Tahajjud segments worth 2 points each
//! and Witr worth 1 point, for a maximum of 9. Records are created lazily the first time a
//! prayer is toggled on a date and are never deleted.
//!
//! Streaks are counted over the recorded dates in descending order. Dates with no record do not
//! break a streak; only a recorded date scoring zero does.

use super::*;
use crate::store::PersistedState;

/// Points for one Tahajjud segment.
pub const TAHAJJUD_POINTS: u32 = 2;
/// Points for Witr.
pub const WITR_POINTS: u32 = 1;
/// Points of a night with every prayer done.
pub const MAX_POINTS: u32 = 4 * TAHAJJUD_POINTS + WITR_POINTS;

/// One of the tracked night prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Prayer {
  /// First Tahajjud segment
  Tahajjud1,
  /// Second Tahajjud segment
  Tahajjud2,
  /// Third Tahajjud segment
  Tahajjud3,
  /// Fourth Tahajjud segment
  Tahajjud4,
  /// Closing Witr prayer
  Witr,
}

impl Prayer {
  /// All prayers in night order.
  pub const ALL: [Prayer; 5] =
    [Prayer::Tahajjud1, Prayer::Tahajjud2, Prayer::Tahajjud3, Prayer::Tahajjud4, Prayer::Witr];

  /// Points this prayer is worth.
  pub fn points(self) -> u32 {
    match self {
      Prayer::Witr => WITR_POINTS,
      _ => TAHAJJUD_POINTS,
    }
  }
}

impl Display for Prayer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Prayer::Tahajjud1 => write!(f, "tahajjud1"),
      Prayer::Tahajjud2 => write!(f, "tahajjud2"),
      Prayer::Tahajjud3 => write!(f, "tahajjud3"),
      Prayer::Tahajjud4 => write!(f, "tahajjud4"),
      Prayer::Witr => write!(f, "witr"),
    }
  }
}

impl FromStr for Prayer {
  type Err = NoorError;

  fn from_str(s: &str) -> Result<Self> {
    match &s.to_lowercase() as &str {
      "tahajjud1" | "1" => Ok(Prayer::Tahajjud1),
      "tahajjud2" | "2" => Ok(Prayer::Tahajjud2),
      "tahajjud3" | "3" => Ok(Prayer::Tahajjud3),
      "tahajjud4" | "4" => Ok(Prayer::Tahajjud4),
      "witr" => Ok(Prayer::Witr),
      s => Err(NoorError::InvalidPrayer(s.to_owned())),
    }
  }
}

/// The prayers done on one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerRecord {
  /// Calendar date of the night
  pub date:      NaiveDate,
  /// First Tahajjud segment done
  pub tahajjud1: bool,
  /// Second Tahajjud segment done
  pub tahajjud2: bool,
  /// Third Tahajjud segment done
  pub tahajjud3: bool,
  /// Fourth Tahajjud segment done
  pub tahajjud4: bool,
  /// Witr done
  pub witr:      bool,
}

impl PrayerRecord {
  /// A record with nothing done.
  pub fn empty(date: NaiveDate) -> Self {
    Self { date, tahajjud1: false, tahajjud2: false, tahajjud3: false, tahajjud4: false, witr: false }
  }

  /// Whether `prayer` was done.
  pub fn get(&self, prayer: Prayer) -> bool {
    match prayer {
      Prayer::Tahajjud1 => self.tahajjud1,
      Prayer::Tahajjud2 => self.tahajjud2,
      Prayer::Tahajjud3 => self.tahajjud3,
      Prayer::Tahajjud4 => self.tahajjud4,
      Prayer::Witr => self.witr,
    }
  }

  /// Mutable flag for `prayer`.
  fn flag_mut(&mut self, prayer: Prayer) -> &mut bool {
    match prayer {
      Prayer::Tahajjud1 => &mut self.tahajjud1,
      Prayer::Tahajjud2 => &mut self.tahajjud2,
      Prayer::Tahajjud3 => &mut self.tahajjud3,
      Prayer::Tahajjud4 => &mut self.tahajjud4,
      Prayer::Witr => &mut self.witr,
    }
  }

  /// Weighted score of the night, 0..=9.
  pub fn points(&self) -> u32 {
    Prayer::ALL.into_iter().filter(|&prayer| self.get(prayer)).map(Prayer::points).sum()
  }
}

/// Aggregate statistics over all records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStats {
  /// Length of the most recent run of scoring nights
  pub current_streak: u32,
  /// Longest run of scoring nights
  pub best_streak:    u32,
  /// Nights with at least one point
  pub total_nights:   u32,
  /// Nights with all nine points
  pub perfect_nights: u32,
  /// Sum of points over all nights
  pub total_points:   u32,
  /// Mean points per scoring night, 0 when there are none
  pub average_points: f64,
}

/// Computes streaks and totals, visiting dates from newest to oldest.
///
/// The current streak is the first run of scoring nights met in that order that is closed by a
/// zero-point night or by the oldest record. A zero-point most recent night therefore does not
/// reset it to zero.
pub fn stats<'a>(records: impl IntoIterator<Item = &'a PrayerRecord>) -> TrackingStats {
  let mut records: Vec<&PrayerRecord> = records.into_iter().collect();
  records.sort_by(|a, b| b.date.cmp(&a.date));

  let mut stats = TrackingStats::default();
  let mut run = 0;
  for record in records {
    let points = record.points();
    if points > 0 {
      stats.total_nights += 1;
      stats.total_points += points;
      run += 1;
      if points == MAX_POINTS {
        stats.perfect_nights += 1;
      }
      stats.best_streak = stats.best_streak.max(run);
    } else {
      if stats.current_streak == 0 {
        stats.current_streak = run;
      }
      run = 0;
    }
  }
  if stats.current_streak == 0 {
    stats.current_streak = run;
  }
  if stats.total_nights > 0 {
    stats.average_points = f64::from(stats.total_points) / f64::from(stats.total_nights);
  }
  stats
}

/// Persisted tracking records, keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingState {
  /// One record per tracked date
  pub records: BTreeMap<NaiveDate, PrayerRecord>,
}

impl PersistedState for TrackingState {
  const NAME: &'static str = "tracking-storage";
}

impl TrackingState {
  /// The record for `date`, or an all-false record when the date was never tracked.
  pub fn record(&self, date: NaiveDate) -> PrayerRecord {
    self.records.get(&date).copied().unwrap_or_else(|| PrayerRecord::empty(date))
  }

  /// Flips one prayer on `date`, creating the record if needed. Returns the new value.
  pub fn toggle(&mut self, date: NaiveDate, prayer: Prayer) -> bool {
    let record = self.records.entry(date).or_insert_with(|| PrayerRecord::empty(date));
    let flag = record.flag_mut(prayer);
    *flag = !*flag;
    trace!("{prayer} on {date} is now {}", *flag);
    *flag
  }

  /// Points scored on `date`.
  pub fn points(&self, date: NaiveDate) -> u32 { self.record(date).points() }

  /// Statistics over every record.
  pub fn stats(&self) -> TrackingStats { stats(self.records.values()) }
}

/// Heatmap shade for a night's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
  /// No points
  None,
  /// 1 to 3 points
  Low,
  /// 4 to 6 points
  Medium,
  /// 7 or 8 points
  High,
  /// All 9 points
  Full,
}

impl Intensity {
  /// Shade for a points total.
  pub fn from_points(points: u32) -> Self {
    match points {
      0 => Intensity::None,
      1..=3 => Intensity::Low,
      4..=6 => Intensity::Medium,
      7..=8 => Intensity::High,
      _ => Intensity::Full,
    }
  }

  /// Opacity of the accent colour used for this shade.
  pub fn opacity(self) -> f32 {
    match self {
      Intensity::None => 0.0,
      Intensity::Low => 0.2,
      Intensity::Medium => 0.4,
      Intensity::High => 0.67,
      Intensity::Full => 1.0,
    }
  }
}

/// The last `weeks` weeks of dates ending on `today`, oldest week first, each week oldest day
/// first.
pub fn heatmap_weeks(today: NaiveDate, weeks: u32) -> Vec<[NaiveDate; 7]> {
  (0..weeks)
    .rev()
    .map(|week| {
      let mut days = [today; 7];
      for (slot, day) in days.iter_mut().enumerate() {
        let back = i64::from(week) * 7 + (6 - slot as i64);
        *day = today - ChronoDuration::days(back);
      }
      days
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

  fn record(day: &str, prayers: &[Prayer]) -> PrayerRecord {
    let mut record = PrayerRecord::empty(date(day));
    for &prayer in prayers {
      *record.flag_mut(prayer) = true;
    }
    record
  }

  #[test]
  fn test_points() {
    assert_eq!(record("2024-03-01", &Prayer::ALL).points(), 9);
    assert_eq!(record("2024-03-01", &[]).points(), 0);
    assert_eq!(record("2024-03-01", &[Prayer::Witr]).points(), 1);
    assert_eq!(record("2024-03-01", &[Prayer::Tahajjud2, Prayer::Tahajjud4]).points(), 4);
  }

  #[test]
  fn test_prayer_parsing() {
    assert_eq!("Witr".parse::<Prayer>().unwrap(), Prayer::Witr);
    assert_eq!("3".parse::<Prayer>().unwrap(), Prayer::Tahajjud3);
    assert_eq!(Prayer::Tahajjud1.to_string().parse::<Prayer>().unwrap(), Prayer::Tahajjud1);
    assert!(matches!("fajr".parse::<Prayer>(), Err(NoorError::InvalidPrayer(_))));
  }

  #[traced_test]
  #[test]
  fn test_toggle_creates_lazily() {
    let mut state = TrackingState::default();
    let day = date("2024-03-10");
    assert_eq!(state.record(day), PrayerRecord::empty(day));
    assert!(state.records.is_empty());

    assert!(state.toggle(day, Prayer::Tahajjud1));
    assert!(state.toggle(day, Prayer::Witr));
    assert_eq!(state.points(day), 3);

    assert!(!state.toggle(day, Prayer::Tahajjud1));
    assert_eq!(state.points(day), 1);
    assert_eq!(state.records.len(), 1);
  }

  #[test]
  fn test_stats_empty() {
    assert_eq!(stats(std::iter::empty()), TrackingStats::default());
  }

  #[test]
  fn test_stats_streaks() {
    let records = [
      record("2024-03-01", &Prayer::ALL),
      record("2024-03-02", &[Prayer::Witr]),
      record("2024-03-03", &[]),
      record("2024-03-04", &[Prayer::Tahajjud1]),
      record("2024-03-05", &Prayer::ALL),
      // sporadic tracking: the gap to the 9th does not break the streak
      record("2024-03-09", &[Prayer::Tahajjud1, Prayer::Tahajjud2]),
    ];
    let stats = stats(&records);
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.best_streak, 3);
    assert_eq!(stats.total_nights, 5);
    assert_eq!(stats.perfect_nights, 2);
    assert_eq!(stats.total_points, 9 + 1 + 2 + 9 + 4);
    assert!((stats.average_points - 25.0 / 5.0).abs() < f64::EPSILON);
  }

  #[test]
  fn test_stats_zero_most_recent_night() {
    let records = [
      record("2024-03-01", &[Prayer::Witr]),
      record("2024-03-02", &[Prayer::Witr]),
      record("2024-03-03", &[]),
    ];
    let stats = stats(&records);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.best_streak, 2);
  }

  #[traced_test]
  #[test]
  fn test_tracking_state_round_trip_shape() {
    let mut state = TrackingState::default();
    state.toggle(date("2024-03-10"), Prayer::Witr);
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["records"]["2024-03-10"]["witr"], true);
    assert_eq!(json["records"]["2024-03-10"]["date"], "2024-03-10");

    let back: TrackingState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);
  }

  #[test]
  fn test_intensity() {
    let shades: Vec<Intensity> = (0..=9).map(Intensity::from_points).collect();
    assert_eq!(shades[0], Intensity::None);
    assert_eq!(shades[3], Intensity::Low);
    assert_eq!(shades[4], Intensity::Medium);
    assert_eq!(shades[8], Intensity::High);
    assert_eq!(shades[9], Intensity::Full);
    assert!(shades.windows(2).all(|pair| pair[0] <= pair[1]));
  }

  #[test]
  fn test_heatmap_weeks() {
    let today = date("2024-03-31");
    let weeks = heatmap_weeks(today, 12);
    assert_eq!(weeks.len(), 12);
    assert_eq!(weeks[11][6], today);
    assert_eq!(weeks[11][0], date("2024-03-25"));
    assert_eq!(weeks[0][0], today - ChronoDuration::days(83));

    let flat: Vec<NaiveDate> = weeks.iter().flatten().copied().collect();
    assert!(flat.windows(2).all(|pair| pair[1] - pair[0] == ChronoDuration::days(1)));
  }
}
