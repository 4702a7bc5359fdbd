//! Daily prayer display state.
//!
//! The prayer times themselves come from an astronomical calculator outside this crate. This
//! module covers what the app does around them: choosing a display timezone for a location,
//! marking which prayers have passed and which comes next, and the countdown label.

use super::*;

/// Convention used by the external calculator to derive Fajr and Isha angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculationMethod {
  /// Umm al-Qura University, Makkah
  #[default]
  UmmAlQura,
  /// Muslim World League
  MuslimWorldLeague,
  /// Islamic Society of North America
  Isna,
  /// University of Islamic Sciences, Karachi
  Karachi,
  /// Majlis Ugama Islam Singapura
  Singapore,
  /// Egyptian General Authority of Survey
  Egyptian,
  /// Diyanet, Turkey
  Turkey,
  /// Kuwait
  Kuwait,
  /// Qatar
  Qatar,
}

/// Picks an IANA timezone for a location.
///
/// Known regions are matched by bounding box; anywhere else falls back to a whole-hour
/// `Etc/GMT` zone derived from the longitude. `Etc/GMT` names invert the sign, so 45°E maps
/// to `Etc/GMT-3`.
pub fn timezone_for(latitude: f64, longitude: f64) -> String {
  let (lat, lon) = (latitude, longitude);
  let zone = if (16.0..=32.0).contains(&lat) && (34.0..=56.0).contains(&lon) {
    if lon >= 39.0 {
      "Asia/Riyadh"
    } else if lon >= 35.0 {
      "Asia/Jerusalem"
    } else {
      "Africa/Cairo"
    }
  } else if (36.0..=42.0).contains(&lat) && (26.0..=45.0).contains(&lon) {
    "Europe/Istanbul"
  } else if (5.0..=37.0).contains(&lat) && (60.0..=97.0).contains(&lon) {
    if lon >= 88.0 {
      "Asia/Dhaka"
    } else if lon >= 68.0 {
      "Asia/Karachi"
    } else {
      "Asia/Kolkata"
    }
  } else if (-10.0..=20.0).contains(&lat) && (95.0..=141.0).contains(&lon) {
    if lon >= 115.0 {
      "Asia/Jakarta"
    } else {
      "Asia/Singapore"
    }
  } else {
    let hours = (lon / 15.0).round() as i32;
    let sign = if hours > 0 { "-" } else { "+" };
    return format!("Etc/GMT{sign}{}", hours.abs());
  };
  zone.to_owned()
}

/// The five daily prayers plus sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerName {
  /// Dawn prayer
  Fajr,
  /// Sunrise, end of Fajr time
  Sunrise,
  /// Midday prayer
  Dhuhr,
  /// Afternoon prayer
  Asr,
  /// Sunset prayer
  Maghrib,
  /// Night prayer
  Isha,
}

impl PrayerName {
  /// All entries in daily order.
  pub const ALL: [PrayerName; 6] = [
    PrayerName::Fajr,
    PrayerName::Sunrise,
    PrayerName::Dhuhr,
    PrayerName::Asr,
    PrayerName::Maghrib,
    PrayerName::Isha,
  ];

  /// Arabic name.
  pub fn arabic(self) -> &'static str {
    match self {
      PrayerName::Fajr => "الفجر",
      PrayerName::Sunrise => "الشروق",
      PrayerName::Dhuhr => "الظهر",
      PrayerName::Asr => "العصر",
      PrayerName::Maghrib => "المغرب",
      PrayerName::Isha => "العشاء",
    }
  }
}

impl Display for PrayerName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{self:?}") }
}

/// A prayer time and its display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerTime {
  /// Which prayer
  pub name:    PrayerName,
  /// When it starts
  pub time:    DateTime<Utc>,
  /// Already started
  pub is_past: bool,
  /// The first prayer that has not started yet
  pub is_next: bool,
}

/// One day of prayer times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerSchedule {
  /// Prayers in daily order
  times: Vec<PrayerTime>,
}

impl PrayerSchedule {
  /// Builds a schedule from calculated times, sorted chronologically, and marks it for `now`.
  pub fn new(times: impl IntoIterator<Item = (PrayerName, DateTime<Utc>)>, now: DateTime<Utc>) -> Self {
    let mut times: Vec<PrayerTime> = times
      .into_iter()
      .map(|(name, time)| PrayerTime { name, time, is_past: false, is_next: false })
      .collect();
    times.sort_by_key(|prayer| prayer.time);
    let mut schedule = Self { times };
    schedule.refresh(now);
    schedule
  }

  /// Recomputes which prayers have passed and which is next.
  pub fn refresh(&mut self, now: DateTime<Utc>) {
    let mut found_next = false;
    for prayer in &mut self.times {
      prayer.is_past = prayer.time < now;
      prayer.is_next = !prayer.is_past && !found_next;
      found_next |= prayer.is_next;
    }
  }

  /// All prayers in order.
  pub fn times(&self) -> &[PrayerTime] { &self.times }

  /// The upcoming prayer, `None` once the last one has started.
  pub fn next(&self) -> Option<&PrayerTime> { self.times.iter().find(|prayer| prayer.is_next) }
}

/// Time remaining until `target`: `"Now"`, `"{h}h {m}m"` or `"{m}m"`.
pub fn countdown_label(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let remaining = target - now;
  if remaining <= ChronoDuration::zero() {
    return "Now".to_owned();
  }
  let hours = remaining.num_hours();
  let minutes = remaining.num_minutes() % 60;
  if hours > 0 {
    format!("{hours}h {minutes}m")
  } else {
    format!("{minutes}m")
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, hour, minute, 0).unwrap()
  }

  #[test]
  fn test_timezone_regions() {
    assert_eq!(timezone_for(21.4225, 39.8262), "Asia/Riyadh");
    assert_eq!(timezone_for(31.7683, 35.2137), "Asia/Jerusalem");
    assert_eq!(timezone_for(30.0444, 34.5), "Africa/Cairo");
    assert_eq!(timezone_for(41.0082, 28.9784), "Europe/Istanbul");
    assert_eq!(timezone_for(23.8103, 90.4125), "Asia/Dhaka");
    assert_eq!(timezone_for(24.8607, 67.0011), "Asia/Kolkata");
    assert_eq!(timezone_for(28.6139, 77.2090), "Asia/Karachi");
    assert_eq!(timezone_for(-6.2088, 106.8456), "Asia/Singapore");
    assert_eq!(timezone_for(-6.9, 115.2), "Asia/Jakarta");
  }

  #[test]
  fn test_timezone_fallback() {
    assert_eq!(timezone_for(51.5074, -0.1278), "Etc/GMT+0");
    assert_eq!(timezone_for(40.7128, -74.0060), "Etc/GMT+5");
    assert_eq!(timezone_for(55.7558, 37.6173), "Etc/GMT-3");
  }

  #[test]
  fn test_schedule_marks_next() {
    let times = [
      (PrayerName::Dhuhr, at(12, 10)),
      (PrayerName::Fajr, at(5, 0)),
      (PrayerName::Sunrise, at(6, 20)),
      (PrayerName::Asr, at(15, 30)),
    ];
    let mut schedule = PrayerSchedule::new(times, at(13, 0));
    let names: Vec<PrayerName> = schedule.times().iter().map(|p| p.name).collect();
    assert_eq!(names, vec![
      PrayerName::Fajr,
      PrayerName::Sunrise,
      PrayerName::Dhuhr,
      PrayerName::Asr
    ]);
    assert_eq!(schedule.next().unwrap().name, PrayerName::Asr);
    assert!(schedule.times()[2].is_past);
    assert_eq!(schedule.times().iter().filter(|p| p.is_next).count(), 1);

    schedule.refresh(at(16, 0));
    assert!(schedule.next().is_none());

    schedule.refresh(at(4, 0));
    assert_eq!(schedule.next().unwrap().name, PrayerName::Fajr);
  }

  #[test]
  fn test_countdown_label() {
    assert_eq!(countdown_label(at(12, 0), at(12, 0)), "Now");
    assert_eq!(countdown_label(at(11, 0), at(12, 0)), "Now");
    assert_eq!(countdown_label(at(12, 45), at(12, 0)), "45m");
    assert_eq!(countdown_label(at(15, 5), at(12, 0)), "3h 5m");
  }

  #[test]
  fn test_names() {
    assert_eq!(PrayerName::Maghrib.to_string(), "Maghrib");
    assert_eq!(PrayerName::Isha.arabic(), "العشاء");
    assert_eq!(
      serde_json::to_string(&CalculationMethod::MuslimWorldLeague).unwrap(),
      "\"muslimWorldLeague\""
    );
  }
}
