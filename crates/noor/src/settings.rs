//! User settings and colour themes.
//!
//! Settings are persisted as the `settings-storage` slice. The theme is stored as its string id
//! so that ids written by other clients survive a round trip; [`ThemeId::resolve`] turns any
//! string into a theme, falling back to [`ThemeId::GoldDark`].

use super::*;
use crate::{prayer::CalculationMethod, store::PersistedState};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Language {
  /// Follow the device
  #[default]
  System,
  /// English
  En,
  /// Arabic
  Ar,
}

/// How numbers are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumeralStyle {
  /// 0123456789
  Western,
  /// ٠١٢٣٤٥٦٧٨٩
  Arabic,
  /// Follow the device
  #[default]
  System,
}

/// Calendar used for dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalendarType {
  /// Gregorian calendar
  #[default]
  Gregorian,
  /// Hijri calendar
  Hijri,
}

/// Adhan and iqama reminders for one prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSetting {
  /// Remind at the adhan
  pub adhan:         bool,
  /// Remind before the iqama
  pub iqama:         bool,
  /// Minutes between adhan and iqama
  pub iqama_minutes: u32,
}

impl NotificationSetting {
  /// Both reminders on with the given iqama delay.
  const fn enabled(iqama_minutes: u32) -> Self { Self { adhan: true, iqama: true, iqama_minutes } }
}

/// Sunrise only has an adhan-style reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunriseNotification {
  /// Remind at sunrise
  pub adhan: bool,
}

/// Reminder settings for each daily prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
  /// Fajr reminders
  pub fajr:    NotificationSetting,
  /// Sunrise reminder
  pub sunrise: SunriseNotification,
  /// Dhuhr reminders
  pub dhuhr:   NotificationSetting,
  /// Asr reminders
  pub asr:     NotificationSetting,
  /// Maghrib reminders
  pub maghrib: NotificationSetting,
  /// Isha reminders
  pub isha:    NotificationSetting,
}

impl Default for NotificationSettings {
  fn default() -> Self {
    Self {
      fajr:    NotificationSetting::enabled(20),
      sunrise: SunriseNotification { adhan: true },
      dhuhr:   NotificationSetting::enabled(20),
      asr:     NotificationSetting::enabled(20),
      maghrib: NotificationSetting::enabled(10),
      isha:    NotificationSetting::enabled(20),
    }
  }
}

/// A location entered by hand instead of read from the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualLocation {
  /// Latitude in degrees
  pub lat:  f64,
  /// Longitude in degrees
  pub lon:  f64,
  /// Display name
  pub city: String,
}

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
  /// Interface language
  pub language:            Language,
  /// Numeral style
  pub numeral_style:       NumeralStyle,
  /// Calendar
  pub calendar_type:       CalendarType,
  /// Stored theme id, see [`Settings::theme`]
  pub theme_id:            String,
  /// Haptic feedback on
  pub haptics_enabled:     bool,
  /// Prayer time convention
  pub calculation_method:  CalculationMethod,
  /// Reminder settings
  pub notifications:       NotificationSettings,
  /// Prefer the manual location over the device location
  pub use_manual_location: bool,
  /// Manually entered location
  pub manual_location:     Option<ManualLocation>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      language:            Language::default(),
      numeral_style:       NumeralStyle::default(),
      calendar_type:       CalendarType::default(),
      theme_id:            ThemeId::default().to_string(),
      haptics_enabled:     true,
      calculation_method:  CalculationMethod::default(),
      notifications:       NotificationSettings::default(),
      use_manual_location: false,
      manual_location:     None,
    }
  }
}

impl PersistedState for Settings {
  const NAME: &'static str = "settings-storage";
}

impl Settings {
  /// The active theme; unknown ids resolve to the default theme.
  pub fn theme(&self) -> ThemeId { ThemeId::resolve(&self.theme_id) }

  /// Stores a theme selection.
  pub fn set_theme(&mut self, theme: ThemeId) { self.theme_id = theme.to_string(); }

  /// The location to use when the manual override is on.
  pub fn effective_manual_location(&self) -> Option<&ManualLocation> {
    self.manual_location.as_ref().filter(|_| self.use_manual_location)
  }
}

/// Accent family of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
  /// Gold
  Gold,
  /// Emerald
  Emerald,
  /// Rose
  Rose,
  /// Purple
  Purple,
  /// Amber
  Amber,
}

/// Every available theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
  /// Gold on light
  GoldLight,
  /// Gold on dark
  #[default]
  GoldDark,
  /// Emerald on light
  EmeraldLight,
  /// Emerald on dark
  EmeraldDark,
  /// Rose on light
  RoseLight,
  /// Rose on dark
  RoseDark,
  /// Purple on light
  PurpleLight,
  /// Purple on dark
  PurpleDark,
  /// Amber on light
  AmberLight,
  /// Amber on dark
  AmberDark,
}

/// Resolved theme colours as `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
  /// Accent colour
  pub primary:          &'static str,
  /// Lighter accent
  pub primary_light:    &'static str,
  /// Screen background
  pub background:       &'static str,
  /// Card background
  pub surface:          &'static str,
  /// Raised card background
  pub surface_elevated: &'static str,
  /// Body text
  pub text:             &'static str,
  /// Secondary text
  pub text_secondary:   &'static str,
  /// De-emphasized text
  pub text_muted:       &'static str,
  /// Dividers
  pub border:           &'static str,
  /// Positive state
  pub success:          &'static str,
  /// Error state
  pub error:            &'static str,
  /// Warning state
  pub warning:          &'static str,
}

impl ThemeId {
  /// All themes in picker order.
  pub const ALL: [ThemeId; 10] = [
    ThemeId::GoldLight,
    ThemeId::GoldDark,
    ThemeId::EmeraldLight,
    ThemeId::EmeraldDark,
    ThemeId::RoseLight,
    ThemeId::RoseDark,
    ThemeId::PurpleLight,
    ThemeId::PurpleDark,
    ThemeId::AmberLight,
    ThemeId::AmberDark,
  ];

  /// Looks a theme up by id, falling back to the default for unknown ids.
  pub fn resolve(id: &str) -> Self {
    Self::ALL.into_iter().find(|theme| theme.id() == id).unwrap_or_default()
  }

  /// Stable string id, e.g. `gold-dark`.
  pub fn id(self) -> &'static str {
    match self {
      ThemeId::GoldLight => "gold-light",
      ThemeId::GoldDark => "gold-dark",
      ThemeId::EmeraldLight => "emerald-light",
      ThemeId::EmeraldDark => "emerald-dark",
      ThemeId::RoseLight => "rose-light",
      ThemeId::RoseDark => "rose-dark",
      ThemeId::PurpleLight => "purple-light",
      ThemeId::PurpleDark => "purple-dark",
      ThemeId::AmberLight => "amber-light",
      ThemeId::AmberDark => "amber-dark",
    }
  }

  /// Whether the theme uses the dark base palette.
  pub fn is_dark(self) -> bool {
    matches!(
      self,
      ThemeId::GoldDark
        | ThemeId::EmeraldDark
        | ThemeId::RoseDark
        | ThemeId::PurpleDark
        | ThemeId::AmberDark
    )
  }

  /// Accent family.
  pub fn accent(self) -> Accent {
    match self {
      ThemeId::GoldLight | ThemeId::GoldDark => Accent::Gold,
      ThemeId::EmeraldLight | ThemeId::EmeraldDark => Accent::Emerald,
      ThemeId::RoseLight | ThemeId::RoseDark => Accent::Rose,
      ThemeId::PurpleLight | ThemeId::PurpleDark => Accent::Purple,
      ThemeId::AmberLight | ThemeId::AmberDark => Accent::Amber,
    }
  }

  /// Full palette: the accent pair over the light or dark base.
  pub fn colors(self) -> ThemeColors {
    let (primary, primary_light) = match self.accent() {
      Accent::Gold => ("#D4AF37", "#E8D085"),
      Accent::Emerald => ("#10B981", "#6EE7B7"),
      Accent::Rose => ("#F43F5E", "#FB7185"),
      Accent::Purple => ("#A855F7", "#C084FC"),
      Accent::Amber => ("#F59E0B", "#FCD34D"),
    };
    if self.is_dark() {
      ThemeColors {
        primary,
        primary_light,
        background: "#1A1A1A",
        surface: "#2A2A2A",
        surface_elevated: "#3A3A3A",
        text: "#FFFFFF",
        text_secondary: "#AAAAAA",
        text_muted: "#666666",
        border: "#3A3A3A",
        success: "#22C55E",
        error: "#EF4444",
        warning: "#F59E0B",
      }
    } else {
      ThemeColors {
        primary,
        primary_light,
        background: "#FFFFFF",
        surface: "#F5F5F5",
        surface_elevated: "#FFFFFF",
        text: "#1A1A1A",
        text_secondary: "#666666",
        text_muted: "#999999",
        border: "#E0E0E0",
        success: "#22C55E",
        error: "#EF4444",
        warning: "#F59E0B",
      }
    }
  }
}

impl Display for ThemeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.id()) }
}
