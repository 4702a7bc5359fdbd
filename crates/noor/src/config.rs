//! On-disk configuration.
//!
//! The configuration is a small TOML file, `~/.noor/config.toml` by default:
//!
//! ```toml
//! database_path = "/home/reader/.local/share/noor/noor.db"
//! dataset_path = "/home/reader/.local/share/noor/quran.json"
//! debounce_ms = 500
//!
//! [display]
//! fontSize = 28.0
//! lineSpacing = 16.0
//! ```
//!
//! Every field has a default, so a partial file is valid.

use super::*;
use crate::{layout::DisplaySettings, position::DEFAULT_DELAY, store::SqliteStore};

/// Runtime configuration shared by the library and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Key-value store file
  pub database_path: PathBuf,
  /// Scripture dataset JSON file
  pub dataset_path:  PathBuf,
  /// Inactivity window of the position debouncer, in milliseconds
  pub debounce_ms:   u64,
  /// Reader font settings used for height estimates
  pub display:       DisplaySettings,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_path: SqliteStore::default_path(),
      dataset_path:  Self::default_dataset_path(),
      debounce_ms:   DEFAULT_DELAY.as_millis() as u64,
      display:       DisplaySettings::default(),
    }
  }
}

impl Config {
  /// Default location of the config file, `~/.noor/config.toml`.
  ///
  /// # Errors
  ///
  /// Fails when the home directory cannot be determined.
  pub fn default_path() -> Result<PathBuf> {
    dirs::home_dir()
      .map(|home| home.join(".noor").join("config.toml"))
      .ok_or_else(|| NoorError::Config("Could not determine home directory".into()))
  }

  /// Default location of the dataset, next to the store.
  pub fn default_dataset_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("noor").join("quran.json")
  }

  /// Reads a config file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading config from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Reads a config file, using defaults when it does not exist.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No config at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes the config file, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Sets the store file.
  pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.database_path = path.into();
    self
  }

  /// Sets the dataset file.
  pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.dataset_path = path.into();
    self
  }

  /// Sets the debounce window.
  pub fn with_debounce(mut self, delay: Duration) -> Self {
    self.debounce_ms = delay.as_millis() as u64;
    self
  }

  /// The debounce window as a [`Duration`].
  pub fn debounce(&self) -> Duration { Duration::from_millis(self.debounce_ms) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.debounce(), Duration::from_millis(500));
    assert_eq!(config.display, DisplaySettings::default());
    assert!(config.database_path.ends_with("noor/noor.db"));
    assert!(config.dataset_path.ends_with("noor/quran.json"));
  }

  #[traced_test]
  #[test]
  fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config::default()
      .with_database_path(dir.path().join("noor.db"))
      .with_dataset_path(dir.path().join("quran.json"))
      .with_debounce(Duration::from_millis(250));

    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
  }

  #[traced_test]
  #[test]
  fn test_partial_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "debounce_ms = 1000\n\n[display]\nfontSize = 32.0\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.debounce_ms, 1000);
    assert_eq!(config.display.font_size, 32.0);
    assert_eq!(config.display.line_spacing, 16.0);
    assert_eq!(config.database_path, SqliteStore::default_path());
  }

  #[traced_test]
  #[test]
  fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(Config::load(&path), Err(NoorError::Path(_))));
    assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
  }

  #[test]
  fn test_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "debounce_ms = \"soon\"").unwrap();
    assert!(matches!(Config::load(&path), Err(NoorError::TomlDe(_))));
  }
}
