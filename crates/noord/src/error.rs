//! Error types for the noor command line interface.

use thiserror::Error;

use super::*;

/// Result alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, NoordError>;

/// Errors surfaced to the user by a command.
#[derive(Error, Debug)]
pub enum NoordError {
  /// Any error from the core library.
  #[error(transparent)]
  Noor(#[from] NoorError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A reference, chapter or date the dataset does not contain.
  #[error("{0} not found")]
  NotFound(String),

  /// Latitude or longitude outside the valid range.
  #[error("Invalid coordinates {latitude}, {longitude}")]
  InvalidCoordinates {
    /// Supplied latitude
    latitude:  f64,
    /// Supplied longitude
    longitude: f64,
  },

  /// `init` would overwrite an existing configuration.
  #[error("Config already exists at {0}, pass --force to overwrite")]
  AlreadyInitialized(PathBuf),
}
