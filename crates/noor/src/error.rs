//! Error types for the noor library.
//!
//! Errors fall into three groups:
//! - Data-integrity failures in the bundled scripture dataset, which are fatal
//! - Invalid user input such as a malformed `chapter:verse` reference
//! - Wrapped storage, serialization and filesystem errors
//!
//! Invalid lookup keys are *not* errors: position lookups return `None` instead.
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr;
//!
//! use noor::{dataset::AyahRef, error::NoorError};
//!
//! match AyahRef::from_str("two:255") {
//!   Err(NoorError::InvalidReference(input)) => println!("could not parse {input}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(reference) => println!("parsed {reference}"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`noor`](crate) crate.
pub type Result<T> = core::result::Result<T, NoorError>;

/// Errors that can occur when working with the noor library.
#[derive(Error, Debug)]
pub enum NoorError {
  /// A verse references a chapter that is absent from the chapter records.
  ///
  /// The dataset is a build-time asset, so this is fatal to index construction.
  #[error("Ayah {global_index} references surah {surah}, which is not in the dataset")]
  MissingSurah {
    /// Chapter number carried by the verse
    surah:        u16,
    /// Global sequence number of the offending verse
    global_index: u32,
  },

  /// A chapter's declared verse count disagrees with the verse records.
  #[error("Surah {surah} declares {declared} ayahs but the dataset holds {found}")]
  AyahCountMismatch {
    /// Chapter number
    surah:    u16,
    /// Count declared on the chapter record
    declared: u16,
    /// Count of verse records carrying the chapter number
    found:    usize,
  },

  /// Global sequence numbers are not contiguous from the dataset base.
  #[error("Expected ayah with global index {expected}, found {found}")]
  NonContiguousIndex {
    /// The next global index the sequence should have produced
    expected: u32,
    /// The global index actually present
    found:    u32,
  },

  /// Any other structural problem with the dataset (ordering, ids, ranges).
  #[error("Invalid dataset: {0}")]
  InvalidDataset(String),

  /// A `chapter:verse` reference could not be parsed.
  #[error("Invalid ayah reference \"{0}\", expected `surah:ayah`")]
  InvalidReference(String),

  /// An unknown night-prayer segment name was supplied.
  #[error("Unknown prayer \"{0}\", see `noor::tracking::Prayer`")]
  InvalidPrayer(String),

  /// No bookmark exists with the given id.
  #[error("No bookmark with id \"{0}\"")]
  BookmarkNotFound(String),

  /// A date string could not be parsed.
  #[error(transparent)]
  Date(#[from] chrono::ParseError),

  /// JSON (de)serialization of the dataset or persisted state failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A SQLite operation on the key-value store failed.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// [`Quran::install`](crate::index::Quran::install) was called a second time.
  #[error("Global Quran dataset already installed")]
  AlreadyInstalled,

  /// Another thread panicked while holding a store lock.
  #[error("Store lock poisoned")]
  Poisoned,

  /// A configuration problem.
  #[error("{0}")]
  Config(String),
}
