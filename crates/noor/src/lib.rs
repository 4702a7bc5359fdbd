//! Quran reader index, reading position persistence and night-prayer companion library.
//!
//! `noor` is the data layer behind a Mushaf reader and prayer companion, providing:
//!
//! - An immutable scripture dataset with O(1) verse and chapter lookups
//! - A flattened, virtualization-ready display sequence interleaving chapter headers and verses
//! - Row height estimation for pre-sizing off-screen list entries
//! - Debounced persistence of the reading position
//! - Bookmarks, settings and night-prayer tracking state stored in a durable key-value store
//! - Qibla bearing and alignment helpers
//!
//! # Getting Started
//!
//! ```no_run
//! use noor::{dataset::Dataset, index::Quran, layout::estimate_ayah_height};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::load("quran.json")?;
//! let quran = Quran::new(dataset);
//!
//! // Jump to Al-Baqarah
//! if let Some(position) = quran.position_of_surah(2)? {
//!   println!("Al-Baqarah header is row {position}");
//! }
//!
//! // Size the row for Ayat al-Kursi
//! let ayah = quran.dataset().ayah(262).expect("dataset has 2:255");
//! let height = estimate_ayah_height(&ayah.text_arabic, 28.0, 16.0);
//! println!("estimated height: {height}px");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`dataset`]: Verse and chapter records and their validation
//! - [`index`]: Flattened display sequence and position lookups
//! - [`layout`]: Height estimation and list offsets
//! - [`position`]: Debounced reading position writes
//! - [`store`]: Durable key-value storage and persisted state envelopes
//! - [`mushaf`]: Reading position and bookmark state
//! - [`tracking`]: Night-prayer records, points and streaks
//! - [`qibla`]: Great-circle bearing towards the Kaaba
//! - [`prayer`]: Timezone heuristic and prayer display state
//! - [`settings`]: User settings and themes
//! - [`config`]: On-disk configuration

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::{BTreeMap, HashMap},
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  sync::{Arc, Mutex, OnceLock},
  time::Duration,
};

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod config;
pub mod dataset;
pub mod error;
pub mod index;
pub mod layout;
pub mod mushaf;
pub mod position;
pub mod prayer;
pub mod qibla;
pub mod settings;
pub mod store;
pub mod tracking;

use crate::{dataset::*, error::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use noor::prelude::*;
///
/// fn example(store: &dyn KeyValueStore) -> Result<(), NoorError> {
///   store.set("greeting", "salam")?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{error::NoorError, position::PositionSink, store::KeyValueStore};
}
