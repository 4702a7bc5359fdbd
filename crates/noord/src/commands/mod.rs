use super::*;

pub mod bookmark;
pub mod index;
pub mod init;
pub mod locate;
pub mod position;
pub mod qibla;
pub mod track;

pub use bookmark::{bookmark, BookmarkCommands};
pub use index::{index, IndexOptions};
pub use init::{init, InitOptions};
pub use locate::{locate, LocateOptions};
pub use position::{position, PositionOptions};
pub use qibla::{qibla, QiblaOptions};
pub use track::{track, TrackCommands};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a config file and create the state store
  Init(InitOptions),

  /// Summarize the dataset and its display index
  Index(IndexOptions),

  /// Find a chapter, verse or juz in the display list
  Locate(LocateOptions),

  /// Show or set the saved reading position
  Position(PositionOptions),

  /// Manage bookmarks
  Bookmark {
    /// Bookmark operation
    #[command(subcommand)]
    cmd: BookmarkCommands,
  },

  /// Record night prayers and review progress
  Track {
    /// Tracking operation
    #[command(subcommand)]
    cmd: TrackCommands,
  },

  /// Compute the Qibla bearing for a location
  Qibla(QiblaOptions),
}

/// Resolves a verse typed as `surah:ayah` or as a global index.
fn resolve_ayah<'a>(quran: &'a Quran, input: &str) -> Result<&'a Ayah> {
  let ayah = if input.contains(':') {
    quran.dataset().ayah_by_ref(input.parse::<AyahRef>()?)
  } else {
    let global_index =
      input.trim().parse::<u32>().map_err(|_| NoorError::InvalidReference(input.to_owned()))?;
    quran.dataset().ayah(global_index)
  };
  ayah.ok_or_else(|| NoordError::NotFound(format!("Ayah {input}")))
}
