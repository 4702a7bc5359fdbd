//! Reader state: last reading position, bookmarks and font settings.
//!
//! [`MushafState`] is persisted as the `mushaf-storage` slice. Bookmarks take their colour from
//! a fixed palette of [`BOOKMARK_COLORS`] slots, assigned round-robin by the number of bookmarks
//! present when each one is created.

use rand::{distributions::Alphanumeric, Rng};

use super::*;
use crate::{
  index::{ListEntry, Quran},
  layout::DisplaySettings,
  position::PositionSink,
  store::{KeyValueStore, PersistedState},
};

/// Number of colour slots bookmarks cycle through.
pub const BOOKMARK_COLORS: usize = 8;

/// A bookmarked verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
  /// Unique id, `"{unix millis}-{random suffix}"`
  pub id:           String,
  /// Global index of the verse
  pub global_index: u32,
  /// Chapter of the verse
  pub surah_number: u16,
  /// Verse number within the chapter
  pub ayah_number:  u16,
  /// Palette slot, `0..BOOKMARK_COLORS`
  pub color_index:  usize,
  /// When the bookmark was created
  pub created_at:   DateTime<Utc>,
}

/// Outcome of [`MushafState::toggle_bookmark`].
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkToggle {
  /// A new bookmark was created
  Added(Bookmark),
  /// The existing bookmark was removed
  Removed(Bookmark),
}

/// Persisted reader state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MushafState {
  /// Global index of the last viewed verse
  pub current_position: u32,
  /// Bookmarks in creation order
  pub bookmarks:        Vec<Bookmark>,
  /// Verse font size
  pub font_size:        f32,
  /// Spacing between verse rows
  pub line_spacing:     f32,
}

impl Default for MushafState {
  fn default() -> Self {
    let display = DisplaySettings::default();
    Self {
      current_position: FIRST_GLOBAL_INDEX,
      bookmarks:        Vec::new(),
      font_size:        display.font_size,
      line_spacing:     display.line_spacing,
    }
  }
}

impl PersistedState for MushafState {
  const NAME: &'static str = "mushaf-storage";
}

impl MushafState {
  /// Records the last viewed verse.
  pub fn update_position(&mut self, global_index: u32) { self.current_position = global_index; }

  /// Row to scroll to when the reader opens, `None` when the saved verse is unknown.
  pub fn restore_position(&self, quran: &Quran) -> Result<Option<usize>> {
    quran.position_of_ayah(self.current_position)
  }

  /// Colour slot the next bookmark will get.
  pub fn next_bookmark_color(&self) -> usize { self.bookmarks.len() % BOOKMARK_COLORS }

  /// Bookmarks a verse and returns the new bookmark.
  pub fn add_bookmark(&mut self, surah_number: u16, ayah_number: u16, global_index: u32) -> &Bookmark {
    let bookmark = Bookmark {
      id: bookmark_id(),
      global_index,
      surah_number,
      ayah_number,
      color_index: self.next_bookmark_color(),
      created_at: Utc::now(),
    };
    debug!("Bookmarking {surah_number}:{ayah_number} as {}", bookmark.id);
    self.bookmarks.push(bookmark);
    &self.bookmarks[self.bookmarks.len() - 1]
  }

  /// Removes the bookmark with `id`.
  pub fn remove_bookmark(&mut self, id: &str) -> Result<Bookmark> {
    let slot = self
      .bookmarks
      .iter()
      .position(|bookmark| bookmark.id == id)
      .ok_or_else(|| NoorError::BookmarkNotFound(id.to_owned()))?;
    Ok(self.bookmarks.remove(slot))
  }

  /// The bookmark on a verse, if any.
  pub fn bookmark_for(&self, global_index: u32) -> Option<&Bookmark> {
    self.bookmarks.iter().find(|bookmark| bookmark.global_index == global_index)
  }

  /// Whether a verse is bookmarked.
  pub fn is_bookmarked(&self, global_index: u32) -> bool {
    self.bookmark_for(global_index).is_some()
  }

  /// Adds a bookmark on `ayah`, or removes the one already there.
  pub fn toggle_bookmark(&mut self, ayah: &Ayah) -> BookmarkToggle {
    match self.bookmarks.iter().position(|bookmark| bookmark.global_index == ayah.global_index) {
      Some(slot) => BookmarkToggle::Removed(self.bookmarks.remove(slot)),
      None => BookmarkToggle::Added(
        self.add_bookmark(ayah.surah_number, ayah.ayah_number, ayah.global_index).clone(),
      ),
    }
  }

  /// Sets the verse font size.
  pub fn set_font_size(&mut self, font_size: f32) { self.font_size = font_size; }

  /// Sets the spacing between verse rows.
  pub fn set_line_spacing(&mut self, line_spacing: f32) { self.line_spacing = line_spacing; }

  /// Font settings for height estimation.
  pub fn display_settings(&self) -> DisplaySettings {
    DisplaySettings { font_size: self.font_size, line_spacing: self.line_spacing }
  }
}

/// Generates a bookmark id from the current time and a random suffix.
fn bookmark_id() -> String {
  let suffix: String = rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(9)
    .map(|byte| char::from(byte).to_ascii_lowercase())
    .collect();
  format!("{}-{suffix}", Utc::now().timestamp_millis())
}

/// Writes debounced positions into the persisted [`MushafState`].
pub struct MushafPositionSink {
  /// Backing store
  store: Arc<dyn KeyValueStore>,
}

impl MushafPositionSink {
  /// Creates a sink over `store`.
  pub fn new(store: Arc<dyn KeyValueStore>) -> Self { Self { store } }
}

impl PositionSink for MushafPositionSink {
  fn save_position(&self, global_index: u32) -> Result<()> {
    let mut state = MushafState::load(self.store.as_ref())?;
    state.update_position(global_index);
    state.save(self.store.as_ref())
  }
}

/// Tracks which chapter and verse the reader is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingCursor {
  /// Chapter of the first visible row
  pub surah: u16,
  /// Verse of the first visible row, 1 on a chapter header
  pub ayah:  u16,
}

impl Default for ReadingCursor {
  fn default() -> Self { Self { surah: 1, ayah: 1 } }
}

impl ReadingCursor {
  /// Moves the cursor to the first visible row.
  ///
  /// Returns the global index to hand to the position debouncer when the row is a verse, and
  /// `None` for chapter headers, which are never saved as a position.
  pub fn observe(&mut self, first_visible: ListEntry<'_>) -> Option<u32> {
    match first_visible {
      ListEntry::Ayah(ayah) => {
        self.surah = ayah.surah_number;
        self.ayah = ayah.ayah_number;
        Some(ayah.global_index)
      },
      ListEntry::Surah(surah) => {
        self.surah = surah.id;
        self.ayah = 1;
        None
      },
    }
  }
}
