//! Row height estimation for the virtualized Mushaf list.
//!
//! The list only needs a sizing hint for rows that are not on screen yet, so heights are
//! predicted from text length instead of measured. Arabic glyphs average about 0.6 of the font
//! size in width on the reference content column, which gives the characters-per-line figure
//! the estimate is built on.
//!
//! [`ListLayout`] turns those per-row estimates into cumulative offsets so the display layer can
//! jump straight to a row or find the row under a scroll offset.

use super::*;
use crate::index::{ListItem, QuranIndex};

/// Width of the text column the estimate assumes, in pixels.
pub const CONTENT_WIDTH: f32 = 350.0;
/// Average glyph width as a fraction of the font size.
pub const GLYPH_WIDTH_FACTOR: f32 = 0.6;
/// Rendered height of one line of verse text.
pub const LINE_HEIGHT: f32 = 50.0;
/// Vertical padding around a verse row (16 top, 16 bottom).
pub const VERTICAL_PADDING: f32 = 32.0;
/// Smallest height a verse row is ever given.
pub const MIN_AYAH_HEIGHT: f32 = 60.0;
/// Chapter header: title block plus the Bismillah block when present.
pub const SURAH_HEADER_HEIGHT: f32 = 120.0;
/// Used for rows whose record cannot be resolved.
pub const FALLBACK_ROW_HEIGHT: f32 = 100.0;

/// Reader font settings that feed the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplaySettings {
  /// Verse font size in points
  pub font_size:    f32,
  /// Extra spacing between verse rows
  pub line_spacing: f32,
}

impl Default for DisplaySettings {
  fn default() -> Self { Self { font_size: 28.0, line_spacing: 16.0 } }
}

/// Predicts the rendered height of a verse row.
///
/// `line_spacing` is accepted for parity with the reader settings; the estimate uses the fixed
/// font line height. Any non-empty verse takes at least one line; empty text has no lines and
/// lands on [`MIN_AYAH_HEIGHT`].
pub fn estimate_ayah_height(text: &str, font_size: f32, _line_spacing: f32) -> f32 {
  let chars_per_line = (CONTENT_WIDTH / (font_size * GLYPH_WIDTH_FACTOR)).floor().max(1.0) as usize;
  let lines = text.chars().count().div_ceil(chars_per_line);
  let height = lines as f32 * LINE_HEIGHT + VERTICAL_PADDING;
  height.max(MIN_AYAH_HEIGHT)
}

/// Fixed height of a chapter header row.
pub fn estimate_surah_header_height() -> f32 { SURAH_HEADER_HEIGHT }

/// Estimated height of any row of the flattened sequence.
pub fn estimate_item_height(item: ListItem, dataset: &Dataset, settings: &DisplaySettings) -> f32 {
  match item {
    ListItem::Surah(_) => estimate_surah_header_height(),
    ListItem::Ayah(global_index) => dataset.ayah(global_index).map_or(FALLBACK_ROW_HEIGHT, |ayah| {
      estimate_ayah_height(&ayah.text_arabic, settings.font_size, settings.line_spacing)
    }),
  }
}

/// Cumulative row offsets for the whole list.
#[derive(Debug, Clone)]
pub struct ListLayout {
  /// `offsets[i]` is the top of row `i`; the final entry is the total height
  offsets: Vec<f32>,
}

impl ListLayout {
  /// Estimates every row of `index` and accumulates their offsets.
  pub fn new(index: &QuranIndex, dataset: &Dataset, settings: &DisplaySettings) -> Self {
    let mut offsets = Vec::with_capacity(index.len() + 1);
    let mut top = 0.0;
    offsets.push(top);
    for &item in index.items() {
      top += estimate_item_height(item, dataset, settings);
      offsets.push(top);
    }
    trace!("Laid out {} rows, total height {top}px", index.len());
    Self { offsets }
  }

  /// Number of rows.
  pub fn len(&self) -> usize { self.offsets.len() - 1 }

  /// Whether there are no rows.
  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Sum of all row heights.
  pub fn total_height(&self) -> f32 { self.offsets[self.len()] }

  /// Top offset of the row at `position`.
  pub fn offset_of(&self, position: usize) -> Option<f32> {
    (position < self.len()).then(|| self.offsets[position])
  }

  /// Estimated height of the row at `position`.
  pub fn height_of(&self, position: usize) -> Option<f32> {
    (position < self.len()).then(|| self.offsets[position + 1] - self.offsets[position])
  }

  /// The row covering scroll `offset`, `None` when outside the list.
  pub fn position_at(&self, offset: f32) -> Option<usize> {
    if !(0.0..self.total_height()).contains(&offset) {
      return None;
    }
    self.offsets.partition_point(|&top| top <= offset).checked_sub(1)
  }
}
