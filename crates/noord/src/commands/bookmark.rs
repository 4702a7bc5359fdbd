//! Module for managing bookmarks stored in the `mushaf-storage` slice.

use noor::mushaf::{Bookmark, BookmarkToggle, MushafState};

use super::*;

/// Bookmark operations
#[derive(Subcommand, Clone)]
pub enum BookmarkCommands {
  /// Bookmark a verse
  Add {
    /// Verse as `surah:ayah` or global index
    reference: String,
  },

  /// List bookmarks in creation order
  List,

  /// Remove a bookmark by id
  Remove {
    /// Bookmark id as shown by `bookmark list`
    id: String,
  },

  /// Bookmark a verse, or remove the bookmark already on it
  Toggle {
    /// Verse as `surah:ayah` or global index
    reference: String,
  },
}

/// One-line description of a bookmark.
fn describe(bookmark: &Bookmark) -> String {
  format!(
    "{}:{} [color {}] {} (added {})",
    bookmark.surah_number,
    bookmark.ayah_number,
    bookmark.color_index,
    style(&bookmark.id).dim(),
    bookmark.created_at.format("%Y-%m-%d %H:%M")
  )
}

/// Function for the [`Commands::Bookmark`] in the CLI.
pub fn bookmark(context: &Context, cmd: BookmarkCommands) -> Result<()> {
  let store = context.store()?;
  let mut state = MushafState::load(&store)?;

  match cmd {
    BookmarkCommands::Add { reference } => {
      let quran = context.quran()?;
      let ayah = resolve_ayah(&quran, &reference)?;
      if let Some(existing) = state.bookmark_for(ayah.global_index) {
        warning(format!("{} is already bookmarked as {}", ayah.id, existing.id));
        return Ok(());
      }
      let bookmark = state.add_bookmark(ayah.surah_number, ayah.ayah_number, ayah.global_index);
      success(format!("Bookmarked {}", describe(bookmark)));
    },
    BookmarkCommands::List => {
      if state.bookmarks.is_empty() {
        info("No bookmarks yet");
      } else {
        info(format!("{} bookmarks", state.bookmarks.len()));
        list(&state.bookmarks.iter().map(describe).collect::<Vec<_>>());
      }
      return Ok(());
    },
    BookmarkCommands::Remove { id } => {
      let removed = state.remove_bookmark(&id)?;
      success(format!("Removed bookmark on {}:{}", removed.surah_number, removed.ayah_number));
    },
    BookmarkCommands::Toggle { reference } => {
      let quran = context.quran()?;
      let ayah = resolve_ayah(&quran, &reference)?;
      match state.toggle_bookmark(ayah) {
        BookmarkToggle::Added(bookmark) => success(format!("Bookmarked {}", describe(&bookmark))),
        BookmarkToggle::Removed(bookmark) =>
          success(format!("Removed bookmark on {}:{}", bookmark.surah_number, bookmark.ayah_number)),
      }
    },
  }

  state.save(&store)?;
  Ok(())
}
