//! Flattened display sequence and O(1) position lookups for a virtualized Mushaf list.
//!
//! The reader renders the whole Quran as one virtualized list where every chapter is preceded
//! by a header row. [`QuranIndex`] derives, in one pass over the dataset:
//!
//! - the flattened sequence of [`ListItem`]s,
//! - a map from a verse's global index to its row,
//! - a map from a chapter number to its header row.
//!
//! [`Quran`] owns the dataset and builds the index lazily on first access, exactly once per
//! process, then serves every later lookup from the cached copy. The dataset is immutable so the
//! cache is never invalidated.
//!
//! # Examples
//!
//! ```no_run
//! use noor::{dataset::Dataset, index::Quran};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let quran = Quran::new(Dataset::load("quran.json")?);
//! match quran.position_of_ayah(262)? {
//!   Some(row) => println!("scroll to row {row}"),
//!   None => println!("unknown ayah, not scrolling"),
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// One row of the flattened display sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListItem {
  /// Chapter header, keyed by chapter number
  Surah(u16),
  /// Verse row, keyed by global index
  Ayah(u32),
}

/// A [`ListItem`] resolved against the dataset it was built from.
#[derive(Debug, Clone, Copy)]
pub enum ListEntry<'a> {
  /// Chapter header row
  Surah(&'a Surah),
  /// Verse row
  Ayah(&'a Ayah),
}

impl ListItem {
  /// Looks the row's record up in `dataset`.
  pub fn resolve<'a>(&self, dataset: &'a Dataset) -> Option<ListEntry<'a>> {
    match *self {
      ListItem::Surah(id) => dataset.surah(id).map(ListEntry::Surah),
      ListItem::Ayah(global_index) => dataset.ayah(global_index).map(ListEntry::Ayah),
    }
  }
}

/// The derived lookup structures.
#[derive(Debug, Clone)]
pub struct QuranIndex {
  /// Headers and verses in display order
  items:           Vec<ListItem>,
  /// Verse global index to row
  ayah_positions:  HashMap<u32, usize>,
  /// Chapter number to header row
  surah_positions: HashMap<u16, usize>,
}

impl QuranIndex {
  /// Builds the flattened sequence and both reverse lookups from the dataset.
  ///
  /// Verses are visited in dataset order. Whenever the chapter number changes, the chapter's
  /// header row is emitted first.
  ///
  /// # Errors
  ///
  /// Returns [`NoorError::MissingSurah`] when a verse references a chapter absent from the
  /// chapter records. The dataset is a build-time asset, so this is never skipped.
  pub fn build(dataset: &Dataset) -> Result<Self> {
    let ayahs = dataset.ayahs();
    let mut items = Vec::with_capacity(ayahs.len() + dataset.surahs().len());
    let mut ayah_positions = HashMap::with_capacity(ayahs.len());
    let mut surah_positions = HashMap::with_capacity(dataset.surahs().len());

    let mut current_surah: Option<u16> = None;
    for ayah in ayahs {
      if current_surah != Some(ayah.surah_number) {
        let surah = dataset.surah(ayah.surah_number).ok_or(NoorError::MissingSurah {
          surah:        ayah.surah_number,
          global_index: ayah.global_index,
        })?;
        surah_positions.insert(surah.id, items.len());
        items.push(ListItem::Surah(surah.id));
        current_surah = Some(surah.id);
      }
      ayah_positions.insert(ayah.global_index, items.len());
      items.push(ListItem::Ayah(ayah.global_index));
    }

    debug!(
      "Built Quran index: {} rows ({} headers, {} ayahs)",
      items.len(),
      surah_positions.len(),
      ayah_positions.len()
    );
    Ok(Self { items, ayah_positions, surah_positions })
  }

  /// Rows in display order.
  pub fn items(&self) -> &[ListItem] { &self.items }

  /// The row at `position`.
  pub fn item(&self, position: usize) -> Option<ListItem> { self.items.get(position).copied() }

  /// Number of rows (chapters plus verses).
  pub fn len(&self) -> usize { self.items.len() }

  /// Whether the sequence has no rows.
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Row of the verse with `global_index`, `None` for unknown verses.
  pub fn position_of_ayah(&self, global_index: u32) -> Option<usize> {
    self.ayah_positions.get(&global_index).copied()
  }

  /// Header row of chapter `surah`, `None` for unknown chapters.
  pub fn position_of_surah(&self, surah: u16) -> Option<usize> {
    self.surah_positions.get(&surah).copied()
  }
}

/// Composition root: the dataset plus its lazily built, cached index.
#[derive(Debug)]
pub struct Quran {
  /// The immutable dataset the index is derived from
  dataset:    Dataset,
  /// Built on first access, never invalidated
  index:      OnceLock<QuranIndex>,
  /// Serializes the first build so it runs exactly once
  build_lock: Mutex<()>,
}

/// Process-wide instance set by [`Quran::install`].
static GLOBAL: OnceLock<Quran> = OnceLock::new();

impl Quran {
  /// Wraps a dataset. The index is not built until first used.
  pub fn new(dataset: Dataset) -> Self {
    Self { dataset, index: OnceLock::new(), build_lock: Mutex::new(()) }
  }

  /// Installs the process-wide instance.
  ///
  /// # Errors
  ///
  /// Fails with [`NoorError::AlreadyInstalled`] if an instance was already installed.
  pub fn install(dataset: Dataset) -> Result<&'static Quran> {
    GLOBAL.set(Quran::new(dataset)).map_err(|_| NoorError::AlreadyInstalled)?;
    Self::global().ok_or_else(|| NoorError::Config("Global Quran dataset missing".into()))
  }

  /// The process-wide instance, if one was installed.
  pub fn global() -> Option<&'static Quran> { GLOBAL.get() }

  /// The underlying dataset.
  pub fn dataset(&self) -> &Dataset { &self.dataset }

  /// Whether the index has been built yet.
  pub fn is_indexed(&self) -> bool { self.index.get().is_some() }

  /// Returns the cached index, building it on first call.
  ///
  /// Concurrent first callers block on the build lock, so the build runs exactly once.
  pub fn index(&self) -> Result<&QuranIndex> {
    if let Some(index) = self.index.get() {
      return Ok(index);
    }
    let _guard = self.build_lock.lock().map_err(|_| NoorError::Poisoned)?;
    if let Some(index) = self.index.get() {
      return Ok(index);
    }
    let index = QuranIndex::build(&self.dataset)?;
    Ok(self.index.get_or_init(|| index))
  }

  /// Row of the verse with `global_index`; builds the index if needed.
  pub fn position_of_ayah(&self, global_index: u32) -> Result<Option<usize>> {
    Ok(self.index()?.position_of_ayah(global_index))
  }

  /// Header row of chapter `surah`; builds the index if needed.
  pub fn position_of_surah(&self, surah: u16) -> Result<Option<usize>> {
    Ok(self.index()?.position_of_surah(surah))
  }

  /// Row of the first verse of a reading division.
  pub fn position_of_juz(&self, juz: u8) -> Result<Option<usize>> {
    match self.dataset.first_ayah_of_juz(juz) {
      Some(global_index) => self.position_of_ayah(global_index),
      None => Ok(None),
    }
  }

  /// Row of a `surah:ayah` reference.
  pub fn position_of_ref(&self, reference: AyahRef) -> Result<Option<usize>> {
    match self.dataset.ayah_by_ref(reference) {
      Some(ayah) => self.position_of_ayah(ayah.global_index),
      None => Ok(None),
    }
  }

  /// Resolves the row at `position` to its record.
  pub fn entry(&self, position: usize) -> Result<Option<ListEntry<'_>>> {
    Ok(self.index()?.item(position).and_then(|item| item.resolve(&self.dataset)))
  }
}
