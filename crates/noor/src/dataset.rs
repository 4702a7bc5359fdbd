//! Immutable scripture dataset: verse and chapter records.
//!
//! The dataset is loaded once from static structured data (the bundled `quran.json`, shaped as
//! `{ "ayahs": [...], "surahs": [...] }`) and never mutated afterwards. Construction validates
//! the structural invariants every consumer relies on:
//!
//! - global indices are contiguous from [`FIRST_GLOBAL_INDEX`] and strictly increasing
//! - verses are ordered by (chapter, verse) with 1-based contiguous verse numbers
//! - every chapter's verse count and start index agree with the verse records
//!
//! A verse that points at a chapter missing from the chapter records is left for
//! [`QuranIndex::build`](crate::index::QuranIndex::build) to reject.
//!
//! # Examples
//!
//! ```no_run
//! use noor::dataset::{AyahRef, Dataset};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::load("quran.json")?;
//! let kursi = dataset.ayah_by_ref("2:255".parse::<AyahRef>()?).unwrap();
//! println!("{} is on page {}", kursi.id, kursi.page);
//! # Ok(())
//! # }
//! ```

use super::*;

/// Global sequence number of the first verse in the dataset.
pub const FIRST_GLOBAL_INDEX: u32 = 1;

/// Number of chapters in the Quran.
pub const SURAH_COUNT: u16 = 114;

/// A single verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
  /// Human readable `"surah:ayah"` id
  pub id:           String,
  /// Dataset-wide sequence number, the canonical addressing key
  pub global_index: u32,
  /// Chapter number, 1-based
  pub surah_number: u16,
  /// Verse number within the chapter, 1-based
  pub ayah_number:  u16,
  /// Display text (right-to-left script)
  pub text_arabic:  String,
  /// Mushaf page number
  pub page:         u16,
  /// Reading division
  pub juz:          u8,
}

/// A chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
  /// Chapter number, 1..=114
  pub id:               u16,
  /// Arabic name
  pub name_arabic:      String,
  /// Transliterated name
  pub name_english:     String,
  /// Number of verses in the chapter
  pub ayah_count:       u16,
  /// Where the chapter was revealed
  pub revelation_type:  RevelationType,
  /// Global index of the chapter's first verse
  pub start_ayah_index: u32,
}

/// Revelation classification of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationType {
  /// Revealed in Makkah
  Makkah,
  /// Revealed in Madinah
  Madinah,
}

impl Surah {
  /// Whether the chapter header carries the Bismillah block.
  ///
  /// Every chapter opens with it except Al-Fatihah, where it is the first verse, and
  /// At-Tawbah, which has none.
  pub fn shows_bismillah(&self) -> bool { self.id != 1 && self.id != 9 }
}

/// A `surah:ayah` reference as typed by a reader, e.g. `2:255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AyahRef {
  /// Chapter number
  pub surah: u16,
  /// Verse number within the chapter
  pub ayah:  u16,
}

lazy_static! {
  /// Matches `surah:ayah` with optional surrounding whitespace.
  static ref AYAH_REF: Regex = Regex::new(r"^\s*(\d{1,3})\s*:\s*(\d{1,3})\s*$").unwrap();
}

impl FromStr for AyahRef {
  type Err = NoorError;

  fn from_str(s: &str) -> Result<Self> {
    let invalid = || NoorError::InvalidReference(s.to_owned());
    let captures = AYAH_REF.captures(s).ok_or_else(invalid)?;
    let surah = captures[1].parse::<u16>().map_err(|_| invalid())?;
    let ayah = captures[2].parse::<u16>().map_err(|_| invalid())?;
    if surah == 0 || surah > SURAH_COUNT || ayah == 0 {
      return Err(invalid());
    }
    Ok(Self { surah, ayah })
  }
}

impl Display for AyahRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.surah, self.ayah)
  }
}

/// On-disk shape of the dataset.
#[derive(Deserialize)]
struct RawDataset {
  /// Verses in dataset order
  ayahs:  Vec<Ayah>,
  /// Chapters in chapter order
  surahs: Vec<Surah>,
}

/// The validated, immutable scripture dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
  /// Verses sorted by (surah, ayah); position `i` holds global index `FIRST_GLOBAL_INDEX + i`
  ayahs:       Vec<Ayah>,
  /// Chapters sorted by id
  surahs:      Vec<Surah>,
  /// Chapter id to its slot in `surahs`
  surah_by_id: HashMap<u16, usize>,
}

impl Dataset {
  /// Validates and wraps verse and chapter records.
  ///
  /// # Errors
  ///
  /// Returns a data-integrity error when any invariant in the module docs is violated.
  pub fn new(ayahs: Vec<Ayah>, surahs: Vec<Surah>) -> Result<Self> {
    validate_surahs(&surahs)?;
    validate_ayahs(&ayahs)?;

    let mut counts: HashMap<u16, (usize, u32)> = HashMap::new();
    for ayah in &ayahs {
      counts.entry(ayah.surah_number).or_insert((0, ayah.global_index)).0 += 1;
    }
    for surah in &surahs {
      let (found, first) = counts.get(&surah.id).copied().unwrap_or((0, 0));
      if found != usize::from(surah.ayah_count) {
        return Err(NoorError::AyahCountMismatch {
          surah: surah.id,
          declared: surah.ayah_count,
          found,
        });
      }
      if first != surah.start_ayah_index {
        return Err(NoorError::InvalidDataset(format!(
          "surah {} starts at global index {first}, record says {}",
          surah.id, surah.start_ayah_index
        )));
      }
    }

    let surah_by_id = surahs.iter().enumerate().map(|(slot, surah)| (surah.id, slot)).collect();
    debug!("Loaded dataset with {} surahs and {} ayahs", surahs.len(), ayahs.len());
    Ok(Self { ayahs, surahs, surah_by_id })
  }

  /// Parses a dataset from its JSON representation.
  pub fn from_json(json: &str) -> Result<Self> {
    let RawDataset { ayahs, surahs } = serde_json::from_str(json)?;
    Self::new(ayahs, surahs)
  }

  /// Reads and parses a dataset file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    trace!("Reading dataset from {}", path.display());
    Self::from_json(&std::fs::read_to_string(path)?)
  }

  /// All verses in dataset order.
  pub fn ayahs(&self) -> &[Ayah] { &self.ayahs }

  /// All chapters in chapter order.
  pub fn surahs(&self) -> &[Surah] { &self.surahs }

  /// Total number of verses.
  pub fn total_ayah_count(&self) -> usize { self.ayahs.len() }

  /// O(1) verse lookup by global index.
  pub fn ayah(&self, global_index: u32) -> Option<&Ayah> {
    let slot = global_index.checked_sub(FIRST_GLOBAL_INDEX)?;
    self.ayahs.get(usize::try_from(slot).ok()?)
  }

  /// O(1) chapter lookup by chapter number.
  pub fn surah(&self, id: u16) -> Option<&Surah> {
    self.surah_by_id.get(&id).map(|&slot| &self.surahs[slot])
  }

  /// The contiguous run of verses belonging to a chapter, empty for unknown chapters.
  pub fn ayahs_for_surah(&self, surah: u16) -> &[Ayah] {
    let Some(surah) = self.surah(surah) else { return &[] };
    let start = (surah.start_ayah_index - FIRST_GLOBAL_INDEX) as usize;
    &self.ayahs[start..start + usize::from(surah.ayah_count)]
  }

  /// Resolves a `surah:ayah` reference.
  pub fn ayah_by_ref(&self, reference: AyahRef) -> Option<&Ayah> {
    self.ayahs_for_surah(reference.surah).get(usize::from(reference.ayah).checked_sub(1)?)
  }

  /// Global index of the first verse in a reading division.
  pub fn first_ayah_of_juz(&self, juz: u8) -> Option<u32> {
    self.ayahs.iter().find(|ayah| ayah.juz == juz).map(|ayah| ayah.global_index)
  }
}

/// Checks chapter ids are in range, unique and increasing.
fn validate_surahs(surahs: &[Surah]) -> Result<()> {
  let mut previous = 0;
  for surah in surahs {
    if surah.id == 0 || surah.id > SURAH_COUNT {
      return Err(NoorError::InvalidDataset(format!("surah id {} out of range", surah.id)));
    }
    if surah.id <= previous {
      return Err(NoorError::InvalidDataset(format!(
        "surah {} listed after surah {previous}",
        surah.id
      )));
    }
    if surah.ayah_count == 0 {
      return Err(NoorError::InvalidDataset(format!("surah {} has no ayahs", surah.id)));
    }
    previous = surah.id;
  }
  Ok(())
}

/// Checks verse ordering, numbering and global index contiguity.
fn validate_ayahs(ayahs: &[Ayah]) -> Result<()> {
  let mut previous: Option<&Ayah> = None;
  for (expected, ayah) in (FIRST_GLOBAL_INDEX..).zip(ayahs) {
    if ayah.global_index != expected {
      return Err(NoorError::NonContiguousIndex { expected, found: ayah.global_index });
    }
    if ayah.id != format!("{}:{}", ayah.surah_number, ayah.ayah_number) {
      return Err(NoorError::InvalidDataset(format!(
        "ayah {} has id \"{}\"",
        ayah.global_index, ayah.id
      )));
    }
    let expected_number = match previous {
      Some(prev) if prev.surah_number == ayah.surah_number => prev.ayah_number + 1,
      Some(prev) if prev.surah_number > ayah.surah_number => {
        return Err(NoorError::InvalidDataset(format!(
          "ayah {} out of surah order",
          ayah.global_index
        )))
      },
      _ => 1,
    };
    if ayah.ayah_number != expected_number {
      return Err(NoorError::InvalidDataset(format!(
        "ayah {} should be number {expected_number} of surah {}",
        ayah.id, ayah.surah_number
      )));
    }
    previous = Some(ayah);
  }
  Ok(())
}
