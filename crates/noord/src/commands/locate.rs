//! Module for finding rows of the display list and their estimated scroll offsets.

use noor::{index::ListEntry, layout::ListLayout};

use super::*;

/// Options for [`Commands::Locate`].
#[derive(Args, Clone)]
pub struct LocateOptions {
  /// A chapter number (`2`) or a verse reference (`2:255`)
  pub reference: String,

  /// Treat the number as a juz and locate its first verse
  #[arg(long)]
  pub juz: bool,
}

/// Function for the [`Commands::Locate`] in the CLI.
pub fn locate(context: &Context, options: LocateOptions) -> Result<()> {
  let LocateOptions { reference, juz } = options;
  let quran = context.quran()?;

  let position = if reference.contains(':') {
    quran.position_of_ref(reference.parse::<AyahRef>()?)?
  } else {
    let number = reference
      .trim()
      .parse::<u16>()
      .map_err(|_| NoorError::InvalidReference(reference.clone()))?;
    if juz {
      let juz = u8::try_from(number).map_err(|_| NoorError::InvalidReference(reference.clone()))?;
      quran.position_of_juz(juz)?
    } else {
      quran.position_of_surah(number)?
    }
  };
  let label = if juz { format!("Juz {reference}") } else { reference.clone() };
  let position = position.ok_or(NoordError::NotFound(label))?;

  let layout = ListLayout::new(quran.index()?, quran.dataset(), &context.config.display);
  let offset = layout.offset_of(position).unwrap_or_default();
  let height = layout.height_of(position).unwrap_or_default();

  match quran.entry(position)? {
    Some(ListEntry::Surah(surah)) => {
      success(format!("Surah {} {} header is row {position}", surah.id, surah.name_english));
      if surah.shows_bismillah() {
        info("Header carries the Bismillah");
      }
    },
    Some(ListEntry::Ayah(ayah)) => {
      success(format!("Ayah {} (#{}) is row {position}", ayah.id, ayah.global_index));
      info(format!("Page {}, juz {}", ayah.page, ayah.juz));
      println!("   {}", ayah.text_arabic);
    },
    None => return Err(NoordError::NotFound(format!("Row {position}"))),
  }
  info(format!("Offset {offset:.0}px, estimated height {height:.0}px"));
  Ok(())
}
