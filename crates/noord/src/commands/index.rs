//! Module for summarizing the dataset and its flattened display index.

use noor::layout::ListLayout;

use super::*;

/// Options for [`Commands::Index`].
#[derive(Args, Clone)]
pub struct IndexOptions {
  /// List every chapter with its header row
  #[arg(long)]
  pub surahs: bool,
}

/// Function for the [`Commands::Index`] in the CLI.
pub fn index(context: &Context, options: IndexOptions) -> Result<()> {
  let quran = context.quran()?;
  let dataset = quran.dataset();
  let index = quran.index()?;
  let layout = ListLayout::new(index, dataset, &context.config.display);

  info(format!(
    "{} surahs, {} ayahs, {} rows",
    dataset.surahs().len(),
    dataset.total_ayah_count(),
    index.len()
  ));
  info(format!("Estimated list height: {:.0}px", layout.total_height()));

  if options.surahs {
    let mut lines = Vec::with_capacity(dataset.surahs().len());
    for surah in dataset.surahs() {
      let row = index.position_of_surah(surah.id).unwrap_or_default();
      lines.push(format!(
        "{:>3} {} ({}) {} ayahs, {:?}, row {row}",
        surah.id, surah.name_english, surah.name_arabic, surah.ayah_count, surah.revelation_type
      ));
    }
    list(&lines);
  }
  Ok(())
}
