//! Module for reading and setting the saved reading position.

use noor::{
  mushaf::{MushafPositionSink, MushafState},
  position::PositionDebouncer,
};

use super::*;

/// Options for [`Commands::Position`].
#[derive(Args, Clone)]
pub struct PositionOptions {
  /// Save this verse, as `surah:ayah` or global index, as the reading position
  #[arg(long)]
  pub set: Option<String>,
}

/// Function for the [`Commands::Position`] in the CLI.
pub async fn position(context: &Context, options: PositionOptions) -> Result<()> {
  let quran = context.quran()?;
  let store = Arc::new(context.store()?);

  if let Some(target) = options.set {
    let ayah = resolve_ayah(&quran, &target)?;
    let sink = Arc::new(MushafPositionSink::new(store));
    let mut debouncer = PositionDebouncer::new(sink, context.config.debounce())?;
    debouncer.update(ayah.global_index);
    // the process exits right after, so write now instead of waiting out the window
    debouncer.flush()?;
    success(format!("Reading position set to {} (#{})", ayah.id, ayah.global_index));
    return Ok(());
  }

  let state = MushafState::load(store.as_ref())?;
  match (state.restore_position(&quran)?, quran.dataset().ayah(state.current_position)) {
    (Some(row), Some(ayah)) =>
      info(format!("Reading position: {} (#{}), row {row}", ayah.id, ayah.global_index)),
    _ => warning(format!(
      "Saved position #{} is not in the dataset, the reader will start from the top",
      state.current_position
    )),
  }
  Ok(())
}
