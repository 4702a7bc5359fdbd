//! Module for writing a fresh [`Config`] and creating the state store.

use super::*;

/// Options for [`Commands::Init`].
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Where bookmarks, the reading position and tracking records are stored
  #[arg(long)]
  pub database_path: Option<PathBuf>,

  /// Scripture dataset JSON file
  #[arg(long)]
  pub dataset_path: Option<PathBuf>,

  /// Overwrite an existing config
  #[arg(long)]
  pub force: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init(context: &Context, options: InitOptions) -> Result<()> {
  let InitOptions { database_path, dataset_path, force } = options;
  if context.config_path.exists() && !force {
    return Err(NoordError::AlreadyInitialized(context.config_path.clone()));
  }

  let mut config = Config::default();
  if let Some(path) = database_path {
    config = config.with_database_path(path);
  }
  if let Some(path) = dataset_path {
    config = config.with_dataset_path(path);
  }

  config.save(&context.config_path)?;
  SqliteStore::open(&config.database_path)?;

  success(format!("Created config at {}", context.config_path.display()));
  list(&[
    format!("Database: {}", config.database_path.display()),
    format!("Dataset: {}", config.dataset_path.display()),
  ]);
  if !config.dataset_path.exists() {
    warning(format!(
      "No dataset found at {}, commands that read scripture will fail until one is placed there",
      config.dataset_path.display()
    ));
  }
  Ok(())
}
