//! Command line companion for the `noor` Quran and night-prayer library.
//!
//! This crate provides a CLI over the persisted reader and tracking state. It supports:
//! - Writing a configuration and creating the state store
//! - Inspecting the dataset and its flattened display index
//! - Locating chapters, verses and juz in the list with estimated scroll offsets
//! - Reading and setting the saved reading position
//! - Managing bookmarks
//! - Toggling night prayers and reviewing streaks and the activity heatmap
//! - Computing the Qibla bearing for a location
//!
//! # Usage
//!
//! ```bash
//! # Write ~/.noor/config.toml
//! noor init --dataset-path quran.json
//!
//! # Where is Ayat al-Kursi in the list?
//! noor locate 2:255
//!
//! # Bookmark it
//! noor bookmark add 2:255
//!
//! # Mark the first Tahajjud segment for tonight
//! noor track toggle today 1
//!
//! # Qibla from London, phone pointing at 100°
//! noor qibla 51.5074 -0.1278 --heading 100
//! ```
//!
//! Every command accepts `--config PATH` and `-v` flags for increasing log detail.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{fmt::Display, path::PathBuf, process::ExitCode, sync::Arc};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use noor::{
  config::Config,
  dataset::{Ayah, AyahRef, Dataset},
  error::NoorError,
  index::Quran,
  store::{PersistedState, SqliteStore},
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Quran index, bookmarks, night-prayer tracking and Qibla")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the config file. Defaults to `~/.noor/config.toml`.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

/// Configuration resolved for the running command.
pub struct Context {
  /// Where the config was read from, or would be written to
  config_path: PathBuf,
  /// The loaded config, defaults when the file does not exist
  config:      Config,
}

impl Context {
  /// Loads the config at `path`, or at the default location.
  fn load(path: Option<PathBuf>) -> Result<Self> {
    let config_path = match path {
      Some(path) => path,
      None => Config::default_path()?,
    };
    let config = Config::load_or_default(&config_path)?;
    trace!("Using config {config:?}");
    Ok(Self { config_path, config })
  }

  /// Opens the state store named by the config.
  fn store(&self) -> Result<SqliteStore> { Ok(SqliteStore::open(&self.config.database_path)?) }

  /// Loads the dataset named by the config.
  fn quran(&self) -> Result<Quran> {
    debug!("Loading dataset from {}", self.config.dataset_path.display());
    Ok(Quran::new(Dataset::load(&self.config.dataset_path)?))
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Entry point for the noor CLI application
///
/// Parses arguments, sets up logging and runs the requested command. Failures are printed with
/// an error prefix and turned into a non-zero exit code.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      failure(e);
      ExitCode::FAILURE
    },
  }
}

/// Dispatches the parsed command.
async fn run(cli: Cli) -> Result<()> {
  let context = Context::load(cli.config)?;
  match cli.command {
    Commands::Init(options) => init(&context, options),
    Commands::Index(options) => index(&context, options),
    Commands::Locate(options) => locate(&context, options),
    Commands::Position(options) => position(&context, options).await,
    Commands::Bookmark { cmd } => bookmark(&context, cmd),
    Commands::Track { cmd } => track(&context, cmd),
    Commands::Qibla(options) => qibla(options),
  }
}
