//! Styled terminal output shared by the commands.

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for list entries
pub static ITEM_PREFIX: &str = "├─";
/// Prefix for the final list entry
pub static LAST_ITEM_PREFIX: &str = "└─";

/// Prints an informational line.
pub fn info(message: impl Display) { println!("{} {message}", style(INFO_PREFIX).blue()); }

/// Prints a success line.
pub fn success(message: impl Display) { println!("{} {message}", style(SUCCESS_PREFIX).green()); }

/// Prints a warning line.
pub fn warning(message: impl Display) {
  println!("{} {message}", style(WARNING_PREFIX).yellow());
}

/// Prints an error line to stderr.
pub fn failure(message: impl Display) { eprintln!("{} {message}", style(ERROR_PREFIX).red()); }

/// Prints `items` as a tree under the previous line.
pub fn list<T: Display>(items: &[T]) {
  for (i, item) in items.iter().enumerate() {
    let prefix = if i + 1 == items.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
    println!("   {} {item}", style(prefix).dim());
  }
}
