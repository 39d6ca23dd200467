//! Core operations.
//!
//! This module contains the business logic for xschema commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod generate;
pub mod list;

use std::path::Path;

pub use check::check;
pub use clean::clean;
pub use generate::{emit_cargo, generate, preview};
pub use list::list;

/// Render `path` relative to `base` when it lies below it.
pub(crate) fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Render `path` relative to the working directory when possible.
pub(crate) fn display_path(path: &Path) -> String {
    match std::env::current_dir() {
        Ok(cwd) => display_relative(path, &cwd),
        Err(_) => path.display().to_string(),
    }
}
