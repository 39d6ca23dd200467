//! Removal of previously generated sources.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{StalePolicy, ValidatedConfig};
use crate::error::{Error, Result};

/// Outcome of cleaning the output roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Top-level entries removed from the output roots
    pub removed: Vec<PathBuf>,
}

impl CleanReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Apply the stale-output policy ahead of generation.
pub(crate) fn apply_policy(config: &ValidatedConfig) -> Result<CleanReport> {
    match config.stale_outputs {
        StalePolicy::Accrete => Ok(CleanReport::default()),
        StalePolicy::Clean => {
            let mut report = CleanReport::default();
            for root in [&config.output_root, &config.test_output_root] {
                report.removed.extend(clear_dir(root)?);
            }
            if !report.is_empty() {
                warn!(removed = report.removed.len(), "removed stale outputs");
            }
            Ok(report)
        }
    }
}

/// Remove both output roots entirely. Roots that do not exist are skipped.
pub fn clean_output_roots(config: &ValidatedConfig) -> Result<CleanReport> {
    let mut report = CleanReport::default();
    for root in [&config.output_root, &config.test_output_root] {
        match fs::remove_dir_all(root) {
            Ok(()) => {
                debug!(root = %root.display(), "removed output root");
                report.removed.push(root.clone());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(clean_error(root, source)),
        }
    }
    Ok(report)
}

/// Empty `dir` but keep the directory itself.
fn clear_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(clean_error(dir, source)),
    };

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| clean_error(dir, source))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|source| clean_error(&path, source))?;

        let result = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|source| clean_error(&path, source))?;

        debug!(path = %path.display(), "removed stale output");
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

fn clean_error(path: &Path, source: io::Error) -> Box<Error> {
    Box::new(Error::Clean {
        path: path.to_path_buf(),
        source,
    })
}
