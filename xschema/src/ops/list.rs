//! List operation - show the files a pass would compile.

use xschema_build::{GenerationPass, Prepared, Result};

use super::{display_path, display_relative};
use crate::reports::ListReport;

pub fn list(pass: &GenerationPass) -> Result<ListReport> {
    let Prepared { config, files } = pass.prepare()?;
    let root = config.source_root.path();

    Ok(ListReport {
        source_root: display_path(root),
        files: files.iter().map(|f| display_relative(f, root)).collect(),
    })
}
