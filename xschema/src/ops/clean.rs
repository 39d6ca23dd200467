//! Clean operation - remove the generated output roots.

use xschema_build::{GenerationPass, Result, clean_output_roots};

use super::display_path;
use crate::reports::CleanReport;

/// Execute the clean operation.
///
/// With `dry_run` the roots that exist are reported but left in place.
pub fn clean(pass: &GenerationPass, dry_run: bool) -> Result<CleanReport> {
    let config = pass.config().validate()?;

    let removed = if dry_run {
        [&config.output_root, &config.test_output_root]
            .into_iter()
            .filter(|root| root.exists())
            .cloned()
            .collect()
    } else {
        clean_output_roots(&config)?.removed
    };

    Ok(CleanReport {
        dry_run,
        removed: removed.iter().map(|p| display_path(p)).collect(),
    })
}
