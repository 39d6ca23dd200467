//! Check operation - schema validation.

use xschema_build::{GenerationPass, Prepared, Result};
use xschema_codegen::catalog::Catalog;

use super::{display_path, display_relative};
use crate::reports::{CheckReport, CheckedFile};

/// Execute the check operation.
///
/// Every discovered file is parsed on its own so one broken file does not
/// hide problems in the others. Cross-file checks (duplicate definitions,
/// references, the namespace filter) only run once every file parses.
pub fn check(pass: &GenerationPass) -> Result<CheckReport> {
    let Prepared { config, files } = pass.prepare()?;
    let root = config.source_root.path();

    let mut catalog = Catalog::default();
    let mut checked = Vec::with_capacity(files.len());
    let mut errors = Vec::new();

    for path in &files {
        let outcome = match xschema_schema::parse_file(path) {
            Ok(schema) => {
                let count = schema.definitions.len();
                if let Err(e) = catalog.insert(path, schema) {
                    errors.push(format!("{:#}", e));
                }
                Ok(count)
            }
            Err(e) => Err(format!("{:?}", miette::Report::new(*e))),
        };
        checked.push(CheckedFile {
            path: display_relative(path, root),
            outcome,
        });
    }

    let parsed = checked.iter().all(|f| f.outcome.is_ok());
    if parsed && errors.is_empty() && !files.is_empty() {
        if let Err(e) = catalog.check_references() {
            errors.push(format!("{:#}", e));
        } else if let Err(e) = catalog.select(&config.namespaces) {
            errors.push(format!("{:#}", e));
        }
    }

    Ok(CheckReport {
        source_root: display_path(root),
        files: checked,
        errors,
    })
}
