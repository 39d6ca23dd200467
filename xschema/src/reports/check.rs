//! Check command report data structures.

use super::generate::plural;
use super::output::{Output, Report};

/// Validation outcome for one schema file.
#[derive(Debug)]
pub struct CheckedFile {
    /// Path relative to the source root.
    pub path: String,
    /// Number of definitions, or the rendered diagnostic.
    pub outcome: Result<usize, String>,
}

/// Report data from schema validation.
#[derive(Debug)]
pub struct CheckReport {
    pub source_root: String,
    pub files: Vec<CheckedFile>,
    /// Errors spanning several files, such as unresolved references.
    pub errors: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.files.iter().all(|f| f.outcome.is_ok())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            if let Err(diagnostic) = &file.outcome {
                out.error(diagnostic);
            }
        }
        for error in &self.errors {
            out.error(error);
        }

        if self.files.is_empty() {
            out.preformatted(&format!("No schema files found in {}", self.source_root));
            return;
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} schema file{} in {} {} valid",
                self.files.len(),
                plural(self.files.len()),
                self.source_root,
                if self.files.len() == 1 { "is" } else { "are" }
            ));
            for file in &self.files {
                if let Ok(count) = &file.outcome {
                    out.list_item(&format!(
                        "{} ({} definition{})",
                        file.path,
                        count,
                        plural(*count)
                    ));
                }
            }
        } else {
            let failed = self.files.iter().filter(|f| f.outcome.is_err()).count();
            out.preformatted(&format!(
                "✗ {} of {} schema file{} failed validation",
                failed,
                self.files.len(),
                plural(self.files.len())
            ));
        }
    }
}
