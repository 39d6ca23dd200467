//! Generate command report data structures.

use super::output::{Output, Report};

/// Report data from a completed generation pass.
#[derive(Debug)]
pub struct GenerateReport {
    /// Source root the pass scanned.
    pub source_root: String,
    /// Schema files handed to the compiler, relative to the source root.
    pub files: Vec<String>,
    /// Namespaces that produced output.
    pub namespaces: Vec<String>,
    /// Number of definitions emitted.
    pub definitions: usize,
    /// Entries removed from the output roots before generation.
    pub cleaned: Vec<String>,
    /// Production sources written.
    pub written: Vec<String>,
    /// Test sources written.
    pub test_written: Vec<String>,
    /// Root registered for compilation.
    pub compile_root: String,
    /// Root registered for test compilation.
    pub test_compile_root: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if self.files.is_empty() {
            out.preformatted(&format!("No schema files found in {}", self.source_root));
        } else {
            out.preformatted(&format!(
                "Generated {} definition{} in {} namespace{} from {} schema file{}",
                self.definitions,
                plural(self.definitions),
                self.namespaces.len(),
                plural(self.namespaces.len()),
                self.files.len(),
                plural(self.files.len()),
            ));
        }

        if !self.cleaned.is_empty() {
            out.newline();
            out.section("Removed stale outputs");
            for path in &self.cleaned {
                out.removed_item(path);
            }
        }

        if !self.written.is_empty() || !self.test_written.is_empty() {
            out.newline();
            out.section("Written");
            for path in self.written.iter().chain(&self.test_written) {
                out.added_item(path);
            }
        }

        out.newline();
        out.key_value("Sources", &self.compile_root);
        out.key_value("Test sources", &self.test_compile_root);
    }
}

/// A file the compiler would write.
#[derive(Debug)]
pub struct PreviewedFile {
    /// Destination path.
    pub path: String,
    /// Rendered content.
    pub content: String,
}

/// Report data from a dry run.
#[derive(Debug)]
pub struct PreviewReport {
    pub files: Vec<PreviewedFile>,
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} file{} would be generated",
            self.files.len(),
            plural(self.files.len())
        ));
    }
}

pub(super) fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
