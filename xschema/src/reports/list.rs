//! List command report data structures.

use super::output::{Output, Report};

/// Schema files selected by the current configuration.
#[derive(Debug)]
pub struct ListReport {
    pub source_root: String,
    /// Selected files, relative to the source root, in discovery order.
    pub files: Vec<String>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.files.is_empty() {
            out.preformatted(&format!("No schema files found in {}", self.source_root));
            return;
        }

        out.section(&format!("Schema files in {}", self.source_root));
        for file in &self.files {
            out.list_item(file);
        }
    }
}
