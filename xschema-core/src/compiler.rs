//! The schema compiler boundary.

use std::path::{Path, PathBuf};

use eyre::Result;

/// A compiler that turns schema files into source code.
///
/// The orchestration layer only ever talks to a compiler through this trait.
/// Parsing, type resolution and code emission all live behind it.
pub trait SchemaCompiler {
    /// Compiler identifier used in diagnostics (e.g., "xschema-rust")
    fn name(&self) -> &'static str;

    /// Generate sources for `files` into the two output directories.
    ///
    /// `namespaces` restricts output to the listed namespaces; an empty slice
    /// means no restriction. An empty `files` slice is valid and produces no
    /// output.
    fn generate_from_files(
        &self,
        files: &[PathBuf],
        output_dir: &Path,
        test_output_dir: &Path,
        namespaces: &[String],
    ) -> Result<CompileReport>;

    /// Render what `generate_from_files` would write, without touching disk.
    fn preview(&self, files: &[PathBuf], namespaces: &[String]) -> Result<Vec<PreviewFile>>;
}

/// Summary of a successful compiler run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Namespaces that produced output, in emission order
    pub namespaces: Vec<String>,
    /// Number of type definitions emitted
    pub definitions: usize,
    /// Production source files written
    pub files_written: Vec<PathBuf>,
    /// Test source files written
    pub test_files_written: Vec<PathBuf>,
}

impl CompileReport {
    /// Whether the run produced no files at all.
    pub fn is_empty(&self) -> bool {
        self.files_written.is_empty() && self.test_files_written.is_empty()
    }
}

/// Which output root a generated file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Production sources
    Main,
    /// Test sources
    Test,
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKind::Main => write!(f, "main"),
            OutputKind::Test => write!(f, "test"),
        }
    }
}

/// A generated file for preview
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// Output root the file would be written under
    pub kind: OutputKind,
    /// Relative path from the output root
    pub path: String,
    /// File content
    pub content: String,
}
