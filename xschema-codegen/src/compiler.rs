use std::path::{Path, PathBuf};

use eyre::Result;
use tracing::{debug, info};
use xschema_core::{CompileReport, GeneratedFile, OutputKind, PreviewFile, SchemaCompiler};

use crate::{
    catalog::Catalog,
    files::{TestsRs, TypesRs},
    naming::namespace_file,
};

/// Schema compiler that emits serde-based Rust types and round-trip tests
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCompiler;

impl RustCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Load, cross-check and filter the inputs of one run.
    fn prepare(files: &[PathBuf], namespaces: &[String]) -> Result<(Catalog, Vec<String>)> {
        let catalog = Catalog::load(files)?;
        catalog.check_references()?;
        let selected = catalog
            .select(namespaces)?
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok((catalog, selected))
    }
}

impl SchemaCompiler for RustCompiler {
    fn name(&self) -> &'static str {
        "xschema-rust"
    }

    fn generate_from_files(
        &self,
        files: &[PathBuf],
        output_dir: &Path,
        test_output_dir: &Path,
        namespaces: &[String],
    ) -> Result<CompileReport> {
        if files.is_empty() {
            info!("no schema files to compile");
            return Ok(CompileReport::default());
        }

        let (catalog, selected) = Self::prepare(files, namespaces)?;
        let mut report = CompileReport::default();

        for ns in &selected {
            let types = TypesRs::new(&catalog, ns);
            let tests = TestsRs::new(&catalog, ns);

            let written = types.write(output_dir)?;
            debug!(namespace = %ns, ?written, "emitted types");
            let written = tests.write(test_output_dir)?;
            debug!(namespace = %ns, ?written, "emitted tests");

            report.definitions += catalog.definitions(ns).count();
            report.files_written.push(types.path(output_dir));
            report.test_files_written.push(tests.path(test_output_dir));
        }
        report.namespaces = selected;

        Ok(report)
    }

    fn preview(&self, files: &[PathBuf], namespaces: &[String]) -> Result<Vec<PreviewFile>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let (catalog, selected) = Self::prepare(files, namespaces)?;
        let mut previews = Vec::with_capacity(selected.len() * 2);
        for ns in &selected {
            previews.push(PreviewFile {
                kind: OutputKind::Main,
                path: namespace_file(ns),
                content: TypesRs::new(&catalog, ns).contents(),
            });
            previews.push(PreviewFile {
                kind: OutputKind::Test,
                path: namespace_file(ns),
                content: TestsRs::new(&catalog, ns).contents(),
            });
        }
        Ok(previews)
    }
}
