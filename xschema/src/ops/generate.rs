//! Generate operation - run a pass against the reference compiler.

use xschema_build::{GenerationPass, ProjectModel, Result, run_build_script};
use xschema_core::SchemaCompiler;

use super::{display_path, display_relative};
use crate::reports::{GenerateReport, PreviewReport, PreviewedFile};

/// Run a full pass, registering roots with an in-memory project model.
pub fn generate(pass: &GenerationPass, compiler: &dyn SchemaCompiler) -> Result<GenerateReport> {
    let mut model = ProjectModel::new();
    let report = pass.run(compiler, &mut model)?;
    let paths = |paths: &[std::path::PathBuf]| -> Vec<String> {
        paths.iter().map(|p| display_path(p)).collect()
    };

    Ok(GenerateReport {
        source_root: display_path(&report.source_root),
        files: report
            .files
            .iter()
            .map(|f| display_relative(f, &report.source_root))
            .collect(),
        namespaces: report.compile.namespaces,
        definitions: report.compile.definitions,
        cleaned: paths(&report.cleaned.removed),
        written: paths(&report.compile.files_written),
        test_written: paths(&report.compile.test_files_written),
        compile_root: paths(model.compile_source_roots()).join(", "),
        test_compile_root: paths(model.test_compile_source_roots()).join(", "),
    })
}

/// Run a full pass that reports roots as Cargo directives on stdout.
pub fn emit_cargo(pass: &GenerationPass, compiler: &dyn SchemaCompiler) -> Result<()> {
    run_build_script(pass.config().clone(), compiler)?;
    Ok(())
}

/// Render what a pass would write without touching disk.
pub fn preview(pass: &GenerationPass, compiler: &dyn SchemaCompiler) -> Result<PreviewReport> {
    let report = pass.preview(compiler)?;

    Ok(PreviewReport {
        files: report
            .previews
            .iter()
            .map(|p| PreviewedFile {
                path: display_path(&report.destination(p)),
                content: p.content.clone(),
            })
            .collect(),
    })
}
