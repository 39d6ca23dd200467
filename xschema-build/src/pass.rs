//! One generation pass, start to finish.
//!
//! A pass is the sequence configure → discover → generate → register. Each
//! step only runs if the previous one succeeded, so a failed pass never
//! leaves the build graph pointing at roots the compiler did not fill.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use xschema_core::{CompileReport, OutputKind, PreviewFile, SchemaCompiler};

use crate::config::{GenerateConfig, ValidatedConfig};
use crate::discovery::discover;
use crate::error::{Error, Result};
use crate::facade::generate;
use crate::registrar::{BuildGraph, RegisteredRoots, register_roots};
use crate::stale::{CleanReport, apply_policy};

/// A validated configuration together with the files it selects.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub config: ValidatedConfig,
    pub files: Vec<PathBuf>,
}

/// What a successful pass did.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub source_root: PathBuf,
    pub files: Vec<PathBuf>,
    pub cleaned: CleanReport,
    pub compile: CompileReport,
    pub registered: RegisteredRoots,
}

/// What a pass would write, computed without touching disk.
#[derive(Debug, Clone)]
pub struct PreviewReport {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub test_output_root: PathBuf,
    pub files: Vec<PathBuf>,
    pub previews: Vec<PreviewFile>,
}

impl PreviewReport {
    /// Absolute destination of a previewed file.
    pub fn destination(&self, preview: &PreviewFile) -> PathBuf {
        let root: &Path = match preview.kind {
            OutputKind::Main => &self.output_root,
            OutputKind::Test => &self.test_output_root,
        };
        root.join(&preview.path)
    }
}

#[derive(Debug, Clone)]
pub struct GenerationPass {
    config: GenerateConfig,
}

impl GenerationPass {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Validate the configuration and discover schema files.
    pub fn prepare(&self) -> Result<Prepared> {
        let config = self.config.validate()?;
        debug!(
            source = %config.source_root.path().display(),
            output = %config.output_root.display(),
            test_output = %config.test_output_root.display(),
            "validated configuration"
        );
        let files = discover(&config.source_root, &config.patterns)?;
        Ok(Prepared { config, files })
    }

    /// Run the whole pass.
    pub fn run(
        &self,
        compiler: &dyn SchemaCompiler,
        graph: &mut dyn BuildGraph,
    ) -> Result<PassReport> {
        let prepared = self.prepare()?;
        self.execute(prepared, compiler, graph)
    }

    /// Finish a pass from an already prepared state.
    pub fn execute(
        &self,
        prepared: Prepared,
        compiler: &dyn SchemaCompiler,
        graph: &mut dyn BuildGraph,
    ) -> Result<PassReport> {
        let Prepared { config, files } = prepared;

        let cleaned = apply_policy(&config)?;
        let compile = generate(
            compiler,
            &files,
            &config.output_root,
            &config.test_output_root,
            &config.namespaces,
        )?;
        let registered = register_roots(graph, &config.output_root, &config.test_output_root)?;

        info!(
            files = files.len(),
            namespaces = compile.namespaces.len(),
            written = compile.files_written.len() + compile.test_files_written.len(),
            "generation pass complete"
        );

        Ok(PassReport {
            source_root: config.source_root.path().to_path_buf(),
            files,
            cleaned,
            compile,
            registered,
        })
    }

    /// Validate, discover and ask the compiler what it would emit.
    ///
    /// No stale outputs are removed, nothing is written and nothing is
    /// registered.
    pub fn preview(&self, compiler: &dyn SchemaCompiler) -> Result<PreviewReport> {
        let Prepared { config, files } = self.prepare()?;
        let previews = compiler
            .preview(&files, &config.namespaces)
            .map_err(|report| {
                Box::new(Error::Generation {
                    compiler: compiler.name().to_string(),
                    message: Error::chain_message(&report),
                })
            })?;

        Ok(PreviewReport {
            source_root: config.source_root.path().to_path_buf(),
            output_root: config.output_root,
            test_output_root: config.test_output_root,
            files,
            previews,
        })
    }
}
