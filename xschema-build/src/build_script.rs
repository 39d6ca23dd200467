//! Entry point for Cargo build scripts.
//!
//! ```no_run
//! // build.rs
//! use xschema_build::{GenerateConfig, run_build_script};
//! use xschema_codegen::RustCompiler;
//!
//! fn main() {
//!     let config = GenerateConfig::for_build_script().unwrap();
//!     run_build_script(config, &RustCompiler).unwrap();
//! }
//! ```

use std::io::Write;

use xschema_core::SchemaCompiler;

use crate::config::GenerateConfig;
use crate::error::{Error, Result};
use crate::pass::{GenerationPass, PassReport};
use crate::registrar::CargoDirectives;

/// Run a pass that registers roots through Cargo directives on stdout.
pub fn run_build_script(
    config: GenerateConfig,
    compiler: &dyn SchemaCompiler,
) -> Result<PassReport> {
    run_with_directives(config, compiler, &mut CargoDirectives::stdout())
}

/// Like [`run_build_script`], writing directives to `directives`.
///
/// Besides the source-root variables, a `rerun-if-changed` line is emitted
/// for the source root and every discovered schema file.
pub fn run_with_directives<W: Write>(
    config: GenerateConfig,
    compiler: &dyn SchemaCompiler,
    directives: &mut CargoDirectives<W>,
) -> Result<PassReport> {
    let pass = GenerationPass::new(config);
    let prepared = pass.prepare()?;

    let source_root = prepared.config.source_root.path().to_path_buf();
    for path in std::iter::once(&source_root).chain(&prepared.files) {
        directives.rerun_if_changed(path).map_err(|report| {
            Box::new(Error::Registration {
                path: path.clone(),
                message: Error::chain_message(&report),
            })
        })?;
    }

    pass.execute(prepared, compiler, directives)
}
