#![allow(unused_assignments)]

//! Build orchestration for xschema.
//!
//! This crate runs a generation pass: it validates a [`GenerateConfig`],
//! discovers schema files under the source root, hands them to a
//! [`SchemaCompiler`](xschema_core::SchemaCompiler) and registers the two
//! output roots with a [`BuildGraph`].

mod build_script;
mod config;
mod discovery;
mod error;
mod facade;
mod pass;
mod registrar;
mod stale;

// Configuration
pub use config::{
    CONFIG_FILE, ConfigOverrides, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR, DEFAULT_TEST_OUTPUT_DIR,
    GenerateConfig, SourceRoot, StalePolicy, ValidatedConfig,
};
// Discovery
pub use discovery::{CompiledPatterns, DEFAULT_EXCLUDES, DEFAULT_INCLUDE, PatternSet, discover};
// Errors
pub use error::{Error, ErrorKind, Result};
// Generation
pub use facade::generate;
pub use pass::{GenerationPass, PassReport, Prepared, PreviewReport};
pub use stale::{CleanReport, clean_output_roots};
// Registration
pub use build_script::{run_build_script, run_with_directives};
pub use registrar::{
    BuildGraph, CargoDirectives, GENERATED_SOURCES_ENV, GENERATED_TEST_SOURCES_ENV, ProjectModel,
    RegisteredRoots, register_roots,
};
