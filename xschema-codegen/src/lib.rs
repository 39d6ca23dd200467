//! Reference schema compiler for xschema.
//!
//! [`RustCompiler`] implements [`SchemaCompiler`] by emitting, for every
//! selected namespace `a.b`:
//!
//! - `<output>/a/b.rs` - one serde-enabled struct or enum per definition
//! - `<test output>/a/b.rs` - a JSON round-trip test per definition
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder)
//! - [`catalog`] - Cross-file definition index and reference resolution
//! - [`files`] - The generated files

pub mod builder;
pub mod catalog;
pub mod files;

mod compiler;
mod naming;
mod type_mapper;

pub use compiler::RustCompiler;
pub use type_mapper::RustTypeMapper;
pub use xschema_core::{CompileReport, OutputKind, PreviewFile, SchemaCompiler};
