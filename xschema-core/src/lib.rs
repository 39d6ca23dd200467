//! Core utilities and types for the xschema generator.
//!
//! This crate holds the contract between the build orchestration in
//! `xschema-build` and whichever schema compiler is plugged into it, plus
//! the file-writing primitives compilers use to emit sources.

mod compiler;
mod file;
mod utils;

// Compiler boundary
pub use compiler::{CompileReport, OutputKind, PreviewFile, SchemaCompiler};
// File operations
pub use file::{FileRules, GENERATED_HEADER, GeneratedFile, WriteResult};
// String utilities
pub use utils::{to_pascal_case, to_snake_case};
