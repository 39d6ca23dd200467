//! Schema definition files for xschema.
//!
//! A schema file is a JSON document declaring products (records) and
//! coproducts (closed unions) grouped into dotted namespaces. This crate
//! parses and validates single files; cross-file checks such as reference
//! resolution belong to the compiler.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod parse;
mod schema;
mod types;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use parse::{parse_file, parse_str};
pub use schema::{Coproduct, Definition, Field, Product, SchemaFile};
pub use types::{Primitive, TypeExpr};
pub use validate::{RUST_KEYWORDS, is_rust_keyword};
