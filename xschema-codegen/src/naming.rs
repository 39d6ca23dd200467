//! Rust naming conventions for generated code.

use xschema_core::{to_pascal_case, to_snake_case};
use xschema_schema::is_rust_keyword;

/// Type name for a definition (e.g., "street_address" -> "StreetAddress").
pub fn type_name(name: &str) -> String {
    to_pascal_case(name)
}

/// Field name for a schema field, escaping keywords as raw identifiers.
pub fn field_name(name: &str) -> String {
    let snake = to_snake_case(name);
    if is_rust_keyword(&snake) {
        format!("r#{}", snake)
    } else {
        snake
    }
}

/// Module path for a namespace (e.g., "com.example" -> "com::example").
pub fn module_path(namespace: &str) -> String {
    namespace.split('.').collect::<Vec<_>>().join("::")
}

/// File path of a namespace relative to an output root
/// (e.g., "com.example" -> "com/example.rs").
pub fn namespace_file(namespace: &str) -> String {
    format!("{}.rs", namespace.split('.').collect::<Vec<_>>().join("/"))
}
