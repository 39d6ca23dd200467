//! Maps schema type expressions to Rust type syntax.

use xschema_schema::{Primitive, TypeExpr};

use crate::{
    catalog::Catalog,
    naming::{module_path, type_name},
};

/// Rust type mapper scoped to one definition.
///
/// References into the same namespace render as bare type names; references
/// into other namespaces render as `crate::<namespace path>::Name`, so the
/// generated modules are expected to mirror namespaces from the crate root.
pub struct RustTypeMapper<'a> {
    catalog: &'a Catalog,
    namespace: &'a str,
    definition: &'a str,
}

impl<'a> RustTypeMapper<'a> {
    pub fn new(catalog: &'a Catalog, namespace: &'a str, definition: &'a str) -> Self {
        Self {
            catalog,
            namespace,
            definition,
        }
    }

    /// Map a field or variant type.
    ///
    /// Direct self-references are boxed so recursive types have a known size.
    pub fn map(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Primitive(p) => map_primitive(*p).to_string(),
            TypeExpr::List(inner) => format!("Vec<{}>", self.map_unboxed(inner)),
            TypeExpr::Option(inner) => format!("Option<{}>", self.map(inner)),
            TypeExpr::Named(reference) => {
                let rendered = self.map_reference(reference);
                if self.is_self_reference(reference) {
                    format!("Box<{}>", rendered)
                } else {
                    rendered
                }
            }
        }
    }

    /// Map a reference that is not part of a field (e.g., a coproduct variant).
    pub fn map_reference(&self, reference: &str) -> String {
        match self.catalog.resolve(self.namespace, reference) {
            Some(resolved) if resolved.namespace == self.namespace => type_name(resolved.name),
            Some(resolved) => format!(
                "crate::{}::{}",
                module_path(resolved.namespace),
                type_name(resolved.name)
            ),
            // Unresolved references are rejected before rendering
            None => type_name(reference.rsplit('.').next().unwrap_or(reference)),
        }
    }

    fn map_unboxed(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(reference) => self.map_reference(reference),
            other => self.map(other),
        }
    }

    fn is_self_reference(&self, reference: &str) -> bool {
        self.catalog
            .resolve(self.namespace, reference)
            .is_some_and(|r| r.namespace == self.namespace && r.name == self.definition)
    }
}

fn map_primitive(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "String",
        Primitive::Boolean => "bool",
        Primitive::Int => "i32",
        Primitive::Long => "i64",
        Primitive::Float => "f32",
        Primitive::Double => "f64",
    }
}
