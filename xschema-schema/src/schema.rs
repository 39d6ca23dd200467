//! Schema file model.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::TypeExpr;

/// Root of a schema definition file.
///
/// ```json
/// {
///   "namespace": "com.example",
///   "definitions": [
///     { "type": "product", "name": "Person", "fields": [{ "name": "name", "type": "string" }] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFile {
    /// Default namespace for definitions that do not declare their own
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl SchemaFile {
    /// Iterate over definitions paired with their effective namespace.
    ///
    /// Definitions without any namespace are skipped; validation rejects
    /// them, so a parsed file never has any.
    pub fn declared(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.definitions.iter().filter_map(|def| {
            def.namespace()
                .or(self.namespace.as_deref())
                .map(|ns| (ns, def))
        })
    }

    /// All namespaces declared by this file.
    pub fn namespaces(&self) -> BTreeSet<&str> {
        self.declared().map(|(ns, _)| ns).collect()
    }
}

/// A type definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Definition {
    /// A record with named fields
    Product(Product),
    /// A closed union of other definitions
    Coproduct(Coproduct),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Product(p) => &p.name,
            Definition::Coproduct(c) => &c.name,
        }
    }

    /// The namespace declared on the definition itself, if any.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Definition::Product(p) => p.namespace.as_deref(),
            Definition::Coproduct(c) => c.namespace.as_deref(),
        }
    }

    pub fn doc(&self) -> Option<&str> {
        match self {
            Definition::Product(p) => p.doc.as_deref(),
            Definition::Coproduct(c) => c.doc.as_deref(),
        }
    }

    /// Every type reference this definition depends on.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Definition::Product(p) => p.fields.iter().flat_map(|f| f.ty.references()).collect(),
            Definition::Coproduct(c) => c.variants.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Coproduct {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    /// References to the definitions this union can hold
    pub variants: Vec<String>,
}
