//! Cross-file view of every definition handed to the compiler.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use eyre::{Result, bail};
use indexmap::IndexMap;
use xschema_schema::{Definition, SchemaFile};

/// A definition together with the file that declared it.
#[derive(Debug, Clone)]
pub struct Entry {
    pub definition: Definition,
    pub source: PathBuf,
}

/// A resolved type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
}

/// All definitions of one compiler run, grouped by namespace.
///
/// Namespaces iterate in lexicographic order; definitions keep their
/// declaration order.
#[derive(Debug, Default)]
pub struct Catalog {
    declared: BTreeSet<String>,
    namespaces: BTreeMap<String, IndexMap<String, Entry>>,
}

impl Catalog {
    /// Parse and index every file.
    pub fn load(files: &[PathBuf]) -> Result<Self> {
        let mut catalog = Self::default();
        for path in files {
            let file = xschema_schema::parse_file(path).map_err(|e| eyre::Report::new(*e))?;
            catalog.insert(path, file)?;
        }
        Ok(catalog)
    }

    /// Add a parsed file, rejecting definitions already declared elsewhere.
    pub fn insert(&mut self, path: &Path, file: SchemaFile) -> Result<()> {
        if let Some(ns) = &file.namespace {
            self.declared.insert(ns.clone());
        }

        let file_ns = file.namespace.clone();
        for definition in file.definitions {
            let Some(ns) = definition
                .namespace()
                .map(str::to_string)
                .or_else(|| file_ns.clone())
            else {
                bail!(
                    "definition '{}' in '{}' has no namespace",
                    definition.name(),
                    path.display()
                );
            };
            self.declared.insert(ns.clone());

            let definitions = self.namespaces.entry(ns.clone()).or_default();
            if let Some(existing) = definitions.get(definition.name()) {
                bail!(
                    "definition '{}.{}' is declared in both '{}' and '{}'",
                    ns,
                    definition.name(),
                    existing.source.display(),
                    path.display()
                );
            }
            definitions.insert(
                definition.name().to_string(),
                Entry {
                    definition,
                    source: path.to_path_buf(),
                },
            );
        }
        Ok(())
    }

    /// Whether any file declared `namespace`.
    pub fn is_declared(&self, namespace: &str) -> bool {
        self.declared.contains(namespace)
    }

    /// Definitions of a namespace in declaration order.
    pub fn definitions(&self, namespace: &str) -> impl Iterator<Item = &Entry> {
        self.namespaces
            .get(namespace)
            .into_iter()
            .flat_map(|defs| defs.values())
    }

    /// Resolve `reference` as seen from inside `namespace`.
    ///
    /// A simple name resolves within the same namespace; a dotted name is
    /// taken as `namespace.Name`.
    pub fn resolve<'a>(&'a self, namespace: &'a str, reference: &'a str) -> Option<Resolved<'a>> {
        let (ns, name) = reference.rsplit_once('.').unwrap_or((namespace, reference));
        let (ns, defs) = self.namespaces.get_key_value(ns)?;
        let (name, _) = defs.get_key_value(name)?;
        Some(Resolved {
            namespace: ns.as_str(),
            name: name.as_str(),
        })
    }

    /// Fail on the first reference that does not resolve.
    pub fn check_references(&self) -> Result<()> {
        for (ns, defs) in &self.namespaces {
            for (name, entry) in defs {
                for reference in entry.definition.references() {
                    if self.resolve(ns, reference).is_none() {
                        bail!(
                            "unresolved type '{}' referenced by '{}.{}' in '{}'",
                            reference,
                            ns,
                            name,
                            entry.source.display()
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Namespaces to emit for the given allow-list (empty means all).
    ///
    /// Every listed namespace must be declared by some file.
    pub fn select(&self, filter: &[String]) -> Result<Vec<&str>> {
        if filter.is_empty() {
            return Ok(self.namespaces.keys().map(String::as_str).collect());
        }

        for ns in filter {
            if !self.is_declared(ns) {
                bail!("namespace '{}' is not declared by any schema file", ns);
            }
        }

        Ok(self
            .namespaces
            .keys()
            .filter(|ns| filter.contains(ns))
            .map(String::as_str)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(files: &[(&str, &str)]) -> Result<Catalog> {
        let mut catalog = Catalog::default();
        for (path, content) in files {
            let file = xschema_schema::parse_str(content, path).map_err(|e| eyre::Report::new(*e))?;
            catalog.insert(Path::new(path), file)?;
        }
        Ok(catalog)
    }

    const PEOPLE: &str = r#"{
        "namespace": "people",
        "definitions": [
            { "type": "product", "name": "Person", "fields": [
                { "name": "home", "type": "option<places.Address>" }
            ] }
        ]
    }"#;

    const PLACES: &str = r#"{
        "namespace": "places",
        "definitions": [{ "type": "product", "name": "Address" }]
    }"#;

    #[test]
    fn test_resolve_qualified_and_simple() {
        let catalog = catalog(&[("a.json", PEOPLE), ("b.json", PLACES)]).unwrap();

        assert_eq!(
            catalog.resolve("people", "places.Address"),
            Some(Resolved {
                namespace: "places",
                name: "Address"
            })
        );
        assert_eq!(
            catalog.resolve("places", "Address").map(|r| r.namespace),
            Some("places")
        );
        assert!(catalog.resolve("people", "Address").is_none());
        assert!(catalog.check_references().is_ok());
    }

    #[test]
    fn test_unresolved_reference() {
        let catalog = catalog(&[("a.json", PEOPLE)]).unwrap();
        let err = catalog.check_references().unwrap_err();
        assert!(err.to_string().contains("unresolved type 'places.Address'"));
    }

    #[test]
    fn test_duplicate_across_files() {
        let err = catalog(&[("a.json", PLACES), ("b.json", PLACES)]).unwrap_err();
        assert!(err.to_string().contains("declared in both 'a.json' and 'b.json'"));
    }

    #[test]
    fn test_select() {
        let catalog = catalog(&[("a.json", PEOPLE), ("b.json", PLACES)]).unwrap();

        assert_eq!(catalog.select(&[]).unwrap(), vec!["people", "places"]);
        assert_eq!(
            catalog.select(&["places".to_string()]).unwrap(),
            vec!["places"]
        );
        let err = catalog.select(&["nowhere".to_string()]).unwrap_err();
        assert!(err.to_string().contains("namespace 'nowhere'"));
    }

    #[test]
    fn test_namespace_without_definitions_is_declared() {
        let catalog = catalog(&[("e.json", r#"{ "namespace": "empty" }"#)]).unwrap();

        assert!(catalog.is_declared("empty"));
        assert!(catalog.select(&["empty".to_string()]).unwrap().is_empty());
    }
}
