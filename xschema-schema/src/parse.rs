//! Schema parsing from files and strings.

use std::{collections::HashSet, path::Path};

use crate::{
    Definition, Error, Result, SchemaFile, TypeExpr, error::SourceContext,
    validate::ParseContext,
};

/// Parse a schema file from the given path.
pub fn parse_file(path: impl AsRef<Path>) -> Result<SchemaFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    parse_str(&content, &path.display().to_string())
}

/// Parse a schema from content with the given filename for error reporting.
pub fn parse_str(content: &str, filename: &str) -> Result<SchemaFile> {
    let source = SourceContext::new(content, filename);
    let file: SchemaFile = serde_json::from_str(content).map_err(|e| source.parse_error(e))?;
    validate_file(&file, &source)?;
    Ok(file)
}

/// Validate the schema after parsing.
fn validate_file(file: &SchemaFile, source: &SourceContext) -> Result<()> {
    let ctx = ParseContext::new(source);

    if let Some(ns) = &file.namespace {
        validate_namespace(&ctx, ns)?;
    }

    let mut seen = HashSet::new();
    for def in &file.definitions {
        let name = def.name();
        ctx.validate_name(name, "definition")?;

        let def_ctx = ctx.push(name);
        match def.namespace() {
            Some(ns) => validate_namespace(&def_ctx, ns)?,
            None if file.namespace.is_none() => {
                return Err(source.validation_error(
                    format!(
                        "definition '{}' has no namespace; set one on the file or the definition",
                        name
                    ),
                    name,
                ));
            }
            None => {}
        }

        let ns = def.namespace().or(file.namespace.as_deref()).unwrap_or_default();
        if !seen.insert((ns, name)) {
            return Err(source.duplicate_error(name, "definition"));
        }

        match def {
            Definition::Product(product) => {
                let mut fields = HashSet::new();
                for field in &product.fields {
                    def_ctx.validate_field_name(&field.name, "field")?;
                    if !fields.insert(field.name.as_str()) {
                        return Err(source.duplicate_error(&field.name, "field"));
                    }
                }
            }
            Definition::Coproduct(coproduct) => {
                if coproduct.variants.is_empty() {
                    return Err(source.validation_error(
                        format!("coproduct '{}' must list at least one variant", name),
                        name,
                    ));
                }
                let mut variants = HashSet::new();
                for variant in &coproduct.variants {
                    match variant.parse::<TypeExpr>() {
                        Ok(TypeExpr::Named(_)) => {}
                        Ok(_) => {
                            return Err(source.validation_error(
                                format!("variant '{}' must name a definition", variant),
                                variant,
                            ));
                        }
                        Err(reason) => return Err(source.validation_error(reason, variant)),
                    }
                    if !variants.insert(variant.as_str()) {
                        return Err(source.duplicate_error(variant, "variant"));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Validate a dotted namespace such as `com.example.model`.
fn validate_namespace(ctx: &ParseContext<'_>, namespace: &str) -> Result<()> {
    for segment in namespace.split('.') {
        ctx.validate_name(segment, "namespace segment")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;

    fn parse(content: &str) -> Result<SchemaFile> {
        parse_str(content, "test.json")
    }

    #[test]
    fn test_parse_product() {
        let file = parse(
            r#"{
                "namespace": "com.example",
                "definitions": [
                    {
                        "type": "product",
                        "name": "Person",
                        "doc": "A person",
                        "fields": [
                            { "name": "name", "type": "string" },
                            { "name": "tags", "type": "list<string>" }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let declared: Vec<_> = file.declared().collect();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].0, "com.example");
        let Definition::Product(person) = declared[0].1 else {
            panic!("expected product");
        };
        assert_eq!(person.doc.as_deref(), Some("A person"));
        assert_eq!(
            person.fields[1].ty,
            TypeExpr::List(Box::new(TypeExpr::Primitive(Primitive::String)))
        );
    }

    #[test]
    fn test_definition_namespace_overrides_file() {
        let file = parse(
            r#"{
                "namespace": "ns1",
                "definitions": [
                    { "type": "product", "name": "A" },
                    { "type": "product", "name": "B", "namespace": "ns2" }
                ]
            }"#,
        )
        .unwrap();

        let namespaces: Vec<_> = file.namespaces().into_iter().collect();
        assert_eq!(namespaces, vec!["ns1", "ns2"]);
    }

    #[test]
    fn test_same_name_in_different_namespaces() {
        let result = parse(
            r#"{
                "definitions": [
                    { "type": "product", "name": "A", "namespace": "ns1" },
                    { "type": "product", "name": "A", "namespace": "ns2" }
                ]
            }"#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_namespace() {
        let err = parse(r#"{ "definitions": [{ "type": "product", "name": "A" }] }"#).unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("has no namespace"));
    }

    #[test]
    fn test_invalid_namespace_segment() {
        let err = parse(r#"{ "namespace": "com..example", "definitions": [] }"#).unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_reserved_definition_name() {
        let err = parse(r#"{ "namespace": "ns", "definitions": [{ "type": "product", "name": "struct" }] }"#)
            .unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_duplicate_definition() {
        let err = parse(
            r#"{
                "namespace": "ns",
                "definitions": [
                    { "type": "product", "name": "A" },
                    { "type": "product", "name": "A" }
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Duplicate { .. }));
    }

    #[test]
    fn test_duplicate_field() {
        let err = parse(
            r#"{
                "namespace": "ns",
                "definitions": [
                    { "type": "product", "name": "A", "fields": [
                        { "name": "x", "type": "int" },
                        { "name": "x", "type": "long" }
                    ] }
                ]
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate field 'x'"));
    }

    #[test]
    fn test_empty_coproduct() {
        let err = parse(
            r#"{ "namespace": "ns", "definitions": [{ "type": "coproduct", "name": "Shape", "variants": [] }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at least one variant"));
    }

    #[test]
    fn test_coproduct_variant_must_be_reference() {
        let err = parse(
            r#"{ "namespace": "ns", "definitions": [{ "type": "coproduct", "name": "Shape", "variants": ["int"] }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must name a definition"));
    }

    #[test]
    fn test_malformed_type_is_parse_error() {
        let err = parse(
            r#"{ "namespace": "ns", "definitions": [{ "type": "product", "name": "A", "fields": [{ "name": "x", "type": "list<int" }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse("{ \"namespace\": ").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
        assert_eq!(err.to_string(), "failed to parse schema file");
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(
            &path,
            r#"{ "namespace": "ns1", "definitions": [{ "type": "product", "name": "Person" }] }"#,
        )
        .unwrap();

        let file = parse_file(&path).unwrap();
        assert_eq!(file.definitions.len(), 1);
        assert_eq!(file.namespace.as_deref(), Some("ns1"));
    }

    #[test]
    fn test_parse_file_names_source_in_diagnostics() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"namespace\": ").unwrap();

        let err = parse_file(&path).unwrap_err();
        let Error::Parse { ref src, .. } = *err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(src.name(), path.display().to_string());
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = parse_file(&path).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
        assert_eq!(
            err.to_string(),
            format!("failed to read '{}'", path.display())
        );
    }
}
