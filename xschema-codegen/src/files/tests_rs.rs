use std::path::{Path, PathBuf};

use xschema_core::{FileRules, GeneratedFile, to_snake_case};

use crate::{
    builder::CodeBuilder,
    catalog::Catalog,
    naming::{namespace_file, type_name},
};

/// Test source for one namespace: a JSON round-trip test per definition.
///
/// The file is meant to be included into the namespace's module, so the
/// tests reach the generated types through `super::*`.
pub struct TestsRs<'a> {
    catalog: &'a Catalog,
    namespace: &'a str,
}

impl<'a> TestsRs<'a> {
    pub fn new(catalog: &'a Catalog, namespace: &'a str) -> Self {
        Self { catalog, namespace }
    }
}

impl GeneratedFile for TestsRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(namespace_file(self.namespace))
    }

    fn rules(&self) -> FileRules {
        FileRules::generated()
    }

    fn render(&self) -> String {
        CodeBuilder::rust()
            .line(&format!(
                "// Round-trip tests for the `{}` namespace.",
                self.namespace
            ))
            .blank()
            .line("#[cfg(test)]")
            .block_with_close("mod xschema_round_trip {", "}", |b| {
                b.line("use super::*;").each(
                    self.catalog.definitions(self.namespace),
                    |b, entry| {
                        let name = entry.definition.name();
                        let ty = type_name(name);
                        b.blank().line("#[test]").block_with_close(
                            &format!("fn {}_round_trips_through_json() {{", to_snake_case(name)),
                            "}",
                            |b| {
                                b.line(&format!("let value = {}::default();", ty))
                                    .line(&format!(
                                        "let json = serde_json::to_string(&value).expect(\"serialize {}\");",
                                        ty
                                    ))
                                    .line(&format!(
                                        "let back: {} = serde_json::from_str(&json).expect(\"deserialize {}\");",
                                        ty, ty
                                    ))
                                    .line("assert_eq!(value, back);")
                            },
                        )
                    },
                )
            })
            .build()
    }
}
