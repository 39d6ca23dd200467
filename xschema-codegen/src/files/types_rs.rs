use std::path::{Path, PathBuf};

use xschema_core::{FileRules, GeneratedFile, to_snake_case};
use xschema_schema::{Coproduct, Definition, Product, TypeExpr};

use crate::{
    builder::CodeBuilder,
    catalog::Catalog,
    naming::{field_name, namespace_file, type_name},
    type_mapper::RustTypeMapper,
};

/// Production source for one namespace: a serde-enabled Rust type per definition
pub struct TypesRs<'a> {
    catalog: &'a Catalog,
    namespace: &'a str,
}

impl<'a> TypesRs<'a> {
    pub fn new(catalog: &'a Catalog, namespace: &'a str) -> Self {
        Self { catalog, namespace }
    }

    fn render_product(&self, builder: CodeBuilder, product: &Product) -> CodeBuilder {
        let mapper = RustTypeMapper::new(self.catalog, self.namespace, &product.name);
        let builder = match &product.doc {
            Some(doc) => builder.rust_doc(doc),
            None => builder,
        };

        builder
            .line("#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]")
            .block_with_close(
                &format!("pub struct {} {{", type_name(&product.name)),
                "}",
                |b| {
                    b.each(&product.fields, |b, field| {
                        let b = match &field.doc {
                            Some(doc) => b.rust_doc(doc),
                            None => b,
                        };
                        let b = if to_snake_case(&field.name) != field.name {
                            b.line(&format!("#[serde(rename = \"{}\")]", field.name))
                        } else {
                            b
                        };
                        b.line(&format!(
                            "pub {}: {},",
                            field_name(&field.name),
                            mapper.map(&field.ty)
                        ))
                    })
                },
            )
    }

    fn render_coproduct(&self, builder: CodeBuilder, coproduct: &Coproduct) -> CodeBuilder {
        let mapper = RustTypeMapper::new(self.catalog, self.namespace, &coproduct.name);
        let name = type_name(&coproduct.name);
        let variant_name = |reference: &str| type_name(reference.rsplit('.').next().unwrap_or(reference));

        let builder = match &coproduct.doc {
            Some(doc) => builder.rust_doc(doc),
            None => builder,
        };

        let builder = builder
            .line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]")
            .block_with_close(&format!("pub enum {} {{", name), "}", |b| {
                b.each(&coproduct.variants, |b, variant| {
                    b.line(&format!(
                        "{}({}),",
                        variant_name(variant),
                        mapper.map(&TypeExpr::Named(variant.clone()))
                    ))
                })
            });

        // Coproducts default to their first variant
        match coproduct.variants.first() {
            Some(first) => builder.blank().block_with_close(
                &format!("impl Default for {} {{", name),
                "}",
                |b| {
                    b.block_with_close("fn default() -> Self {", "}", |b| {
                        b.line(&format!("Self::{}(Default::default())", variant_name(first)))
                    })
                },
            ),
            None => builder,
        }
    }
}

impl GeneratedFile for TypesRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(namespace_file(self.namespace))
    }

    fn rules(&self) -> FileRules {
        FileRules::generated()
    }

    fn render(&self) -> String {
        let builder = CodeBuilder::rust()
            .line(&format!("// Types for the `{}` namespace.", self.namespace))
            .blank()
            .line("use serde::{Deserialize, Serialize};");

        self.catalog
            .definitions(self.namespace)
            .fold(builder, |b, entry| {
                let b = b.blank();
                match &entry.definition {
                    Definition::Product(product) => self.render_product(b, product),
                    Definition::Coproduct(coproduct) => self.render_coproduct(b, coproduct),
                }
            })
            .build()
    }
}
