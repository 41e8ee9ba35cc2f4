//! Module-info loader rendering
//!
//! The runtime discovers a module's entity classes through a generated `ModuleInfoLoader` registered in
//! `META-INF/services`. The loader lists every entity the manifest knows about, grouped by database binding.

use std::collections::BTreeSet;

use querybean_core::lang::framework::{GENERATED, GENERATOR_ID, MODULE_INFO, MODULE_INFO_LOADER, MODULE_INFO_LOADER_NAME};
use querybean_core::names::{common_package, package_of};

use super::imports::ImportSet;
use super::java_emitter::{string_literal, JavaEmitter};
use super::query_bean::GeneratedFile;
use crate::registry::ModuleManifest;

/// Package used when neither configuration nor the entities suggest one.
pub const UNKNOWN_MODULE_PACKAGE: &str = "unknown";

/// Package receiving the loader: the configured one, else the longest package prefix the entities share.
pub fn module_package(configured: Option<&str>, manifest: &ModuleManifest) -> String {
    if let Some(package) = configured.filter(|p| !p.is_empty()) {
        return package.to_string();
    }
    let entities = manifest.all_entities();
    common_package(entities.iter().map(|e| package_of(e))).unwrap_or_else(|| UNKNOWN_MODULE_PACKAGE.to_string())
}

/// Render `<package>._ebean$ModuleInfo`.
pub fn emit_module_info(manifest: &ModuleManifest, package: &str, generated_annotation: bool) -> GeneratedFile {
    let mut imports = ImportSet::new();
    imports.add("java.util.ArrayList");
    imports.add("java.util.Collections");
    imports.add("java.util.List");
    if generated_annotation {
        imports.add(GENERATED);
    }
    imports.add(MODULE_INFO);
    imports.add(MODULE_INFO_LOADER);

    let mut e = JavaEmitter::new();
    e.package(package);
    for import in imports.for_package(package) {
        e.linef(format_args!("import {import};"));
    }
    e.blank_line();

    if generated_annotation {
        e.linef(format_args!("@Generated(\"{GENERATOR_ID}\")"));
    }
    let listed: Vec<String> = manifest.all_entities().iter().map(|e| format!("\"{e}\"")).collect();
    e.linef(format_args!("@ModuleInfo(entities={{{}}})", listed.join(",")));
    e.block(
        &format!("public class {MODULE_INFO_LOADER_NAME} implements ModuleInfoLoader"),
        |e| {
            e.blank_line();
            e.line("@Override");
            entity_list_method(e, "public List<Class<?>> entityClasses()", manifest.entities());
            e.blank_line();

            e.line("@Override");
            e.block("public List<Class<?>> entityClassesFor(String dbName)", |e| {
                for db in manifest.db_entities().keys() {
                    e.linef(format_args!(
                        "if (\"{}\".equals(dbName)) return {}();",
                        string_literal(db),
                        db_method_name(db)
                    ));
                }
                e.line("return Collections.emptyList();");
            });

            for (db, entities) in manifest.db_entities() {
                e.blank_line();
                entity_list_method(
                    e,
                    &format!("private List<Class<?>> {}()", db_method_name(db)),
                    entities,
                );
            }
        },
    );

    GeneratedFile {
        package: package.to_string(),
        type_name: MODULE_INFO_LOADER_NAME.to_string(),
        source: e.finish(),
    }
}

/// Single-line services registration naming the loader.
pub fn services_entry(loader: &GeneratedFile) -> String {
    format!("{}\n", loader.qualified_name())
}

fn entity_list_method(e: &mut JavaEmitter, signature: &str, entities: &BTreeSet<String>) {
    e.block(signature, |e| {
        e.line("List<Class<?>> entities = new ArrayList<>();");
        for entity in entities {
            e.linef(format_args!("entities.add({entity}.class);"));
        }
        e.line("return entities;");
    });
}

/// `<db>_entities`, with the binding name escaped into a Java identifier.
///
/// ASCII letters and digits pass through, `_` doubles and any other character (or a leading digit) becomes
/// `_<hex code point>_`, so distinct bindings never share a method.
fn db_method_name(db: &str) -> String {
    let mut ident = String::with_capacity(db.len() + 9);
    for (i, c) in db.chars().enumerate() {
        match c {
            '_' => ident.push_str("__"),
            c if c.is_ascii_alphabetic() || (c.is_ascii_digit() && i > 0) => ident.push(c),
            c => ident.push_str(&format!("_{:x}_", c as u32)),
        }
    }
    ident.push_str("_entities");
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ModuleManifest {
        let mut manifest = ModuleManifest::new();
        manifest.add_package("org.example.domain.query");
        manifest.add_entity("org.example.domain.Customer", None);
        manifest.add_entity("org.example.audit.Event", Some("audit-db"));
        manifest
    }

    #[test]
    fn module_package_prefers_configuration() {
        assert_eq!(module_package(Some("my.module"), &manifest()), "my.module");
        assert_eq!(module_package(None, &manifest()), "org.example");
        assert_eq!(module_package(Some(""), &ModuleManifest::new()), "unknown");
    }

    #[test]
    fn loader_lists_entities_per_binding() {
        let file = emit_module_info(&manifest(), "org.example", true);
        assert_eq!(file.qualified_name(), "org.example._ebean$ModuleInfo");
        let source = &file.source;
        assert!(source.starts_with("package org.example;\n\nimport io.ebean.config.ModuleInfo;\n"));
        assert!(source.contains(
            "@ModuleInfo(entities={\"org.example.audit.Event\",\"org.example.domain.Customer\"})\n"
        ));
        assert!(source.contains("    entities.add(org.example.domain.Customer.class);\n"));
        assert!(source.contains("    if (\"audit-db\".equals(dbName)) return audit_2d_db_entities();\n"));
        assert!(source.contains("  private List<Class<?>> audit_2d_db_entities() {\n"));
        assert_eq!(services_entry(&file), "org.example._ebean$ModuleInfo\n");
    }

    #[test]
    fn similar_binding_names_get_distinct_methods() {
        let mut manifest = ModuleManifest::new();
        manifest.add_entity("a.X", Some("audit-db"));
        manifest.add_entity("a.Y", Some("audit_db"));
        manifest.add_entity("a.Z", Some("2nd"));
        let source = emit_module_info(&manifest, "a", false).source;
        for method in ["audit_2d_db_entities", "audit__db_entities", "_32_nd_entities"] {
            let decl = format!("  private List<Class<?>> {method}() {{\n");
            assert_eq!(source.matches(&decl).count(), 1, "expected one `{method}`");
        }
        assert!(source.contains("    if (\"audit_db\".equals(dbName)) return audit__db_entities();\n"));
        assert!(source.contains("    if (\"2nd\".equals(dbName)) return _32_nd_entities();\n"));
    }

    #[test]
    fn binding_name_is_escaped_in_the_literal() {
        let mut manifest = ModuleManifest::new();
        manifest.add_entity("a.X", Some("a\"b"));
        let source = emit_module_info(&manifest, "a", false).source;
        assert!(source.contains(r#"    if ("a\"b".equals(dbName)) return a_22_b_entities();"#));
    }

    #[test]
    fn loader_without_generated_annotation() {
        let source = emit_module_info(&ModuleManifest::new(), "unknown", false).source;
        assert!(!source.contains("Generated"));
        assert!(source.contains("@ModuleInfo(entities={})\npublic class _ebean$ModuleInfo implements ModuleInfoLoader {\n"));
    }
}
