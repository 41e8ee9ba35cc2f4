//! Query bean rendering
//!
//! Two sources per entity:
//!
//! - the root bean `Q<Short>` in `<package>.query`, a query root typed against itself, with a shared alias
//!   instance and a nested `Alias` class re-exposing every property
//! - the association bean `QAssoc<Short><R>` in `<package>.query.assoc`, typed against the root `R` it hangs
//!   off, with fetch-control methods (entities only) and depth-limited construction of nested associations
//!
//! Rendering is pure. Given the same [`EntityDescriptor`] the output is byte-identical: imports are sorted and
//! properties keep introspection order.

use std::path::PathBuf;

use querybean_core::lang::framework::{
    DATABASE, DB, GENERATED, GENERATOR_ID, TQ_ASSOC_BEAN, TQ_PATH, TQ_PROPERTY, TQ_ROOT_BEAN, TYPE_QUERY_BEAN,
};
use querybean_core::names::package_append;

use super::errors::EmitError;
use super::imports::ImportSet;
use super::java_emitter::{string_literal, JavaEmitter};
use crate::frontend::{EntityDescriptor, PropertyDescriptor, PropertyKind};

/// Rendering switches taken from the generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeanOptions {
    /// Emit `@Generated` (and its import)
    pub generated_annotation: bool,
    /// Depth handed to association properties of the root bean
    pub max_path_depth: u32,
}

impl Default for BeanOptions {
    fn default() -> Self {
        Self {
            generated_annotation: true,
            max_path_depth: 1,
        }
    }
}

/// A rendered source file, keyed by destination package and type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub package: String,
    pub type_name: String,
    pub source: String,
}

impl GeneratedFile {
    pub fn qualified_name(&self) -> String {
        package_append(&self.package, &self.type_name)
    }

    /// `org/example/query/QCustomer.java`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.package.split('.').filter(|s| !s.is_empty()).collect();
        path.push(format!("{}.java", self.type_name));
        path
    }
}

const GENERATED_WARNING: &str = "THIS IS A GENERATED OBJECT, DO NOT MODIFY THIS CLASS.";

/// Render the root query bean of an entity.
pub fn emit_root(entity: &EntityDescriptor, options: &BeanOptions) -> Result<GeneratedFile, EmitError> {
    check_metadata(entity)?;
    if !entity.is_entity {
        return Err(EmitError::NotAnEntity(entity.name.to_string()));
    }

    let short = entity.short_name();
    let bean = entity.name.root_bean_name();
    let package = entity.name.query_package();

    let mut imports = ImportSet::new();
    imports.add(entity.name.as_str());
    if options.generated_annotation {
        imports.add(GENERATED);
    }
    imports.add(TQ_ROOT_BEAN);
    imports.add(TYPE_QUERY_BEAN);
    imports.add(DATABASE);
    if entity.db_name.is_some() {
        imports.add(DB);
    }
    for property in &entity.properties {
        imports.add_property(&property.kind);
    }

    let mut e = JavaEmitter::new();
    write_header(&mut e, &package, &imports);
    e.doc_comment(&[format!("Query bean for {short}.").as_str(), "", GENERATED_WARNING]);
    write_annotations(&mut e, options);
    e.block(&format!("public class {bean} extends TQRootBean<{short},{bean}>"), |e| {
        e.blank_line();
        e.linef(format_args!("private static final {bean} _alias = new {bean}(true);"));
        e.blank_line();
        e.doc_comment(&[
            "Return the shared 'Alias' instance used to provide properties to",
            "<code>select()</code> and <code>fetch()</code>",
        ]);
        e.block(&format!("public static {bean} alias()"), |e| e.line("return _alias;"));
        e.blank_line();

        for property in &entity.properties {
            e.linef(format_args!("public {} {};", type_defn(&property.kind, &bean), property.name));
        }
        if !entity.properties.is_empty() {
            e.blank_line();
        }

        e.doc_comment(&["Construct with a given Database."]);
        e.block(&format!("public {bean}(Database server)"), |e| {
            e.linef(format_args!("super({short}.class, server);"));
            root_field_inits(e, entity, options);
        });
        e.blank_line();

        let binding = entity.db_name.as_deref().unwrap_or("default");
        e.doc_comment(&[format!("Construct using the {binding} Database.").as_str()]);
        e.block(&format!("public {bean}()"), |e| {
            match &entity.db_name {
                Some(db_name) => {
                    e.linef(format_args!("super({short}.class, DB.byName(\"{}\"));", string_literal(db_name)))
                }
                None => e.linef(format_args!("super({short}.class);")),
            }
            root_field_inits(e, entity, options);
        });
        e.blank_line();

        e.doc_comment(&["Construct for Alias."]);
        e.block(&format!("private {bean}(boolean dummy)"), |e| {
            e.line("super(dummy);");
            root_field_inits(e, entity, options);
        });
        e.blank_line();

        e.doc_comment(&[
            "Provides static properties to use in <em> select() and fetch() </em>",
            "clauses of a query. Typically referenced via static imports.",
        ]);
        e.block("public static class Alias", |e| {
            for property in &entity.properties {
                e.linef(format_args!(
                    "public static {} {} = _alias.{};",
                    type_defn(&property.kind, &bean),
                    property.name,
                    property.name
                ));
            }
        });
    });

    Ok(GeneratedFile {
        package,
        type_name: bean,
        source: e.finish(),
    })
}

/// Render the association query bean of an entity or embeddable.
pub fn emit_assoc(entity: &EntityDescriptor, options: &BeanOptions) -> Result<GeneratedFile, EmitError> {
    check_metadata(entity)?;

    let short = entity.short_name();
    let root_bean = entity.name.root_bean_name();
    let bean = entity.name.assoc_bean_name();
    let package = entity.name.assoc_package();
    let has_properties = !entity.properties.is_empty();

    let mut imports = ImportSet::new();
    imports.add(entity.name.as_str());
    if options.generated_annotation {
        imports.add(GENERATED);
    }
    imports.add(TQ_ASSOC_BEAN);
    imports.add(TYPE_QUERY_BEAN);
    if has_properties {
        imports.add(TQ_PATH);
    }
    if entity.is_entity {
        imports.add(TQ_PROPERTY);
        imports.add(package_append(&entity.name.query_package(), &root_bean));
    }
    for property in &entity.properties {
        imports.add_property(&property.kind);
    }

    let mut e = JavaEmitter::new();
    write_header(&mut e, &package, &imports);
    e.doc_comment(&[format!("Association query bean for {short}.").as_str(), "", GENERATED_WARNING]);
    write_annotations(&mut e, options);
    e.block(&format!("public class {bean}<R> extends TQAssocBean<{short},R>"), |e| {
        e.blank_line();
        for property in &entity.properties {
            e.linef(format_args!("public {} {};", type_defn(&property.kind, "R"), property.name));
        }
        if has_properties {
            e.blank_line();
        }

        if entity.is_entity {
            for fetch in FETCH_METHODS {
                e.doc_comment(&[fetch.doc]);
                e.line("@SafeVarargs");
                e.block(
                    &format!("public final R {}(TQProperty<{root_bean}>... properties)", fetch.method),
                    |e| e.linef(format_args!("return {}Properties(properties);", fetch.method)),
                );
                e.blank_line();
            }
        }

        e.block(&format!("public {bean}(String name, R root, int depth)"), |e| {
            e.line("this(name, root, null, depth);");
        });
        e.blank_line();
        e.block(&format!("public {bean}(String name, R root, String prefix, int depth)"), |e| {
            e.line("super(name, root, prefix);");
            if has_properties {
                e.line("String path = TQPath.add(prefix, name);");
            }
            for property in entity.properties.iter().filter(|p| !p.kind.is_association()) {
                e.linef(format_args!(
                    "this.{} = new {}<>(\"{}\", root, path);",
                    property.name,
                    property.kind.token(),
                    property.name
                ));
            }
            if entity.has_associations() {
                e.block("if (--depth > 0)", |e| {
                    for property in entity.properties.iter().filter(|p| p.kind.is_association()) {
                        e.linef(format_args!(
                            "this.{} = new {}<>(\"{}\", root, path, depth);",
                            property.name,
                            property.kind.token(),
                            property.name
                        ));
                    }
                });
            }
        });
    });

    Ok(GeneratedFile {
        package,
        type_name: bean,
        source: e.finish(),
    })
}

struct FetchMethod {
    method: &'static str,
    doc: &'static str,
}

const FETCH_METHODS: &[FetchMethod] = &[
    FetchMethod {
        method: "fetch",
        doc: "Eagerly fetch this association loading the specified properties.",
    },
    FetchMethod {
        method: "fetchQuery",
        doc: "Eagerly fetch this association using a 'query join' loading the specified properties.",
    },
    FetchMethod {
        method: "fetchCache",
        doc: "Eagerly fetch this association using L2 cache.",
    },
    FetchMethod {
        method: "fetchLazy",
        doc: "Use lazy loading for this association loading the specified properties.",
    },
];

/// Field type of a property on a bean whose property owner type is `owner` (`QCustomer` or `R`).
fn type_defn(kind: &PropertyKind, owner: &str) -> String {
    match kind {
        PropertyKind::Scalar { .. } | PropertyKind::Json | PropertyKind::Association { .. } => {
            format!("{}<{owner}>", kind.token())
        }
        PropertyKind::Enum { short_name, .. } | PropertyKind::Array { short_name, .. } => {
            format!("{}<{owner},{short_name}>", kind.token())
        }
    }
}

/// Field initialisation of the root bean. Associations start the path depth countdown.
fn root_field_inits(e: &mut JavaEmitter, entity: &EntityDescriptor, options: &BeanOptions) {
    for PropertyDescriptor { name, kind } in &entity.properties {
        if kind.is_association() {
            e.linef(format_args!(
                "this.{name} = new {}<>(\"{name}\", this, {});",
                kind.token(),
                options.max_path_depth
            ));
        } else {
            e.linef(format_args!("this.{name} = new {}<>(\"{name}\", this);", kind.token()));
        }
    }
}

fn write_header(e: &mut JavaEmitter, package: &str, imports: &ImportSet) {
    e.package(package);
    for import in imports.for_package(package) {
        e.linef(format_args!("import {import};"));
    }
    e.blank_line();
}

fn write_annotations(e: &mut JavaEmitter, options: &BeanOptions) {
    if options.generated_annotation {
        e.linef(format_args!("@Generated(\"{GENERATOR_ID}\")"));
    }
    e.line("@TypeQueryBean");
}

fn check_metadata(entity: &EntityDescriptor) -> Result<(), EmitError> {
    let missing = |what| EmitError::MissingMetadata {
        entity: entity.name.to_string(),
        what,
    };
    if entity.short_name().is_empty() {
        return Err(missing("type name"));
    }
    if entity.properties.iter().any(|p| p.name.is_empty()) {
        return Err(missing("property name"));
    }
    Ok(())
}
