//! Host type model
//!
//! The generator never walks a live compiler type hierarchy. Instead the host hands over an immutable snapshot
//! behind the [`TypeModel`] capability trait: per type, its qualified name, optional superclass, marker
//! annotations, and declared fields.
//!
//! ## Modules
//!
//! - `type_ref` - Parsing of the host's textual type renderings (generics, arrays, type-use annotations)
//! - `snapshot` - JSON snapshot document and the indexed [`TypeSnapshot`] implementation

pub mod snapshot;
pub mod type_ref;

use serde::Deserialize;

pub use snapshot::{SnapshotError, TypeSnapshot};
pub use type_ref::{TypeRef, TypeRefError};

/// Read-only view over the host's types for one processing run.
pub trait TypeModel {
    /// Look up a declared type by qualified name.
    fn type_decl(&self, qualified_name: &str) -> Option<&TypeDecl>;

    /// Resolve the declared superclass of `decl`, if the model knows it.
    fn superclass_of(&self, decl: &TypeDecl) -> Option<&TypeDecl> {
        decl.superclass.as_deref().and_then(|name| self.type_decl(name))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Enum,
    Interface,
}

/// Type-level marker annotations the generator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TypeMarker {
    Entity,
    Embeddable,
    MappedSuperclass,
    Inheritance,
}

/// Field-level marker annotations the generator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum FieldMarker {
    DbJson,
    DbJsonB,
    DbArray,
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl FieldMarker {
    /// Relationship annotations (`@OneToMany` etc).
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            FieldMarker::OneToOne | FieldMarker::OneToMany | FieldMarker::ManyToOne | FieldMarker::ManyToMany
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Transient,
    Volatile,
}

/// A type declared in the host model.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDecl {
    /// Qualified name (`org.example.domain.Customer`)
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Qualified name of the direct superclass, if any
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default, rename = "annotations")]
    pub markers: Vec<TypeMarker>,
    /// Named database binding (`@DbName("other")`) declared directly on this type
    #[serde(default)]
    pub db_name: Option<String>,
    /// Declared fields in source order
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl TypeDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Class,
            superclass: None,
            markers: Vec::new(),
            db_name: None,
            fields: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_superclass(mut self, superclass: &str) -> Self {
        self.superclass = Some(superclass.to_string());
        self
    }

    pub fn with_marker(mut self, marker: TypeMarker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_db_name(mut self, db_name: &str) -> Self {
        self.db_name = Some(db_name.to_string());
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn has_marker(&self, marker: TypeMarker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn is_entity(&self) -> bool {
        self.has_marker(TypeMarker::Entity)
    }

    pub fn is_embeddable(&self) -> bool {
        self.has_marker(TypeMarker::Embeddable)
    }

    /// True for the types query beans are generated for (and associations point at).
    pub fn is_entity_or_embeddable(&self) -> bool {
        self.is_entity() || self.is_embeddable()
    }

    /// True if this type's fields are inherited into subclasses' mappings.
    pub fn is_mapped_super_or_inheritance(&self) -> bool {
        self.has_marker(TypeMarker::MappedSuperclass) || self.has_marker(TypeMarker::Inheritance)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }
}

/// A field declared directly on a [`TypeDecl`].
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default, rename = "annotations")]
    pub markers: Vec<FieldMarker>,
}

impl FieldDecl {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            modifiers: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_marker(mut self, marker: FieldMarker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn is_transient(&self) -> bool {
        self.modifiers.contains(&Modifier::Transient)
    }

    /// `@DbJson` or `@DbJsonB`
    pub fn is_json(&self) -> bool {
        self.markers.iter().any(|m| matches!(m, FieldMarker::DbJson | FieldMarker::DbJsonB))
    }

    /// `@DbArray`
    pub fn is_array(&self) -> bool {
        self.markers.contains(&FieldMarker::DbArray)
    }

    /// Declared as a relationship (`@OneToMany` etc).
    pub fn is_relation(&self) -> bool {
        self.markers.iter().any(|m| m.is_relation())
    }
}
