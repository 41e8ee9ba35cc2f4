//! Classified entity metadata handed from the frontend to the emitter.

use querybean_core::lang::framework::{P_ARRAY, P_ENUM, P_JSON};
use querybean_core::{scalars, QualifiedName, ScalarKind};

/// How a retained field is exposed on the generated beans.
///
/// The set is closed: rendering and import collection pattern-match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// Registered scalar type (`PLong`, `PString`, ...).
    Scalar { kind: ScalarKind },
    /// Enum-typed field, exposed as `PEnum<Owner,Enum>`.
    Enum { qualified_type: String, short_name: String },
    /// JSON-mapped payload, no nested properties.
    Json,
    /// Array-mapped field, exposed as `PArray<Owner,Element>`.
    Array { element_type: String, short_name: String },
    /// Reference to another entity or embeddable through its association bean.
    ///
    /// Holds the target's generated bean name and package by value, never the target descriptor.
    Association { bean_name: String, bean_package: String },
}

impl PropertyKind {
    /// Association to the entity/embeddable `target` (`QAssoc<Short>` in `<package>.query.assoc`).
    pub fn association(target: &str) -> Self {
        let target = QualifiedName::parse(target);
        PropertyKind::Association {
            bean_name: target.assoc_bean_name(),
            bean_package: target.assoc_package(),
        }
    }

    pub fn enumeration(qualified_type: &str) -> Self {
        PropertyKind::Enum {
            qualified_type: qualified_type.to_string(),
            short_name: querybean_core::names::short_name_of(qualified_type).to_string(),
        }
    }

    pub fn array(element_type: &str) -> Self {
        PropertyKind::Array {
            element_type: element_type.to_string(),
            short_name: querybean_core::names::short_name_of(element_type).to_string(),
        }
    }

    /// Raw type name of the property, without generic arguments (`PLong`, `PEnum`, `QAssocContact`).
    pub fn token(&self) -> &str {
        match self {
            PropertyKind::Scalar { kind } => scalars::token(*kind),
            PropertyKind::Enum { .. } => P_ENUM,
            PropertyKind::Json => P_JSON,
            PropertyKind::Array { .. } => P_ARRAY,
            PropertyKind::Association { bean_name, .. } => bean_name,
        }
    }

    pub fn is_association(&self) -> bool {
        matches!(self, PropertyKind::Association { .. })
    }
}

/// A retained, classified field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub kind: PropertyKind,
}

impl PropertyDescriptor {
    pub fn new(name: &str, kind: PropertyKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Everything the emitter needs to know about one entity or embeddable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub name: QualifiedName,
    /// Named database binding, if the entity or one of its supertypes declares one
    pub db_name: Option<String>,
    /// Entity (true) or embeddable (false); embeddables get no root bean and no fetch methods
    pub is_entity: bool,
    /// Classified properties in introspection order
    pub properties: Vec<PropertyDescriptor>,
}

impl EntityDescriptor {
    pub fn new(name: &str, is_entity: bool) -> Self {
        Self {
            name: QualifiedName::parse(name),
            db_name: None,
            is_entity,
            properties: Vec::new(),
        }
    }

    pub fn with_db_name(mut self, db_name: &str) -> Self {
        self.db_name = Some(db_name.to_string());
        self
    }

    pub fn with_property(mut self, name: &str, kind: PropertyKind) -> Self {
        self.properties.push(PropertyDescriptor::new(name, kind));
        self
    }

    pub fn short_name(&self) -> &str {
        self.name.short_name()
    }

    pub fn has_associations(&self) -> bool {
        self.properties.iter().any(|p| p.kind.is_association())
    }
}
