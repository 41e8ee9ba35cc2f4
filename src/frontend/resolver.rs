//! Field classification
//!
//! Decides, for one retained field, which [`PropertyKind`] exposes it on the generated beans. The checks run in
//! a fixed order and the first match wins:
//!
//! 1. the declared type, or one of its supertypes, is a registered scalar
//! 2. the field is JSON-mapped (`DbJson` / `DbJsonB`)
//! 3. the field is array-mapped (`DbArray`); the element type comes from the single type argument
//! 4. the declared type is an enum, or an entity/embeddable (direct association)
//! 5. the declared type has one type argument that is an entity/embeddable (collection association)
//!
//! Anything else is a miss. Misses never fail the entity: the field is just left off the beans.

use std::collections::HashSet;

use querybean_core::scalars;

use super::descriptor::{PropertyDescriptor, PropertyKind};
use crate::model::{FieldDecl, TypeModel, TypeRef};

/// Why a field could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyMiss {
    /// The declared type maps to no property kind.
    Unrecognized { ty: String },
    /// Declared as a relationship, but the target type is not an entity or embeddable the model can resolve.
    UnresolvedRelation { ty: String },
    /// Array-mapped, but no element type can be determined.
    UnknownArrayElement { ty: String },
}

impl ClassifyMiss {
    /// Misses worth telling the user about; plain unrecognized types are expected and only traced.
    pub fn is_notable(&self) -> bool {
        !matches!(self, ClassifyMiss::Unrecognized { .. })
    }
}

impl std::fmt::Display for ClassifyMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyMiss::Unrecognized { ty } => write!(f, "no query property type for `{ty}`"),
            ClassifyMiss::UnresolvedRelation { ty } => {
                write!(f, "cannot resolve association target `{ty}`, field skipped")
            }
            ClassifyMiss::UnknownArrayElement { ty } => {
                write!(f, "cannot determine array element type of `{ty}`, field skipped")
            }
        }
    }
}

/// Classifies fields against a [`TypeModel`].
pub struct PropertyResolver<'m, M: TypeModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: TypeModel + ?Sized> PropertyResolver<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Classify a field, or `None` if it is not exposed on the beans.
    pub fn classify(&self, field: &FieldDecl) -> Option<PropertyDescriptor> {
        self.try_classify(field).ok()
    }

    /// Classify a field, reporting why it was dropped on a miss.
    pub fn try_classify(&self, field: &FieldDecl) -> Result<PropertyDescriptor, ClassifyMiss> {
        self.classify_kind(field)
            .map(|kind| PropertyDescriptor::new(&field.name, kind))
    }

    fn classify_kind(&self, field: &FieldDecl) -> Result<PropertyKind, ClassifyMiss> {
        let ty = &field.ty;
        if let Some(kind) = self.scalar_kind(ty) {
            return Ok(PropertyKind::Scalar { kind });
        }
        if field.is_json() {
            return Ok(PropertyKind::Json);
        }
        if field.is_array() {
            return match array_element(ty) {
                Some(element) => Ok(PropertyKind::array(element.name())),
                None => Err(ClassifyMiss::UnknownArrayElement { ty: ty.to_string() }),
            };
        }
        if !ty.is_array() {
            if let Some(decl) = self.model.type_decl(ty.name()) {
                if decl.is_enum() {
                    return Ok(PropertyKind::enumeration(&decl.name));
                }
                if decl.is_entity_or_embeddable() {
                    return Ok(PropertyKind::association(&decl.name));
                }
            }
            if let Some(arg) = ty.single_arg() {
                let target = self.model.type_decl(arg.name());
                if let Some(decl) = target.filter(|d| d.is_entity_or_embeddable()) {
                    return Ok(PropertyKind::association(&decl.name));
                }
            }
        }
        if field.is_relation() {
            return Err(ClassifyMiss::UnresolvedRelation { ty: ty.to_string() });
        }
        Err(ClassifyMiss::Unrecognized { ty: ty.to_string() })
    }

    /// Registry hit for the declared type or the nearest supertype the model knows.
    fn scalar_kind(&self, ty: &TypeRef) -> Option<querybean_core::ScalarKind> {
        if ty.is_array() {
            return scalars::lookup(&ty.erased());
        }
        let mut visited = HashSet::new();
        let mut current = Some(ty.name());
        while let Some(name) = current {
            if let Some(kind) = scalars::lookup(name) {
                return Some(kind);
            }
            if !visited.insert(name) {
                return None;
            }
            current = self.model.type_decl(name).and_then(|d| d.superclass.as_deref());
        }
        None
    }
}

/// Element of an array-mapped field: the component of a host array, else the single type argument.
fn array_element(ty: &TypeRef) -> Option<TypeRef> {
    if ty.is_array() {
        return Some(TypeRef::simple(ty.name()));
    }
    ty.single_arg().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldMarker, TypeDecl, TypeKind, TypeMarker, TypeSnapshot};
    use querybean_core::ScalarKind;

    fn snapshot() -> TypeSnapshot {
        TypeSnapshot::from_types(vec![
            TypeDecl::new("org.example.Customer").with_marker(TypeMarker::Entity),
            TypeDecl::new("org.example.Contact").with_marker(TypeMarker::Entity),
            TypeDecl::new("org.example.Address").with_marker(TypeMarker::Embeddable),
            TypeDecl::new("org.example.Status").with_kind(TypeKind::Enum),
            TypeDecl::new("org.example.Money").with_superclass("java.math.BigDecimal"),
            TypeDecl::new("org.example.Plain"),
        ])
        .unwrap()
    }

    fn field(name: &str, ty: &str) -> FieldDecl {
        FieldDecl::new(name, TypeRef::parse(ty).unwrap())
    }

    fn kind_of(model: &TypeSnapshot, field: &FieldDecl) -> Option<PropertyKind> {
        PropertyResolver::new(model).classify(field).map(|p| p.kind)
    }

    #[test]
    fn registered_types_are_scalars() {
        let model = snapshot();
        for info in scalars::SCALAR_TYPES {
            for host_name in info.host_names {
                let got = kind_of(&model, &field("x", host_name));
                assert_eq!(got, Some(PropertyKind::Scalar { kind: info.id }), "{host_name}");
            }
        }
    }

    #[test]
    fn scalar_through_supertype() {
        let model = snapshot();
        assert_eq!(
            kind_of(&model, &field("amount", "org.example.Money")),
            Some(PropertyKind::Scalar {
                kind: ScalarKind::BigDecimal
            })
        );
    }

    #[test]
    fn scalar_wins_over_json_marker() {
        let model = snapshot();
        let f = field("payload", "java.lang.String").with_marker(FieldMarker::DbJsonB);
        assert_eq!(
            kind_of(&model, &f),
            Some(PropertyKind::Scalar {
                kind: ScalarKind::String
            })
        );
    }

    #[test]
    fn json_mapped_fields() {
        let model = snapshot();
        let f = field("content", "java.util.Map<java.lang.String,java.lang.Object>").with_marker(FieldMarker::DbJson);
        assert_eq!(kind_of(&model, &f), Some(PropertyKind::Json));
    }

    #[test]
    fn array_mapped_fields_use_single_argument() {
        let model = snapshot();
        let f = field("codes", "java.util.List<java.util.UUID>").with_marker(FieldMarker::DbArray);
        assert_eq!(kind_of(&model, &f), Some(PropertyKind::array("java.util.UUID")));

        let f = field("levels", "long[]").with_marker(FieldMarker::DbArray);
        assert_eq!(kind_of(&model, &f), Some(PropertyKind::array("long")));
    }

    #[test]
    fn array_without_element_is_a_notable_miss() {
        let model = snapshot();
        let f = field("raw", "java.lang.Object").with_marker(FieldMarker::DbArray);
        let miss = PropertyResolver::new(&model).try_classify(&f).unwrap_err();
        assert!(matches!(miss, ClassifyMiss::UnknownArrayElement { .. }));
        assert!(miss.is_notable());
    }

    #[test]
    fn enum_fields() {
        let model = snapshot();
        assert_eq!(
            kind_of(&model, &field("status", "org.example.Status")),
            Some(PropertyKind::enumeration("org.example.Status"))
        );
    }

    #[test]
    fn direct_and_collection_associations() {
        let model = snapshot();
        let direct = kind_of(&model, &field("customer", "org.example.Customer")).unwrap();
        assert_eq!(direct.token(), "QAssocCustomer");

        let embedded = kind_of(&model, &field("billing", "org.example.Address")).unwrap();
        assert_eq!(embedded, PropertyKind::association("org.example.Address"));

        let many = kind_of(&model, &field("contacts", "java.util.List<org.example.Contact>")).unwrap();
        assert_eq!(many, PropertyKind::association("org.example.Contact"));

        let set = kind_of(&model, &field("contacts", "java.util.Set<? extends org.example.Contact>")).unwrap();
        assert_eq!(set.token(), "QAssocContact");
    }

    #[test]
    fn unknown_types_are_dropped_quietly() {
        let model = snapshot();
        let resolver = PropertyResolver::new(&model);
        assert_eq!(resolver.classify(&field("plain", "org.example.Plain")), None);
        assert_eq!(resolver.classify(&field("names", "java.util.List<java.lang.String>")), None);
        assert_eq!(resolver.classify(&field("lookup", "java.util.Map<java.lang.String,org.example.Contact>")), None);
        let miss = resolver.try_classify(&field("plain", "org.example.Plain")).unwrap_err();
        assert!(!miss.is_notable());
    }

    #[test]
    fn unresolvable_relation_is_a_notable_miss() {
        let model = snapshot();
        let f = field("orders", "java.util.List<org.example.Order>").with_marker(FieldMarker::OneToMany);
        let miss = PropertyResolver::new(&model).try_classify(&f).unwrap_err();
        assert_eq!(
            miss,
            ClassifyMiss::UnresolvedRelation {
                ty: "java.util.List<org.example.Order>".to_string()
            }
        );
        assert!(miss.to_string().contains("cannot resolve association target"));
    }
}
