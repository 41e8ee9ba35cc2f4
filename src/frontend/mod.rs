//! Generator frontend
//!
//! Turns host type declarations into [`EntityDescriptor`]s:
//! - `introspect`: mapped-superclass field collection and db-name lookup
//! - `resolver`: field classification into property kinds
//! - `descriptor`: the classified metadata handed to the backend
//! - `diagnostics`: notes and errors accumulated over a run

pub mod descriptor;
pub mod diagnostics;
pub mod introspect;
pub mod resolver;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

pub use descriptor::{EntityDescriptor, PropertyDescriptor, PropertyKind};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use introspect::{EntityIntrospector, FieldRef};
pub use resolver::{ClassifyMiss, PropertyResolver};

use crate::model::TypeModel;

/// Metadata problems that stop one entity from being described.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum DescribeError {
    #[error("type `{0}` is not in the type model")]
    #[diagnostic(code(querybean::unknown_type))]
    UnknownType(String),

    #[error("type `{0}` is neither an entity nor an embeddable")]
    #[diagnostic(code(querybean::not_generatable))]
    NotGeneratable(String),
}

/// Introspect and classify one entity or embeddable.
///
/// Classification misses never fail the entity. Notable ones (unresolvable relations, array fields without an
/// element type) become notes in `diagnostics`; the rest are only traced.
#[tracing::instrument(skip_all, fields(entity = %name))]
pub fn describe_entity<M: TypeModel + ?Sized>(
    model: &M,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Result<EntityDescriptor, DescribeError> {
    let decl = model
        .type_decl(name)
        .ok_or_else(|| DescribeError::UnknownType(name.to_string()))?;
    if !decl.is_entity_or_embeddable() {
        return Err(DescribeError::NotGeneratable(name.to_string()));
    }

    let introspector = EntityIntrospector::new(model);
    let resolver = PropertyResolver::new(model);

    let mut descriptor = EntityDescriptor::new(&decl.name, decl.is_entity());
    descriptor.db_name = introspector.find_db_name(decl).map(str::to_string);
    for field in introspector.collect_fields(decl) {
        match resolver.try_classify(field.field) {
            Ok(property) => descriptor.properties.push(property),
            Err(miss) if miss.is_notable() => {
                tracing::info!(field = %field.path(), "{miss}");
                diagnostics.push(Diagnostic::note(miss.to_string()).with_subject(field.path()));
            }
            Err(miss) => {
                tracing::debug!(field = %field.path(), "{miss}");
            }
        }
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDecl, FieldMarker, TypeDecl, TypeMarker, TypeRef, TypeSnapshot};

    fn field(name: &str, ty: &str) -> FieldDecl {
        FieldDecl::new(name, TypeRef::parse(ty).unwrap())
    }

    #[test]
    fn describes_customer() {
        let snapshot = TypeSnapshot::from_types(vec![
            TypeDecl::new("org.example.BaseModel")
                .with_marker(TypeMarker::MappedSuperclass)
                .with_db_name("crm")
                .with_field(field("id", "java.lang.Long")),
            TypeDecl::new("org.example.Customer")
                .with_superclass("org.example.BaseModel")
                .with_marker(TypeMarker::Entity)
                .with_field(field("name", "java.lang.String"))
                .with_field(field("thing", "org.example.Unknown"))
                .with_field(field("orders", "java.util.List<org.example.Order>").with_marker(FieldMarker::OneToMany))
                .with_field(field("contacts", "java.util.List<org.example.Contact>")),
            TypeDecl::new("org.example.Contact").with_marker(TypeMarker::Entity),
        ])
        .unwrap();

        let mut diagnostics = Diagnostics::new();
        let descriptor = describe_entity(&snapshot, "org.example.Customer", &mut diagnostics).unwrap();

        assert!(descriptor.is_entity);
        assert_eq!(descriptor.db_name.as_deref(), Some("crm"));
        let names: Vec<&str> = descriptor.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "contacts"]);
        assert!(descriptor.has_associations());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.for_subject("org.example.Customer.orders").count(), 1);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn rejects_unknown_and_plain_types() {
        let snapshot = TypeSnapshot::from_types(vec![TypeDecl::new("a.Plain")]).unwrap();
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            describe_entity(&snapshot, "a.Missing", &mut diagnostics),
            Err(DescribeError::UnknownType("a.Missing".to_string()))
        );
        assert_eq!(
            describe_entity(&snapshot, "a.Plain", &mut diagnostics),
            Err(DescribeError::NotGeneratable("a.Plain".to_string()))
        );
    }
}
