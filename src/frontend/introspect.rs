//! Collect the mapped fields of an entity across its inheritance chain.
//!
//! Fields declared on mapped superclasses (and on classes taking part in a mapped inheritance hierarchy) are part
//! of every subclass's mapping. They are gathered base-first, so that a root class's fields always precede the
//! fields declared further down the chain; emitted beans depend on this order being stable.

use std::collections::HashSet;

use querybean_core::lang::framework;

use crate::model::{FieldDecl, TypeDecl, TypeModel};

/// A retained field together with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'m> {
    pub owner: &'m TypeDecl,
    pub field: &'m FieldDecl,
}

impl FieldRef<'_> {
    /// `<owner>.<field>`, used as a diagnostic subject.
    pub fn path(&self) -> String {
        format!("{}.{}", self.owner.name, self.field.name)
    }
}

/// Walks an entity's mapped inheritance chain over a [`TypeModel`].
pub struct EntityIntrospector<'m, M: TypeModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: TypeModel + ?Sized> EntityIntrospector<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Gather every eligible field of `entity`, ancestors' fields first.
    ///
    /// Static, transient and framework-internal (`_ebean…`) fields are dropped. If a name repeats further down
    /// the chain (a field hiding an inherited one) the first, inherited, occurrence is kept.
    pub fn collect_fields(&self, entity: &'m TypeDecl) -> Vec<FieldRef<'m>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(entity.name.as_str());
        self.mapped_ancestors(entity, &mut visited, &mut chain);
        chain.push(entity);

        let mut names = HashSet::new();
        let mut fields = Vec::new();
        for owner in chain {
            for field in &owner.fields {
                if is_ignored(field) {
                    continue;
                }
                if !names.insert(field.name.as_str()) {
                    tracing::debug!(entity = %entity.name, field = %field.name, "skipping hidden field");
                    continue;
                }
                fields.push(FieldRef { owner, field });
            }
        }
        fields
    }

    /// Push the mapped ancestors of `decl`, furthest first. Stops at an unmarked or unknown supertype.
    fn mapped_ancestors(&self, decl: &'m TypeDecl, visited: &mut HashSet<&'m str>, chain: &mut Vec<&'m TypeDecl>) {
        let Some(parent) = self.model.superclass_of(decl) else {
            return;
        };
        if !parent.is_mapped_super_or_inheritance() || !visited.insert(parent.name.as_str()) {
            return;
        }
        self.mapped_ancestors(parent, visited, chain);
        chain.push(parent);
    }

    /// Named database binding for `entity`: the first `db_name` found walking up its superclass chain.
    pub fn find_db_name(&self, entity: &'m TypeDecl) -> Option<&'m str> {
        let mut visited = HashSet::new();
        let mut current = Some(entity);
        while let Some(decl) = current {
            if !visited.insert(decl.name.as_str()) {
                return None;
            }
            if let Some(db_name) = decl.db_name.as_deref() {
                return Some(db_name);
            }
            current = self.model.superclass_of(decl);
        }
        None
    }
}

/// Not interested in static, transient or framework-internal fields.
fn is_ignored(field: &FieldDecl) -> bool {
    field.is_static() || field.is_transient() || framework::is_internal_field(&field.name)
}
