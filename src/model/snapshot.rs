//! JSON type-model snapshots
//!
//! A snapshot is the host's immutable hand-off for one run:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "org.example.domain.Customer", "annotations": ["Entity"],
//!       "fields": [ { "name": "id", "type": "java.lang.Long" } ] }
//!   ],
//!   "rounds": [["org.example.domain.Customer"]]
//! }
//! ```
//!
//! `rounds` is optional. When present it partitions the generated types into processing passes, the way an
//! incremental compiler hands over a subset of entities per round.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use super::{TypeDecl, TypeModel};

/// Errors raised while loading a snapshot.
#[derive(Debug, Error, Diagnostic)]
pub enum SnapshotError {
    #[error("cannot read snapshot '{}'", path.display())]
    #[diagnostic(code(snapshot::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot document: {0}")]
    #[diagnostic(
        code(snapshot::json),
        help("field types are strings such as \"java.util.List<org.example.Contact>\"")
    )]
    Json(#[from] serde_json::Error),

    #[error("type `{0}` is declared more than once")]
    #[diagnostic(code(snapshot::duplicate_type))]
    DuplicateType(String),

    #[error("round {round} names unknown type `{name}`")]
    #[diagnostic(code(snapshot::unknown_round_type))]
    UnknownRoundType { round: usize, name: String },

    #[error("round {round} names `{name}`, which is neither an entity nor an embeddable")]
    #[diagnostic(
        code(snapshot::not_generatable),
        help("only types annotated Entity or Embeddable get query beans")
    )]
    NotGeneratable { round: usize, name: String },
}

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    types: Vec<TypeDecl>,
    #[serde(default)]
    rounds: Option<Vec<Vec<String>>>,
}

/// An immutable, indexed [`TypeModel`] plus the processing passes to run over it.
#[derive(Debug, Clone)]
pub struct TypeSnapshot {
    types: Vec<TypeDecl>,
    index: HashMap<String, usize>,
    rounds: Vec<Vec<String>>,
}

impl TypeSnapshot {
    /// Build a snapshot with a single pass containing every entity and embeddable in declaration order.
    pub fn from_types(types: Vec<TypeDecl>) -> Result<Self, SnapshotError> {
        let mut index = HashMap::with_capacity(types.len());
        for (i, decl) in types.iter().enumerate() {
            if index.insert(decl.name.clone(), i).is_some() {
                return Err(SnapshotError::DuplicateType(decl.name.clone()));
            }
        }
        let all: Vec<String> = types
            .iter()
            .filter(|t| t.is_entity_or_embeddable())
            .map(|t| t.name.clone())
            .collect();
        Ok(Self {
            types,
            index,
            rounds: vec![all],
        })
    }

    /// Replace the processing passes, validating that every named type is generatable.
    pub fn with_rounds(mut self, rounds: Vec<Vec<String>>) -> Result<Self, SnapshotError> {
        for (round, names) in rounds.iter().enumerate() {
            for name in names {
                match self.type_decl(name) {
                    None => {
                        return Err(SnapshotError::UnknownRoundType {
                            round: round + 1,
                            name: name.clone(),
                        });
                    }
                    Some(decl) if !decl.is_entity_or_embeddable() => {
                        return Err(SnapshotError::NotGeneratable {
                            round: round + 1,
                            name: name.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        self.rounds = rounds;
        Ok(self)
    }

    /// Parse a JSON snapshot document.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let doc: SnapshotDocument = serde_json::from_str(json)?;
        let snapshot = Self::from_types(doc.types)?;
        match doc.rounds {
            Some(rounds) => snapshot.with_rounds(rounds),
            None => Ok(snapshot),
        }
    }

    /// Read and parse a JSON snapshot file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&json)?;
        tracing::debug!(
            types = snapshot.types.len(),
            rounds = snapshot.rounds.len(),
            "loaded type snapshot"
        );
        Ok(snapshot)
    }

    /// Processing passes, each a list of entity/embeddable names.
    pub fn rounds(&self) -> &[Vec<String>] {
        &self.rounds
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter()
    }
}

impl TypeModel for TypeSnapshot {
    fn type_decl(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.index.get(qualified_name).map(|&i| &self.types[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldMarker, Modifier, TypeKind, TypeMarker};

    const DOC: &str = r#"{
        "types": [
            { "name": "org.example.BaseModel", "annotations": ["MappedSuperclass"],
              "fields": [ { "name": "id", "type": "java.lang.Long" } ] },
            { "name": "org.example.Status", "kind": "enum" },
            { "name": "org.example.Customer", "superclass": "org.example.BaseModel",
              "annotations": ["Entity"], "db_name": "crm",
              "fields": [
                { "name": "status", "type": "org.example.Status" },
                { "name": "tags", "type": "java.util.List<java.lang.String>", "annotations": ["DbArray"] },
                { "name": "serialVersionUID", "type": "long", "modifiers": ["private", "static", "final"] }
              ] },
            { "name": "org.example.Address", "annotations": ["Embeddable"] }
        ]
    }"#;

    #[test]
    fn parses_document() {
        let snapshot = TypeSnapshot::from_json(DOC).unwrap();
        let customer = snapshot.type_decl("org.example.Customer").unwrap();
        assert!(customer.has_marker(TypeMarker::Entity));
        assert_eq!(customer.db_name.as_deref(), Some("crm"));
        assert_eq!(customer.fields.len(), 3);
        assert!(customer.fields[1].markers.contains(&FieldMarker::DbArray));
        assert!(customer.fields[2].modifiers.contains(&Modifier::Static));
        assert_eq!(snapshot.type_decl("org.example.Status").unwrap().kind, TypeKind::Enum);
        let base = snapshot.superclass_of(customer).unwrap();
        assert_eq!(base.name, "org.example.BaseModel");
    }

    #[test]
    fn default_round_holds_entities_and_embeddables_in_order() {
        let snapshot = TypeSnapshot::from_json(DOC).unwrap();
        assert_eq!(
            snapshot.rounds(),
            &[vec!["org.example.Customer".to_string(), "org.example.Address".to_string()]]
        );
    }

    #[test]
    fn explicit_rounds_are_validated() {
        let doc = r#"{ "types": [ { "name": "a.B", "annotations": ["Entity"] }, { "name": "a.E", "kind": "enum" } ],
                       "rounds": [["a.B"], ["a.E"]] }"#;
        let err = TypeSnapshot::from_json(doc).unwrap_err();
        assert!(matches!(err, SnapshotError::NotGeneratable { round: 2, .. }));

        let doc = r#"{ "types": [], "rounds": [["a.Missing"]] }"#;
        let err = TypeSnapshot::from_json(doc).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownRoundType { round: 1, .. }));
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let doc = r#"{ "types": [ { "name": "a.B" }, { "name": "a.B" } ] }"#;
        let err = TypeSnapshot::from_json(doc).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateType(name) if name == "a.B"));
    }

    #[test]
    fn bad_type_rendering_is_a_json_error() {
        let doc = r#"{ "types": [ { "name": "a.B", "fields": [ { "name": "x", "type": "java.util.List<" } ] } ] }"#;
        let err = TypeSnapshot::from_json(doc).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
        assert!(err.to_string().contains("unexpected end"));
    }
}
