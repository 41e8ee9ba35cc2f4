//! The module manifest resource
//!
//! A small `key: value` text file listing the query packages and entity classes generated so far:
//!
//! ```text
//! generated-by: querybean-gen
//! entity-packages: org.example.domain.query
//!   org.example.audit.query
//! entity-classes: org.example.domain.Customer
//!   org.example.domain.Contact
//! entity-classes.audit: org.example.audit.Event
//! ```
//!
//! Values may be separated by commas or spread over indented continuation lines. Content is set-valued: the
//! order things were added in is not preserved, and rendering is sorted.

use std::collections::{BTreeMap, BTreeSet};

use miette::Diagnostic;
use thiserror::Error;

pub const GENERATED_BY_KEY: &str = "generated-by";
pub const PACKAGES_KEY: &str = "entity-packages";
pub const ENTITIES_KEY: &str = "entity-classes";
/// Value stamped into `generated-by`.
pub const GENERATED_BY: &str = "querybean-gen";

const CONTINUATION: &str = "  ";

/// Errors raised while reading or writing a manifest.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("line {line}: expected `key: value`, found `{content}`")]
    #[diagnostic(code(querybean::manifest::malformed))]
    Malformed { line: usize, content: String },

    #[error("line {line}: continuation line outside of any entry")]
    #[diagnostic(code(querybean::manifest::orphan_continuation))]
    OrphanContinuation { line: usize },

    #[error("cannot read manifest `{path}`")]
    #[diagnostic(code(querybean::manifest::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write manifest `{path}`")]
    #[diagnostic(code(querybean::manifest::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Packages and entities generated by this module, across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleManifest {
    packages: BTreeSet<String>,
    /// Entities without a named database binding
    entities: BTreeSet<String>,
    /// Entities per named database binding
    db_entities: BTreeMap<String, BTreeSet<String>>,
}

impl ModuleManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&mut self, package: &str) {
        self.packages.insert(package.to_string());
    }

    /// Record an entity in the default group, or in its database binding's group.
    pub fn add_entity(&mut self, entity: &str, db_name: Option<&str>) {
        match db_name {
            Some(db) => {
                self.db_entities
                    .entry(db.to_string())
                    .or_default()
                    .insert(entity.to_string());
            }
            None => {
                self.entities.insert(entity.to_string());
            }
        }
    }

    /// Drop `entity` from every group. Groups left empty are removed.
    pub fn remove_entity(&mut self, entity: &str) {
        self.entities.remove(entity);
        for entities in self.db_entities.values_mut() {
            entities.remove(entity);
        }
        self.db_entities.retain(|_, entities| !entities.is_empty());
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: &ModuleManifest) {
        self.packages.extend(other.packages.iter().cloned());
        self.entities.extend(other.entities.iter().cloned());
        for (db, entities) in &other.db_entities {
            self.db_entities
                .entry(db.clone())
                .or_default()
                .extend(entities.iter().cloned());
        }
    }

    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    /// Entities of the default (unbound) group.
    pub fn entities(&self) -> &BTreeSet<String> {
        &self.entities
    }

    pub fn db_entities(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.db_entities
    }

    /// Every entity, whatever its group, sorted and de-duplicated.
    pub fn all_entities(&self) -> BTreeSet<&str> {
        self.entities
            .iter()
            .chain(self.db_entities.values().flatten())
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.entities.is_empty() && self.db_entities.values().all(BTreeSet::is_empty)
    }

    /// Parse manifest text. Unknown keys are ignored.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut manifest = ModuleManifest::new();
        let mut current: Option<String> = None;
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            if raw.trim().is_empty() {
                continue;
            }
            let values = if raw.starts_with(char::is_whitespace) {
                if current.is_none() {
                    return Err(ManifestError::OrphanContinuation { line });
                }
                raw
            } else {
                let Some((key, rest)) = raw.split_once(':') else {
                    return Err(ManifestError::Malformed {
                        line,
                        content: raw.to_string(),
                    });
                };
                current = Some(key.trim().to_string());
                rest
            };
            if let Some(key) = current.as_deref() {
                manifest.add_values(key, values);
            }
        }
        Ok(manifest)
    }

    fn add_values(&mut self, key: &str, values: &str) {
        let items = values.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty());
        if key == PACKAGES_KEY {
            self.packages.extend(items.map(str::to_string));
        } else if key == ENTITIES_KEY {
            self.entities.extend(items.map(str::to_string));
        } else if let Some(db) = key.strip_prefix(ENTITIES_KEY).and_then(|k| k.strip_prefix('.')) {
            self.db_entities
                .entry(decode_binding(db))
                .or_default()
                .extend(items.map(str::to_string));
        }
    }

    /// Render manifest text, one value per line, sorted. Empty groups are left out.
    pub fn render(&self) -> String {
        let mut out = format!("{GENERATED_BY_KEY}: {GENERATED_BY}\n");
        render_entry(&mut out, PACKAGES_KEY, &self.packages);
        render_entry(&mut out, ENTITIES_KEY, &self.entities);
        for (db, entities) in &self.db_entities {
            render_entry(&mut out, &format!("{ENTITIES_KEY}.{}", encode_binding(db)), entities);
        }
        out
    }
}

fn render_entry(out: &mut String, key: &str, values: &BTreeSet<String>) {
    if values.is_empty() {
        return;
    }
    out.push_str(key);
    out.push_str(": ");
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(CONTINUATION);
        }
        out.push_str(value);
    }
    out.push('\n');
}

/// Percent-encode the bytes of a binding name that would end the key early or read as a continuation line.
fn encode_binding(db: &str) -> String {
    let mut out = String::with_capacity(db.len());
    for c in db.chars() {
        if c == '%' || c == ':' || c == ',' || c.is_whitespace() {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn decode_binding(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| encoded.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
