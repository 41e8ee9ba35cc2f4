//! Cross-round registry
//!
//! An incremental build hands the generator a subset of its entities per processing round, and a partial
//! recompile may hand over only the entities that changed. The registry accumulates what every round of this
//! run generated and, once the run is over, merges it with the manifest an earlier run left behind before writing
//! it back. Entries recorded by earlier runs are therefore never lost unless a full re-scan asks for it.
//!
//! Lifecycle: [`CrossRoundRegistry::open`] → [`record`](CrossRoundRegistry::record)* →
//! [`finalize_manifest`](CrossRoundRegistry::finalize_manifest). Finalizing is guarded: only the first call reads,
//! merges and writes; later calls in the same run do nothing.

pub mod manifest;

pub use manifest::{ManifestError, ModuleManifest};

use crate::backend::ResourceStore;
use crate::frontend::EntityDescriptor;

/// What [`CrossRoundRegistry::finalize_manifest`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// The merged manifest was written.
    Written,
    /// Nothing was recorded, this run or before; no manifest written.
    Empty,
    /// An earlier call already finalized this run.
    AlreadyFinalized,
}

/// Run-scoped accumulator of generated packages and entities.
#[derive(Debug)]
pub struct CrossRoundRegistry {
    manifest_path: String,
    full_rescan: bool,
    manifest: ModuleManifest,
    finalized: bool,
}

impl CrossRoundRegistry {
    /// Start an empty registry persisting to `manifest_path`.
    ///
    /// With `full_rescan` the prior manifest is ignored, so the written manifest holds exactly this run's entries.
    pub fn open(manifest_path: impl Into<String>, full_rescan: bool) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            full_rescan,
            manifest: ModuleManifest::new(),
            finalized: false,
        }
    }

    /// Record an entity whose beans were generated into `destination_package`.
    pub fn record_entity(&mut self, entity: &str, destination_package: &str, db_name: Option<&str>) {
        self.manifest.add_package(destination_package);
        self.manifest.add_entity(entity, db_name);
    }

    /// Record a described entity under its root query package.
    pub fn record(&mut self, entity: &EntityDescriptor) {
        self.record_entity(
            entity.name.as_str(),
            &entity.name.query_package(),
            entity.db_name.as_deref(),
        );
    }

    /// Current state: this run's entries, plus the prior manifest's once finalized.
    pub fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn manifest_path(&self) -> &str {
        &self.manifest_path
    }

    /// Merge the prior manifest (if any) and write the result, once per run.
    ///
    /// Failing to read the prior manifest is never an error: a missing, unreadable or malformed file just means
    /// there is no prior state. Only the write can fail. The guard is set before writing, so a failed write is
    /// not retried by a later call.
    #[tracing::instrument(skip_all, fields(path = %self.manifest_path))]
    pub fn finalize_manifest(&mut self, store: &mut dyn ResourceStore) -> Result<FinalizeOutcome, ManifestError> {
        if self.finalized {
            tracing::debug!("manifest already finalized");
            return Ok(FinalizeOutcome::AlreadyFinalized);
        }
        self.finalized = true;

        if self.full_rescan {
            tracing::debug!("full re-scan, prior manifest ignored");
        } else if let Some(mut prior) = self.read_prior(store) {
            // This run's grouping of an entity replaces the one recorded before.
            for entity in self.manifest.all_entities() {
                prior.remove_entity(entity);
            }
            self.manifest.merge(&prior);
        }

        if self.manifest.is_empty() {
            return Ok(FinalizeOutcome::Empty);
        }
        store
            .write_resource(&self.manifest_path, &self.manifest.render())
            .map_err(|source| ManifestError::Write {
                path: self.manifest_path.clone(),
                source,
            })?;
        tracing::debug!(packages = self.manifest.packages().len(), "manifest written");
        Ok(FinalizeOutcome::Written)
    }

    fn read_prior(&self, store: &dyn ResourceStore) -> Option<ModuleManifest> {
        let text = match store.read_resource(&self.manifest_path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(source) => {
                let err = ManifestError::Read {
                    path: self.manifest_path.clone(),
                    source,
                };
                tracing::warn!("{err}, continuing without prior state");
                return None;
            }
        };
        match ModuleManifest::parse(&text) {
            Ok(prior) => Some(prior),
            Err(err) => {
                tracing::warn!("ignoring malformed manifest: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;

    const PATH: &str = "META-INF/ebean-generated-info.mf";

    #[test]
    fn finalize_writes_once() {
        let mut store = MemoryStore::new();
        let mut registry = CrossRoundRegistry::open(PATH, false);
        registry.record_entity("a.Customer", "a.query", None);

        assert_eq!(registry.finalize_manifest(&mut store).unwrap(), FinalizeOutcome::Written);
        let first = store.resource(PATH).unwrap().to_string();
        assert_eq!(
            registry.finalize_manifest(&mut store).unwrap(),
            FinalizeOutcome::AlreadyFinalized
        );
        assert_eq!(store.resource(PATH).unwrap(), first);
        assert_eq!(store.resource_writes(), 1);
        assert!(registry.is_finalized());
    }

    #[test]
    fn prior_entries_are_merged() {
        let mut store = MemoryStore::new().with_resource(PATH, "entity-packages: b.query\nentity-classes: b.Order\n");
        let mut registry = CrossRoundRegistry::open(PATH, false);
        registry.record_entity("a.Customer", "a.query", Some("crm"));
        registry.finalize_manifest(&mut store).unwrap();

        let written = ModuleManifest::parse(store.resource(PATH).unwrap()).unwrap();
        assert_eq!(written.packages().len(), 2);
        assert!(written.entities().contains("b.Order"));
        assert!(written.db_entities()["crm"].contains("a.Customer"));
        assert_eq!(&written, registry.manifest());
    }

    #[test]
    fn entities_seen_this_run_move_to_their_new_group() {
        let prior = "entity-packages: a.query\n\
                     entity-classes: a.Customer\n  a.Order\n\
                     entity-classes.crm: a.Invoice\n";
        let mut store = MemoryStore::new().with_resource(PATH, prior);
        let mut registry = CrossRoundRegistry::open(PATH, false);
        registry.record_entity("a.Customer", "a.query", Some("crm"));
        registry.record_entity("a.Invoice", "a.query", None);
        registry.finalize_manifest(&mut store).unwrap();

        let written = ModuleManifest::parse(store.resource(PATH).unwrap()).unwrap();
        let default: Vec<&str> = written.entities().iter().map(String::as_str).collect();
        assert_eq!(default, ["a.Invoice", "a.Order"]);
        let crm: Vec<&str> = written.db_entities()["crm"].iter().map(String::as_str).collect();
        assert_eq!(crm, ["a.Customer"]);
    }

    #[test]
    fn emptied_prior_group_is_dropped() {
        let mut store = MemoryStore::new().with_resource(PATH, "entity-classes.audit: a.Event\n");
        let mut registry = CrossRoundRegistry::open(PATH, false);
        registry.record_entity("a.Event", "a.query", None);
        registry.finalize_manifest(&mut store).unwrap();
        assert!(registry.manifest().db_entities().is_empty());
        assert!(!store.resource(PATH).unwrap().contains("entity-classes.audit"));
    }

    #[test]
    fn malformed_prior_manifest_is_ignored() {
        let mut store = MemoryStore::new().with_resource(PATH, "garbage without colon\n");
        let mut registry = CrossRoundRegistry::open(PATH, false);
        registry.record_entity("a.Customer", "a.query", None);
        assert_eq!(registry.finalize_manifest(&mut store).unwrap(), FinalizeOutcome::Written);
        let written = ModuleManifest::parse(store.resource(PATH).unwrap()).unwrap();
        assert_eq!(written.packages().len(), 1);
    }

    #[test]
    fn full_rescan_supersedes_prior_manifest() {
        let mut store = MemoryStore::new().with_resource(PATH, "entity-packages: old.query\n");
        let mut registry = CrossRoundRegistry::open(PATH, true);
        registry.record_entity("a.Customer", "a.query", None);
        registry.finalize_manifest(&mut store).unwrap();
        let written = ModuleManifest::parse(store.resource(PATH).unwrap()).unwrap();
        assert!(!written.packages().contains("old.query"));
    }

    #[test]
    fn nothing_recorded_writes_nothing() {
        let mut store = MemoryStore::new();
        let mut registry = CrossRoundRegistry::open(PATH, false);
        assert_eq!(registry.finalize_manifest(&mut store).unwrap(), FinalizeOutcome::Empty);
        assert_eq!(store.resource_writes(), 0);
    }

    #[test]
    fn write_failure_surfaces_and_is_not_retried() {
        let mut store = MemoryStore::new().with_read_only_resources();
        let mut registry = CrossRoundRegistry::open(PATH, false);
        registry.record_entity("a.Customer", "a.query", None);
        let err = registry.finalize_manifest(&mut store).unwrap_err();
        assert!(matches!(err, ManifestError::Write { .. }));
        assert_eq!(
            registry.finalize_manifest(&mut store).unwrap(),
            FinalizeOutcome::AlreadyFinalized
        );
    }
}
