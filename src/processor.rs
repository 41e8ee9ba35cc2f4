//! Round driver
//!
//! The [`Processor`] owns everything that lives for one generator run: the configuration, the output store, the
//! cross-round registry and the diagnostics. The host drives it one processing round at a time; the last round
//! (`processing_over`) persists the manifest and the module-info loader.

use crate::backend::{emit_assoc, emit_root, module_info, EmitError, GeneratedFile, ResourceStore};
use crate::config::GeneratorConfig;
use crate::frontend::{describe_entity, Diagnostic, Diagnostics, EntityDescriptor};
use crate::model::{TypeModel, TypeSnapshot};
use crate::registry::{CrossRoundRegistry, FinalizeOutcome};

/// What one processing round did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// 1-based round number within the run
    pub round: usize,
    /// Entities whose beans were written
    pub generated: usize,
    /// Entities that failed and were skipped
    pub failed: usize,
    /// Qualified names of the sources written, in write order
    pub files: Vec<String>,
    /// Query packages recorded so far in this run, sorted
    pub packages: Vec<String>,
    /// Whether this round persisted the manifest and loader
    pub finalized: bool,
}

/// Drives processing rounds for one run.
pub struct Processor<S: ResourceStore> {
    config: GeneratorConfig,
    store: S,
    registry: CrossRoundRegistry,
    diagnostics: Diagnostics,
    rounds: usize,
    module_info_written: bool,
}

impl<S: ResourceStore> Processor<S> {
    pub fn new(config: GeneratorConfig, store: S) -> Self {
        let registry = CrossRoundRegistry::open(config.manifest_path.clone(), config.full_rescan);
        Self {
            config,
            store,
            registry,
            diagnostics: Diagnostics::new(),
            rounds: 0,
            module_info_written: false,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn registry(&self) -> &CrossRoundRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Run every round of a snapshot; the last one is marked as processing-over.
    #[tracing::instrument(skip_all, fields(rounds = snapshot.rounds().len()))]
    pub fn run(&mut self, snapshot: &TypeSnapshot) -> Vec<RoundSummary> {
        let rounds = snapshot.rounds();
        if rounds.is_empty() {
            return vec![self.process_round::<_, String>(snapshot, &[], true)];
        }
        let last = rounds.len() - 1;
        rounds
            .iter()
            .enumerate()
            .map(|(i, names)| self.process_round(snapshot, names, i == last))
            .collect()
    }

    /// Process one round: describe, render and write the beans of every named entity.
    ///
    /// A failing entity is reported against its name and skipped; the rest of the round carries on.
    #[tracing::instrument(skip_all, fields(round = self.rounds + 1, entities = entity_names.len()))]
    pub fn process_round<M, N>(&mut self, model: &M, entity_names: &[N], processing_over: bool) -> RoundSummary
    where
        M: TypeModel + ?Sized,
        N: AsRef<str>,
    {
        self.rounds += 1;
        let mut summary = RoundSummary {
            round: self.rounds,
            ..RoundSummary::default()
        };

        for name in entity_names {
            let name = name.as_ref();
            match self.generate_entity(model, name) {
                Ok((descriptor, files)) => {
                    self.registry.record(&descriptor);
                    summary.generated += 1;
                    summary.files.extend(files);
                }
                Err(err) => {
                    tracing::error!(entity = name, "{err}");
                    self.diagnostics.error(name, err.to_string());
                    summary.failed += 1;
                }
            }
        }

        summary.packages = self.registry.manifest().packages().iter().cloned().collect();
        tracing::info!(generated = summary.generated, failed = summary.failed, "round complete");
        self.diagnostics.note(format!(
            "Generated {} query beans in round {}, packages: [{}]",
            summary.generated,
            summary.round,
            summary.packages.join(", ")
        ));

        if processing_over {
            summary.finalized = self.finish();
        }
        summary
    }

    fn generate_entity<M: TypeModel + ?Sized>(
        &mut self,
        model: &M,
        name: &str,
    ) -> Result<(EntityDescriptor, Vec<String>), EmitError> {
        let descriptor = describe_entity(model, name, &mut self.diagnostics)?;
        let options = self.config.bean_options();

        let mut rendered = Vec::with_capacity(2);
        if descriptor.is_entity {
            rendered.push(emit_root(&descriptor, &options)?);
        }
        rendered.push(emit_assoc(&descriptor, &options)?);

        let mut files = Vec::with_capacity(rendered.len());
        for file in &rendered {
            self.write_source(file)?;
            files.push(file.qualified_name());
        }
        Ok((descriptor, files))
    }

    fn write_source(&mut self, file: &GeneratedFile) -> Result<(), EmitError> {
        self.store.write_source(file).map_err(|source| EmitError::Write {
            file: file.qualified_name(),
            source,
        })
    }

    /// Persist the manifest, then the module-info loader and its services entry. Both happen at most once.
    ///
    /// Returns whether this call did the work.
    fn finish(&mut self) -> bool {
        match self.registry.finalize_manifest(&mut self.store) {
            Ok(FinalizeOutcome::AlreadyFinalized) => return false,
            Ok(FinalizeOutcome::Empty) => {
                tracing::debug!("no entities recorded, module info skipped");
                return true;
            }
            Ok(FinalizeOutcome::Written) => {}
            Err(err) => {
                tracing::error!("{err}");
                self.diagnostics.push(
                    Diagnostic::error(err.to_string())
                        .with_subject(self.registry.manifest_path())
                        .with_hint("generated query beans were kept"),
                );
            }
        }

        if self.module_info_written || self.registry.manifest().is_empty() {
            return true;
        }
        self.module_info_written = true;
        self.write_module_info();
        true
    }

    fn write_module_info(&mut self) {
        let manifest = self.registry.manifest();
        let package = module_info::module_package(self.config.module_package.as_deref(), manifest);
        let loader = module_info::emit_module_info(manifest, &package, self.config.generated_annotation);
        let loader_name = loader.qualified_name();

        if let Err(err) = self.write_source(&loader) {
            tracing::error!("{err}");
            self.diagnostics.error(&loader_name, err.to_string());
            return;
        }
        let services_path = self.config.services_path.clone();
        if let Err(err) = self
            .store
            .write_resource(&services_path, &module_info::services_entry(&loader))
        {
            tracing::error!(path = %services_path, "failed to write services file: {err}");
            self.diagnostics
                .error(services_path, format!("failed to write services file: {err}"));
        }
    }
}
