//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use crate::backend::{FsStore, MemoryStore, ResourceStore};
use crate::config::GeneratorConfig;
use crate::frontend::diagnostics::{print_diagnostic, Diagnostics};
use crate::model::TypeSnapshot;
use crate::processor::{Processor, RoundSummary};
use crate::registry::ModuleManifest;

use super::{CliError, CliResult, ExitCode, GenerateArgs};

/// Build the generator configuration from `generate` flags.
pub fn config_from_args(args: &GenerateArgs) -> GeneratorConfig {
    let mut config = GeneratorConfig::new()
        .with_generated_annotation(!args.no_generated_annotation)
        .with_max_path_depth(args.max_depth)
        .with_full_rescan(args.full);
    if let Some(package) = &args.module_package {
        config = config.with_module_package(package.as_str());
    }
    config
}

/// Run the generator over a snapshot file.
pub fn generate(args: &GenerateArgs) -> CliResult<ExitCode> {
    let snapshot = TypeSnapshot::load(&args.snapshot).map_err(CliError::report)?;
    let config = config_from_args(args);

    if args.dry_run {
        let (summaries, diagnostics, store) = run_processor(config, MemoryStore::new(), &snapshot);
        for name in store.source_names() {
            println!("{name}");
        }
        for path in store.resource_paths() {
            println!("{path}");
        }
        return Ok(finish(&summaries, &diagnostics));
    }

    let resources = args.resources.as_deref().unwrap_or(&args.out);
    let store = FsStore::new(&args.out, resources);
    let (summaries, diagnostics, _) = run_processor(config, store, &snapshot);
    Ok(finish(&summaries, &diagnostics))
}

fn run_processor<S: ResourceStore>(
    config: GeneratorConfig,
    store: S,
    snapshot: &TypeSnapshot,
) -> (Vec<RoundSummary>, Diagnostics, S) {
    let mut processor = Processor::new(config, store);
    let summaries = processor.run(snapshot);
    let diagnostics = processor.diagnostics().clone();
    (summaries, diagnostics, processor.into_store())
}

/// Print diagnostics and pick the exit code: failure if anything was reported as an error.
fn finish(summaries: &[RoundSummary], diagnostics: &Diagnostics) -> ExitCode {
    for diagnostic in diagnostics.iter() {
        print_diagnostic(diagnostic);
    }
    let generated: usize = summaries.iter().map(|s| s.generated).sum();
    let failed: usize = summaries.iter().map(|s| s.failed).sum();
    eprintln!("{generated} entities generated, {failed} failed");
    if diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Print a manifest's packages and entity groups.
pub fn print_manifest(path: &Path) -> CliResult<ExitCode> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))?;
    let manifest = ModuleManifest::parse(&text).map_err(CliError::report)?;
    print!("{}", describe_manifest(&manifest));
    Ok(ExitCode::SUCCESS)
}

/// Human-readable listing of a manifest.
pub fn describe_manifest(manifest: &ModuleManifest) -> String {
    let mut out = String::from("packages:\n");
    for package in manifest.packages() {
        out.push_str(&format!("  {package}\n"));
    }
    out.push_str("entities (default):\n");
    for entity in manifest.entities() {
        out.push_str(&format!("  {entity}\n"));
    }
    for (db, entities) in manifest.db_entities() {
        out.push_str(&format!("entities ({db}):\n"));
        for entity in entities {
            out.push_str(&format!("  {entity}\n"));
        }
    }
    out
}
