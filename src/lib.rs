#![forbid(unsafe_code)]
//! Query bean generator
//!
//! Generates type-safe query beans for persistent entities: for every entity a root query bean
//! (`<package>.query.Q<Entity>`) and an association query bean (`<package>.query.assoc.QAssoc<Entity>`), plus a
//! module manifest and a module-info loader that survive incremental, multi-round builds.
//!
//! ## Pipeline
//!
//! 1. `model` - the host's type declarations, loaded from a JSON snapshot behind the `TypeModel` trait
//! 2. `frontend` - inheritance-aware field collection and property classification
//! 3. `backend` - deterministic Java source rendering and the output store
//! 4. `registry` - cross-round accumulation and the read-merge-write manifest
//! 5. `processor` - drives rounds and collects diagnostics
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Per-entity failures** never panic or abort a run; they become error diagnostics against the entity.

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod model;
pub mod processor;
pub mod registry;

pub use frontend::diagnostics;

pub use backend::{FsStore, MemoryStore, ResourceStore};
pub use config::GeneratorConfig;
pub use model::{TypeModel, TypeSnapshot};
pub use processor::{Processor, RoundSummary};
pub use registry::{CrossRoundRegistry, ModuleManifest};
