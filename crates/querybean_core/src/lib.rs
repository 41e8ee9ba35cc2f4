//! Provide the shared, pure vocabulary for the query bean generator.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic tables and helpers that the
//! generator consults while classifying entity fields and rendering query beans:
//! - the scalar [`lang::scalars`] registry (host type name → query property token),
//! - the [`lang::framework`] vocabulary (type names the generated sources import and extend),
//! - qualified-name helpers in [`names`].
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global mutable state, and no host type-model types.
//! - Lookups never fail loudly: absence from a table simply means “not this category”.

pub mod lang;
pub mod names;

pub use lang::scalars::{self, ScalarKind};
pub use names::QualifiedName;
