//! Query bean vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. [`ScalarKind`](scalars::ScalarKind)) and look up spellings and
//! metadata via registry tables instead of scattering string matches across the generator.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no host type-model types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use querybean_core::lang::scalars::{self, ScalarKind};
//!
//! assert_eq!(scalars::lookup("java.lang.Long"), Some(ScalarKind::Long));
//! assert_eq!(scalars::token(ScalarKind::Long), "PLong");
//! ```

pub mod framework;
pub mod scalars;
