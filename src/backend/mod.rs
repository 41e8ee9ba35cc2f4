//! Generator backend
//!
//! Renders classified entities into Java sources and writes them out.
//!
//! ## Module Organization
//!
//! - `query_bean.rs` - Root and association query bean rendering
//! - `module_info.rs` - Module-info loader and services registration
//! - `imports.rs` - Sorted import sets with same-package filtering
//! - `java_emitter.rs` - Low-level Java source string builder
//! - `output.rs` - `ResourceStore` boundary (filesystem and in-memory)
//! - `errors.rs` - Per-entity emission errors

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]

pub mod errors;
pub mod imports;
pub mod java_emitter;
pub mod module_info;
pub mod output;
pub mod query_bean;

pub use errors::EmitError;
pub use output::{FsStore, MemoryStore, ResourceStore};
pub use query_bean::{emit_assoc, emit_root, BeanOptions, GeneratedFile};
