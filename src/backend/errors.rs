//! Define error types for query bean emission.
//!
//! An [`EmitError`] always belongs to one entity. The processor turns it into an error diagnostic against that
//! entity and carries on with the rest of the batch.

use miette::Diagnostic;
use thiserror::Error;

use crate::frontend::DescribeError;

/// Error while describing, rendering or writing one entity's beans.
#[derive(Debug, Error, Diagnostic)]
pub enum EmitError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Describe(#[from] DescribeError),

    #[error("`{0}` is not an entity; root query beans are only generated for entities")]
    #[diagnostic(code(querybean::emit::not_an_entity))]
    NotAnEntity(String),

    #[error("missing metadata for `{entity}`: {what}")]
    #[diagnostic(code(querybean::emit::missing_metadata))]
    MissingMetadata { entity: String, what: &'static str },

    #[error("failed to write `{file}`")]
    #[diagnostic(code(querybean::emit::write), help("check that the output directory is writable"))]
    Write {
        file: String,
        #[source]
        source: std::io::Error,
    },
}
