//! Error kinds surfaced by the alignment and HSSP pipelines.
//!
//! Every error here is fatal: the pipeline recovers nothing locally, and any
//! partially computed state is discarded by the caller unwinding with `?`.

/// Fatal pipeline errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid residue letter, malformed record, or a query that does not
    /// match the alignment it is supposed to head.
    #[error("invalid input: {0}")]
    InputValidation(String),

    /// Fewer than two sequences, or no hits survive the homology threshold.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Unknown substitution matrix or matrix family.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// A contract the core relies on was violated. Indicates a bug.
    #[error("internal consistency: {0}")]
    InternalConsistency(String),
}

pub type Result<T> = std::result::Result<T, Error>;
