//! Error types.
//!
//! Setup-time validation is reported before execution begins; runtime
//! dynamics are always a silent no-op, never an error. This module only
//! models the former — see `dispatch`/`nearest` for the no-op paths.

use crate::ident::VertexId;

/// Setup-time validation failure. Execution never starts when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An initial edge referenced an id with no corresponding vertex.
    #[error("edge references missing vertex {0}")]
    MissingVertex(VertexId),
    /// An initial edge connected a vertex to itself.
    #[error("self-loop on vertex {0}")]
    SelfLoop(VertexId),
}

/// Top-level error for engine construction and configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Setup-time validation failed; see [`ValidationError`] for detail.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
