//! Error taxonomy for the workspace. Failures propagate to the caller;
//! there is no retry or recovery policy anywhere in this toolkit.

/// Errors raised by graph queries, persistence, layout, and rendering.
#[derive(Debug, thiserror::Error)]
pub enum PrimerError {
    #[error("node not found in graph: {label}")]
    NodeNotFound { label: String },

    #[error("layout entry missing for node: {label}")]
    LayoutEntryMissing { label: String },

    #[error("cycle detected in causal graph: {path}")]
    CycleDetected { path: String },

    #[error("dot syntax error at line {line}: {message}")]
    DotSyntax { line: usize, message: String },

    #[error("invalid coordinate on node {label}: {value}")]
    InvalidCoordinate { label: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used across the workspace.
pub type PrimerResult<T> = Result<T, PrimerError>;
