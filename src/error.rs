//! Error types for datamodel-to-graph processing.

use std::io;

use thiserror::Error;

/// Structural problems that make the graph unbuildable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("Relation `{relation}` has {count} field(s), expected exactly 2")]
    MalformedRelation { relation: String, count: usize },

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("Duplicate edge id: {0}")]
    DuplicateEdgeId(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Transform(#[from] TransformError),
}
