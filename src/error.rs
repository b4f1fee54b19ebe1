use thiserror::Error;

use crate::graphs::{VertexId, Weight};

/// Structural failures of graph construction and search.
///
/// An unreachable target is not an error: searches report it as `None` and
/// an infinite distance.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("unknown vertex {0}")]
    UnknownVertex(String),
    #[error("edge {tail} -> {head} has negative weight {weight}")]
    NegativeWeight {
        tail: String,
        head: String,
        weight: Weight,
    },
    #[error("edge {tail} -> {head} has non-finite weight {weight}")]
    NonFiniteWeight {
        tail: String,
        head: String,
        weight: Weight,
    },
    #[error("distance to vertex {head} over vertex {tail} exceeds the largest finite value")]
    DistanceOverflow { tail: VertexId, head: VertexId },
    #[error("search was cancelled")]
    Cancelled,
    #[error("failed to read graph file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse graph description")]
    Json(#[from] serde_json::Error),
}
