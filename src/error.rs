use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisjointSetError {
    #[error("{index} is not a valid index (capacity {capacity})")]
    OutOfRange { index: i64, capacity: usize },
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not read scenario: {0}")]
    Io(#[from] io::Error),

    #[error("scenario is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),

    #[error("malformed scenario: {what}")]
    Malformed { what: String },

    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
}

impl ScenarioError {
    pub(crate) fn malformed<S: Into<String>>(what: S) -> ScenarioError {
        ScenarioError::Malformed { what: what.into() }
    }
}
