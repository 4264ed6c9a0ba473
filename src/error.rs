// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::types::FandomId;

/// Failures raised while building or querying a fandom graph.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid edge on row {row}: {reason}")]
    InvalidEdge { row: usize, reason: String },

    #[error("Invalid node {id}: {reason}")]
    InvalidNode { id: FandomId, reason: String },

    #[error("Duplicate node id {0}")]
    DuplicateNode(FandomId),

    #[error("Edge on row {row} references unknown node {id}")]
    DanglingEdge { row: usize, id: FandomId },

    #[error("Fandom not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid radius {0}: must be at least 1")]
    InvalidRadius(u32),

    #[error("Invalid node cap {0}: must be at least 1")]
    InvalidNodeCap(usize),

    #[error("Invalid traversal cost {cost} on edge {source_id}-{target_id}")]
    InvalidDistance {
        source_id: FandomId,
        target_id: FandomId,
        cost: f64,
    },

    #[error("Query cancelled")]
    Cancelled,

    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("Centrality did not converge after {iterations} iterations")]
    CentralityDidNotConverge { iterations: usize },
}

impl GraphError {
    /// True for errors that make the input tables unusable.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::InvalidEdge { .. }
                | Self::InvalidNode { .. }
                | Self::DuplicateNode(_)
                | Self::DanglingEdge { .. }
        )
    }

    pub(crate) fn not_found(id: FandomId) -> Self {
        Self::NodeNotFound(id.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures raised while reading the input tables from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
