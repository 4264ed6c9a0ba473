// src/types.rs
use serde::Serialize;

/// Canonical fandom key. Names collide in the archive; ids do not.
pub type FandomId = u64;

/// A fandom node with its display attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fandom {
    pub id: FandomId,
    pub name: String,
    pub popularity_count: u64,
    /// `ln(1 + popularity_count)`, used for display scaling.
    pub log_popularity: f64,
    pub degree: usize,
}

/// An undirected crossover edge, stored with `source < target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub source: FandomId,
    pub target: FandomId,
    pub weight: u64,
}

impl Edge {
    /// Builds an edge with its endpoints in canonical order.
    #[must_use]
    pub fn new(a: FandomId, b: FandomId, weight: u64) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the endpoint opposite `id`, if `id` is an endpoint.
    #[must_use]
    pub fn other(&self, id: FandomId) -> Option<FandomId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }
}

/// One row of the edge table. Endpoints are optional so that blank cells
/// surface as invalid edges instead of parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub a: Option<FandomId>,
    pub b: Option<FandomId>,
    pub weight: i64,
}

impl EdgeRow {
    #[must_use]
    pub fn new(a: FandomId, b: FandomId, weight: i64) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
            weight,
        }
    }
}

/// One row of the node table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub id: FandomId,
    pub name: String,
    pub popularity_count: i64,
}

impl NodeRow {
    #[must_use]
    pub fn new(id: FandomId, name: impl Into<String>, popularity_count: i64) -> Self {
        Self {
            id,
            name: name.into(),
            popularity_count,
        }
    }
}
