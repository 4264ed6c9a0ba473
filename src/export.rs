// src/export.rs
//! Serializable views of query results for display and JSON output.

use anyhow::Result;
use serde::Serialize;

use crate::graph::ego::EgoSubgraph;
use crate::graph::model::{FandomGraph, Subgraph};
use crate::graph::path::Path;
use crate::types::{Edge, Fandom, FandomId};

/// Base node size added to the degree.
pub const BASE_NODE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: FandomId,
    pub name: String,
    pub popularity_count: u64,
    pub degree: usize,
    pub log_popularity: f64,
    pub size: usize,
    /// Hover text.
    pub title: String,
    pub is_center: bool,
}

impl NodeRecord {
    #[must_use]
    pub fn new(fandom: &Fandom, is_center: bool) -> Self {
        Self {
            id: fandom.id,
            name: fandom.name.clone(),
            popularity_count: fandom.popularity_count,
            degree: fandom.degree,
            log_popularity: fandom.log_popularity,
            size: fandom.degree + BASE_NODE_SIZE,
            title: format!(
                "Fandom: {}\nDegree: {}\nCount: {}",
                fandom.name, fandom.degree, fandom.popularity_count
            ),
            is_center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub source: FandomId,
    pub target: FandomId,
    pub weight: u64,
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source,
            target: edge.target,
            weight: edge.weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubgraphRecord {
    pub center: Option<FandomId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    pub truncated: bool,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

fn records(
    graph: &FandomGraph,
    ids: &[FandomId],
    edges: &[Edge],
    center: Option<FandomId>,
) -> (Vec<NodeRecord>, Vec<EdgeRecord>) {
    let nodes = ids
        .iter()
        .filter_map(|&id| graph.node(id).ok())
        .map(|f| NodeRecord::new(f, Some(f.id) == center))
        .collect();
    (nodes, edges.iter().map(EdgeRecord::from).collect())
}

/// Record for an ego query; the center is flagged.
#[must_use]
pub fn ego_record(graph: &FandomGraph, ego: &EgoSubgraph) -> SubgraphRecord {
    let (nodes, edges) = records(graph, &ego.nodes, &ego.edges, Some(ego.center));
    SubgraphRecord {
        center: Some(ego.center),
        radius: Some(ego.radius),
        truncated: ego.truncated,
        nodes,
        edges,
    }
}

/// Record for a path; both endpoints are flagged as centers.
#[must_use]
pub fn path_record(graph: &FandomGraph, path: &Path) -> SubgraphRecord {
    let sub = crate::graph::path::path_subgraph(graph, path);
    let mut record = subgraph_record(graph, &sub, path.source());
    if let Some(target) = path.target() {
        for node in &mut record.nodes {
            node.is_center |= node.id == target;
        }
    }
    record
}

#[must_use]
pub fn subgraph_record(
    graph: &FandomGraph,
    sub: &Subgraph,
    center: Option<FandomId>,
) -> SubgraphRecord {
    let (nodes, edges) = records(graph, &sub.nodes, &sub.edges, center);
    SubgraphRecord {
        center,
        radius: None,
        truncated: false,
        nodes,
        edges,
    }
}

/// Pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
