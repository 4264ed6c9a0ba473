// src/graph/path.rs
//! Hop-count paths for the distance game.

use std::collections::{BTreeMap, VecDeque};

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::graph::model::{FandomGraph, Subgraph};
use crate::types::FandomId;

/// A node sequence where consecutive nodes share an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    nodes: Vec<FandomId>,
}

impl Path {
    /// Number of edges traversed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// True for the length-0 path from a node to itself.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn nodes(&self) -> &[FandomId] {
        &self.nodes
    }

    #[must_use]
    pub fn source(&self) -> Option<FandomId> {
        self.nodes.first().copied()
    }

    #[must_use]
    pub fn target(&self) -> Option<FandomId> {
        self.nodes.last().copied()
    }
}

/// Outcome of a path query. No path is an expected answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Found(Path),
    NoPath,
}

impl PathOutcome {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NoPath => None,
        }
    }

    /// Path length, if a path exists.
    #[must_use]
    pub fn hops(&self) -> Option<usize> {
        self.path().map(Path::len)
    }
}

/// Unweighted shortest path from `source` to `target`.
///
/// Neighbors are expanded in ascending id order, so among equally short
/// paths the returned one is always the same.
///
/// # Errors
/// Returns `NodeNotFound` if either endpoint is missing.
pub fn shortest_path(
    graph: &FandomGraph,
    source: FandomId,
    target: FandomId,
) -> Result<PathOutcome> {
    graph.node(source)?;
    graph.node(target)?;

    if source == target {
        return Ok(PathOutcome::Found(Path {
            nodes: vec![source],
        }));
    }

    let mut predecessor: BTreeMap<FandomId, FandomId> = BTreeMap::new();
    let mut queue = VecDeque::from([source]);
    predecessor.insert(source, source);

    'search: while let Some(node) = queue.pop_front() {
        for &next in graph.adjacent(node)?.keys() {
            if predecessor.contains_key(&next) {
                continue;
            }
            predecessor.insert(next, node);
            if next == target {
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !predecessor.contains_key(&target) {
        debug!("No path between {source} and {target}");
        return Ok(PathOutcome::NoPath);
    }

    let mut nodes = vec![target];
    let mut current = target;
    while current != source {
        current = predecessor[&current];
        nodes.push(current);
    }
    nodes.reverse();

    debug!("Path {source} -> {target}: {} hops", nodes.len() - 1);
    Ok(PathOutcome::Found(Path { nodes }))
}

/// Hop distance from `source` to every reachable node, `source` included.
///
/// # Errors
/// Returns `NodeNotFound` if `source` is missing.
pub fn hop_distances(graph: &FandomGraph, source: FandomId) -> Result<BTreeMap<FandomId, usize>> {
    graph.node(source)?;

    let mut distances = BTreeMap::from([(source, 0)]);
    let mut queue = VecDeque::from([source]);

    while let Some(node) = queue.pop_front() {
        let next_hops = distances[&node] + 1;
        for &next in graph.adjacent(node)?.keys() {
            if !distances.contains_key(&next) {
                distances.insert(next, next_hops);
                queue.push_back(next);
            }
        }
    }

    Ok(distances)
}

/// The path's nodes and every edge among them.
#[must_use]
pub fn path_subgraph(graph: &FandomGraph, path: &Path) -> Subgraph {
    graph.induced_subgraph(path.nodes().iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::builder::build;
    use crate::types::{EdgeRow, NodeRow};

    // Square 1-2-4, 1-3-4 plus tail 4-5; 6 isolated.
    fn square() -> FandomGraph {
        let nodes = (1..=6).map(|i| NodeRow::new(i, format!("F{i}"), 1)).collect::<Vec<_>>();
        let edges = vec![
            EdgeRow::new(1, 3, 200),
            EdgeRow::new(1, 2, 200),
            EdgeRow::new(3, 4, 200),
            EdgeRow::new(2, 4, 200),
            EdgeRow::new(4, 5, 200),
        ];
        build(&edges, &nodes).unwrap()
    }

    #[test]
    fn test_tie_broken_by_smallest_id() {
        let g = square();
        let outcome = shortest_path(&g, 1, 5).unwrap();
        assert_eq!(outcome.path().unwrap().nodes(), &[1, 2, 4, 5]);
        assert_eq!(outcome.hops(), Some(3));
    }

    #[test]
    fn test_no_path() {
        let g = square();
        assert_eq!(shortest_path(&g, 1, 6).unwrap(), PathOutcome::NoPath);
    }

    #[test]
    fn test_missing_endpoint() {
        let g = square();
        assert!(matches!(
            shortest_path(&g, 1, 99),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_hop_distances() {
        let g = square();
        let d = hop_distances(&g, 1).unwrap();
        assert_eq!(d[&1], 0);
        assert_eq!(d[&4], 2);
        assert_eq!(d[&5], 3);
        assert!(!d.contains_key(&6));
    }

    #[test]
    fn test_path_subgraph_includes_only_path_edges() {
        let g = square();
        let outcome = shortest_path(&g, 2, 3).unwrap();
        let path = outcome.path().unwrap();
        let sub = path_subgraph(&g, path);
        assert_eq!(sub.nodes.len(), 3);
        assert_eq!(sub.edges.len(), 2);
    }
}
