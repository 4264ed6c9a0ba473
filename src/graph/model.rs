// src/graph/model.rs
//! The immutable fandom graph and its read-only query interface.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound::{Excluded, Unbounded};

use crate::error::{GraphError, Result};
use crate::graph::queries::{self, SearchOptions};
use crate::types::{Edge, Fandom, FandomId};

/// Weighted undirected crossover graph.
///
/// Adjacency is kept in ordered maps so every traversal visits neighbors in
/// ascending id order. Every node has an adjacency entry, possibly empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FandomGraph {
    pub(crate) nodes: BTreeMap<FandomId, Fandom>,
    pub(crate) adjacency: BTreeMap<FandomId, BTreeMap<FandomId, u64>>,
    pub(crate) edge_count: usize,
}

/// An induced node/edge subset of a [`FandomGraph`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subgraph {
    pub nodes: Vec<FandomId>,
    pub edges: Vec<Edge>,
}

impl FandomGraph {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: FandomId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Looks up a fandom by id.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if the id is not in the graph.
    pub fn node(&self, id: FandomId) -> Result<&Fandom> {
        self.nodes.get(&id).ok_or_else(|| GraphError::not_found(id))
    }

    /// Returns the precomputed degree of a fandom.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if the id is not in the graph.
    pub fn degree_of(&self, id: FandomId) -> Result<usize> {
        self.node(id).map(|f| f.degree)
    }

    /// Returns the fandoms directly connected to `id`.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if the id is not in the graph.
    pub fn neighbors(&self, id: FandomId) -> Result<BTreeSet<FandomId>> {
        Ok(self.adjacent(id)?.keys().copied().collect())
    }

    /// Returns the crossover count between two fandoms, if they share an edge.
    #[must_use]
    pub fn edge_weight(&self, a: FandomId, b: FandomId) -> Option<u64> {
        self.adjacency.get(&a).and_then(|adj| adj.get(&b)).copied()
    }

    /// All fandoms in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Fandom> + '_ {
        self.nodes.values()
    }

    /// All edges in ascending `(source, target)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(&id, adj)| {
            adj.range((Excluded(id), Unbounded))
                .map(move |(&other, &weight)| Edge::new(id, other, weight))
        })
    }

    /// Every edge whose endpoints are both in `members`.
    #[must_use]
    pub fn induced_edges(&self, members: &BTreeSet<FandomId>) -> Vec<Edge> {
        let mut edges = Vec::new();
        for &id in members {
            let Some(adj) = self.adjacency.get(&id) else {
                continue;
            };
            for (&other, &weight) in adj.range((Excluded(id), Unbounded)) {
                if members.contains(&other) {
                    edges.push(Edge::new(id, other, weight));
                }
            }
        }
        edges
    }

    /// Induced subgraph over the given ids. Unknown ids are skipped.
    #[must_use]
    pub fn induced_subgraph<I>(&self, ids: I) -> Subgraph
    where
        I: IntoIterator<Item = FandomId>,
    {
        let members: BTreeSet<FandomId> = ids.into_iter().filter(|id| self.contains(*id)).collect();
        let edges = self.induced_edges(&members);
        Subgraph {
            nodes: members.into_iter().collect(),
            edges,
        }
    }

    /// Substring search over fandom names, most popular first.
    #[must_use]
    pub fn find_by_name(&self, query: &str, options: &SearchOptions) -> Vec<&Fandom> {
        queries::find_by_name(self, query, options)
    }

    /// All fandoms whose name is exactly `name`, most popular first.
    #[must_use]
    pub fn find_by_exact_name(&self, name: &str) -> Vec<&Fandom> {
        queries::find_by_exact_name(self, name)
    }

    /// Resolves a user-supplied id or name to a fandom id.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if nothing matches.
    pub fn resolve(&self, query: &str) -> Result<FandomId> {
        queries::resolve(self, query)
    }

    pub(crate) fn adjacent(&self, id: FandomId) -> Result<&BTreeMap<FandomId, u64>> {
        self.adjacency.get(&id).ok_or_else(|| GraphError::not_found(id))
    }
}
