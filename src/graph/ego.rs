// src/graph/ego.rs
//! Weighted ego subgraphs: every fandom within a traversal budget of a
//! center fandom, plus the edges among them.
//!
//! The search is Dijkstra over a binary heap. Neighbors are visited in
//! ascending id order and heap ties break on id, so the same inputs always
//! produce the same node and edge lists.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use log::{debug, warn};

use crate::error::{GraphError, Result};
use crate::graph::model::FandomGraph;
use crate::types::{Edge, FandomId};

/// Default multiplier of the reference cost `weight * 0.01`.
pub const DEFAULT_COST_SCALE: f64 = 0.01;

/// Maps an edge to a traversal cost.
pub trait EdgeCost {
    fn cost(&self, edge: &Edge) -> f64;
}

impl<F> EdgeCost for F
where
    F: Fn(&Edge) -> f64,
{
    fn cost(&self, edge: &Edge) -> f64 {
        self(edge)
    }
}

/// Reference cost: crossover count times a fixed scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledWeight(pub f64);

impl Default for ScaledWeight {
    fn default() -> Self {
        Self(DEFAULT_COST_SCALE)
    }
}

impl EdgeCost for ScaledWeight {
    #[allow(clippy::cast_precision_loss)]
    fn cost(&self, edge: &Edge) -> f64 {
        edge.weight as f64 * self.0
    }
}

/// Parameters of one ego query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EgoQuery {
    pub center: FandomId,
    pub radius: u32,
    /// Cap on the number of returned nodes.
    pub max_nodes: Option<usize>,
}

impl EgoQuery {
    #[must_use]
    pub fn new(center: FandomId, radius: u32) -> Self {
        Self {
            center,
            radius,
            max_nodes: None,
        }
    }

    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}

/// Read-only result of an ego query.
#[derive(Debug, Clone, PartialEq)]
pub struct EgoSubgraph {
    pub center: FandomId,
    pub radius: u32,
    /// Shortest traversal cost from the center, for every returned node.
    pub distances: BTreeMap<FandomId, f64>,
    /// Ascending ids.
    pub nodes: Vec<FandomId>,
    /// Ascending `(source, target)`.
    pub edges: Vec<Edge>,
    /// True when `max_nodes` cut the result short.
    pub truncated: bool,
}

impl EgoSubgraph {
    #[must_use]
    pub fn contains(&self, id: FandomId) -> bool {
        self.distances.contains_key(&id)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Computes the ego subgraph of `query.center`.
///
/// # Errors
/// Returns `InvalidRadius`, `InvalidNodeCap`, `NodeNotFound`, or
/// `InvalidDistance` if the cost function yields a negative or non-finite cost.
pub fn ego_subgraph<C>(graph: &FandomGraph, query: &EgoQuery, cost: &C) -> Result<EgoSubgraph>
where
    C: EdgeCost + ?Sized,
{
    search(graph, query, cost, None)
}

/// Like [`ego_subgraph`], checking `cancel` between node expansions.
///
/// # Errors
/// Returns `Cancelled` once `cancel` is set, plus every error of
/// [`ego_subgraph`].
pub fn ego_subgraph_cancellable<C>(
    graph: &FandomGraph,
    query: &EgoQuery,
    cost: &C,
    cancel: &AtomicBool,
) -> Result<EgoSubgraph>
where
    C: EdgeCost + ?Sized,
{
    search(graph, query, cost, Some(cancel))
}

#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    node: FandomId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    // Reversed for a min-heap; equal costs pop the smaller id first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn search<C>(
    graph: &FandomGraph,
    query: &EgoQuery,
    cost: &C,
    cancel: Option<&AtomicBool>,
) -> Result<EgoSubgraph>
where
    C: EdgeCost + ?Sized,
{
    if query.radius < 1 {
        return Err(GraphError::InvalidRadius(query.radius));
    }
    if query.max_nodes == Some(0) {
        return Err(GraphError::InvalidNodeCap(0));
    }
    let center = query.center;
    graph.node(center)?;

    let distances = if query.radius == 1 {
        // Radius 1 shows the center alone.
        BTreeMap::from([(center, 0.0)])
    } else {
        dijkstra(graph, center, f64::from(query.radius), cost, cancel)?
    };

    let mut members: BTreeSet<FandomId> = distances.keys().copied().collect();
    let truncated = match query.max_nodes {
        Some(cap) if members.len() > cap => {
            warn!(
                "Ego subgraph of {center} has {} nodes; keeping {cap}",
                members.len()
            );
            members = truncate(&members, center, cap);
            true
        }
        _ => false,
    };
    let distances: BTreeMap<FandomId, f64> = distances
        .into_iter()
        .filter(|(id, _)| members.contains(id))
        .collect();
    let edges = graph.induced_edges(&members);

    debug!(
        "Ego subgraph of {center} (radius {}): {} nodes, {} edges{}",
        query.radius,
        members.len(),
        edges.len(),
        if truncated { ", truncated" } else { "" }
    );

    Ok(EgoSubgraph {
        center,
        radius: query.radius,
        distances,
        nodes: members.into_iter().collect(),
        edges,
        truncated,
    })
}

fn dijkstra<C>(
    graph: &FandomGraph,
    center: FandomId,
    radius: f64,
    cost: &C,
    cancel: Option<&AtomicBool>,
) -> Result<BTreeMap<FandomId, f64>>
where
    C: EdgeCost + ?Sized,
{
    let mut best: BTreeMap<FandomId, f64> = BTreeMap::new();
    let mut settled: BTreeSet<FandomId> = BTreeSet::new();
    let mut heap = BinaryHeap::new();

    best.insert(center, 0.0);
    heap.push(State {
        cost: 0.0,
        node: center,
    });

    while let Some(State { cost: dist, node }) = heap.pop() {
        if cancel.is_some_and(|flag| flag.load(AtomicOrdering::Relaxed)) {
            return Err(GraphError::Cancelled);
        }
        if !settled.insert(node) {
            continue;
        }

        for (&next, &weight) in graph.adjacent(node)? {
            if settled.contains(&next) {
                continue;
            }
            let edge = Edge::new(node, next, weight);
            let step = cost.cost(&edge);
            if !step.is_finite() || step < 0.0 {
                return Err(GraphError::InvalidDistance {
                    source_id: edge.source,
                    target_id: edge.target,
                    cost: step,
                });
            }
            let next_dist = dist + step;
            if next_dist > radius {
                continue;
            }
            if best.get(&next).map_or(true, |&d| next_dist < d) {
                best.insert(next, next_dist);
                heap.push(State {
                    cost: next_dist,
                    node: next,
                });
            }
        }
    }

    Ok(best)
}

/// Keeps the center plus the smallest remaining ids, `cap` nodes in total.
fn truncate(members: &BTreeSet<FandomId>, center: FandomId, cap: usize) -> BTreeSet<FandomId> {
    std::iter::once(center)
        .chain(members.iter().copied().filter(|&id| id != center))
        .take(cap)
        .collect()
}
