// src/graph/centrality.rs
//! Centrality scores and hub selection.

use std::collections::BTreeMap;

use log::warn;
use rayon::prelude::*;

use crate::error::{GraphError, Result};
use crate::graph::components::connected_components;
use crate::graph::model::FandomGraph;
use crate::types::FandomId;

pub const DEFAULT_MAX_ITER: usize = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A per-node centrality score over the whole graph.
pub trait Centrality {
    /// Scores every node of `graph`.
    ///
    /// # Errors
    /// Implementations fail when the scores cannot be computed.
    fn scores(&self, graph: &FandomGraph) -> Result<BTreeMap<FandomId, f64>>;
}

/// `degree / (n - 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeCentrality;

impl Centrality for DegreeCentrality {
    #[allow(clippy::cast_precision_loss)]
    fn scores(&self, graph: &FandomGraph) -> Result<BTreeMap<FandomId, f64>> {
        let n = graph.node_count();
        let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 1.0 };
        Ok(graph
            .nodes()
            .map(|f| (f.id, f.degree as f64 * scale))
            .collect())
    }
}

/// Unweighted eigenvector centrality by shifted power iteration
/// (`x <- x + A x`, L2-normalized).
///
/// If the whole-graph iteration does not converge, each connected component
/// is solved on its own and its scores are scaled by the component's share
/// of the nodes.
#[derive(Debug, Clone, Copy)]
pub struct EigenvectorCentrality {
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for EigenvectorCentrality {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Centrality for EigenvectorCentrality {
    fn scores(&self, graph: &FandomGraph) -> Result<BTreeMap<FandomId, f64>> {
        let ids: Vec<FandomId> = graph.nodes.keys().copied().collect();
        if let Some(scores) = self.power_iteration(graph, &ids) {
            return Ok(ids.into_iter().zip(scores).collect());
        }
        warn!(
            "Eigenvector centrality did not converge in {} iterations; solving per component",
            self.max_iter
        );
        self.per_component(graph)
    }
}

impl EigenvectorCentrality {
    /// Scores each connected component separately, in parallel.
    ///
    /// # Errors
    /// Returns `CentralityDidNotConverge` if any component fails to converge.
    #[allow(clippy::cast_precision_loss)]
    pub fn per_component(&self, graph: &FandomGraph) -> Result<BTreeMap<FandomId, f64>> {
        let total = graph.node_count() as f64;
        let solved: Vec<Option<Vec<(FandomId, f64)>>> = connected_components(graph)
            .par_iter()
            .map(|members| {
                let share = members.len() as f64 / total;
                self.power_iteration(graph, members).map(|scores| {
                    members
                        .iter()
                        .copied()
                        .zip(scores.into_iter().map(|s| s * share))
                        .collect()
                })
            })
            .collect();

        let mut scores = BTreeMap::new();
        for component in solved {
            let component = component.ok_or(GraphError::CentralityDidNotConverge {
                iterations: self.max_iter,
            })?;
            scores.extend(component);
        }
        Ok(scores)
    }

    /// Power iteration restricted to `members`. `None` if it fails to converge.
    #[allow(clippy::cast_precision_loss)]
    fn power_iteration(&self, graph: &FandomGraph, members: &[FandomId]) -> Option<Vec<f64>> {
        let n = members.len();
        if n == 0 {
            return Some(Vec::new());
        }

        let index: BTreeMap<FandomId, usize> =
            members.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let neighbors: Vec<Vec<usize>> = members
            .iter()
            .map(|id| {
                graph
                    .adjacency
                    .get(id)
                    .map(|adj| adj.keys().filter_map(|k| index.get(k).copied()).collect())
                    .unwrap_or_default()
            })
            .collect();

        let mut x = vec![1.0 / (n as f64).sqrt(); n];
        for _ in 0..self.max_iter {
            let mut next = x.clone();
            for (v, adj) in neighbors.iter().enumerate() {
                next[v] += adj.iter().map(|&u| x[u]).sum::<f64>();
            }

            let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for v in &mut next {
                    *v /= norm;
                }
            }

            let diff: f64 = x.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            x = next;
            if diff < n as f64 * self.tolerance {
                return Some(x);
            }
        }
        None
    }
}

/// The node with the highest score; ties go to the smallest id.
///
/// # Errors
/// Returns `EmptyGraph` for a graph without nodes, or the centrality's error.
pub fn most_central_node<C>(graph: &FandomGraph, centrality: &C) -> Result<FandomId>
where
    C: Centrality + ?Sized,
{
    top_central(graph, centrality, 1)?
        .first()
        .map(|(id, _)| *id)
        .ok_or(GraphError::EmptyGraph)
}

/// The `k` highest-scoring nodes, best first.
///
/// # Errors
/// Returns `EmptyGraph` for a graph without nodes, or the centrality's error.
pub fn top_central<C>(graph: &FandomGraph, centrality: &C, k: usize) -> Result<Vec<(FandomId, f64)>>
where
    C: Centrality + ?Sized,
{
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    Ok(rank(&centrality.scores(graph)?, k))
}

/// The `k` highest of precomputed `scores`, best first; ties by smallest id.
#[must_use]
pub fn rank(scores: &BTreeMap<FandomId, f64>, k: usize) -> Vec<(FandomId, f64)> {
    let mut ranked: Vec<(FandomId, f64)> = scores.iter().map(|(&id, &s)| (id, s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}
