// src/graph/store.rs
//! Process-wide graph state: the immutable graph plus the cached hub.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use log::{debug, info};

use crate::error::{GraphError, Result};
use crate::graph::builder;
use crate::graph::centrality::{rank, Centrality, EigenvectorCentrality};
use crate::graph::ego::{self, EdgeCost, EgoQuery, EgoSubgraph};
use crate::graph::model::FandomGraph;
use crate::graph::path::{self, PathOutcome};
use crate::types::{EdgeRow, FandomId, NodeRow};

/// Built once per process; every query afterwards borrows it immutably.
///
/// Centrality scores are solved at most once and shared by the hub and the
/// ranking queries.
pub struct GraphStore {
    graph: FandomGraph,
    centrality: Box<dyn Centrality + Send + Sync>,
    scores: OnceLock<BTreeMap<FandomId, f64>>,
    hub: OnceLock<FandomId>,
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("graph", &self.graph)
            .field("scores", &self.scores.get().map(BTreeMap::len))
            .field("hub", &self.hub.get())
            .finish_non_exhaustive()
    }
}

/// A fandom's distance from the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubReport {
    pub hub: FandomId,
    pub fandom: FandomId,
    pub outcome: PathOutcome,
}

impl HubReport {
    /// Hop count to the hub, if connected.
    #[must_use]
    pub fn hub_number(&self) -> Option<usize> {
        self.outcome.hops()
    }
}

/// How the rest of the graph sits relative to the hub.
#[derive(Debug, Clone, PartialEq)]
pub struct HubSummary {
    pub hub: FandomId,
    /// Fandoms connected to the hub, the hub excluded.
    pub reachable: usize,
    pub unreachable: usize,
    /// Mean hop distance over `reachable` fandoms.
    pub mean_distance: Option<f64>,
    pub max_distance: usize,
    /// Fandoms at `max_distance`, ascending.
    pub farthest: Vec<FandomId>,
}

impl GraphStore {
    /// Validates the rows and builds the graph.
    ///
    /// # Errors
    /// Returns the first construction error found in the rows.
    pub fn build(edge_rows: &[EdgeRow], node_rows: &[NodeRow]) -> Result<Self> {
        Ok(Self::from_graph(builder::build(edge_rows, node_rows)?))
    }

    #[must_use]
    pub fn from_graph(graph: FandomGraph) -> Self {
        Self {
            graph,
            centrality: Box::new(EigenvectorCentrality::default()),
            scores: OnceLock::new(),
            hub: OnceLock::new(),
        }
    }

    /// Replaces the centrality measure and drops anything cached from the old one.
    #[must_use]
    pub fn with_centrality<C>(mut self, centrality: C) -> Self
    where
        C: Centrality + Send + Sync + 'static,
    {
        self.centrality = Box::new(centrality);
        self.scores = OnceLock::new();
        self.hub = OnceLock::new();
        self
    }

    /// Pins the hub instead of computing it.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if `hub` is not in the graph.
    pub fn with_hub(self, hub: FandomId) -> Result<Self> {
        self.graph.node(hub)?;
        let hub_cell = OnceLock::new();
        let _ = hub_cell.set(hub);
        Ok(Self {
            hub: hub_cell,
            ..self
        })
    }

    #[must_use]
    pub fn graph(&self) -> &FandomGraph {
        &self.graph
    }

    /// Centrality score of every fandom. Solved on first use, then cached.
    ///
    /// # Errors
    /// Returns `EmptyGraph`, or the centrality's error.
    pub fn scores(&self) -> Result<&BTreeMap<FandomId, f64>> {
        if let Some(scores) = self.scores.get() {
            return Ok(scores);
        }
        if self.graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        let scores = self.centrality.scores(&self.graph)?;
        debug!("Scored {} fandoms", scores.len());
        Ok(self.scores.get_or_init(|| scores))
    }

    /// The most central fandom; ties go to the smallest id. Cached.
    ///
    /// # Errors
    /// Returns `EmptyGraph` or `CentralityDidNotConverge`.
    pub fn hub(&self) -> Result<FandomId> {
        if let Some(&hub) = self.hub.get() {
            return Ok(hub);
        }
        let hub = rank(self.scores()?, 1)
            .first()
            .map(|(id, _)| *id)
            .ok_or(GraphError::EmptyGraph)?;
        info!("Hub fandom: {hub}");
        Ok(*self.hub.get_or_init(|| hub))
    }

    /// The `k` most central fandoms, best first, from the cached scores.
    ///
    /// # Errors
    /// Returns `EmptyGraph` or `CentralityDidNotConverge`.
    pub fn top_central(&self, k: usize) -> Result<Vec<(FandomId, f64)>> {
        Ok(rank(self.scores()?, k))
    }

    /// Ego subgraph over this store's graph.
    ///
    /// # Errors
    /// See [`ego::ego_subgraph`].
    pub fn ego<C>(&self, query: &EgoQuery, cost: &C) -> Result<EgoSubgraph>
    where
        C: EdgeCost + ?Sized,
    {
        ego::ego_subgraph(&self.graph, query, cost)
    }

    /// Shortest hop path between two fandoms.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if either endpoint is missing.
    pub fn shortest_path(&self, source: FandomId, target: FandomId) -> Result<PathOutcome> {
        path::shortest_path(&self.graph, source, target)
    }

    /// Path from `fandom` to the hub.
    ///
    /// # Errors
    /// Returns `NodeNotFound`, or the hub's centrality error.
    pub fn hub_distance(&self, fandom: FandomId) -> Result<HubReport> {
        let hub = self.hub()?;
        let outcome = path::shortest_path(&self.graph, fandom, hub)?;
        Ok(HubReport {
            hub,
            fandom,
            outcome,
        })
    }

    /// Reachability and distance statistics around the hub.
    ///
    /// # Errors
    /// Returns the hub's centrality error.
    #[allow(clippy::cast_precision_loss)]
    pub fn hub_summary(&self) -> Result<HubSummary> {
        let hub = self.hub()?;
        let distances = path::hop_distances(&self.graph, hub)?;

        let reachable = distances.len() - 1;
        let total: usize = distances.values().sum();
        let max_distance = distances.values().copied().max().unwrap_or(0);
        let farthest = if max_distance == 0 {
            Vec::new()
        } else {
            distances
                .iter()
                .filter(|(_, &d)| d == max_distance)
                .map(|(&id, _)| id)
                .collect()
        };

        Ok(HubSummary {
            hub,
            reachable,
            unreachable: self.graph.node_count() - distances.len(),
            mean_distance: (reachable > 0).then(|| total as f64 / reachable as f64),
            max_distance,
            farthest,
        })
    }
}
