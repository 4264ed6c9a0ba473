// src/graph/builder.rs
//! Graph construction: row validation and adjacency building.

use std::collections::{BTreeMap, HashSet};

use log::info;

use crate::error::{GraphError, Result};
use crate::graph::model::FandomGraph;
use crate::types::{EdgeRow, Fandom, FandomId, NodeRow};

/// Builds a graph from the edge and node tables.
///
/// Rows are numbered from 1 in error messages. Nothing partial is returned:
/// the first invalid row aborts the build.
///
/// # Errors
/// Returns `DuplicateNode` or `InvalidNode` for bad node rows, and
/// `InvalidEdge` or `DanglingEdge` for bad edge rows.
pub fn build(edge_rows: &[EdgeRow], node_rows: &[NodeRow]) -> Result<FandomGraph> {
    let mut nodes = collect_nodes(node_rows)?;
    let adjacency = collect_edges(edge_rows, &nodes)?;

    let mut edge_count = 0;
    for (id, adj) in &adjacency {
        if let Some(node) = nodes.get_mut(id) {
            node.degree = adj.len();
        }
        edge_count += adj.len();
    }
    edge_count /= 2;

    info!(
        "Built fandom graph: {} nodes, {} edges",
        nodes.len(),
        edge_count
    );

    Ok(FandomGraph {
        nodes,
        adjacency,
        edge_count,
    })
}

fn collect_nodes(node_rows: &[NodeRow]) -> Result<BTreeMap<FandomId, Fandom>> {
    let mut nodes = BTreeMap::new();
    for row in node_rows {
        let popularity_count = u64::try_from(row.popularity_count).map_err(|_| {
            GraphError::InvalidNode {
                id: row.id,
                reason: format!(
                    "popularity count must be non-negative, got {}",
                    row.popularity_count
                ),
            }
        })?;
        let fandom = Fandom {
            id: row.id,
            name: row.name.clone(),
            popularity_count,
            log_popularity: log_popularity(popularity_count),
            degree: 0,
        };
        if nodes.insert(row.id, fandom).is_some() {
            return Err(GraphError::DuplicateNode(row.id));
        }
    }
    Ok(nodes)
}

fn collect_edges(
    edge_rows: &[EdgeRow],
    nodes: &BTreeMap<FandomId, Fandom>,
) -> Result<BTreeMap<FandomId, BTreeMap<FandomId, u64>>> {
    let mut adjacency: BTreeMap<FandomId, BTreeMap<FandomId, u64>> =
        nodes.keys().map(|&id| (id, BTreeMap::new())).collect();
    let mut seen: HashSet<(FandomId, FandomId)> = HashSet::with_capacity(edge_rows.len());

    for (index, row) in edge_rows.iter().enumerate() {
        let row_no = index + 1;
        let (a, b, weight) = validate_edge(row_no, row)?;

        for id in [a, b] {
            if !nodes.contains_key(&id) {
                return Err(GraphError::DanglingEdge { row: row_no, id });
            }
        }

        let key = if a < b { (a, b) } else { (b, a) };
        if !seen.insert(key) {
            return Err(invalid(
                row_no,
                format!("duplicate pair {}-{}", key.0, key.1),
            ));
        }

        adjacency.entry(a).or_default().insert(b, weight);
        adjacency.entry(b).or_default().insert(a, weight);
    }

    Ok(adjacency)
}

fn validate_edge(row_no: usize, row: &EdgeRow) -> Result<(FandomId, FandomId, u64)> {
    let (Some(a), Some(b)) = (row.a, row.b) else {
        return Err(invalid(row_no, "missing endpoint".to_string()));
    };
    if a == b {
        return Err(invalid(row_no, format!("self-loop on {a}")));
    }
    let weight = u64::try_from(row.weight)
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| {
            invalid(
                row_no,
                format!("weight must be positive, got {}", row.weight),
            )
        })?;
    Ok((a, b, weight))
}

fn invalid(row: usize, reason: String) -> GraphError {
    GraphError::InvalidEdge { row, reason }
}

/// `ln(1 + count)`, the display scale for popularity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn log_popularity(count: u64) -> f64 {
    (count as f64).ln_1p()
}
