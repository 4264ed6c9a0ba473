// src/graph/components.rs
//! Connected components of the crossover graph.

use std::collections::{BTreeSet, VecDeque};

use crate::graph::model::FandomGraph;
use crate::types::FandomId;

/// Connected components, each sorted ascending, ordered by smallest member.
#[must_use]
pub fn connected_components(graph: &FandomGraph) -> Vec<Vec<FandomId>> {
    let mut visited: BTreeSet<FandomId> = BTreeSet::new();
    let mut components = Vec::new();

    for (&start, _) in &graph.adjacency {
        if visited.contains(&start) {
            continue;
        }
        components.push(explore(graph, start, &mut visited));
    }

    components
}

fn explore(graph: &FandomGraph, start: FandomId, visited: &mut BTreeSet<FandomId>) -> Vec<FandomId> {
    let mut members = vec![start];
    let mut queue = VecDeque::from([start]);
    visited.insert(start);

    while let Some(node) = queue.pop_front() {
        let Some(adj) = graph.adjacency.get(&node) else {
            continue;
        };
        for &next in adj.keys() {
            if visited.insert(next) {
                members.push(next);
                queue.push_back(next);
            }
        }
    }

    members.sort_unstable();
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build;
    use crate::types::{EdgeRow, NodeRow};

    #[test]
    fn test_components_are_ordered() {
        let nodes = (1..=6).map(|i| NodeRow::new(i, format!("F{i}"), 1)).collect::<Vec<_>>();
        let edges = vec![
            EdgeRow::new(5, 1, 101),
            EdgeRow::new(2, 3, 101),
            EdgeRow::new(3, 6, 101),
        ];
        let g = build(&edges, &nodes).unwrap();
        let comps = connected_components(&g);
        assert_eq!(comps, vec![vec![1, 5], vec![2, 3, 6], vec![4]]);
    }

    #[test]
    fn test_empty_graph() {
        let g = FandomGraph::default();
        assert!(connected_components(&g).is_empty());
    }
}
