// src/loader.rs
//! Reads the edge and node tables from CSV.
//!
//! Edge table columns: `name_1, name_2, count, integer_1, integer_2`.
//! Node table columns: `id, name, cached_count`. Extra columns are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::error::{GraphError, LoadError};
use crate::graph::GraphStore;
use crate::types::{EdgeRow, FandomId, NodeRow};

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    #[serde(default)]
    name_1: Option<String>,
    #[serde(default)]
    name_2: Option<String>,
    count: Option<i64>,
    integer_1: Option<FandomId>,
    integer_2: Option<FandomId>,
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: FandomId,
    name: String,
    cached_count: i64,
}

/// Edge rows together with the names the edge table carries for each endpoint.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    pub rows: Vec<EdgeRow>,
    pub names: Vec<(Option<String>, Option<String>)>,
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        source,
        path: path.to_path_buf(),
    })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Reads the edge table from a file.
///
/// # Errors
/// Returns `Io` if the file cannot be opened, `Csv` for malformed rows, and
/// `InvalidEdge` for rows without a count.
pub fn read_edges(path: &Path) -> Result<EdgeTable, LoadError> {
    read_edges_from(open(path)?, path)
}

/// Reads the edge table from any reader; `label` names the source in errors.
///
/// # Errors
/// See [`read_edges`].
pub fn read_edges_from<R: Read>(input: R, label: &Path) -> Result<EdgeTable, LoadError> {
    let mut table = EdgeTable::default();
    for (index, record) in reader(input).deserialize::<EdgeRecord>().enumerate() {
        let record = record.map_err(|source| LoadError::Csv {
            path: label.to_path_buf(),
            source,
        })?;
        let weight = record.count.ok_or_else(|| GraphError::InvalidEdge {
            row: index + 1,
            reason: "missing count".to_string(),
        })?;
        table.rows.push(EdgeRow {
            a: record.integer_1,
            b: record.integer_2,
            weight,
        });
        table.names.push((record.name_1, record.name_2));
    }
    Ok(table)
}

/// Reads the node table from a file.
///
/// # Errors
/// Returns `Io` if the file cannot be opened and `Csv` for malformed rows.
pub fn read_nodes(path: &Path) -> Result<Vec<NodeRow>, LoadError> {
    read_nodes_from(open(path)?, path)
}

/// Reads the node table from any reader; `label` names the source in errors.
///
/// # Errors
/// See [`read_nodes`].
pub fn read_nodes_from<R: Read>(input: R, label: &Path) -> Result<Vec<NodeRow>, LoadError> {
    reader(input)
        .deserialize::<NodeRecord>()
        .map(|record| {
            record
                .map(|r| NodeRow {
                    id: r.id,
                    name: r.name,
                    popularity_count: r.cached_count,
                })
                .map_err(|source| LoadError::Csv {
                    path: label.to_path_buf(),
                    source,
                })
        })
        .collect()
}

/// Reads both tables and builds the store.
///
/// # Errors
/// Any read error, or the first construction error in the rows.
pub fn load(edges_path: &Path, nodes_path: &Path) -> Result<GraphStore, LoadError> {
    let nodes = read_nodes(nodes_path)?;
    let edges = read_edges(edges_path)?;
    info!(
        "Read {} node rows from {} and {} edge rows from {}",
        nodes.len(),
        nodes_path.display(),
        edges.rows.len(),
        edges_path.display()
    );
    report_name_mismatches(&edges, &nodes);
    Ok(GraphStore::build(&edges.rows, &nodes)?)
}

/// Warns when the edge table disagrees with the node table about a name.
/// The node table wins.
fn report_name_mismatches(edges: &EdgeTable, nodes: &[NodeRow]) {
    let canonical: HashMap<FandomId, &str> = nodes.iter().map(|n| (n.id, n.name.as_str())).collect();
    let mut mismatches = 0usize;

    for (row, (name_1, name_2)) in edges.rows.iter().zip(&edges.names) {
        for (id, name) in [(row.a, name_1), (row.b, name_2)] {
            let (Some(id), Some(name)) = (id, name) else {
                continue;
            };
            if canonical.get(&id).is_some_and(|c| *c != name.as_str()) {
                mismatches += 1;
            }
        }
    }

    if mismatches > 0 {
        warn!("{mismatches} edge-table names differ from the node table; using node-table names");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGES: &str = "\
name_1,name_2,count,integer_1,integer_2
Haikyuu!!,Naruto,150,1,2
Naruto,One Piece,120,2,3
";

    const NODES: &str = "\
id,name,cached_count
1,Haikyuu!!,90000
2,Naruto,150000
3,One Piece,40000
";

    #[test]
    fn test_read_edges() {
        let table = read_edges_from(EDGES.as_bytes(), Path::new("edges.csv")).unwrap();
        assert_eq!(table.rows, vec![EdgeRow::new(1, 2, 150), EdgeRow::new(2, 3, 120)]);
        assert_eq!(table.names[0].0.as_deref(), Some("Haikyuu!!"));
    }

    #[test]
    fn test_read_nodes() {
        let rows = read_nodes_from(NODES.as_bytes(), Path::new("nodes.csv")).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], NodeRow::new(2, "Naruto", 150_000));
    }

    #[test]
    fn test_blank_endpoint_is_kept_for_validation() {
        let csv = "name_1,name_2,count,integer_1,integer_2\nA,B,150,,2\n";
        let table = read_edges_from(csv.as_bytes(), Path::new("edges.csv")).unwrap();
        assert_eq!(table.rows[0].a, None);
    }

    #[test]
    fn test_missing_count() {
        let csv = "name_1,name_2,count,integer_1,integer_2\nA,B,,1,2\n";
        let err = read_edges_from(csv.as_bytes(), Path::new("edges.csv")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Graph(GraphError::InvalidEdge { row: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_number() {
        let csv = "id,name,cached_count\nx,A,3\n";
        let err = read_nodes_from(csv.as_bytes(), Path::new("nodes.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }
}
