// tests/unit_loader.rs
use std::fs;
use std::path::Path;

use crossover_core::error::{GraphError, LoadError};
use crossover_core::loader;
use tempfile::TempDir;

const NODES: &str = "\
id,name,cached_count
1,Haikyuu!!,90000
2,Naruto,150000
3,One Piece,40000
4,Homestuck,60000
";

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_from_files() {
    let d = tempfile::tempdir().unwrap();
    let nodes = write(&d, "nodes.csv", NODES);
    let edges = write(
        &d,
        "edges.csv",
        "name_1,name_2,count,integer_1,integer_2\nHaikyuu!!,Naruto,150,1,2\nNaruto,One Piece,120,2,3\n",
    );

    let store = loader::load(&edges, &nodes).unwrap();
    let g = store.graph();
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.node(2).unwrap().name, "Naruto");
    assert_eq!(g.degree_of(4).unwrap(), 0);
}

#[test]
fn test_node_table_names_win() {
    let d = tempfile::tempdir().unwrap();
    let nodes = write(&d, "nodes.csv", NODES);
    let edges = write(
        &d,
        "edges.csv",
        "name_1,name_2,count,integer_1,integer_2\nHQ,NRT,150,1,2\n",
    );
    let store = loader::load(&edges, &nodes).unwrap();
    assert_eq!(store.graph().node(1).unwrap().name, "Haikyuu!!");
}

#[test]
fn test_missing_file() {
    let d = tempfile::tempdir().unwrap();
    let nodes = write(&d, "nodes.csv", NODES);
    let err = loader::load(&d.path().join("nope.csv"), &nodes).unwrap_err();
    match err {
        LoadError::Io { path, .. } => assert!(path.ends_with("nope.csv")),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_dangling_edge_in_file() {
    let d = tempfile::tempdir().unwrap();
    let nodes = write(&d, "nodes.csv", NODES);
    let edges = write(
        &d,
        "edges.csv",
        "name_1,name_2,count,integer_1,integer_2\nA,B,150,1,2\nA,Z,150,1,99\n",
    );
    let err = loader::load(&edges, &nodes).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Graph(GraphError::DanglingEdge { row: 2, id: 99 })
    ));
}

#[test]
fn test_malformed_number_names_file() {
    let d = tempfile::tempdir().unwrap();
    let nodes = write(&d, "nodes.csv", "id,name,cached_count\n1,A,lots\n");
    let err = loader::read_nodes(&nodes).unwrap_err();
    assert!(matches!(err, LoadError::Csv { .. }));
    assert!(err.to_string().contains("nodes.csv"));
}

#[test]
fn test_extra_columns_and_whitespace() {
    let csv = "id , name , cached_count , extra\n 7 , Bleach , 12 , x\n";
    let rows = loader::read_nodes_from(csv.as_bytes(), Path::new("inline")).unwrap();
    assert_eq!(rows[0].id, 7);
    assert_eq!(rows[0].name, "Bleach");
    assert_eq!(rows[0].popularity_count, 12);
}
