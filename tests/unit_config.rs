// tests/unit_config.rs
use std::fs;
use std::path::PathBuf;

use crossover_core::config::{Config, EgoConfig};

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("crossover.toml");
    fs::write(&path, "[ego]\nradius = 4\nmax_nodes = 50\n\n[search]\nlimit = 10\n").unwrap();

    let c = Config::load(Some(&path)).unwrap();
    assert_eq!(c.ego.radius, 4);
    assert_eq!(c.ego.max_nodes, Some(50));
    assert_eq!(c.search.limit, 10);
    assert!(c.search.case_insensitive);
}

#[test]
fn test_defaults() {
    let e = EgoConfig::default();
    assert_eq!(e.radius, 2);
    assert!((e.cost_scale - 0.01).abs() < f64::EPSILON);
    assert_eq!(e.max_nodes, None);

    let c = Config::default();
    assert_eq!(c.data.edges, PathBuf::from("edgelist_df_small_fandoms.csv"));
    assert_eq!(c.game.default_fandom, "The Lord of the Rings - All Media Types");
    assert_eq!(c.game.hub, None);
}

#[test]
fn test_data_paths_resolve_against_config_dir() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("crossover.toml");
    fs::write(&path, "[data]\nedges = \"data/e.csv\"\n").unwrap();

    let c = Config::load(Some(&path)).unwrap();
    assert_eq!(c.data.edges, d.path().join("data/e.csv"));
    assert_eq!(c.data.nodes, d.path().join("fandoms_small.csv"));
}

#[test]
fn test_malformed_file_is_named() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("broken.toml");
    fs::write(&path, "[ego\nradius = ").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("broken.toml"));
}

#[test]
fn test_out_of_range_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("crossover.toml");
    fs::write(&path, "[ego]\ncost_scale = 0.0\n").unwrap();
    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let d = tempfile::tempdir().unwrap();
    assert!(Config::load(Some(&d.path().join("absent.toml"))).is_err());
}
