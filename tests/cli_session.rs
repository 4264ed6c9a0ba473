// tests/cli_session.rs - Session loading, dispatch, and exit codes
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clap::Parser;
use crossover_core::cli::{dispatch, Cli, Commands, Session};
use crossover_core::config::Config;
use crossover_core::error::GraphError;
use crossover_core::exit::CrossoverExit;
use crossover_core::graph::{Centrality, EigenvectorCentrality, FandomGraph};
use crossover_core::types::FandomId;
use tempfile::TempDir;

const EDGES: &str = "\
name_1,name_2,count,integer_1,integer_2
A,B,150,1,2
B,C,120,2,3
";

const NODES: &str = "\
id,name,cached_count
1,A,10
2,B,20
3,C,30
4,D,40
";

fn data_dir(edges: &str) -> TempDir {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("edges.csv"), edges).unwrap();
    fs::write(d.path().join("nodes.csv"), NODES).unwrap();
    d
}

fn config_for(dir: &Path) -> Config {
    let mut c = Config::default();
    c.data.edges = dir.join("edges.csv");
    c.data.nodes = dir.join("nodes.csv");
    c.game.default_fandom = "A".into();
    c
}

fn run(session: &Session, args: &[&str]) -> CrossoverExit {
    let cli = Cli::parse_from(std::iter::once("crossover").chain(args.iter().copied()));
    let command = cli.command.unwrap();
    match dispatch::execute(session, command) {
        Ok(code) => code,
        Err(e) => CrossoverExit::classify(&e),
    }
}

#[test]
fn test_every_command_succeeds() {
    let d = data_dir(EDGES);
    let session = Session::from_config(config_for(d.path())).unwrap();
    for args in [
        &["search", "a"][..],
        &["search", "B", "--json", "--case-sensitive"],
        &["ego", "A", "--radius", "3"],
        &["ego", "2", "--json", "--max-nodes", "1"],
        &["path", "A", "C"],
        &["path", "A", "D", "--json"],
        &["mcu"],
        &["mcu", "C", "--json"],
        &["central", "-n", "3"],
        &["stats"],
    ] {
        assert_eq!(run(&session, args), CrossoverExit::Success, "{args:?}");
    }
}

#[test]
fn test_query_errors_exit_3() {
    let d = data_dir(EDGES);
    let session = Session::from_config(config_for(d.path())).unwrap();
    assert_eq!(run(&session, &["ego", "Nope"]), CrossoverExit::InvalidQuery);
    assert_eq!(run(&session, &["ego", "A", "--radius", "0"]), CrossoverExit::InvalidQuery);
    assert_eq!(run(&session, &["path", "A", "99"]), CrossoverExit::InvalidQuery);
}

#[test]
fn test_bad_tables_exit_2() {
    let d = data_dir("name_1,name_2,count,integer_1,integer_2\nA,A,150,1,1\n");
    let err = Session::from_config(config_for(d.path())).err().unwrap();
    assert_eq!(CrossoverExit::classify(&err), CrossoverExit::InvalidData);
}

#[test]
fn test_missing_tables_exit_1() {
    let d = tempfile::tempdir().unwrap();
    let err = Session::from_config(config_for(d.path())).err().unwrap();
    assert_eq!(CrossoverExit::classify(&err), CrossoverExit::Error);
}

#[test]
fn test_pinned_hub() {
    let d = data_dir(EDGES);
    let mut config = config_for(d.path());
    config.game.hub = Some(3);
    let session = Session::from_config(config).unwrap();
    assert_eq!(session.store.hub().unwrap(), 3);

    let mut config = config_for(d.path());
    config.game.hub = Some(77);
    assert!(Session::from_config(config).is_err());
}

#[test]
fn test_cli_overrides_config_paths() {
    let d = data_dir(EDGES);
    let toml = d.path().join("crossover.toml");
    fs::write(&toml, "[data]\nedges = \"missing.csv\"\nnodes = \"nodes.csv\"\n").unwrap();

    let edges = d.path().join("edges.csv");
    let cli = Cli::parse_from([
        "crossover",
        "--config",
        toml.to_str().unwrap(),
        "--edges",
        edges.to_str().unwrap(),
        "stats",
    ]);
    assert_eq!(cli.command, Some(Commands::Stats));
    let session = Session::open(&cli).unwrap();
    assert_eq!(session.store.graph().edge_count(), 2);
}

struct CountingCentrality {
    inner: EigenvectorCentrality,
    solves: Arc<AtomicUsize>,
}

impl Centrality for CountingCentrality {
    fn scores(&self, graph: &FandomGraph) -> Result<BTreeMap<FandomId, f64>, GraphError> {
        self.solves.fetch_add(1, Ordering::SeqCst);
        self.inner.scores(graph)
    }
}

#[test]
fn test_central_solves_centrality_once() {
    let d = data_dir(EDGES);
    let config = config_for(d.path());
    let Session { config, store } = Session::from_config(config).unwrap();

    let solves = Arc::new(AtomicUsize::new(0));
    let store = store.with_centrality(CountingCentrality {
        inner: EigenvectorCentrality::default(),
        solves: Arc::clone(&solves),
    });
    let session = Session { config, store };

    assert_eq!(
        dispatch::execute(&session, Commands::Central { top: 3 }).unwrap(),
        CrossoverExit::Success
    );
    assert_eq!(run(&session, &["mcu", "C"]), CrossoverExit::Success);
    assert_eq!(run(&session, &["stats"]), CrossoverExit::Success);
    assert_eq!(solves.load(Ordering::SeqCst), 1);
}
