// src/cli/handlers.rs
use anyhow::{Context, Result};

use crate::cli::args::Cli;
use crate::config::Config;
use crate::exit::CrossoverExit;
use crate::export;
use crate::graph::components::connected_components;
use crate::graph::GraphStore;
use crate::loader;
use crate::reporting;

/// Loaded configuration plus the graph built from it.
pub struct Session {
    pub config: Config,
    pub store: GraphStore,
}

impl Session {
    /// Loads the config, applies CLI overrides, and builds the graph.
    ///
    /// # Errors
    /// Returns error if the config is invalid or the tables cannot be loaded.
    pub fn open(cli: &Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(edges) = &cli.edges {
            config.data.edges.clone_from(edges);
        }
        if let Some(nodes) = &cli.nodes {
            config.data.nodes.clone_from(nodes);
        }
        Self::from_config(config)
    }

    /// Builds the graph described by `config`.
    ///
    /// # Errors
    /// Returns error if the tables cannot be loaded or the pinned hub is unknown.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = loader::load(&config.data.edges, &config.data.nodes)
            .context("Failed to load the fandom graph")?
            .with_centrality(config.centrality());
        let store = match config.game.hub {
            Some(hub) => store
                .with_hub(hub)
                .with_context(|| format!("Configured hub {hub} is not in the graph"))?,
            None => store,
        };
        Ok(Self { config, store })
    }
}

/// Handles the search command.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_search(
    session: &Session,
    query: &str,
    limit: Option<usize>,
    case_sensitive: bool,
    json: bool,
) -> Result<CrossoverExit> {
    let mut options = session.config.search_options();
    if let Some(limit) = limit {
        options = options.with_limit(limit);
    }
    if case_sensitive {
        options = options.case_sensitive();
    }

    let graph = session.store.graph();
    let hits = graph.find_by_name(query, &options);
    if json {
        println!("{}", export::to_json(&hits)?);
    } else {
        reporting::print_search(query, &hits);
    }
    Ok(CrossoverExit::Success)
}

/// Handles the ego command.
///
/// # Errors
/// Returns error if the fandom is unknown or the query is invalid.
pub fn handle_ego(
    session: &Session,
    fandom: &str,
    radius: Option<u32>,
    max_nodes: Option<usize>,
    json: bool,
) -> Result<CrossoverExit> {
    let graph = session.store.graph();
    let center = graph.resolve(fandom)?;

    let mut query = session.config.ego_query(center);
    if let Some(radius) = radius {
        query.radius = radius;
    }
    if max_nodes.is_some() {
        query.max_nodes = max_nodes;
    }

    let ego = session.store.ego(&query, &session.config.edge_cost())?;
    if json {
        println!("{}", export::to_json(&export::ego_record(graph, &ego))?);
    } else {
        reporting::print_ego(graph, &ego);
    }
    Ok(CrossoverExit::Success)
}

/// Handles the path command.
///
/// # Errors
/// Returns error if either fandom is unknown.
pub fn handle_path(session: &Session, from: &str, to: &str, json: bool) -> Result<CrossoverExit> {
    let graph = session.store.graph();
    let source = graph.resolve(from)?;
    let target = graph.resolve(to)?;
    let outcome = session.store.shortest_path(source, target)?;

    if json {
        let record = outcome.path().map(|p| export::path_record(graph, p));
        println!("{}", export::to_json(&record)?);
    } else {
        reporting::print_path(graph, source, target, &outcome);
    }
    Ok(CrossoverExit::Success)
}

/// Handles the mcu command.
///
/// # Errors
/// Returns error if the fandom is unknown or the hub cannot be computed.
pub fn handle_mcu(session: &Session, fandom: Option<&str>, json: bool) -> Result<CrossoverExit> {
    let graph = session.store.graph();
    let query = fandom.unwrap_or(&session.config.game.default_fandom);
    let id = graph.resolve(query)?;
    let report = session.store.hub_distance(id)?;

    if json {
        let value = serde_json::json!({
            "fandom": report.fandom,
            "hub": report.hub,
            "mcu_number": report.hub_number(),
            "path": report.outcome.path().map(|p| export::path_record(graph, p)),
        });
        println!("{}", export::to_json(&value)?);
    } else {
        reporting::print_hub_report(graph, &report);
    }
    Ok(CrossoverExit::Success)
}

/// Handles the central command. The hub and the table share one centrality solve.
///
/// # Errors
/// Returns error if centrality cannot be computed.
pub fn handle_central(session: &Session, top: usize) -> Result<CrossoverExit> {
    let graph = session.store.graph();
    let hub = session.store.hub()?;
    let ranked = session.store.top_central(top)?;
    reporting::print_central(graph, hub, &ranked);
    Ok(CrossoverExit::Success)
}

/// Handles the stats command.
///
/// # Errors
/// Returns error if centrality fails on a non-empty graph.
pub fn handle_stats(session: &Session) -> Result<CrossoverExit> {
    let graph = session.store.graph();
    let components = connected_components(graph);
    let summary = if graph.is_empty() {
        None
    } else {
        Some(session.store.hub_summary()?)
    };
    reporting::print_stats(graph, &components, summary.as_ref());
    Ok(CrossoverExit::Success)
}
