// src/reporting.rs
//! Console output for query results.

use colored::Colorize;

use crate::graph::ego::EgoSubgraph;
use crate::graph::model::FandomGraph;
use crate::graph::path::PathOutcome;
use crate::graph::store::{HubReport, HubSummary};
use crate::types::{Fandom, FandomId};

/// `Name (#id)`, or the bare id when the node is unknown.
fn label(graph: &FandomGraph, id: FandomId) -> String {
    graph
        .node(id)
        .map_or_else(|_| format!("#{id}"), |f| format!("{} (#{id})", f.name))
}

pub fn print_search(query: &str, hits: &[&Fandom]) {
    if hits.is_empty() {
        println!("{} no fandom matches {:?}", "~".yellow(), query);
        return;
    }
    println!("{} {} match(es) for {:?}", "✓".green(), hits.len(), query);
    for fandom in hits {
        println!(
            "  {:>10}  {}  {}",
            fandom.id.to_string().cyan(),
            fandom.name.bold(),
            format!("{} works, degree {}", fandom.popularity_count, fandom.degree).dimmed()
        );
    }
}

pub fn print_ego(graph: &FandomGraph, ego: &EgoSubgraph) {
    println!(
        "{} {} within radius {}: {} node(s), {} edge(s)",
        "✓".green(),
        label(graph, ego.center).bold(),
        ego.radius,
        ego.node_count(),
        ego.edge_count()
    );
    if ego.truncated {
        println!("  {} result capped; farther fandoms omitted", "!".yellow());
    }

    let mut by_distance: Vec<(FandomId, f64)> =
        ego.distances.iter().map(|(&id, &d)| (id, d)).collect();
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    for (id, distance) in by_distance {
        if id == ego.center {
            continue;
        }
        println!(
            "  {:>8}  {}",
            format!("{distance:.2}").dimmed(),
            label(graph, id)
        );
    }
}

pub fn print_path(graph: &FandomGraph, source: FandomId, target: FandomId, outcome: &PathOutcome) {
    match outcome {
        PathOutcome::Found(path) => {
            println!(
                "{} {} hop(s) from {} to {}",
                "✓".green(),
                path.len().to_string().bold(),
                label(graph, source),
                label(graph, target)
            );
            let chain: Vec<String> = path.nodes().iter().map(|&id| label(graph, id)).collect();
            println!("  {}", chain.join(&format!(" {} ", "->".blue())));
        }
        PathOutcome::NoPath => {
            println!(
                "{} {} and {} are not connected",
                "✗".red(),
                label(graph, source),
                label(graph, target)
            );
        }
    }
}

pub fn print_hub_report(graph: &FandomGraph, report: &HubReport) {
    match report.hub_number() {
        Some(n) => println!(
            "{} {} has MCU number {} (hub: {})",
            "✓".green(),
            label(graph, report.fandom).bold(),
            n.to_string().cyan().bold(),
            label(graph, report.hub)
        ),
        None => println!(
            "{} {} is not connected to the hub {}",
            "✗".red(),
            label(graph, report.fandom).bold(),
            label(graph, report.hub)
        ),
    }
    if let Some(path) = report.outcome.path() {
        if !path.is_empty() {
            let chain: Vec<String> = path.nodes().iter().map(|&id| label(graph, id)).collect();
            println!("  {}", chain.join(&format!(" {} ", "->".blue())));
        }
    }
}

pub fn print_central(graph: &FandomGraph, hub: FandomId, ranked: &[(FandomId, f64)]) {
    println!("{} hub: {}", "✓".green(), label(graph, hub).bold());
    println!();
    println!("  {:>4}  {:>10}  {}", "rank".dimmed(), "score".dimmed(), "fandom".dimmed());
    for (rank, (id, score)) in ranked.iter().enumerate() {
        println!("  {:>4}  {:>10.6}  {}", rank + 1, score, label(graph, *id));
    }
}

pub fn print_stats(graph: &FandomGraph, components: &[Vec<FandomId>], summary: Option<&HubSummary>) {
    let largest = components.iter().map(Vec::len).max().unwrap_or(0);
    let isolated = components.iter().filter(|c| c.len() == 1).count();

    println!("{}", "Graph".bold());
    println!("  nodes:       {}", graph.node_count());
    println!("  edges:       {}", graph.edge_count());
    println!("  components:  {}", components.len());
    println!("  largest:     {largest}");
    println!("  isolated:    {isolated}");

    let Some(summary) = summary else {
        return;
    };
    println!();
    println!("{}", "Hub".bold());
    println!("  hub:         {}", label(graph, summary.hub));
    println!("  reachable:   {}", summary.reachable);
    println!("  unreachable: {}", summary.unreachable);
    if let Some(mean) = summary.mean_distance {
        println!("  mean hops:   {mean:.3}");
    }
    println!("  max hops:    {}", summary.max_distance);
    if !summary.farthest.is_empty() {
        let farthest: Vec<String> = summary.farthest.iter().take(5).map(|&id| label(graph, id)).collect();
        let more = summary.farthest.len().saturating_sub(farthest.len());
        let suffix = if more > 0 { format!(" (+{more} more)") } else { String::new() };
        println!("  farthest:    {}{suffix}", farthest.join(", "));
    }
}
