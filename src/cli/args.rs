// src/cli/args.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "crossover", version, about = "Explore the fandom crossover graph")]
pub struct Cli {
    /// Config file (default: crossover.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Edge table CSV, overriding the config
    #[arg(long, global = true, value_name = "FILE")]
    pub edges: Option<PathBuf>,
    /// Node table CSV, overriding the config
    #[arg(long, global = true, value_name = "FILE")]
    pub nodes: Option<PathBuf>,
    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Find fandoms by name, most popular first
    Search {
        query: String,
        #[arg(long, short)]
        limit: Option<usize>,
        #[arg(long)]
        case_sensitive: bool,
        #[arg(long)]
        json: bool,
    },
    /// Fandoms within a traversal budget of a center fandom
    Ego {
        /// Fandom id or name
        fandom: String,
        #[arg(long, short)]
        radius: Option<u32>,
        #[arg(long)]
        max_nodes: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Fewest-hop crossover chain between two fandoms
    Path {
        from: String,
        to: String,
        #[arg(long)]
        json: bool,
    },
    /// Distance from a fandom to the most central fandom
    Mcu {
        /// Fandom id or name (default: game.default_fandom)
        fandom: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// The hub and the top-ranked fandoms by centrality
    Central {
        #[arg(long, short = 'n', default_value = "10")]
        top: usize,
    },
    /// Graph size, components, and hub reachability
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ego_with_globals() {
        let cli = Cli::parse_from([
            "crossover", "ego", "Naruto", "--radius", "3", "--edges", "e.csv", "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.edges, Some(PathBuf::from("e.csv")));
        assert_eq!(
            cli.command,
            Some(Commands::Ego {
                fandom: "Naruto".into(),
                radius: Some(3),
                max_nodes: None,
                json: false,
            })
        );
    }

    #[test]
    fn test_mcu_fandom_is_optional() {
        let cli = Cli::parse_from(["crossover", "mcu"]);
        assert_eq!(
            cli.command,
            Some(Commands::Mcu {
                fandom: None,
                json: false
            })
        );
    }

    #[test]
    fn test_central_default_top() {
        let cli = Cli::parse_from(["crossover", "central"]);
        assert_eq!(cli.command, Some(Commands::Central { top: 10 }));
    }
}
