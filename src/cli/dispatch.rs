// src/cli/dispatch.rs
//! Command dispatch.

use super::{
    args::Commands,
    handlers::{
        handle_central, handle_ego, handle_mcu, handle_path, handle_search, handle_stats, Session,
    },
};
use crate::exit::CrossoverExit;
use anyhow::Result;

/// Executes the parsed command against an opened session.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(session: &Session, command: Commands) -> Result<CrossoverExit> {
    match command {
        Commands::Search {
            query,
            limit,
            case_sensitive,
            json,
        } => handle_search(session, &query, limit, case_sensitive, json),
        Commands::Ego {
            fandom,
            radius,
            max_nodes,
            json,
        } => handle_ego(session, &fandom, radius, max_nodes, json),
        Commands::Path { from, to, json } => handle_path(session, &from, &to, json),
        Commands::Mcu { fandom, json } => handle_mcu(session, fandom.as_deref(), json),
        Commands::Central { top } => handle_central(session, top),
        Commands::Stats => handle_stats(session),
    }
}
