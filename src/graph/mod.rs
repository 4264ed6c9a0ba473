// src/graph/mod.rs
//! The fandom crossover graph and its queries.

pub mod builder;
pub mod centrality;
pub mod components;
pub mod ego;
pub mod model;
pub mod path;
pub mod queries;
pub mod store;

pub use centrality::{most_central_node, Centrality, DegreeCentrality, EigenvectorCentrality};
pub use components::connected_components;
pub use ego::{ego_subgraph, EdgeCost, EgoQuery, EgoSubgraph, ScaledWeight};
pub use model::{FandomGraph, Subgraph};
pub use path::{shortest_path, Path, PathOutcome};
pub use queries::SearchOptions;
pub use store::{GraphStore, HubReport, HubSummary};
