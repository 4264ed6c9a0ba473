// src/config/types.rs
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::graph::centrality::{DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
use crate::graph::ego::DEFAULT_COST_SCALE;
use crate::types::FandomId;

/// Everything `crossover.toml` can set. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ego: EgoConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub centrality: CentralityConfig,
}

/// Input table locations. Relative paths resolve against the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_edges")]
    pub edges: PathBuf,
    #[serde(default = "default_nodes")]
    pub nodes: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            edges: default_edges(),
            nodes: default_nodes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgoConfig {
    #[serde(default = "default_radius")]
    pub radius: u32,
    /// Multiplier applied to crossover counts to get traversal costs.
    #[serde(default = "default_cost_scale")]
    pub cost_scale: f64,
    #[serde(default)]
    pub max_nodes: Option<usize>,
}

impl Default for EgoConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            cost_scale: default_cost_scale(),
            max_nodes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            case_insensitive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fandom used by `mcu` when none is given.
    #[serde(default = "default_fandom")]
    pub default_fandom: String,
    /// Pins the hub instead of computing it.
    #[serde(default)]
    pub hub: Option<FandomId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_fandom: default_fandom(),
            hub: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_edges() -> PathBuf { PathBuf::from("edgelist_df_small_fandoms.csv") }
fn default_nodes() -> PathBuf { PathBuf::from("fandoms_small.csv") }
fn default_fandom() -> String { "The Lord of the Rings - All Media Types".to_string() }

const fn default_true() -> bool { true }
const fn default_radius() -> u32 { 2 }
const fn default_cost_scale() -> f64 { DEFAULT_COST_SCALE }
const fn default_limit() -> usize { 5 }
const fn default_max_iter() -> usize { DEFAULT_MAX_ITER }
const fn default_tolerance() -> f64 { DEFAULT_TOLERANCE }
