// src/config/mod.rs
pub mod types;

pub use self::types::{
    CentralityConfig, Config, DataConfig, EgoConfig, GameConfig, SearchConfig,
};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::debug;

use crate::graph::centrality::EigenvectorCentrality;
use crate::graph::ego::{EgoQuery, ScaledWeight};
use crate::graph::queries::SearchOptions;
use crate::types::FandomId;

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE: &str = "crossover.toml";

impl Config {
    /// Loads configuration.
    ///
    /// With `path`, the file must exist. Without it, `crossover.toml` in the
    /// working directory is used if present and defaults otherwise.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, does not parse, or fails
    /// validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            debug!("No {CONFIG_FILE} found; using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::parse_toml(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    /// Returns error on malformed TOML or out-of-range values.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error naming the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if self.ego.radius < 1 {
            bail!("ego.radius must be at least 1, got {}", self.ego.radius);
        }
        if !self.ego.cost_scale.is_finite() || self.ego.cost_scale <= 0.0 {
            bail!("ego.cost_scale must be positive, got {}", self.ego.cost_scale);
        }
        if self.ego.max_nodes == Some(0) {
            bail!("ego.max_nodes must be at least 1");
        }
        if self.search.limit == 0 {
            bail!("search.limit must be at least 1");
        }
        if self.centrality.max_iter == 0 {
            bail!("centrality.max_iter must be at least 1");
        }
        if self.centrality.tolerance.is_nan() || self.centrality.tolerance <= 0.0 {
            bail!(
                "centrality.tolerance must be positive, got {}",
                self.centrality.tolerance
            );
        }
        Ok(())
    }

    /// Makes relative data paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.data.edges, &mut self.data.nodes] {
            if path.is_relative() && !base.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
    }

    /// Ego query for `center` with the configured radius and cap.
    #[must_use]
    pub fn ego_query(&self, center: FandomId) -> EgoQuery {
        EgoQuery {
            center,
            radius: self.ego.radius,
            max_nodes: self.ego.max_nodes,
        }
    }

    #[must_use]
    pub fn edge_cost(&self) -> ScaledWeight {
        ScaledWeight(self.ego.cost_scale)
    }

    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            case_insensitive: self.search.case_insensitive,
            limit: Some(self.search.limit),
        }
    }

    #[must_use]
    pub fn centrality(&self) -> EigenvectorCentrality {
        EigenvectorCentrality {
            max_iter: self.centrality.max_iter,
            tolerance: self.centrality.tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ego.radius, 2);
        assert_eq!(config.search.limit, 5);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse_toml("[ego]\nradius = 3\n\n[game]\nhub = 7\n").unwrap();
        assert_eq!(config.ego.radius, 3);
        assert!((config.ego.cost_scale - 0.01).abs() < f64::EPSILON);
        assert_eq!(config.game.hub, Some(7));
        assert_eq!(config.centrality.max_iter, 100);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        for bad in [
            "[ego]\nradius = 0",
            "[ego]\ncost_scale = -1.0",
            "[ego]\nmax_nodes = 0",
            "[search]\nlimit = 0",
            "[centrality]\nmax_iter = 0",
            "[centrality]\ntolerance = 0.0",
        ] {
            assert!(Config::parse_toml(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = Config::default();
        config.data.nodes = PathBuf::from("/abs/nodes.csv");
        config.resolve_paths(Path::new("data"));
        assert_eq!(config.data.edges, Path::new("data").join("edgelist_df_small_fandoms.csv"));
        assert_eq!(config.data.nodes, PathBuf::from("/abs/nodes.csv"));
    }

    #[test]
    fn test_derived_query_settings() {
        let mut config = Config::default();
        config.ego.max_nodes = Some(10);
        let query = config.ego_query(4);
        assert_eq!(query, EgoQuery::new(4, 2).with_max_nodes(10));
        assert_eq!(config.search_options().limit, Some(5));
    }
}
