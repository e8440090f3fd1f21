//! Planner configuration file support.
//!
//! Grounded on `db/repo_config.rs::RepositoryConfig`'s TOML-file loading
//! pattern and `db/factory.rs::RepositoryType::from_env`'s environment
//! override. Selector names resolve against the registries in
//! [`crate::algorithms::registry`] and [`crate::seams::registry`].

use crate::error::{SeamError, SeamResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_task_fetcher() -> String {
    "hard_coded".to_string()
}

fn default_algorithm() -> String {
    "right_based".to_string()
}

fn default_granularity_seconds() -> u64 {
    60
}

fn default_pools() -> Vec<String> {
    vec!["spark".to_string(), "presto".to_string()]
}

/// Planner configuration loaded from a TOML file or environment overrides.
///
/// # Examples
///
/// ```no_run
/// use clockwork_rs::config::PlannerConfig;
///
/// let config = PlannerConfig::from_default_config();
/// assert_eq!(config.algorithm, "right_based");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_task_fetcher")]
    pub task_fetcher: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_granularity_seconds")]
    pub granularity_seconds: u64,
    #[serde(default = "default_pools")]
    pub pools: Vec<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            task_fetcher: default_task_fetcher(),
            algorithm: default_algorithm(),
            granularity_seconds: default_granularity_seconds(),
            pools: default_pools(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SeamResult<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| SeamError::Configuration(format!("failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| SeamError::Configuration(format!("failed to parse config file: {}", e)))
    }

    /// Search a handful of conventional locations for `planner.toml`,
    /// falling back to [`Self::default`] matching the reference deployment
    /// (`main.py`: hard-coded fetcher, right-based algorithm) when none is
    /// found.
    pub fn from_default_config() -> Self {
        let search_paths = [
            PathBuf::from("planner.toml"),
            PathBuf::from("config/planner.toml"),
            PathBuf::from("../planner.toml"),
        ];
        for path in &search_paths {
            if path.exists() {
                if let Ok(config) = Self::from_file(path) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Apply `CLOCKWORK_TASK_FETCHER` / `CLOCKWORK_ALGORITHM` environment
    /// overrides on top of whatever was loaded from file or defaults.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("CLOCKWORK_TASK_FETCHER") {
            self.task_fetcher = val;
        }
        if let Ok(val) = std::env::var("CLOCKWORK_ALGORITHM") {
            self.algorithm = val;
        }
        self
    }
}
