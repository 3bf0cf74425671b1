//! Configuration loading for the parlab CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use parlab_compute::{Strategy, DEFAULT_SLEEP};
use parlab_core::ParlabError;
use parlab_pool::PoolConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the demos
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pool: PoolConfig,
    pub timer: TimerConfig,
    pub moving_average: MovingAverageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub calls: usize,
    pub sleep_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            calls: 4,
            sleep_ms: u64::try_from(DEFAULT_SLEEP.as_millis()).unwrap_or(1000),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingAverageConfig {
    pub rows: usize,
    pub cols: usize,
    pub window: usize,
    pub rows_per_task: usize,
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 100_000,
            window: 100,
            rows_per_task: 1,
            strategy: Strategy::Naive,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        let path = Self::find_config_file();
        let config = Self::load_from(path.as_deref())?;
        Ok((config, path))
    }

    /// Load configuration from an explicit file (if any) plus `PARLAB__*` variables
    pub fn load_from(path: Option<&Path>) -> parlab_core::Result<Self> {
        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }

        // PARLAB__POOL__NUM_CPUS=4 overrides pool.num_cpus
        builder = builder.add_source(
            Environment::with_prefix("PARLAB")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ParlabError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ParlabError::Config(format!("Failed to deserialize configuration: {e}")))
    }

    /// Find the configuration file
    pub fn find_config_file() -> Option<PathBuf> {
        // Check in order: PARLAB_CONFIG env, ./parlab.toml, ~/.config/parlab/parlab.toml
        if let Ok(path) = std::env::var("PARLAB_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = PathBuf::from("parlab.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config").join("parlab").join("parlab.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
