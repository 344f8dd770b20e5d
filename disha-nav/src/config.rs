//! Configuration loading for DishaNav

use crate::error::{DishaError, Result};
use marga::NavigationConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DishaConfig {
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Pose sampling settings
#[derive(Clone, Debug, Deserialize)]
pub struct SamplerConfig {
    /// Interval between replayed pose samples in milliseconds (default: 200)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Samples buffered between sampler and guidance thread (default: 16)
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,

    /// Interval between status log lines in milliseconds (default: 500)
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// File name of the JSON graph export
    #[serde(default = "default_graph_json")]
    pub graph_json: String,

    /// File name of the SVG picture
    #[serde(default = "default_graph_svg")]
    pub graph_svg: String,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            queue_depth: default_queue_depth(),
            status_interval_ms: default_status_interval_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph_json: default_graph_json(),
            graph_svg: default_graph_svg(),
        }
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms.max(1))
    }
}

impl DishaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DishaError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: DishaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.sampler.queue_depth == 0 {
            return Err(DishaError::Config("sampler.queue_depth must be at least 1".into()));
        }
        let threshold = self.navigation.reach_threshold;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(DishaError::Config(
                "navigation.reach_threshold must be positive".into(),
            ));
        }
        Ok(())
    }
}

// Default value functions
fn default_interval_ms() -> u64 {
    200
}
fn default_queue_depth() -> usize {
    16
}
fn default_status_interval_ms() -> u64 {
    500
}
fn default_graph_json() -> String {
    "waypoints.json".to_string()
}
fn default_graph_svg() -> String {
    "waypoints.svg".to_string()
}
