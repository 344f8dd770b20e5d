//! Navigation configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the navigation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Maximum planar distance between observed and expected displacement
    /// for an edge to count as completed (meters, default: 0.5)
    #[serde(default = "default_reach_threshold")]
    pub reach_threshold: f32,

    /// Directions shorter than this are suppressed instead of published
    /// (meters, default: 0.001)
    #[serde(default = "default_min_direction_length")]
    pub min_direction_length: f32,

    /// Vertical coordinate used when placing the target marker in the local
    /// frame (meters, default: -0.5)
    #[serde(default = "default_arrow_floor_height")]
    pub arrow_floor_height: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            reach_threshold: default_reach_threshold(),
            min_direction_length: default_min_direction_length(),
            arrow_floor_height: default_arrow_floor_height(),
        }
    }
}

fn default_reach_threshold() -> f32 {
    0.5
}
fn default_min_direction_length() -> f32 {
    1e-3
}
fn default_arrow_floor_height() -> f32 {
    -0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavigationConfig::default();
        assert_eq!(config.reach_threshold, 0.5);
        assert_eq!(config.arrow_floor_height, -0.5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NavigationConfig = serde_json::from_str(r#"{"reach_threshold": 0.8}"#).unwrap();
        assert_eq!(config.reach_threshold, 0.8);
        assert_eq!(config.min_direction_length, 1e-3);
    }
}
