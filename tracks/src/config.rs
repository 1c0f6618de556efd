//! Track graph tunables, with defaults and environment overrides.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    CURVE_HIT_DISTANCE, CURVE_SEARCH_HALF_EXTENT, DEFAULT_GAUGE, EDGE_HIT_DISTANCE, EDGE_SEARCH_HALF_EXTENT,
    INITIAL_SLOT_CAPACITY, INTERSECTION_THRESHOLD, JOINT_HIT_RADIUS,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("max_entities must be at least 1")]
    ZeroCap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackGraphConfig {
    /// Width of newly created segments.
    pub default_gauge: f64,
    pub joint_hit_radius: f64,
    pub curve_hit_distance: f64,
    pub curve_search_half_extent: f64,
    pub edge_hit_distance: f64,
    pub edge_search_half_extent: f64,
    /// Sub-curve size at which intersection subdivision stops.
    pub intersection_threshold: f64,
    pub initial_capacity: usize,
    /// Hard cap on live joints and on live segments; unbounded when absent.
    pub max_entities: Option<usize>,
}

impl Default for TrackGraphConfig {
    fn default() -> Self {
        Self {
            default_gauge: DEFAULT_GAUGE,
            joint_hit_radius: JOINT_HIT_RADIUS,
            curve_hit_distance: CURVE_HIT_DISTANCE,
            curve_search_half_extent: CURVE_SEARCH_HALF_EXTENT,
            edge_hit_distance: EDGE_HIT_DISTANCE,
            edge_search_half_extent: EDGE_SEARCH_HALF_EXTENT,
            intersection_threshold: INTERSECTION_THRESHOLD,
            initial_capacity: INITIAL_SLOT_CAPACITY,
            max_entities: None,
        }
    }
}

impl TrackGraphConfig {
    /// Build config from environment variables over the defaults.
    ///
    /// Optional:
    /// - `TRACKS_DEFAULT_GAUGE`: default 10
    /// - `TRACKS_JOINT_HIT_RADIUS`: default 5
    /// - `TRACKS_CURVE_HIT_DISTANCE`: default 10
    /// - `TRACKS_CURVE_SEARCH_HALF_EXTENT`: default 0.1
    /// - `TRACKS_EDGE_HIT_DISTANCE`: default 30
    /// - `TRACKS_EDGE_SEARCH_HALF_EXTENT`: default 10
    /// - `TRACKS_INTERSECTION_THRESHOLD`: default 0.5
    /// - `TRACKS_INITIAL_CAPACITY`: default 16
    /// - `TRACKS_MAX_ENTITIES`: unbounded when unset
    ///
    /// Unparseable values are logged and fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the resulting config fails [`Self::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            default_gauge: env_parse_f64("TRACKS_DEFAULT_GAUGE", defaults.default_gauge),
            joint_hit_radius: env_parse_f64("TRACKS_JOINT_HIT_RADIUS", defaults.joint_hit_radius),
            curve_hit_distance: env_parse_f64("TRACKS_CURVE_HIT_DISTANCE", defaults.curve_hit_distance),
            curve_search_half_extent: env_parse_f64(
                "TRACKS_CURVE_SEARCH_HALF_EXTENT",
                defaults.curve_search_half_extent,
            ),
            edge_hit_distance: env_parse_f64("TRACKS_EDGE_HIT_DISTANCE", defaults.edge_hit_distance),
            edge_search_half_extent: env_parse_f64("TRACKS_EDGE_SEARCH_HALF_EXTENT", defaults.edge_search_half_extent),
            intersection_threshold: env_parse_f64("TRACKS_INTERSECTION_THRESHOLD", defaults.intersection_threshold),
            initial_capacity: env_parse_usize("TRACKS_INITIAL_CAPACITY").unwrap_or(defaults.initial_capacity),
            max_entities: env_parse_usize("TRACKS_MAX_ENTITIES"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every distance is positive and finite and the cap is non-zero.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("default_gauge", self.default_gauge),
            ("joint_hit_radius", self.joint_hit_radius),
            ("curve_hit_distance", self.curve_hit_distance),
            ("curve_search_half_extent", self.curve_search_half_extent),
            ("edge_hit_distance", self.edge_hit_distance),
            ("edge_search_half_extent", self.edge_search_half_extent),
            ("intersection_threshold", self.intersection_threshold),
        ];
        for (field, value) in distances {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.max_entities == Some(0) {
            return Err(ConfigError::ZeroCap);
        }
        Ok(())
    }
}

fn env_parse_f64(key: &str, default: f64) -> f64 {
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) => value,
        Err(e) => {
            warn!(key, %raw, error = %e, "unparseable config value, using default");
            default
        }
    }
}

fn env_parse_usize(key: &str) -> Option<usize> {
    let Ok(raw) = std::env::var(key) else {
        return None;
    };
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, %raw, error = %e, "unparseable config value, ignoring");
            None
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
