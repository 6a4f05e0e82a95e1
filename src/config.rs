// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Client configuration loaded from environment variables.
//!
//! Every value has a default, so a missing `.env` never stops the client.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Tunables of the map engine and the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Margin added around a ski area when framing it (0.1 = 10 %)
    pub zoom_margin: f64,
    /// Fraction of the viewport a selected waypoint must stay inside
    pub safety_margin: f64,
    /// Largest time gap between two activities still drawn as one motion
    pub connector_max_gap: Duration,
    /// Search radius for the closest lift to a selected waypoint (meters)
    pub closest_lift_radius: f64,
    /// Quiet period before a viewport change is published for persistence
    pub map_config_debounce: Duration,
    /// Click tolerance in pixels for hit-testing
    pub hit_tolerance_px: f64,
    /// Zoom level below which ski area and track layers are hidden
    pub min_feature_zoom: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoom_margin: 0.1,
            safety_margin: 0.8,
            connector_max_gap: Duration::from_secs(60),
            closest_lift_radius: 100.0,
            map_config_debounce: Duration::from_millis(500),
            hit_tolerance_px: 5.0,
            min_feature_zoom: 10.0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset or malformed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Self {
            zoom_margin: env_or("SKI_MAP_ZOOM_MARGIN", defaults.zoom_margin),
            safety_margin: env_or("SKI_MAP_SAFETY_MARGIN", defaults.safety_margin),
            connector_max_gap: Duration::from_secs(env_or(
                "SKI_MAP_CONNECTOR_MAX_GAP_SECS",
                defaults.connector_max_gap.as_secs(),
            )),
            closest_lift_radius: env_or(
                "SKI_MAP_CLOSEST_LIFT_RADIUS",
                defaults.closest_lift_radius,
            ),
            map_config_debounce: Duration::from_millis(env_or(
                "SKI_MAP_CONFIG_DEBOUNCE_MS",
                defaults.map_config_debounce.as_millis() as u64,
            )),
            hit_tolerance_px: env_or("SKI_MAP_HIT_TOLERANCE_PX", defaults.hit_tolerance_px),
            min_feature_zoom: env_or("SKI_MAP_MIN_FEATURE_ZOOM", defaults.min_feature_zoom),
        }
    }
}

fn env_or<T: FromStr + Copy + std::fmt::Debug>(name: &'static str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, ?default, "Ignoring invalid configuration value");
            default
        }),
        Err(_) => default,
    }
}

/// Parse a single configuration value.
pub fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("Missing required argument: {0}")]
    Missing(&'static str),
}
