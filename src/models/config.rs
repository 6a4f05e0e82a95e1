// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Persisted UI state and cached ski area descriptors.

use crate::models::ski_area::SkiAreaMetadata;
use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

/// Viewport as persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Center in lon/lat
    pub center: Point<f64>,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapTileType {
    OpenStreetMap,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    pub map_tile_type: MapTileType,
    #[serde(default)]
    pub map_tile_url: String,
}

/// A previously downloaded ski area snapshot. Re-downloading the same ski
/// area creates a new uuid, so several entries may share `metadata.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSkiArea {
    pub uuid: String,
    pub metadata: SkiAreaMetadata,
    pub date: DateTime<Utc>,
}
