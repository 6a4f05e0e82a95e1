// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Ski area, lift and piste models.

use crate::models::geometry::{BoundedGeometry, PointWithElevation};
use geo::{LineString, MultiLineString, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Lightweight descriptor of a ski area, used in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkiAreaMetadata {
    /// OSM id of the ski area
    pub id: u64,
    pub name: String,
    pub outline: BoundedGeometry<Polygon<f64>>,
}

/// Lift type as reported by the backend (OSM `aerialway` vocabulary).
///
/// Kept as a string so new values from the backend pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiftType(pub String);

impl LiftType {
    /// Human-readable name; unknown types are shown as-is.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "cable_car" => "Cable car",
            "gondola" => "Gondola",
            "mixed_lift" => "Mixed lift",
            "chair_lift" => "Chairlift",
            "drag_lift" => "Draglift",
            "t-bar" => "T-bar",
            "j-bar" => "J-bar",
            "platter" => "Platter",
            "rope_tow" => "Rope tow",
            "magic_carpet" => "Magic carpet",
            "zip_line" => "Zipline",
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lift {
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub lift_type: LiftType,
    pub line: BoundedGeometry<LineString<f64>>,
    #[serde(default)]
    pub stations: Vec<PointWithElevation>,
    #[serde(default)]
    pub can_go_reverse: bool,
    #[serde(default)]
    pub can_disembark: bool,
    #[serde(default)]
    pub lengths: Vec<f64>,
}

/// Piste difficulty.
///
/// Values outside the known vocabulary are preserved in `Other`. An empty
/// string means the difficulty was not tagged; it reads as `Unknown`, which
/// is always written as `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Novice,
    Easy,
    Intermediate,
    Advanced,
    Expert,
    Freeride,
    Unknown,
    Other(String),
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Novice => "Novice",
            Difficulty::Easy => "Easy",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
            Difficulty::Freeride => "Freeride",
            Difficulty::Unknown => "Unknown",
            Difficulty::Other(s) => s,
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Novice" => Difficulty::Novice,
            "Easy" => Difficulty::Easy,
            "Intermediate" => Difficulty::Intermediate,
            "Advanced" => Difficulty::Advanced,
            "Expert" => Difficulty::Expert,
            "Freeride" => Difficulty::Freeride,
            "" | "Unknown" => Difficulty::Unknown,
            _ => Difficulty::Other(value),
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piste {
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub name: String,
    pub difficulty: Difficulty,
    pub bounding_rect: Rect<f64>,
    #[serde(default = "empty_multi_polygon")]
    pub areas: MultiPolygon<f64>,
    #[serde(default = "empty_multi_line_string")]
    pub lines: MultiLineString<f64>,
}

fn empty_multi_polygon() -> MultiPolygon<f64> {
    MultiPolygon::new(Vec::new())
}

fn empty_multi_line_string() -> MultiLineString<f64> {
    MultiLineString::new(Vec::new())
}

/// Ski area as sent over the wire: lifts and pistes keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSkiArea {
    pub name: String,
    #[serde(default)]
    pub lifts: BTreeMap<String, Lift>,
    #[serde(default)]
    pub pistes: BTreeMap<String, Piste>,
    pub bounding_rect: Rect<f64>,
}

/// Indexed ski area. Entities are shared so tracks and the selection can
/// refer to them without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct SkiArea {
    pub name: String,
    pub lifts: BTreeMap<String, Arc<Lift>>,
    pub pistes: BTreeMap<String, Arc<Piste>>,
    pub bounding_rect: Rect<f64>,
}

impl SkiArea {
    pub fn lift(&self, id: &str) -> Option<&Arc<Lift>> {
        self.lifts.get(id)
    }

    pub fn piste(&self, id: &str) -> Option<&Arc<Piste>> {
        self.pistes.get(id)
    }
}

/// Convert a wire ski area into its indexed form.
pub fn index_ski_area(raw: RawSkiArea) -> SkiArea {
    SkiArea {
        name: raw.name,
        lifts: index_data(raw.lifts),
        pistes: index_data(raw.pistes),
        bounding_rect: raw.bounding_rect,
    }
}

fn index_data<T>(data: BTreeMap<String, T>) -> BTreeMap<String, Arc<T>> {
    data.into_iter().map(|(id, item)| (id, Arc::new(item))).collect()
}

impl From<RawSkiArea> for SkiArea {
    fn from(raw: RawSkiArea) -> Self {
        index_ski_area(raw)
    }
}
