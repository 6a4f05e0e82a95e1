// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Geometry shapes shared by ski areas and tracks.
//!
//! Plain `geo` types are used for points, lines and polygons; their serde
//! form (`{x, y}`, `{exterior, interiors}`, `{min, max}`) is the wire format.

use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A geometry together with its precomputed bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedGeometry<T> {
    pub item: T,
    pub bounding_rect: Rect<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointWithElevation {
    pub point: Point<f64>,
    pub elevation: f64,
}
