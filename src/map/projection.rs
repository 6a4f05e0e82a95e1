// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Web Mercator (EPSG:3857) projection and the map viewport.
//!
//! All map features live in projected meters; the wire types are lon/lat.

use crate::error::{AppError, Result};
use crate::models::MapConfig;
use geo::{coord, Coord, LineString, MultiLineString, MultiPolygon, Point, Polygon, Rect};
use std::f64::consts::PI;

/// Equatorial radius used by EPSG:3857.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude where the square Web Mercator world ends.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Resolution (meters per pixel) at zoom level 0 with 256 px tiles.
pub const ZOOM_0_RESOLUTION: f64 = 156_543.033_928_040_97;

/// Project a lon/lat coordinate. Latitudes beyond the Mercator limit are
/// clamped; non-finite values and latitudes outside [-90, 90] are rejected.
pub fn from_lon_lat(c: Coord<f64>) -> Result<Coord<f64>> {
    if !c.x.is_finite() || !c.y.is_finite() || c.y.abs() > 90.0 {
        return Err(AppError::InvalidCoordinate { x: c.x, y: c.y });
    }
    let lat = c.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    Ok(coord! {
        x: EARTH_RADIUS * c.x.to_radians(),
        y: EARTH_RADIUS * (PI / 4.0 + lat / 2.0).tan().ln(),
    })
}

pub fn to_lon_lat(c: Coord<f64>) -> Coord<f64> {
    coord! {
        x: (c.x / EARTH_RADIUS).to_degrees(),
        y: (2.0 * (c.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
    }
}

pub fn project_point(p: Point<f64>) -> Result<Coord<f64>> {
    from_lon_lat(p.0)
}

pub fn project_line_string(line: &LineString<f64>) -> Result<LineString<f64>> {
    line.coords()
        .map(|c| from_lon_lat(*c))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

pub fn project_multi_line_string(lines: &MultiLineString<f64>) -> Result<MultiLineString<f64>> {
    lines
        .iter()
        .map(project_line_string)
        .collect::<Result<Vec<_>>>()
        .map(MultiLineString::new)
}

pub fn project_polygon(polygon: &Polygon<f64>) -> Result<Polygon<f64>> {
    let exterior = project_line_string(polygon.exterior())?;
    let interiors = polygon
        .interiors()
        .iter()
        .map(project_line_string)
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

pub fn project_multi_polygon(polygons: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
    polygons
        .iter()
        .map(project_polygon)
        .collect::<Result<Vec<_>>>()
        .map(MultiPolygon::new)
}

pub fn project_rect(rect: Rect<f64>) -> Result<Rect<f64>> {
    Ok(Rect::new(from_lon_lat(rect.min())?, from_lon_lat(rect.max())?))
}

pub fn resolution_for_zoom(zoom: f64) -> f64 {
    ZOOM_0_RESOLUTION / 2f64.powf(zoom)
}

pub fn zoom_for_resolution(resolution: f64) -> f64 {
    (ZOOM_0_RESOLUTION / resolution).log2()
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// What part of the projected plane is on screen.
///
/// Pixel coordinates have their origin at the top left corner, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coord<f64>,
    pub resolution: f64,
    pub size: Size,
}

impl Viewport {
    /// Whole-world view at zoom 2, like a freshly created map.
    pub fn new(size: Size) -> Self {
        Self {
            center: coord! { x: 0.0, y: 0.0 },
            resolution: resolution_for_zoom(2.0),
            size,
        }
    }

    pub fn zoom(&self) -> f64 {
        zoom_for_resolution(self.resolution)
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.resolution = resolution_for_zoom(zoom);
    }

    pub fn extent(&self) -> Rect<f64> {
        self.scaled_extent(1.0)
    }

    fn scaled_extent(&self, factor: f64) -> Rect<f64> {
        let half_width = self.size.width * self.resolution * factor / 2.0;
        let half_height = self.size.height * self.resolution * factor / 2.0;
        Rect::new(
            coord! { x: self.center.x - half_width, y: self.center.y - half_height },
            coord! { x: self.center.x + half_width, y: self.center.y + half_height },
        )
    }

    /// Center on `rect` and pick the resolution showing all of it plus
    /// `margin` (a fraction of its size).
    pub fn fit(&mut self, rect: Rect<f64>, margin: f64) {
        self.center = rect.center();
        if self.size.is_empty() {
            return;
        }
        let resolution = f64::max(
            rect.width() / self.size.width,
            rect.height() / self.size.height,
        ) * (1.0 + margin);
        if resolution > 0.0 && resolution.is_finite() {
            self.resolution = resolution;
        }
    }

    pub fn pixel_to_coordinate(&self, pixel: Coord<f64>) -> Coord<f64> {
        coord! {
            x: self.center.x + (pixel.x - self.size.width / 2.0) * self.resolution,
            y: self.center.y - (pixel.y - self.size.height / 2.0) * self.resolution,
        }
    }

    pub fn coordinate_to_pixel(&self, c: Coord<f64>) -> Coord<f64> {
        coord! {
            x: (c.x - self.center.x) / self.resolution + self.size.width / 2.0,
            y: (self.center.y - c.y) / self.resolution + self.size.height / 2.0,
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.center.x += dx * self.resolution;
        self.center.y -= dy * self.resolution;
    }

    /// Move the view so that `c` lies inside the central `safety_margin`
    /// fraction of the viewport.
    ///
    /// A point already inside leaves the view untouched. A point off screen
    /// is centered; a point near the edge is nudged just enough. Returns
    /// whether the view moved.
    pub fn ensure_visible(&mut self, c: Coord<f64>, safety_margin: f64) -> bool {
        let inner = self.scaled_extent(safety_margin);
        if contains(&inner, c) {
            return false;
        }
        if !contains(&self.extent(), c) {
            self.center = c;
            return true;
        }
        self.center.x += overshoot(c.x, inner.min().x, inner.max().x);
        self.center.y += overshoot(c.y, inner.min().y, inner.max().y);
        true
    }

    /// Viewport as persisted: lon/lat center and zoom level.
    pub fn to_map_config(&self) -> MapConfig {
        MapConfig {
            center: Point(to_lon_lat(self.center)),
            zoom: self.zoom(),
        }
    }

    pub fn apply_map_config(&mut self, config: &MapConfig) -> Result<()> {
        self.center = project_point(config.center)?;
        self.set_zoom(config.zoom);
        Ok(())
    }
}

fn contains(rect: &Rect<f64>, c: Coord<f64>) -> bool {
    c.x >= rect.min().x && c.x <= rect.max().x && c.y >= rect.min().y && c.y <= rect.max().y
}

fn overshoot(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        value - min
    } else if value > max {
        value - max
    } else {
        0.0
    }
}
