// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! RPC boundary to the native backend.
//!
//! Calls either answer directly or, for long-running work, answer with a
//! [`TaskId`] whose result arrives later as a `task_finished` /
//! `task_failed` event (see [`crate::services::tasks::TaskRegistry`]).

use crate::error::BackendError;
use crate::models::{CachedSkiArea, MapConfig, RawSkiArea, RawTrack, UiConfig, Waypoint};
use futures_util::future::LocalBoxFuture;
use geo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Result of a backend call.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Future returned by backend calls. Everything runs on the UI thread, so
/// these futures are not `Send`.
pub type BackendFuture<'a, T> = LocalBoxFuture<'a, BackendResult<T>>;

/// Identifier of a job the backend runs asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived per-segment values between two waypoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedData {
    /// Meters per second
    #[serde(default)]
    pub speed: Option<f64>,
    /// Rise over run, as a fraction
    #[serde(default)]
    pub inclination: Option<f64>,
}

/// Closest lift to a point, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClosestLift {
    pub lift_id: String,
    /// Meters
    pub distance: f64,
}

/// The backend calls used by the client.
///
/// Task-based calls return a [`TaskId`]; their payloads are:
/// - `find_ski_areas_by_name`, `find_ski_areas_by_coords`: `Vec<SkiAreaMetadata>`
/// - `load_ski_area_from_id`: `RawSkiArea`
/// - `load_gpx`: `RawTrack`
pub trait Backend {
    fn load_ski_area_from_file<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, RawSkiArea>;

    fn load_cached_ski_area<'a>(&'a self, uuid: &'a str) -> BackendFuture<'a, RawSkiArea>;

    fn load_ski_area_from_id(&self, id: u64) -> BackendFuture<'_, TaskId>;

    fn find_ski_areas_by_name<'a>(&'a self, name: &'a str) -> BackendFuture<'a, TaskId>;

    fn find_ski_areas_by_coords(&self, rect: Rect<f64>) -> BackendFuture<'_, TaskId>;

    fn find_cached_ski_areas_by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> BackendFuture<'a, Vec<CachedSkiArea>>;

    fn find_cached_ski_areas_by_coords(
        &self,
        rect: Rect<f64>,
    ) -> BackendFuture<'_, Vec<CachedSkiArea>>;

    fn get_all_cached_ski_areas(&self) -> BackendFuture<'_, Vec<CachedSkiArea>>;

    fn remove_cached_ski_area<'a>(&'a self, uuid: &'a str) -> BackendFuture<'a, ()>;

    fn load_gpx<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, TaskId>;

    fn load_route<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, RawTrack>;

    fn save_current_route<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, ()>;

    fn get_active_ski_area(&self) -> BackendFuture<'_, Option<RawSkiArea>>;

    fn get_active_route(&self) -> BackendFuture<'_, Option<RawTrack>>;

    fn get_derived_data<'a>(
        &'a self,
        wp1: &'a Waypoint,
        wp2: &'a Waypoint,
    ) -> BackendFuture<'a, DerivedData>;

    fn get_closest_lift(
        &self,
        point: Point<f64>,
        limit: f64,
    ) -> BackendFuture<'_, Option<RawClosestLift>>;

    fn get_ui_config(&self) -> BackendFuture<'_, Option<UiConfig>>;

    fn save_ui_config<'a>(&'a self, config: &'a UiConfig) -> BackendFuture<'a, ()>;

    fn get_map_config(&self) -> BackendFuture<'_, Option<MapConfig>>;

    fn save_map_config(&self, config: MapConfig) -> BackendFuture<'_, ()>;

    fn cancel_task(&self, task_id: TaskId) -> BackendFuture<'_, ()>;
}
