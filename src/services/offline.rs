// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! File-backed [`Backend`] for running without the analysis service.
//!
//! Ski areas and routes are read from JSON files. Derived data and the
//! closest lift are computed locally. Anything needing the analysis service
//! (OSM queries, GPX analysis, the ski area cache) fails with
//! `ExternalError`.

use crate::error::{BackendError, ErrorKind};
use crate::models::{CachedSkiArea, MapConfig, RawSkiArea, RawTrack, UiConfig, Waypoint};
use crate::services::backend::{
    Backend, BackendFuture, BackendResult, DerivedData, RawClosestLift, TaskId,
};
use crate::time_utils::seconds_between;
use futures_util::FutureExt;
use geo::{Distance, Haversine, Point, Rect};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::path::Path;

#[derive(Debug, Default)]
pub struct OfflineBackend {
    active_ski_area: RefCell<Option<RawSkiArea>>,
    active_route: RefCell<Option<RawTrack>>,
    ui_config: RefCell<Option<UiConfig>>,
    map_config: RefCell<Option<MapConfig>>,
}

impl OfflineBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> BackendResult<T> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        BackendError::new(
            ErrorKind::InputError,
            format!("Failed to read {}: {e}", path.display()),
        )
    })?;
    serde_json::from_str(&content).map_err(|e| {
        BackendError::new(
            ErrorKind::InputError,
            format!("Failed to parse {}: {e}", path.display()),
        )
    })
}

fn unsupported<'a, T: 'a>(what: &str) -> BackendFuture<'a, T> {
    let error = BackendError::new(
        ErrorKind::ExternalError,
        format!("{what} is not available offline"),
    );
    futures_util::future::ready(Err(error)).boxed_local()
}

fn ready<'a, T: 'a>(value: T) -> BackendFuture<'a, T> {
    futures_util::future::ready(Ok(value)).boxed_local()
}

/// Speed over ground and slope between two waypoints.
pub fn derived_data(from: &Waypoint, to: &Waypoint) -> DerivedData {
    let distance = Haversine.distance(from.point, to.point);
    let speed = match (from.time, to.time) {
        (Some(begin), Some(end)) => {
            let seconds = seconds_between(begin, end);
            (seconds > 0.0).then(|| distance / seconds)
        }
        _ => None,
    };
    let inclination = match (from.elevation, to.elevation) {
        (Some(begin), Some(end)) if distance > 0.0 => Some((end - begin) / distance),
        _ => None,
    };
    DerivedData { speed, inclination }
}

/// Lift with a line vertex closest to `point`, if within `limit` meters.
pub fn closest_lift(
    ski_area: &RawSkiArea,
    point: Point<f64>,
    limit: f64,
) -> Option<RawClosestLift> {
    ski_area
        .lifts
        .iter()
        .filter_map(|(id, lift)| {
            lift.line
                .item
                .points()
                .map(|vertex| Haversine.distance(point, vertex))
                .min_by(f64::total_cmp)
                .map(|distance| (id, distance))
        })
        .filter(|(_, distance)| *distance <= limit)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, distance)| RawClosestLift {
            lift_id: id.clone(),
            distance,
        })
}

impl Backend for OfflineBackend {
    fn load_ski_area_from_file<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, RawSkiArea> {
        async move {
            let ski_area: RawSkiArea = read_json(path).await?;
            tracing::debug!(name = %ski_area.name, "Ski area read from file");
            *self.active_ski_area.borrow_mut() = Some(ski_area.clone());
            // A route belongs to the ski area it was analyzed against.
            self.active_route.borrow_mut().take();
            Ok(ski_area)
        }
        .boxed_local()
    }

    fn load_cached_ski_area<'a>(&'a self, _uuid: &'a str) -> BackendFuture<'a, RawSkiArea> {
        unsupported("Ski area cache")
    }

    fn load_ski_area_from_id(&self, _id: u64) -> BackendFuture<'_, TaskId> {
        unsupported("OSM download")
    }

    fn find_ski_areas_by_name<'a>(&'a self, _name: &'a str) -> BackendFuture<'a, TaskId> {
        unsupported("Ski area search")
    }

    fn find_ski_areas_by_coords(&self, _rect: Rect<f64>) -> BackendFuture<'_, TaskId> {
        unsupported("Ski area search")
    }

    fn find_cached_ski_areas_by_name<'a>(
        &'a self,
        _name: &'a str,
    ) -> BackendFuture<'a, Vec<CachedSkiArea>> {
        ready(Vec::new())
    }

    fn find_cached_ski_areas_by_coords(
        &self,
        _rect: Rect<f64>,
    ) -> BackendFuture<'_, Vec<CachedSkiArea>> {
        ready(Vec::new())
    }

    fn get_all_cached_ski_areas(&self) -> BackendFuture<'_, Vec<CachedSkiArea>> {
        ready(Vec::new())
    }

    fn remove_cached_ski_area<'a>(&'a self, _uuid: &'a str) -> BackendFuture<'a, ()> {
        unsupported("Ski area cache")
    }

    fn load_gpx<'a>(&'a self, _path: &'a Path) -> BackendFuture<'a, TaskId> {
        unsupported("GPX analysis")
    }

    fn load_route<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, RawTrack> {
        async move {
            if self.active_ski_area.borrow().is_none() {
                return Err(BackendError::new(ErrorKind::LogicError, "No ski area loaded"));
            }
            let route: RawTrack = read_json(path).await?;
            *self.active_route.borrow_mut() = Some(route.clone());
            Ok(route)
        }
        .boxed_local()
    }

    fn save_current_route<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, ()> {
        async move {
            let content = match self.active_route.borrow().as_ref() {
                Some(route) => serde_json::to_string(route)
                    .map_err(|e| BackendError::new(ErrorKind::LogicError, e.to_string()))?,
                None => {
                    return Err(BackendError::new(ErrorKind::LogicError, "No active route"));
                }
            };
            tokio::fs::write(path, content).await.map_err(|e| {
                BackendError::new(
                    ErrorKind::InputError,
                    format!("Failed to write {}: {e}", path.display()),
                )
            })
        }
        .boxed_local()
    }

    fn get_active_ski_area(&self) -> BackendFuture<'_, Option<RawSkiArea>> {
        ready(self.active_ski_area.borrow().clone())
    }

    fn get_active_route(&self) -> BackendFuture<'_, Option<RawTrack>> {
        ready(self.active_route.borrow().clone())
    }

    fn get_derived_data<'a>(
        &'a self,
        wp1: &'a Waypoint,
        wp2: &'a Waypoint,
    ) -> BackendFuture<'a, DerivedData> {
        ready(derived_data(wp1, wp2))
    }

    fn get_closest_lift(
        &self,
        point: Point<f64>,
        limit: f64,
    ) -> BackendFuture<'_, Option<RawClosestLift>> {
        let result = self
            .active_ski_area
            .borrow()
            .as_ref()
            .and_then(|ski_area| closest_lift(ski_area, point, limit));
        ready(result)
    }

    fn get_ui_config(&self) -> BackendFuture<'_, Option<UiConfig>> {
        ready(self.ui_config.borrow().clone())
    }

    fn save_ui_config<'a>(&'a self, config: &'a UiConfig) -> BackendFuture<'a, ()> {
        *self.ui_config.borrow_mut() = Some(config.clone());
        ready(())
    }

    fn get_map_config(&self) -> BackendFuture<'_, Option<MapConfig>> {
        ready(*self.map_config.borrow())
    }

    fn save_map_config(&self, config: MapConfig) -> BackendFuture<'_, ()> {
        *self.map_config.borrow_mut() = Some(config);
        ready(())
    }

    fn cancel_task(&self, task_id: TaskId) -> BackendFuture<'_, ()> {
        tracing::debug!(task_id = %task_id, "No offline task to cancel");
        ready(())
    }
}
