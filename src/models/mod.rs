// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Domain data: wire payloads from the backend and their indexed forms.

pub mod config;
pub mod geometry;
pub mod ski_area;
pub mod track;

pub use config::{CachedSkiArea, MapConfig, MapTileType, UiConfig};
pub use geometry::{BoundedGeometry, PointWithElevation};
pub use ski_area::{
    index_ski_area, Difficulty, Lift, LiftType, Piste, RawSkiArea, SkiArea, SkiAreaMetadata,
};
pub use track::{
    Activity, ActivityKind, ActivityType, RawActivity, RawTrack, Track, TrackConverter, UseLift,
    Waypoint,
};
