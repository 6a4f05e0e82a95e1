// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Map rendering state: projection, styles, layers and the engine owning
//! them.

pub mod engine;
pub mod export;
pub mod feature;
pub mod projection;
pub mod style;
pub mod surface;
pub mod track_layer;

pub use engine::{
    ActivityRef, ClosestLift, Enrichments, MapConfigChanges, MapEngine, Selection,
};
pub use feature::{Feature, FeatureKind, VectorLayer};
pub use projection::{Size, Viewport};
pub use surface::{HeadlessTarget, InputEvent, Key, RenderTarget};
pub use track_layer::{TrackLayer, TrackNode};
