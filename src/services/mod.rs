// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Services module - backend boundary and client-side orchestration.

pub mod actions;
pub mod backend;
pub mod chooser;
pub mod events;
pub mod offline;
pub mod tasks;
pub mod ui_config;

pub use actions::{ActionsService, LoadingGuard};
pub use backend::{Backend, BackendFuture, BackendResult, DerivedData, RawClosestLift, TaskId};
pub use chooser::{ActionOnSelect, Choice, LoadedSkiAreas, SkiAreaChooser};
pub use events::{BackendEvent, EventsService};
pub use offline::OfflineBackend;
pub use tasks::{PendingTask, TaskRegistry};
pub use ui_config::UiConfigService;
