// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Push events from the backend.
//!
//! Task outcomes are forwarded to the [`TaskRegistry`]; active ski area and
//! route changes are kept as signals.

use crate::error::{BackendError, Result};
use crate::models::{index_ski_area, RawSkiArea, RawTrack, SkiArea, Track, TrackConverter};
use crate::services::backend::{Backend, TaskId};
use crate::services::tasks::TaskRegistry;
use crate::signal::Signal;
use serde::Deserialize;
use serde_json::Value;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const ACTIVE_SKI_AREA_CHANGED: &str = "active_ski_area_changed";
pub const ACTIVE_ROUTE_CHANGED: &str = "active_route_changed";
pub const TASK_FINISHED: &str = "task_finished";
pub const TASK_FAILED: &str = "task_failed";

#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    ActiveSkiAreaChanged(Option<RawSkiArea>),
    ActiveRouteChanged(Option<RawTrack>),
    TaskFinished { task_id: TaskId, data: Value },
    TaskFailed { task_id: TaskId, error: BackendError },
}

#[derive(Deserialize)]
struct TaskFinishedPayload {
    task_id: TaskId,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct TaskFailedPayload {
    task_id: TaskId,
    data: BackendError,
}

impl BackendEvent {
    /// Decode an event by its wire name. Unknown names yield `None`.
    pub fn from_wire(name: &str, payload: Value) -> Result<Option<Self>> {
        let event = match name {
            ACTIVE_SKI_AREA_CHANGED => {
                BackendEvent::ActiveSkiAreaChanged(serde_json::from_value(payload)?)
            }
            ACTIVE_ROUTE_CHANGED => {
                BackendEvent::ActiveRouteChanged(serde_json::from_value(payload)?)
            }
            TASK_FINISHED => {
                let payload: TaskFinishedPayload = serde_json::from_value(payload)?;
                BackendEvent::TaskFinished {
                    task_id: payload.task_id,
                    data: payload.data,
                }
            }
            TASK_FAILED => {
                let payload: TaskFailedPayload = serde_json::from_value(payload)?;
                BackendEvent::TaskFailed {
                    task_id: payload.task_id,
                    error: payload.data,
                }
            }
            _ => {
                tracing::warn!(event = name, "Ignoring unknown backend event");
                return Ok(None);
            }
        };
        Ok(Some(event))
    }
}

pub struct EventsService {
    tasks: Rc<TaskRegistry>,
    pub active_ski_area: Signal<Option<Arc<SkiArea>>>,
    pub active_route: Signal<Option<Arc<RawTrack>>>,
    pub initialized: Signal<bool>,
}

impl EventsService {
    pub fn new(tasks: Rc<TaskRegistry>) -> Self {
        Self {
            tasks,
            active_ski_area: Signal::new(None),
            active_route: Signal::new(None),
            initialized: Signal::new(false),
        }
    }

    /// Fetch the backend's current active ski area and route.
    pub async fn init(&self, backend: &dyn Backend) -> Result<()> {
        let ski_area = backend.get_active_ski_area().await?;
        self.set_active_ski_area(ski_area);
        let route = backend.get_active_route().await?;
        self.active_route.set(route.map(Arc::new));
        self.initialized.set(true);
        tracing::debug!("Events initialized");
        Ok(())
    }

    pub fn handle(&self, event: BackendEvent) {
        match event {
            BackendEvent::ActiveSkiAreaChanged(ski_area) => self.set_active_ski_area(ski_area),
            BackendEvent::ActiveRouteChanged(route) => {
                tracing::debug!(present = route.is_some(), "Active route changed");
                self.active_route.set(route.map(Arc::new));
            }
            BackendEvent::TaskFinished { task_id, data } => self.tasks.accept(task_id, data),
            BackendEvent::TaskFailed { task_id, error } => {
                tracing::debug!(task_id = %task_id, error = %error, "Task failed");
                self.tasks.reject(task_id, error);
            }
        }
    }

    /// Dispatch events until the sender side closes.
    pub async fn run(&self, mut rx: mpsc::UnboundedReceiver<BackendEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
        tracing::debug!("Event channel closed");
    }

    /// The active route converted against the active ski area, if both are
    /// set.
    pub fn active_track(&self) -> Result<Option<Track>> {
        let Some(ski_area) = self.active_ski_area.get() else {
            return Ok(None);
        };
        let Some(route) = self.active_route.get() else {
            return Ok(None);
        };
        TrackConverter::new(&ski_area).convert_track(&route).map(Some)
    }

    fn set_active_ski_area(&self, ski_area: Option<RawSkiArea>) {
        let ski_area = ski_area.map(|raw| Arc::new(index_ski_area(raw)));
        tracing::debug!(
            name = ski_area.as_ref().map(|s| s.name.as_str()),
            "Active ski area changed"
        );
        self.active_ski_area.set(ski_area);
    }
}
