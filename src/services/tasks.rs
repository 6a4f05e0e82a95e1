// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Registry of backend jobs awaiting their result event.
//!
//! The backend answers some calls with a task id only; the outcome arrives
//! later as a `task_finished` or `task_failed` event. The registry pairs each
//! id with a one-shot channel so the caller can simply await the result.

use crate::error::{AppError, BackendError, Result};
use crate::services::backend::TaskId;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::oneshot;

type TaskOutcome = std::result::Result<Value, BackendError>;

/// Pending backend tasks keyed by id.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: RefCell<HashMap<TaskId, oneshot::Sender<TaskOutcome>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a waiter for `id`.
    ///
    /// Ids must not be reused while still pending; a second registration
    /// replaces the first, whose future then resolves as cancelled.
    pub fn add_task<T: DeserializeOwned>(&self, id: TaskId) -> PendingTask<T> {
        let (tx, rx) = oneshot::channel();
        if self.tasks.borrow_mut().insert(id, tx).is_some() {
            tracing::warn!(task_id = %id, "Task id registered twice");
        }
        tracing::debug!(task_id = %id, "Task registered");
        PendingTask {
            id,
            rx,
            _marker: PhantomData,
        }
    }

    /// Resolve task `id` with its result payload.
    pub fn accept(&self, id: TaskId, value: Value) {
        self.resolve(id, Ok(value));
    }

    /// Fail task `id` with the error the backend reported.
    pub fn reject(&self, id: TaskId, error: BackendError) {
        self.resolve(id, Err(error));
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.borrow().contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len()
    }

    fn resolve(&self, id: TaskId, outcome: TaskOutcome) {
        // The borrow ends before sending so a waiter may register new tasks.
        let sender = self.tasks.borrow_mut().remove(&id);
        let Some(sender) = sender else {
            tracing::error!(task_id = %id, "Unknown task id");
            return;
        };
        if sender.send(outcome).is_err() {
            tracing::debug!(task_id = %id, "Task finished but nobody is waiting");
        }
    }
}

/// Future of one registered task, decoding the payload into `T`.
#[derive(Debug)]
pub struct PendingTask<T> {
    id: TaskId,
    rx: oneshot::Receiver<TaskOutcome>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PendingTask<T> {
    pub fn id(&self) -> TaskId {
        self.id
    }
}

impl<T: DeserializeOwned> Future for PendingTask<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outcome = ready!(Pin::new(&mut this.rx).poll(cx));
        Poll::Ready(match outcome {
            Ok(Ok(value)) => serde_json::from_value(value).map_err(AppError::from),
            Ok(Err(error)) => Err(AppError::Backend(error)),
            // Registry dropped or the id was registered again.
            Err(_) => Err(AppError::Backend(BackendError::cancelled())),
        })
    }
}
