// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Error types shared by the map engine, the chooser and the orchestrator.

use geo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of an error reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InputError,
    #[serde(rename = "OSMError")]
    OsmError,
    LogicError,
    ExternalError,
    NoSkiAreaAtLocation,
    Cancelled,
    /// Any kind this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InputError => "InputError",
            ErrorKind::OsmError => "OSMError",
            ErrorKind::LogicError => "LogicError",
            ErrorKind::ExternalError => "ExternalError",
            ErrorKind::NoSkiAreaAtLocation => "NoSkiAreaAtLocation",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Error payload as the backend sends it: `{"type", "details"?, "msg"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {msg}")]
pub struct BackendError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Rect<f64>>,
    pub msg: String,
}

impl BackendError {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            details: None,
            msg: msg.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "cancelled")
    }

    pub fn no_ski_area_at(rect: Rect<f64>) -> Self {
        Self {
            kind: ErrorKind::NoSkiAreaAtLocation,
            details: Some(rect),
            msg: "No ski area found at this location".to_string(),
        }
    }
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Map is not initialized")]
    NotInitialized,

    #[error("No ski area is loaded")]
    SkiAreaNotLoaded,

    #[error("No track is loaded")]
    TrackNotLoaded,

    #[error("UI configuration is not loaded yet")]
    ConfigNotLoaded,

    #[error("Lift not found with id: {0}")]
    LiftNotFound(String),

    #[error("Piste not found with id: {0}")]
    PisteNotFound(String),

    #[error("Activity not found at index {0}")]
    ActivityNotFound(usize),

    #[error("Invalid coordinate: ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The searched area, if this is the "no ski area at this location"
    /// error that starts the search-by-coordinates recovery flow.
    pub fn no_ski_area_location(&self) -> Option<Rect<f64>> {
        match self {
            AppError::Backend(BackendError {
                kind: ErrorKind::NoSkiAreaAtLocation,
                details,
                ..
            }) => *details,
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            AppError::Backend(BackendError {
                kind: ErrorKind::Cancelled,
                ..
            })
        )
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
