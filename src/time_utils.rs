// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Shared helpers for date/time handling.

use chrono::{DateTime, Utc};

/// Signed number of seconds from `from` to `to`, with millisecond precision.
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}
