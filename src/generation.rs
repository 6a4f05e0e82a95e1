// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Generation tokens for discarding results of superseded async work.
//!
//! Backend calls cannot be aborted from the client. Instead every new request
//! takes a fresh token and each continuation checks, after its await, that
//! its token is still the current one before publishing anything.

use std::cell::Cell;

/// Monotonic counter handing out [`GenerationToken`]s.
#[derive(Debug, Default)]
pub struct Generation {
    current: Cell<u64>,
}

/// Identifies one request; stale once a newer token was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationToken(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every outstanding token.
    pub fn next(&self) -> GenerationToken {
        let next = self.current.get() + 1;
        self.current.set(next);
        GenerationToken(next)
    }

    pub fn is_current(&self, token: GenerationToken) -> bool {
        self.current.get() == token.0
    }
}
