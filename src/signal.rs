// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Observable state cells.
//!
//! A [`Signal`] owns the current value of one piece of published state.
//! Setting it replaces the value and wakes every subscriber; readers always
//! see the latest value. Built on `tokio::sync::watch`.

use std::fmt;
use tokio::sync::watch;

pub struct Signal<T> {
    tx: watch::Sender<T>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Inspect the current value without cloning it.
    ///
    /// The closure must not set this signal.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Replace the value without waking subscribers.
    pub fn set_silently(&self, value: T) {
        self.tx.send_if_modified(|current| {
            *current = value;
            false
        });
    }

    /// Modify the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&*self.tx.borrow()).finish()
    }
}
