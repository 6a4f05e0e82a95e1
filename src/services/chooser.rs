// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Ski area chooser.
//!
//! Merges two result streams for one "pick a ski area" flow: cached
//! snapshots (fast, local) and backend search results (slow). A new search
//! supersedes the previous one; results of a superseded search are dropped
//! when they arrive.

use crate::error::Result;
use crate::generation::Generation;
use crate::models::{CachedSkiArea, SkiAreaMetadata};
use crate::signal::Signal;
use futures_util::future::LocalBoxFuture;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;

/// State of the backend search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadedSkiAreas {
    /// No search running or shown
    #[default]
    Idle,
    /// Search in flight
    Searching,
    Found(Vec<SkiAreaMetadata>),
}

impl LoadedSkiAreas {
    pub fn as_slice(&self) -> &[SkiAreaMetadata] {
        match self {
            LoadedSkiAreas::Found(list) => list,
            LoadedSkiAreas::Idle | LoadedSkiAreas::Searching => &[],
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, LoadedSkiAreas::Searching)
    }
}

/// One candidate the user can pick.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Cached(CachedSkiArea),
    Loaded(SkiAreaMetadata),
}

impl Choice {
    pub fn metadata(&self) -> &SkiAreaMetadata {
        match self {
            Choice::Cached(cached) => &cached.metadata,
            Choice::Loaded(metadata) => metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata().name
    }
}

/// Continuation run after the user picked a ski area.
pub type ActionOnSelect = Box<dyn FnOnce() -> LocalBoxFuture<'static, Result<()>>>;

#[derive(Default)]
pub struct SkiAreaChooser {
    generation: Generation,
    cache: RefCell<HashMap<String, CachedSkiArea>>,
    action_on_select: RefCell<Option<ActionOnSelect>>,
    pub loaded_ski_areas: Signal<LoadedSkiAreas>,
    pub cached_ski_areas: Signal<Vec<CachedSkiArea>>,
}

impl SkiAreaChooser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the results of a new search, superseding any search still in
    /// flight.
    ///
    /// Returns `Ok(())` without publishing anything if a newer search or a
    /// clear happened while waiting.
    pub async fn select_ski_areas<C, L>(&self, cached: C, loaded: L) -> Result<()>
    where
        C: Future<Output = Result<Vec<CachedSkiArea>>>,
        L: Future<Output = Result<Vec<SkiAreaMetadata>>>,
    {
        let token = self.generation.next();
        self.loaded_ski_areas.set(LoadedSkiAreas::Searching);

        let cached = cached.await;
        if !self.generation.is_current(token) {
            tracing::debug!("Discarding cached ski areas of a superseded search");
            return Ok(());
        }
        match cached {
            Ok(list) => {
                tracing::debug!(count = list.len(), "Cached ski areas found");
                *self.cache.borrow_mut() = list
                    .into_iter()
                    .map(|cached| (cached.uuid.clone(), cached))
                    .collect();
                self.publish_cache();
            }
            Err(e) => {
                self.loaded_ski_areas.set(LoadedSkiAreas::Idle);
                return Err(e);
            }
        }

        let loaded = loaded.await;
        if !self.generation.is_current(token) {
            tracing::debug!("Discarding search results of a superseded search");
            return Ok(());
        }
        match loaded {
            Ok(list) => {
                tracing::debug!(count = list.len(), "Ski areas found");
                self.loaded_ski_areas.set(LoadedSkiAreas::Found(list));
                Ok(())
            }
            Err(e) => {
                self.loaded_ski_areas.set(LoadedSkiAreas::Idle);
                Err(e)
            }
        }
    }

    /// Drop all candidates and the pending continuation; any search still in
    /// flight is discarded when it completes.
    pub fn clear_choosable_ski_areas(&self) {
        self.generation.next();
        self.action_on_select.borrow_mut().take();
        self.cache.borrow_mut().clear();
        self.loaded_ski_areas.set(LoadedSkiAreas::Idle);
        self.cached_ski_areas.set(Vec::new());
    }

    /// Remove one cached snapshot from the candidates.
    pub fn remove_cached_ski_area(&self, uuid: &str) -> bool {
        let removed = self.cache.borrow_mut().remove(uuid).is_some();
        if removed {
            self.publish_cache();
        }
        removed
    }

    pub fn set_action_on_select(&self, action: ActionOnSelect) {
        *self.action_on_select.borrow_mut() = Some(action);
    }

    pub fn take_action_on_select(&self) -> Option<ActionOnSelect> {
        self.action_on_select.borrow_mut().take()
    }

    pub fn has_action_on_select(&self) -> bool {
        self.action_on_select.borrow().is_some()
    }

    pub fn is_searching(&self) -> bool {
        self.loaded_ski_areas.with(LoadedSkiAreas::is_searching)
    }

    pub fn has_choosable_ski_area(&self) -> bool {
        self.loaded_ski_areas.with(|loaded| !loaded.as_slice().is_empty())
            || self.cached_ski_areas.with(|cached| !cached.is_empty())
    }

    /// Candidates whose name contains `filter`, cached snapshots first.
    pub fn choosable(&self, filter: &str) -> Vec<Choice> {
        let cached = self.cached_ski_areas.with(|cached| {
            cached
                .iter()
                .filter(|c| filter_name(&c.metadata.name, filter))
                .cloned()
                .map(Choice::Cached)
                .collect::<Vec<_>>()
        });
        let loaded = self.loaded_ski_areas.with(|loaded| {
            loaded
                .as_slice()
                .iter()
                .filter(|m| filter_name(&m.name, filter))
                .cloned()
                .map(Choice::Loaded)
                .collect::<Vec<_>>()
        });
        cached.into_iter().chain(loaded).collect()
    }

    /// The only candidate shown for `filter`, if there is exactly one.
    pub fn single_choice(&self, filter: &str) -> Option<Choice> {
        let mut choices = self.choosable(filter);
        if choices.len() == 1 {
            choices.pop()
        } else {
            None
        }
    }

    fn publish_cache(&self) {
        let mut list: Vec<CachedSkiArea> = self.cache.borrow().values().cloned().collect();
        list.sort_by(|a, b| {
            a.metadata
                .name
                .cmp(&b.metadata.name)
                .then_with(|| b.date.cmp(&a.date))
        });
        self.cached_ski_areas.set(list);
    }
}

impl fmt::Debug for SkiAreaChooser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkiAreaChooser")
            .field("loaded_ski_areas", &self.loaded_ski_areas)
            .field("cached_ski_areas", &self.cached_ski_areas)
            .field("has_action_on_select", &self.has_action_on_select())
            .finish()
    }
}

/// Case-insensitive substring match; an empty filter matches everything.
pub fn filter_name(name: &str, filter: &str) -> bool {
    filter.is_empty() || name.to_lowercase().contains(&filter.to_lowercase())
}
