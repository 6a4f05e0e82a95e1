// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! User actions: backend calls and what to do with their results.
//!
//! Long operations hold a [`LoadingGuard`] so the UI can show a busy state
//! while any of them run. A GPX import that fails because the backend knows
//! no ski area at the track's location starts a search by coordinates and
//! retries the import once the user picks one.

use crate::error::{AppError, Result};
use crate::map::{MapConfigChanges, MapEngine};
use crate::models::{
    index_ski_area, CachedSkiArea, MapConfig, RawSkiArea, RawTrack, SkiAreaMetadata,
};
use crate::services::backend::{Backend, TaskId};
use crate::services::chooser::{Choice, SkiAreaChooser};
use crate::services::tasks::TaskRegistry;
use crate::signal::Signal;
use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;
use geo::Rect;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Counts one running operation while alive.
#[must_use]
pub struct LoadingGuard<'a> {
    loading: &'a Signal<u32>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.update(|count| *count = count.saturating_sub(1));
    }
}

pub struct ActionsService {
    backend: Rc<dyn Backend>,
    tasks: Rc<TaskRegistry>,
    chooser: Rc<SkiAreaChooser>,
    map: Rc<RefCell<MapEngine>>,
    /// Number of operations in flight
    pub loading: Signal<u32>,
    search_task: Cell<Option<TaskId>>,
}

impl ActionsService {
    pub fn new(
        backend: Rc<dyn Backend>,
        tasks: Rc<TaskRegistry>,
        chooser: Rc<SkiAreaChooser>,
        map: Rc<RefCell<MapEngine>>,
    ) -> Self {
        Self {
            backend,
            tasks,
            chooser,
            map,
            loading: Signal::new(0),
            search_task: Cell::new(None),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get() > 0
    }

    pub fn start_loading(&self) -> LoadingGuard<'_> {
        self.loading.update(|count| *count += 1);
        LoadingGuard {
            loading: &self.loading,
        }
    }

    async fn do_job<T>(&self, job: impl Future<Output = Result<T>>) -> Result<T> {
        let _guard = self.start_loading();
        job.await
    }

    fn show_ski_area(&self, raw: RawSkiArea) -> Result<()> {
        self.map.borrow_mut().load_ski_area(index_ski_area(raw), true)
    }

    pub async fn load_ski_area_from_file(&self, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "Loading ski area from file");
        let raw = self
            .do_job(async {
                self.backend
                    .load_ski_area_from_file(path)
                    .await
                    .map_err(AppError::from)
            })
            .await?;
        self.show_ski_area(raw)
    }

    pub async fn load_cached_ski_area(&self, uuid: &str) -> Result<()> {
        tracing::info!(uuid, "Loading cached ski area");
        let raw = self
            .do_job(async {
                self.backend
                    .load_cached_ski_area(uuid)
                    .await
                    .map_err(AppError::from)
            })
            .await?;
        self.show_ski_area(raw)
    }

    pub async fn load_ski_area_from_id(&self, id: u64) -> Result<()> {
        tracing::info!(id, "Loading ski area from OSM");
        let raw = self
            .do_job(async {
                let task_id = self.backend.load_ski_area_from_id(id).await?;
                self.tasks.add_task::<RawSkiArea>(task_id).await
            })
            .await?;
        self.show_ski_area(raw)
    }

    pub async fn find_ski_areas_by_name(&self, name: &str) -> Result<()> {
        tracing::info!(name, "Searching ski areas by name");
        let _guard = self.start_loading();
        let task_id = self.backend.find_ski_areas_by_name(name).await?;
        let cached = async {
            self.backend
                .find_cached_ski_areas_by_name(name)
                .await
                .map_err(AppError::from)
        };
        self.run_search(task_id, cached).await
    }

    pub async fn find_ski_areas_by_coords(&self, rect: Rect<f64>) -> Result<()> {
        tracing::info!(?rect, "Searching ski areas by coordinates");
        let _guard = self.start_loading();
        let task_id = self.backend.find_ski_areas_by_coords(rect).await?;
        let cached = async {
            self.backend
                .find_cached_ski_areas_by_coords(rect)
                .await
                .map_err(AppError::from)
        };
        self.run_search(task_id, cached).await
    }

    /// Show every cached ski area in the chooser, without a backend search.
    pub async fn list_cached_ski_areas(&self) -> Result<()> {
        let cached = async {
            self.backend
                .get_all_cached_ski_areas()
                .await
                .map_err(AppError::from)
        };
        self.chooser
            .select_ski_areas(cached, async { Ok(Vec::new()) })
            .await
    }

    async fn run_search(
        &self,
        task_id: TaskId,
        cached: impl Future<Output = Result<Vec<CachedSkiArea>>>,
    ) -> Result<()> {
        let loaded = self.tasks.add_task::<Vec<SkiAreaMetadata>>(task_id);
        self.search_task.set(Some(task_id));

        let result = self.chooser.select_ski_areas(cached, loaded).await;

        if self.search_task.get() == Some(task_id) {
            self.search_task.set(None);
        }
        match result {
            Err(e) if e.is_cancelled() => {
                tracing::info!(task_id = %task_id, "Search cancelled");
                Ok(())
            }
            other => other,
        }
    }

    /// Ask the backend to stop the running search, if any.
    pub async fn cancel_search(&self) -> Result<()> {
        let Some(task_id) = self.search_task.take() else {
            return Ok(());
        };
        tracing::info!(task_id = %task_id, "Cancelling search");
        self.backend.cancel_task(task_id).await?;
        Ok(())
    }

    pub async fn remove_cached_ski_area(&self, uuid: &str) -> Result<()> {
        self.backend.remove_cached_ski_area(uuid).await?;
        self.chooser.remove_cached_ski_area(uuid);
        tracing::info!(uuid, "Cached ski area removed");
        Ok(())
    }

    /// Import a GPX file. If the backend finds no ski area at its location,
    /// search there and retry once the user picks one.
    pub fn load_gpx(self: &Rc<Self>, path: PathBuf) -> LocalBoxFuture<'static, Result<()>> {
        let this = Rc::clone(self);
        Box::pin(async move { this.load_gpx_once(path).await })
    }

    async fn load_gpx_once(self: Rc<Self>, path: PathBuf) -> Result<()> {
        tracing::info!(path = %path.display(), "Loading GPX");
        let result = self
            .do_job(async {
                let task_id = self.backend.load_gpx(&path).await?;
                self.tasks.add_task::<RawTrack>(task_id).await
            })
            .await;

        let error = match result {
            Ok(raw) => return self.map.borrow_mut().load_track(&raw),
            Err(e) => e,
        };
        let Some(rect) = error.no_ski_area_location() else {
            return Err(error);
        };

        tracing::info!("No ski area at track location, asking the user to choose one");
        let this = Rc::downgrade(&self);
        self.chooser.set_action_on_select(Box::new(move || match this.upgrade() {
            Some(this) => this.load_gpx(path),
            None => future::ready(Ok(())).boxed_local(),
        }));
        self.find_ski_areas_by_coords(rect).await
    }

    /// Load the picked search result, then resume the interrupted action.
    pub async fn choose_ski_area(&self, id: u64) -> Result<()> {
        let action = self.chooser.take_action_on_select();
        self.close_chooser();
        self.load_ski_area_from_id(id).await?;
        match action {
            Some(action) => action().await,
            None => Ok(()),
        }
    }

    /// Load the picked cached snapshot, then resume the interrupted action.
    pub async fn choose_cached_ski_area(&self, uuid: &str) -> Result<()> {
        let action = self.chooser.take_action_on_select();
        self.close_chooser();
        self.load_cached_ski_area(uuid).await?;
        match action {
            Some(action) => action().await,
            None => Ok(()),
        }
    }

    /// Pick the only candidate matching `filter`. Returns whether there was
    /// exactly one.
    pub async fn accept_single_choice(&self, filter: &str) -> Result<bool> {
        match self.chooser.single_choice(filter) {
            Some(Choice::Loaded(metadata)) => self.choose_ski_area(metadata.id).await?,
            Some(Choice::Cached(cached)) => self.choose_cached_ski_area(&cached.uuid).await?,
            None => return Ok(false),
        }
        Ok(true)
    }

    /// Dismiss the chooser and drop the pending continuation.
    pub fn close_chooser(&self) {
        self.chooser.clear_choosable_ski_areas();
        self.map.borrow_mut().clear_outline();
    }

    /// Preview a candidate's outline on the map.
    pub fn highlight_candidate(&self, metadata: &SkiAreaMetadata) -> Result<()> {
        self.map.borrow_mut().add_outline(&metadata.outline.item)
    }

    pub fn unhighlight_candidate(&self) {
        self.map.borrow_mut().clear_outline();
    }

    pub async fn load_route(&self, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "Loading route");
        let raw = self
            .do_job(async { self.backend.load_route(path).await.map_err(AppError::from) })
            .await?;
        self.map.borrow_mut().load_track(&raw)
    }

    pub async fn save_current_route(&self, path: &Path) -> Result<()> {
        self.do_job(async {
            self.backend
                .save_current_route(path)
                .await
                .map_err(AppError::from)
        })
        .await?;
        tracing::info!(path = %path.display(), "Route saved");
        Ok(())
    }

    pub async fn get_map_config(&self) -> Result<Option<MapConfig>> {
        Ok(self.backend.get_map_config().await?)
    }

    /// Apply the persisted viewport, if one was saved.
    pub async fn load_map_config(&self) -> Result<()> {
        if let Some(config) = self.get_map_config().await? {
            self.map.borrow_mut().set_map_config(&config)?;
            tracing::debug!(zoom = config.zoom, "Map config restored");
        }
        Ok(())
    }

    /// Save every settled viewport until the map engine goes away.
    pub async fn persist_map_config(&self, mut changes: MapConfigChanges) {
        while let Some(config) = changes.next().await {
            match self.backend.save_map_config(config).await {
                Ok(()) => tracing::debug!(zoom = config.zoom, "Map config saved"),
                Err(e) => tracing::warn!(error = %e, "Failed to save map config"),
            }
        }
    }
}
