// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Ski-map client core: loads ski areas and analyzed tracks from a backend,
//! renders them as vector layers and keeps the user's selection.
//!
//! Everything runs on one thread. Long backend jobs report back through
//! push events, which the [`services::TaskRegistry`] turns into futures.

pub mod config;
pub mod error;
pub mod generation;
pub mod map;
pub mod models;
pub mod services;
pub mod signal;
pub mod time_utils;

use config::Config;
use error::Result;
use map::MapEngine;
use services::{
    ActionsService, Backend, BackendEvent, EventsService, SkiAreaChooser, TaskRegistry,
    UiConfigService,
};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc;

/// Owner of all client services, wired to one backend.
pub struct App {
    pub config: Config,
    pub backend: Rc<dyn Backend>,
    pub tasks: Rc<TaskRegistry>,
    pub chooser: Rc<SkiAreaChooser>,
    pub map: Rc<RefCell<MapEngine>>,
    pub events: Rc<EventsService>,
    pub ui_config: UiConfigService,
    pub actions: Rc<ActionsService>,
}

impl App {
    pub fn new(config: Config, backend: Rc<dyn Backend>) -> Self {
        let tasks = Rc::new(TaskRegistry::new());
        let chooser = Rc::new(SkiAreaChooser::new());
        let map = Rc::new(RefCell::new(MapEngine::new(config.clone(), Rc::clone(&backend))));
        let events = Rc::new(EventsService::new(Rc::clone(&tasks)));
        let ui_config = UiConfigService::new(Rc::clone(&backend));
        let actions = Rc::new(ActionsService::new(
            Rc::clone(&backend),
            Rc::clone(&tasks),
            Rc::clone(&chooser),
            Rc::clone(&map),
        ));
        Self {
            config,
            backend,
            tasks,
            chooser,
            map,
            events,
            ui_config,
            actions,
        }
    }

    /// Fetch the backend's persisted state: active ski area and route, UI
    /// settings and the last viewport.
    pub async fn init(&self) -> Result<()> {
        self.events.init(self.backend.as_ref()).await?;
        self.ui_config.init().await?;
        if self.map.borrow().is_initialized() {
            self.actions.load_map_config().await?;
        }
        tracing::info!("Client initialized");
        Ok(())
    }

    /// Start the background loops on the current `LocalSet`: event dispatch,
    /// waypoint enrichments and map config persistence.
    pub fn start(&self, events: mpsc::UnboundedReceiver<BackendEvent>) {
        let service = Rc::clone(&self.events);
        tokio::task::spawn_local(async move { service.run(events).await });

        if let Some(enrichments) = self.map.borrow_mut().enrichments() {
            tokio::task::spawn_local(enrichments.run());
        }

        let changes = self.map.borrow().map_config_changes();
        let actions = Rc::clone(&self.actions);
        tokio::task::spawn_local(async move { actions.persist_map_config(changes).await });
    }
}
