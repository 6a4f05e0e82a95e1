// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Persisted UI settings (map tile source).

use crate::error::{AppError, Result};
use crate::models::{MapTileType, UiConfig};
use crate::services::backend::Backend;
use crate::signal::Signal;
use std::cell::RefCell;
use std::rc::Rc;

pub const OPEN_STREET_MAP_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Fill in the tile URL implied by the tile type. Custom URLs are kept.
pub fn auto_fill(config: &mut UiConfig) {
    match config.map_tile_type {
        MapTileType::OpenStreetMap => config.map_tile_url = OPEN_STREET_MAP_TILE_URL.to_string(),
        MapTileType::Custom => {}
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let mut config = UiConfig {
            map_tile_type: MapTileType::OpenStreetMap,
            map_tile_url: String::new(),
        };
        auto_fill(&mut config);
        config
    }
}

pub struct UiConfigService {
    backend: Rc<dyn Backend>,
    config: RefCell<Option<UiConfig>>,
    pub map_tile_url: Signal<String>,
    pub initialized: Signal<bool>,
}

impl UiConfigService {
    pub fn new(backend: Rc<dyn Backend>) -> Self {
        Self {
            backend,
            config: RefCell::new(None),
            map_tile_url: Signal::default(),
            initialized: Signal::new(false),
        }
    }

    /// Load the stored settings, or store the defaults if there are none.
    pub async fn init(&self) -> Result<()> {
        let config = match self.backend.get_ui_config().await? {
            Some(config) => config,
            None => {
                tracing::info!("No UI config stored, using defaults");
                UiConfig::default()
            }
        };
        self.set_config(config).await?;
        self.initialized.set(true);
        Ok(())
    }

    /// Apply and persist new settings.
    pub async fn set_config(&self, config: UiConfig) -> Result<()> {
        self.set_config_inner(&config);
        self.backend.save_ui_config(&config).await?;
        Ok(())
    }

    pub fn get_config(&self) -> Result<UiConfig> {
        self.config.borrow().clone().ok_or(AppError::ConfigNotLoaded)
    }

    fn set_config_inner(&self, config: &UiConfig) {
        *self.config.borrow_mut() = Some(config.clone());
        self.map_tile_url.set(config.map_tile_url.clone());
    }
}
