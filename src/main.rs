// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Ski-map headless client
//!
//! Loads a ski area (and optionally an analyzed route) from JSON files,
//! builds the map layers and prints them as GeoJSON on stdout.
//!
//! Usage: `ski-map <ski_area.json> [route.json]`

use ski_map_client::{
    config::{Config, ConfigError},
    map::{HeadlessTarget, Size},
    services::OfflineBackend,
    App,
};
use std::path::PathBuf;
use std::rc::Rc;
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SURFACE_SIZE: Size = Size::new(1024.0, 768.0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Structured JSON logging on stderr; stdout carries the GeoJSON
    init_logging()?;

    let config = Config::from_env();
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let ski_area_path = args.next().ok_or(ConfigError::Missing("ski area file"))?;
    let route_path = args.next();

    LocalSet::new()
        .run_until(run(config, ski_area_path, route_path))
        .await
}

async fn run(
    config: Config,
    ski_area_path: PathBuf,
    route_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let app = App::new(config, Rc::new(OfflineBackend::new()));
    app.map
        .borrow_mut()
        .create_map(Box::new(HeadlessTarget::new(SURFACE_SIZE)));
    app.init().await?;

    app.actions.load_ski_area_from_file(&ski_area_path).await?;
    if let Some(path) = route_path {
        app.actions.load_route(&path).await?;
    }

    let collection = app.map.borrow().feature_collection();
    tracing::info!(features = collection.features.len(), "Exporting map");
    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ski_map_client=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
