// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! The map engine: single owner of what is drawn and what is selected.
//!
//! Lifecycle: uninitialized until [`MapEngine::create_map`] binds a surface,
//! then at most one ski area and, on top of it, at most one track. Loading a
//! ski area always unloads the previous one with its track; unloading
//! anything clears the selection.
//!
//! Selecting a waypoint queues backend enrichments (derived speed and
//! inclination, closest lift) for the [`Enrichments`] runner. They write
//! their results into the selection signals when they complete; a late result
//! may overwrite the fields of a newer selection until the next one lands.
//! Without a running runner they stay queued.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::map::feature::{Feature, FeatureKind, VectorLayer};
use crate::map::projection::{
    project_line_string, project_multi_line_string, project_multi_polygon, project_point,
    project_polygon, project_rect, Size, Viewport,
};
use crate::map::style::{lift_style, outline_style, piste_style, station_style};
use crate::map::surface::{InputEvent, Key, RenderTarget};
use crate::map::track_layer::{build_track_layer, TrackLayer};
use crate::models::{
    Activity, Lift, MapConfig, Piste, RawTrack, SkiArea, Track, TrackConverter, Waypoint,
};
use crate::services::backend::Backend;
use crate::signal::Signal;
use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};
use geo::{coord, Coord, Point, Polygon, Rect};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

type Enrichment = LocalBoxFuture<'static, ()>;

/// The selected activity: the loaded track and an index into it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRef {
    pub track: Arc<Track>,
    pub index: usize,
}

impl ActivityRef {
    pub fn activity(&self) -> Option<&Activity> {
        self.track.item.get(self.index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosestLift {
    pub lift_id: String,
    pub lift: Arc<Lift>,
    /// Meters
    pub distance: f64,
}

/// Published selection state. All fields are empty when nothing is selected.
#[derive(Debug, Default)]
pub struct Selection {
    pub selected_piste: Signal<Option<Arc<Piste>>>,
    pub selected_lift: Signal<Option<Arc<Lift>>>,
    pub selected_activity: Signal<Option<ActivityRef>>,
    pub selected_waypoint: Signal<Option<Waypoint>>,
    pub current_waypoint_speed: Signal<Option<f64>>,
    pub current_waypoint_inclination: Signal<Option<f64>>,
    pub current_waypoint_closest_lift: Signal<Option<ClosestLift>>,
}

impl Selection {
    fn clear(&self) {
        self.selected_piste.set(None);
        self.selected_lift.set(None);
        self.selected_activity.set(None);
        self.selected_waypoint.set(None);
        self.current_waypoint_speed.set(None);
        self.current_waypoint_inclination.set(None);
        self.current_waypoint_closest_lift.set(None);
    }

    pub fn is_empty(&self) -> bool {
        self.selected_piste.with(Option::is_none)
            && self.selected_lift.with(Option::is_none)
            && self.selected_activity.with(Option::is_none)
            && self.selected_waypoint.with(Option::is_none)
            && self.current_waypoint_speed.with(Option::is_none)
            && self.current_waypoint_inclination.with(Option::is_none)
            && self.current_waypoint_closest_lift.with(Option::is_none)
    }
}

struct Surface {
    target: Box<dyn RenderTarget>,
    viewport: Viewport,
}

struct LoadedSkiArea {
    ski_area: Arc<SkiArea>,
    layer: VectorLayer,
    lift_features: HashMap<String, Vec<usize>>,
    piste_features: HashMap<String, Vec<usize>>,
}

struct LoadedTrack {
    track: Arc<Track>,
    layer: TrackLayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeatureRef {
    SkiArea(usize),
    Track(usize),
}

pub struct MapEngine {
    config: Config,
    backend: Rc<dyn Backend>,
    selection: Rc<Selection>,
    view_state: Signal<Option<MapConfig>>,
    surface: Option<Surface>,
    ski_area: Option<LoadedSkiArea>,
    track: Option<LoadedTrack>,
    outline: Option<VectorLayer>,
    selected_features: Vec<FeatureRef>,
    selected_node: Option<usize>,
    enrichment_tx: mpsc::UnboundedSender<Enrichment>,
    enrichment_rx: Option<mpsc::UnboundedReceiver<Enrichment>>,
}

impl MapEngine {
    pub fn new(config: Config, backend: Rc<dyn Backend>) -> Self {
        let (enrichment_tx, enrichment_rx) = mpsc::unbounded_channel();
        Self {
            config,
            backend,
            selection: Rc::default(),
            view_state: Signal::new(None),
            surface: None,
            ski_area: None,
            track: None,
            outline: None,
            selected_features: Vec::new(),
            selected_node: None,
            enrichment_tx,
            enrichment_rx: Some(enrichment_rx),
        }
    }

    /// Take the runner for waypoint enrichments. `None` once taken.
    pub fn enrichments(&mut self) -> Option<Enrichments> {
        self.enrichment_rx.take().map(|rx| Enrichments { rx })
    }

    pub fn selection(&self) -> &Rc<Selection> {
        &self.selection
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    /// Bind the drawing surface. Does nothing if already bound.
    pub fn create_map(&mut self, target: Box<dyn RenderTarget>) {
        if self.is_initialized() {
            tracing::debug!("Map already created");
            return;
        }
        let viewport = Viewport::new(target.size());
        self.surface = Some(Surface { target, viewport });
        tracing::info!("Map created");
        self.render();
    }

    /// Unload everything and release the surface. Does nothing if not
    /// initialized.
    pub fn remove_map(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.unload_ski_area();
        self.outline = None;
        if let Some(mut surface) = self.surface.take() {
            surface.target.clear();
        }
        tracing::info!("Map removed");
    }

    pub fn ski_area(&self) -> Option<&Arc<SkiArea>> {
        self.ski_area.as_ref().map(|loaded| &loaded.ski_area)
    }

    pub fn track(&self) -> Option<&Arc<Track>> {
        self.track.as_ref().map(|loaded| &loaded.track)
    }

    pub fn ski_area_layer(&self) -> Option<&VectorLayer> {
        self.ski_area.as_ref().map(|loaded| &loaded.layer)
    }

    pub fn track_layer(&self) -> Option<&TrackLayer> {
        self.track.as_ref().map(|loaded| &loaded.layer)
    }

    pub fn outline_layer(&self) -> Option<&VectorLayer> {
        self.outline.as_ref()
    }

    /// Layers in draw order, bottom first.
    pub fn layers(&self) -> Vec<&VectorLayer> {
        self.ski_area_layer()
            .into_iter()
            .chain(self.track_layer().map(|track| &track.layer))
            .chain(self.outline_layer())
            .collect()
    }

    pub fn selected_node(&self) -> Option<usize> {
        self.selected_node
    }

    pub fn view(&self) -> Option<&Viewport> {
        self.surface.as_ref().map(|surface| &surface.viewport)
    }

    /// Replace the loaded ski area, optionally framing the view on it.
    ///
    /// Pistes whose difficulty has no style are left out with a warning. On
    /// error nothing stays loaded.
    pub fn load_ski_area(&mut self, ski_area: impl Into<Arc<SkiArea>>, zoom: bool) -> Result<()> {
        if !self.is_initialized() {
            return Err(AppError::NotInitialized);
        }
        self.unload_ski_area();

        let ski_area = ski_area.into();
        let loaded = self.build_ski_area(ski_area)?;
        let extent = loaded.layer.extent;
        tracing::info!(
            name = %loaded.ski_area.name,
            lifts = loaded.lift_features.len(),
            pistes = loaded.piste_features.len(),
            "Ski area loaded"
        );
        self.ski_area = Some(loaded);

        if let (true, Some(extent)) = (zoom, extent) {
            if let Some(surface) = self.surface.as_mut() {
                surface.viewport.fit(extent, self.config.zoom_margin);
            }
            self.publish_view();
        }
        self.render();
        Ok(())
    }

    fn build_ski_area(&self, ski_area: Arc<SkiArea>) -> Result<LoadedSkiArea> {
        let mut features = Vec::new();
        let mut lift_features: HashMap<String, Vec<usize>> = HashMap::new();
        let mut piste_features: HashMap<String, Vec<usize>> = HashMap::new();

        for (id, piste) in &ski_area.pistes {
            let Some(style) = piste_style(&piste.difficulty) else {
                tracing::warn!(piste = %id, difficulty = %piste.difficulty, "Unknown difficulty");
                continue;
            };
            let indices = piste_features.entry(id.clone()).or_default();
            indices.push(features.len());
            features.push(Feature::new(
                project_multi_polygon(&piste.areas)?,
                style.area,
                FeatureKind::PisteArea { id: id.clone() },
            ));
            indices.push(features.len());
            features.push(Feature::new(
                project_multi_line_string(&piste.lines)?,
                style.line,
                FeatureKind::PisteLine { id: id.clone() },
            ));
        }

        for (id, lift) in &ski_area.lifts {
            let indices = lift_features.entry(id.clone()).or_default();
            indices.push(features.len());
            features.push(Feature::new(
                project_line_string(&lift.line.item)?,
                lift_style(),
                FeatureKind::Lift { id: id.clone() },
            ));
            for station in &lift.stations {
                indices.push(features.len());
                features.push(Feature::new(
                    Point(project_point(station.point)?),
                    station_style(),
                    FeatureKind::Station {
                        lift_id: id.clone(),
                    },
                ));
            }
        }

        let extent = project_rect(ski_area.bounding_rect)?;
        Ok(LoadedSkiArea {
            layer: VectorLayer::new(features, Some(extent), self.config.min_feature_zoom),
            ski_area,
            lift_features,
            piste_features,
        })
    }

    /// Unload the ski area together with its track.
    pub fn unload_ski_area(&mut self) {
        if self.ski_area.is_none() {
            return;
        }
        self.unload_track();
        self.unselect_features();
        if let Some(loaded) = self.ski_area.take() {
            tracing::info!(name = %loaded.ski_area.name, "Ski area unloaded");
        }
        self.render();
    }

    /// Convert `raw` against the loaded ski area and show it, replacing any
    /// previous track.
    pub fn load_track(&mut self, raw: &RawTrack) -> Result<()> {
        if !self.is_initialized() {
            return Err(AppError::NotInitialized);
        }
        let Some(ski_area) = self.ski_area().cloned() else {
            return Err(AppError::SkiAreaNotLoaded);
        };
        self.unload_track();

        let track = Arc::new(TrackConverter::new(&ski_area).convert_track(raw)?);
        let layer = build_track_layer(
            &track,
            self.config.connector_max_gap,
            self.config.min_feature_zoom,
        )?;
        tracing::info!(
            activities = track.item.len(),
            nodes = layer.nodes.len(),
            "Track loaded"
        );
        self.track = Some(LoadedTrack { track, layer });
        self.render();
        Ok(())
    }

    pub fn unload_track(&mut self) {
        if self.track.is_none() {
            return;
        }
        self.unselect_features();
        self.track = None;
        tracing::info!("Track unloaded");
        self.render();
    }

    /// Restore every highlighted feature and clear the published selection.
    pub fn unselect_features(&mut self) {
        for feature in std::mem::take(&mut self.selected_features) {
            if let Some(feature) = self.feature_mut(feature) {
                feature.selected = false;
            }
        }
        self.selected_node = None;
        self.selection.clear();
    }

    pub fn select_piste(&mut self, id: &str) -> Result<()> {
        let loaded = self.ski_area.as_ref().ok_or(AppError::SkiAreaNotLoaded)?;
        let piste = loaded
            .ski_area
            .piste(id)
            .cloned()
            .ok_or_else(|| AppError::PisteNotFound(id.to_string()))?;
        // Pistes left out at load time are not selectable.
        let features = loaded
            .piste_features
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::PisteNotFound(id.to_string()))?;

        self.unselect_features();
        for index in features {
            self.highlight(FeatureRef::SkiArea(index));
        }
        tracing::debug!(piste = %id, name = %piste.name, "Piste selected");
        self.selection.selected_piste.set(Some(piste));
        self.render();
        Ok(())
    }

    pub fn select_lift(&mut self, id: &str) -> Result<()> {
        let loaded = self.ski_area.as_ref().ok_or(AppError::SkiAreaNotLoaded)?;
        let lift = loaded
            .ski_area
            .lift(id)
            .cloned()
            .ok_or_else(|| AppError::LiftNotFound(id.to_string()))?;
        let features = loaded
            .lift_features
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::LiftNotFound(id.to_string()))?;

        self.unselect_features();
        for index in features {
            self.highlight(FeatureRef::SkiArea(index));
        }
        tracing::debug!(lift = %id, name = %lift.name, "Lift selected");
        self.selection.selected_lift.set(Some(lift));
        self.render();
        Ok(())
    }

    /// Select activity `index` at the waypoint closest to `target`
    /// (projected coordinates).
    pub fn select_activity(&mut self, index: usize, target: Coord<f64>) -> Result<()> {
        let loaded = self.track.as_ref().ok_or(AppError::TrackNotLoaded)?;
        if index >= loaded.track.item.len() {
            return Err(AppError::ActivityNotFound(index));
        }
        match loaded.layer.nearest_node(index, target) {
            Some(node) => self.select_node(node),
            None => {
                // Activity without waypoints.
                let feature = loaded.layer.activity_features[index];
                let track = Arc::clone(&loaded.track);
                self.unselect_features();
                self.highlight(FeatureRef::Track(feature));
                self.selection
                    .selected_activity
                    .set(Some(ActivityRef { track, index }));
                self.render();
            }
        }
        Ok(())
    }

    /// Step the selection one node back. Returns whether it moved.
    pub fn select_previous_node(&mut self) -> bool {
        match self.selected_node {
            Some(current) if current > 0 => {
                self.select_node(current - 1);
                true
            }
            _ => false,
        }
    }

    /// Step the selection one node forward. Returns whether it moved.
    pub fn select_next_node(&mut self) -> bool {
        let count = self.track_layer().map_or(0, |layer| layer.nodes.len());
        match self.selected_node {
            Some(current) if current + 1 < count => {
                self.select_node(current + 1);
                true
            }
            _ => false,
        }
    }

    fn select_node(&mut self, index: usize) {
        let Some(loaded) = self.track.as_ref() else {
            return;
        };
        let Some(node) = loaded.layer.node(index).copied() else {
            return;
        };
        let track = Arc::clone(&loaded.track);
        let activity_feature = loaded.layer.activity_features[node.activity];
        let node_feature = loaded.layer.node_features[index];
        let waypoint = loaded.layer.waypoint(&track, index).cloned();
        let previous = node
            .previous
            .and_then(|previous| loaded.layer.waypoint(&track, previous).cloned());

        self.unselect_features();
        self.highlight(FeatureRef::Track(activity_feature));
        self.highlight(FeatureRef::Track(node_feature));
        self.selected_node = Some(index);
        self.selection.selected_activity.set(Some(ActivityRef {
            track,
            index: node.activity,
        }));
        self.selection.selected_waypoint.set(waypoint.clone());
        tracing::debug!(node = index, activity = node.activity, "Waypoint selected");

        if let Some(surface) = self.surface.as_mut() {
            if surface
                .viewport
                .ensure_visible(node.coord, self.config.safety_margin)
            {
                self.publish_view();
            }
        }

        if let Some(waypoint) = waypoint {
            if let Some(previous) = previous {
                self.request_derived_data(previous, waypoint.clone());
            }
            self.request_closest_lift(waypoint.point);
        }
        self.render();
    }

    fn request_derived_data(&self, from: Waypoint, to: Waypoint) {
        let backend = Rc::clone(&self.backend);
        let selection = Rc::clone(&self.selection);
        self.enrich(async move {
            match backend.get_derived_data(&from, &to).await {
                Ok(data) => {
                    selection.current_waypoint_speed.set(data.speed);
                    selection.current_waypoint_inclination.set(data.inclination);
                }
                Err(e) => tracing::warn!(error = %e, "Failed to get derived data"),
            }
        });
    }

    fn request_closest_lift(&self, point: Point<f64>) {
        let Some(ski_area) = self.ski_area().cloned() else {
            return;
        };
        let backend = Rc::clone(&self.backend);
        let selection = Rc::clone(&self.selection);
        let radius = self.config.closest_lift_radius;
        self.enrich(async move {
            match backend.get_closest_lift(point, radius).await {
                Ok(Some(raw)) => match ski_area.lift(&raw.lift_id) {
                    Some(lift) => selection.current_waypoint_closest_lift.set(Some(ClosestLift {
                        lift: Arc::clone(lift),
                        lift_id: raw.lift_id,
                        distance: raw.distance,
                    })),
                    None => tracing::warn!(lift = %raw.lift_id, "Closest lift not in ski area"),
                },
                Ok(None) => selection.current_waypoint_closest_lift.set(None),
                Err(e) => tracing::warn!(error = %e, "Failed to get closest lift"),
            }
        });
    }

    fn enrich(&self, job: impl std::future::Future<Output = ()> + 'static) {
        if self.enrichment_tx.send(job.boxed_local()).is_err() {
            tracing::debug!("Enrichment runner gone, dropping request");
        }
    }

    fn feature_mut(&mut self, feature: FeatureRef) -> Option<&mut Feature> {
        match feature {
            FeatureRef::SkiArea(index) => self.ski_area.as_mut()?.layer.features.get_mut(index),
            FeatureRef::Track(index) => self.track.as_mut()?.layer.layer.features.get_mut(index),
        }
    }

    fn highlight(&mut self, feature: FeatureRef) {
        if let Some(f) = self.feature_mut(feature) {
            f.selected = true;
            self.selected_features.push(feature);
        }
    }

    /// Show a transient outline (lon/lat), replacing any previous one.
    pub fn add_outline(&mut self, polygon: &Polygon<f64>) -> Result<()> {
        if !self.is_initialized() {
            return Err(AppError::NotInitialized);
        }
        self.clear_outline();
        let feature = Feature::new(
            project_polygon(polygon)?,
            outline_style(),
            FeatureKind::Outline,
        );
        self.outline = Some(VectorLayer::new(vec![feature], None, 0.0));
        self.render();
        Ok(())
    }

    pub fn clear_outline(&mut self) {
        if self.outline.take().is_some() {
            self.render();
        }
    }

    /// Apply a persisted viewport without publishing it back.
    pub fn set_map_config(&mut self, config: &MapConfig) -> Result<()> {
        let surface = self.surface.as_mut().ok_or(AppError::NotInitialized)?;
        surface.viewport.apply_map_config(config)?;
        self.view_state
            .set_silently(Some(surface.viewport.to_map_config()));
        self.render();
        Ok(())
    }

    /// Debounced stream of viewport changes, for persisting the map config.
    pub fn map_config_changes(&self) -> MapConfigChanges {
        MapConfigChanges {
            rx: self.view_state.subscribe(),
            debounce: self.config.map_config_debounce,
        }
    }

    /// Visible features as GeoJSON in lon/lat.
    pub fn feature_collection(&self) -> geojson::FeatureCollection {
        crate::map::export::to_feature_collection(&self.layers())
    }

    /// Current viewport as a map config, once the view has changed.
    pub fn map_config(&self) -> Option<MapConfig> {
        self.view_state.get()
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Result<()> {
        let surface = self.surface.as_mut().ok_or(AppError::NotInitialized)?;
        surface.viewport.pan_by(dx, dy);
        self.publish_view();
        self.render();
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        let surface = self.surface.as_mut().ok_or(AppError::NotInitialized)?;
        surface.viewport.set_zoom(zoom);
        self.publish_view();
        self.render();
        Ok(())
    }

    pub fn resize(&mut self, size: Size) -> Result<()> {
        let surface = self.surface.as_mut().ok_or(AppError::NotInitialized)?;
        surface.viewport.size = size;
        self.render();
        Ok(())
    }

    /// Handle a click or key press. Returns whether the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<bool> {
        let viewport = *self.view().ok_or(AppError::NotInitialized)?;
        match *event {
            InputEvent::Click { x, y } => {
                let target = viewport.pixel_to_coordinate(coord! { x: x, y: y });
                self.click(target, &viewport)?;
                Ok(true)
            }
            InputEvent::Key(Key::ArrowLeft | Key::ArrowDown) => {
                self.select_previous_node();
                Ok(true)
            }
            InputEvent::Key(Key::ArrowRight | Key::ArrowUp) => {
                self.select_next_node();
                Ok(true)
            }
            InputEvent::Key(Key::Escape) => {
                self.unselect_features();
                self.render();
                Ok(true)
            }
            InputEvent::Key(Key::Other) => Ok(false),
        }
    }

    fn click(&mut self, target: Coord<f64>, viewport: &Viewport) -> Result<()> {
        let tolerance = self.config.hit_tolerance_px * viewport.resolution;
        let area = Rect::new(
            coord! { x: target.x - tolerance, y: target.y - tolerance },
            coord! { x: target.x + tolerance, y: target.y + tolerance },
        )
        .to_polygon();
        let area = &area;
        let zoom = viewport.zoom();

        let track_layer = self.track_layer().map(|track| &track.layer);
        let hit = [track_layer, self.ski_area_layer()]
            .into_iter()
            .flatten()
            .filter(|layer| layer.is_visible_at(zoom))
            .flat_map(move |layer| layer.hits(area))
            .map(|feature| feature.kind.clone())
            .find(|kind| !matches!(kind, FeatureKind::Connector | FeatureKind::Outline));

        match hit {
            Some(FeatureKind::PisteArea { id } | FeatureKind::PisteLine { id }) => {
                self.select_piste(&id)
            }
            Some(FeatureKind::Lift { id } | FeatureKind::Station { lift_id: id }) => {
                self.select_lift(&id)
            }
            Some(FeatureKind::Activity { index }) => self.select_activity(index, target),
            Some(FeatureKind::Node { index }) => {
                self.select_node(index);
                Ok(())
            }
            Some(FeatureKind::Connector | FeatureKind::Outline) | None => {
                self.unselect_features();
                self.render();
                Ok(())
            }
        }
    }

    fn publish_view(&self) {
        if let Some(surface) = &self.surface {
            self.view_state.set(Some(surface.viewport.to_map_config()));
        }
    }

    fn render(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let mut layers: Vec<&VectorLayer> = Vec::with_capacity(3);
        if let Some(loaded) = &self.ski_area {
            layers.push(&loaded.layer);
        }
        if let Some(loaded) = &self.track {
            layers.push(&loaded.layer.layer);
        }
        if let Some(outline) = &self.outline {
            layers.push(outline);
        }
        surface.target.render(&surface.viewport, &layers);
    }
}

/// Drives waypoint enrichments queued by the engine, concurrently, until the
/// engine is dropped.
pub struct Enrichments {
    rx: mpsc::UnboundedReceiver<Enrichment>,
}

impl Enrichments {
    pub async fn run(mut self) {
        let mut running = FuturesUnordered::new();
        loop {
            tokio::select! {
                job = self.rx.recv() => match job {
                    Some(job) => running.push(job),
                    None => break,
                },
                Some(()) = running.next(), if !running.is_empty() => {}
            }
        }
        while running.next().await.is_some() {}
        tracing::debug!("Enrichment runner stopped");
    }
}

/// Viewport changes, each delivered once the view has been still for the
/// debounce period.
#[derive(Debug)]
pub struct MapConfigChanges {
    rx: watch::Receiver<Option<MapConfig>>,
    debounce: Duration,
}

impl MapConfigChanges {
    /// Wait for the next settled viewport. `None` once the engine is gone.
    pub async fn next(&mut self) -> Option<MapConfig> {
        loop {
            self.rx.changed().await.ok()?;
            loop {
                tokio::select! {
                    changed = self.rx.changed() => changed.ok()?,
                    _ = tokio::time::sleep(self.debounce) => break,
                }
            }
            if let Some(config) = *self.rx.borrow_and_update() {
                return Some(config);
            }
        }
    }
}
