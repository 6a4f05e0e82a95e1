// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

use chrono::{DateTime, Duration, TimeZone, Utc};
use futures_util::future::{self, FutureExt};
use geo::{coord, line_string, point, polygon, BoundingRect, MultiLineString, MultiPoint};
use geo::{MultiPolygon, Point, Rect};
use serde_json::{json, Value};
use ski_map_client::config::Config;
use ski_map_client::error::{BackendError, ErrorKind};
use ski_map_client::map::{HeadlessTarget, MapEngine, Size};
use ski_map_client::models::{
    BoundedGeometry, CachedSkiArea, Lift, LiftType, MapConfig, Piste, PointWithElevation,
    RawActivity, RawSkiArea, RawTrack, SkiAreaMetadata, UiConfig, Waypoint,
};
use ski_map_client::services::{Backend, BackendFuture, DerivedData, RawClosestLift, TaskId};
use ski_map_client::App;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const SURFACE_SIZE: Size = Size::new(800.0, 600.0);

/// Run `f` inside a `LocalSet`, for tests that spawn local tasks.
#[allow(dead_code)]
pub async fn run_local<F: Future>(f: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(f).await
}

/// Let spawned local tasks and joined branches make progress.
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: &'static str,
    pub task_id: Option<TaskId>,
}

/// Backend answering from scripted data. Task-based calls hand out
/// increasing task ids; tests resolve them through the task registry.
#[derive(Default)]
pub struct MockBackend {
    calls: RefCell<Vec<Call>>,
    next_task: Cell<u64>,
    pub files: RefCell<HashMap<PathBuf, RawSkiArea>>,
    pub cached: RefCell<HashMap<String, RawSkiArea>>,
    pub cached_list: RefCell<Vec<CachedSkiArea>>,
    pub routes: RefCell<HashMap<PathBuf, RawTrack>>,
    pub derived: Cell<DerivedData>,
    pub closest_lift: RefCell<Option<RawClosestLift>>,
    pub map_config: Cell<Option<MapConfig>>,
    pub ui_config: RefCell<Option<UiConfig>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.name == name).count()
    }

    pub fn task_ids(&self, name: &str) -> Vec<TaskId> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.name == name)
            .filter_map(|c| c.task_id)
            .collect()
    }

    /// Task id of the `nth` call to `name`, once it has been made.
    pub async fn wait_for_task(&self, name: &str, nth: usize) -> TaskId {
        for _ in 0..100 {
            if let Some(id) = self.task_ids(name).get(nth) {
                return *id;
            }
            tokio::task::yield_now().await;
        }
        panic!("no call #{nth} to {name}; calls: {:?}", self.calls());
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(Call {
            name,
            task_id: None,
        });
    }

    fn start_task(&self, name: &'static str) -> BackendFuture<'_, TaskId> {
        let id = TaskId(self.next_task.get() + 1);
        self.next_task.set(id.0);
        self.calls.borrow_mut().push(Call {
            name,
            task_id: Some(id),
        });
        future::ready(Ok(id)).boxed_local()
    }
}

fn ready<'a, T: 'a>(value: T) -> BackendFuture<'a, T> {
    future::ready(Ok(value)).boxed_local()
}

fn not_found<'a, T: 'a>(what: String) -> BackendFuture<'a, T> {
    future::ready(Err(BackendError::new(ErrorKind::InputError, what))).boxed_local()
}

impl Backend for MockBackend {
    fn load_ski_area_from_file<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, RawSkiArea> {
        self.record("load_ski_area_from_file");
        match self.files.borrow().get(path) {
            Some(ski_area) => ready(ski_area.clone()),
            None => not_found(format!("no such file: {}", path.display())),
        }
    }

    fn load_cached_ski_area<'a>(&'a self, uuid: &'a str) -> BackendFuture<'a, RawSkiArea> {
        self.record("load_cached_ski_area");
        match self.cached.borrow().get(uuid) {
            Some(ski_area) => ready(ski_area.clone()),
            None => not_found(format!("no cached ski area {uuid}")),
        }
    }

    fn load_ski_area_from_id(&self, _id: u64) -> BackendFuture<'_, TaskId> {
        self.start_task("load_ski_area_from_id")
    }

    fn find_ski_areas_by_name<'a>(&'a self, _name: &'a str) -> BackendFuture<'a, TaskId> {
        self.start_task("find_ski_areas_by_name")
    }

    fn find_ski_areas_by_coords(&self, _rect: Rect<f64>) -> BackendFuture<'_, TaskId> {
        self.start_task("find_ski_areas_by_coords")
    }

    fn find_cached_ski_areas_by_name<'a>(
        &'a self,
        _name: &'a str,
    ) -> BackendFuture<'a, Vec<CachedSkiArea>> {
        self.record("find_cached_ski_areas_by_name");
        ready(self.cached_list.borrow().clone())
    }

    fn find_cached_ski_areas_by_coords(
        &self,
        _rect: Rect<f64>,
    ) -> BackendFuture<'_, Vec<CachedSkiArea>> {
        self.record("find_cached_ski_areas_by_coords");
        ready(self.cached_list.borrow().clone())
    }

    fn get_all_cached_ski_areas(&self) -> BackendFuture<'_, Vec<CachedSkiArea>> {
        self.record("get_all_cached_ski_areas");
        ready(self.cached_list.borrow().clone())
    }

    fn remove_cached_ski_area<'a>(&'a self, uuid: &'a str) -> BackendFuture<'a, ()> {
        self.record("remove_cached_ski_area");
        self.cached.borrow_mut().remove(uuid);
        ready(())
    }

    fn load_gpx<'a>(&'a self, _path: &'a Path) -> BackendFuture<'a, TaskId> {
        self.start_task("load_gpx")
    }

    fn load_route<'a>(&'a self, path: &'a Path) -> BackendFuture<'a, RawTrack> {
        self.record("load_route");
        match self.routes.borrow().get(path) {
            Some(route) => ready(route.clone()),
            None => not_found(format!("no such file: {}", path.display())),
        }
    }

    fn save_current_route<'a>(&'a self, _path: &'a Path) -> BackendFuture<'a, ()> {
        self.record("save_current_route");
        ready(())
    }

    fn get_active_ski_area(&self) -> BackendFuture<'_, Option<RawSkiArea>> {
        self.record("get_active_ski_area");
        ready(None)
    }

    fn get_active_route(&self) -> BackendFuture<'_, Option<RawTrack>> {
        self.record("get_active_route");
        ready(None)
    }

    fn get_derived_data<'a>(
        &'a self,
        _wp1: &'a Waypoint,
        _wp2: &'a Waypoint,
    ) -> BackendFuture<'a, DerivedData> {
        self.record("get_derived_data");
        ready(self.derived.get())
    }

    fn get_closest_lift(
        &self,
        _point: Point<f64>,
        _limit: f64,
    ) -> BackendFuture<'_, Option<RawClosestLift>> {
        self.record("get_closest_lift");
        ready(self.closest_lift.borrow().clone())
    }

    fn get_ui_config(&self) -> BackendFuture<'_, Option<UiConfig>> {
        self.record("get_ui_config");
        ready(self.ui_config.borrow().clone())
    }

    fn save_ui_config<'a>(&'a self, config: &'a UiConfig) -> BackendFuture<'a, ()> {
        self.record("save_ui_config");
        *self.ui_config.borrow_mut() = Some(config.clone());
        ready(())
    }

    fn get_map_config(&self) -> BackendFuture<'_, Option<MapConfig>> {
        self.record("get_map_config");
        ready(self.map_config.get())
    }

    fn save_map_config(&self, config: MapConfig) -> BackendFuture<'_, ()> {
        self.record("save_map_config");
        self.map_config.set(Some(config));
        ready(())
    }

    fn cancel_task(&self, task_id: TaskId) -> BackendFuture<'_, ()> {
        self.calls.borrow_mut().push(Call {
            name: "cancel_task",
            task_id: Some(task_id),
        });
        ready(())
    }
}

/// Map engine with a bound headless surface.
#[allow(dead_code)]
pub fn map_engine(backend: Rc<MockBackend>) -> (MapEngine, HeadlessTarget) {
    let mut engine = MapEngine::new(Config::default(), backend);
    let target = HeadlessTarget::new(SURFACE_SIZE);
    engine.create_map(Box::new(target.clone()));
    (engine, target)
}

/// Client wired to a mock backend, with the map created.
#[allow(dead_code)]
pub fn test_app() -> (App, Rc<MockBackend>) {
    let backend = MockBackend::new();
    let app = App::new(Config::default(), backend.clone());
    app.map
        .borrow_mut()
        .create_map(Box::new(HeadlessTarget::new(SURFACE_SIZE)));
    (app, backend)
}

#[allow(dead_code)]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 3, 10, 0, 0).unwrap()
}

/// Piste near (6.0, 45.0) with the given difficulty tag.
#[allow(dead_code)]
pub fn piste(name: &str, difficulty: &str) -> Piste {
    Piste {
        reference: String::new(),
        name: name.to_string(),
        difficulty: difficulty.to_string().into(),
        bounding_rect: Rect::new(coord! { x: 6.0, y: 45.0 }, coord! { x: 6.005, y: 45.005 }),
        areas: MultiPolygon::new(vec![polygon![
            (x: 6.0, y: 45.0),
            (x: 6.005, y: 45.0),
            (x: 6.005, y: 45.005),
            (x: 6.0, y: 45.005),
        ]]),
        lines: MultiLineString::new(vec![line_string![
            (x: 6.001, y: 45.004),
            (x: 6.004, y: 45.001),
        ]]),
    }
}

/// Chairlift from (6.0, 45.0) to (6.01, 45.01) with both stations.
#[allow(dead_code)]
pub fn lift(name: &str) -> Lift {
    Lift {
        reference: "C1".to_string(),
        name: name.to_string(),
        lift_type: LiftType("chair_lift".to_string()),
        line: BoundedGeometry {
            item: line_string![(x: 6.0, y: 45.0), (x: 6.01, y: 45.01)],
            bounding_rect: Rect::new(coord! { x: 6.0, y: 45.0 }, coord! { x: 6.01, y: 45.01 }),
        },
        stations: vec![
            PointWithElevation {
                point: point!(x: 6.0, y: 45.0),
                elevation: 1500.0,
            },
            PointWithElevation {
                point: point!(x: 6.01, y: 45.01),
                elevation: 2100.0,
            },
        ],
        can_go_reverse: false,
        can_disembark: false,
        lengths: vec![1380.0],
    }
}

/// Ski area with one lift `<name>-lift` and one piste `<name>-piste`.
#[allow(dead_code)]
pub fn ski_area(name: &str) -> RawSkiArea {
    let lift = lift(&format!("{name} chair"));
    let piste = piste(&format!("{name} run"), "Easy");
    RawSkiArea {
        name: name.to_string(),
        lifts: BTreeMap::from([(format!("{name}-lift"), lift)]),
        pistes: BTreeMap::from([(format!("{name}-piste"), piste)]),
        bounding_rect: Rect::new(coord! { x: 5.99, y: 44.99 }, coord! { x: 6.02, y: 45.02 }),
    }
}

#[allow(dead_code)]
pub fn metadata(id: u64, name: &str) -> SkiAreaMetadata {
    let outline = polygon![
        (x: 6.0, y: 45.0),
        (x: 6.02, y: 45.0),
        (x: 6.02, y: 45.02),
    ];
    SkiAreaMetadata {
        id,
        name: name.to_string(),
        outline: BoundedGeometry {
            item: outline,
            bounding_rect: Rect::new(coord! { x: 6.0, y: 45.0 }, coord! { x: 6.02, y: 45.02 }),
        },
    }
}

#[allow(dead_code)]
pub fn cached(uuid: &str, id: u64, name: &str, day: u32) -> CachedSkiArea {
    CachedSkiArea {
        uuid: uuid.to_string(),
        metadata: metadata(id, name),
        date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
    }
}

/// Activity through `(lon, lat, seconds after base_time)` points, in one
/// segment.
#[allow(dead_code)]
pub fn activity(kind: Value, points: &[(f64, f64, i64)]) -> RawActivity {
    let route: Vec<Waypoint> = points
        .iter()
        .map(|&(lon, lat, seconds)| {
            let mut waypoint = Waypoint::new(Point::new(lon, lat));
            waypoint.time = Some(base_time() + Duration::seconds(seconds));
            waypoint.elevation = Some(2000.0 - seconds as f64);
            waypoint
        })
        .collect();
    RawActivity {
        kind,
        begin_time: route.first().and_then(|wp| wp.time),
        end_time: route.last().and_then(|wp| wp.time),
        route: vec![route],
        length: 0.0,
    }
}

#[allow(dead_code)]
pub fn moving(points: &[(f64, f64, i64)]) -> RawActivity {
    activity(json!({"Moving": null}), points)
}

#[allow(dead_code)]
pub fn riding(lift_id: &str, points: &[(f64, f64, i64)]) -> RawActivity {
    activity(json!({"UseLift": {"lift": lift_id}}), points)
}

/// Track over `item`, with its bounding box computed from the waypoints.
#[allow(dead_code)]
pub fn raw_track(item: Vec<RawActivity>) -> RawTrack {
    let points: MultiPoint<f64> = item
        .iter()
        .flat_map(|activity| activity.route.iter().flatten())
        .map(|waypoint| waypoint.point)
        .collect();
    let bounding_rect = points
        .bounding_rect()
        .unwrap_or(Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }));
    RawTrack {
        item,
        bounding_rect,
    }
}

/// Serialize a payload the way a `task_finished` event carries it.
#[allow(dead_code)]
pub fn payload<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}
