// SPDX-License-Identifier: MIT
// Copyright 2026 The ski-map-client authors

//! Action orchestrator flows against a scripted backend.
//!
//! Task-based calls are resolved by hand through the task registry, the same
//! way `task_finished` / `task_failed` events would resolve them.

mod common;

use common::{
    cached, metadata, moving, payload, raw_track, run_local, settle, ski_area, test_app,
};
use geo::{coord, Rect};
use ski_map_client::error::{AppError, BackendError, ErrorKind};
use ski_map_client::services::LoadedSkiAreas;
use std::path::{Path, PathBuf};

fn search_area() -> Rect<f64> {
    Rect::new(coord! { x: 6.0, y: 45.0 }, coord! { x: 6.02, y: 45.02 })
}

fn track() -> ski_map_client::models::RawTrack {
    raw_track(vec![moving(&[(6.012, 45.0, 0), (6.014, 45.0, 10)])])
}

#[tokio::test]
async fn test_load_ski_area_from_file() {
    let (app, backend) = test_app();
    let path = PathBuf::from("/data/a.json");
    backend.files.borrow_mut().insert(path.clone(), ski_area("A"));

    app.actions.load_ski_area_from_file(&path).await.unwrap();

    assert_eq!(app.map.borrow().ski_area().unwrap().name, "A");
    assert_eq!(app.actions.loading.get(), 0);
}

#[tokio::test]
async fn test_failed_load_releases_loading() {
    let (app, _) = test_app();

    let result = app
        .actions
        .load_ski_area_from_file(Path::new("/missing.json"))
        .await;

    assert!(matches!(result, Err(AppError::Backend(e)) if e.kind == ErrorKind::InputError));
    assert!(!app.actions.is_loading());
    assert!(app.map.borrow().ski_area().is_none());
}

#[tokio::test]
async fn test_loading_counts_concurrent_operations() {
    let (app, backend) = test_app();

    let (first, second, ()) = tokio::join!(
        app.actions.load_ski_area_from_id(1),
        app.actions.load_ski_area_from_id(2),
        async {
            let a = backend.wait_for_task("load_ski_area_from_id", 0).await;
            let b = backend.wait_for_task("load_ski_area_from_id", 1).await;
            assert_eq!(app.actions.loading.get(), 2);

            app.tasks.accept(a, payload(&ski_area("A")));
            settle().await;
            assert_eq!(app.actions.loading.get(), 1);

            app.tasks
                .reject(b, BackendError::new(ErrorKind::OsmError, "overpass down"));
        }
    );

    first.unwrap();
    assert!(matches!(second, Err(AppError::Backend(e)) if e.kind == ErrorKind::OsmError));
    assert_eq!(app.actions.loading.get(), 0);
    assert_eq!(app.map.borrow().ski_area().unwrap().name, "A");
}

#[tokio::test]
async fn test_gpx_without_ski_area_searches_then_retries() {
    run_local(async {
        let (app, backend) = test_app();
        let gpx = PathBuf::from("/tracks/morning.gpx");

        let (result, ()) = tokio::join!(app.actions.load_gpx(gpx.clone()), async {
            let task = backend.wait_for_task("load_gpx", 0).await;
            assert!(app.actions.is_loading());
            app.tasks
                .reject(task, BackendError::no_ski_area_at(search_area()));

            let search = backend.wait_for_task("find_ski_areas_by_coords", 0).await;
            assert!(app.chooser.is_searching());
            app.tasks
                .accept(search, payload(&vec![metadata(7, "Les Arcs")]));
        });

        result.unwrap();
        assert!(app.chooser.has_action_on_select());
        assert_eq!(
            app.chooser.loaded_ski_areas.get(),
            LoadedSkiAreas::Found(vec![metadata(7, "Les Arcs")])
        );
        assert!(app.map.borrow().track().is_none());
        assert_eq!(app.actions.loading.get(), 0);

        let (result, ()) = tokio::join!(app.actions.choose_ski_area(7), async {
            let task = backend.wait_for_task("load_ski_area_from_id", 0).await;
            app.tasks.accept(task, payload(&ski_area("Les Arcs")));

            // The continuation imports the same file again.
            let task = backend.wait_for_task("load_gpx", 1).await;
            app.tasks.accept(task, payload(&track()));
        });

        result.unwrap();
        let map = app.map.borrow();
        assert_eq!(map.ski_area().unwrap().name, "Les Arcs");
        assert_eq!(map.track().unwrap().item.len(), 1);
        assert!(!app.chooser.has_action_on_select());
        assert_eq!(app.chooser.loaded_ski_areas.get(), LoadedSkiAreas::Idle);
        assert_eq!(app.actions.loading.get(), 0);
    })
    .await;
}

#[tokio::test]
async fn test_gpx_other_errors_propagate() {
    let (app, backend) = test_app();

    let (result, ()) = tokio::join!(app.actions.load_gpx(PathBuf::from("/bad.gpx")), async {
        let task = backend.wait_for_task("load_gpx", 0).await;
        app.tasks
            .reject(task, BackendError::new(ErrorKind::InputError, "not a GPX file"));
    });

    assert!(matches!(result, Err(AppError::Backend(e)) if e.kind == ErrorKind::InputError));
    assert!(!app.chooser.has_action_on_select());
    assert_eq!(backend.call_count("find_ski_areas_by_coords"), 0);
}

#[tokio::test]
async fn test_closing_chooser_drops_continuation() {
    let (app, backend) = test_app();

    let (result, ()) = tokio::join!(app.actions.load_gpx(PathBuf::from("/run.gpx")), async {
        let task = backend.wait_for_task("load_gpx", 0).await;
        app.tasks
            .reject(task, BackendError::no_ski_area_at(search_area()));
        let search = backend.wait_for_task("find_ski_areas_by_coords", 0).await;
        app.tasks.accept(search, payload(&vec![metadata(7, "Les Arcs")]));
    });
    result.unwrap();

    app.actions.close_chooser();

    assert!(!app.chooser.has_action_on_select());
    assert!(!app.chooser.has_choosable_ski_area());
}

#[tokio::test]
async fn test_newer_search_supersedes_older() {
    let (app, backend) = test_app();

    let (a, b, ()) = tokio::join!(
        app.actions.find_ski_areas_by_name("Tig"),
        app.actions.find_ski_areas_by_name("Tignes"),
        async {
            let first = backend.wait_for_task("find_ski_areas_by_name", 0).await;
            let second = backend.wait_for_task("find_ski_areas_by_name", 1).await;
            app.tasks.accept(second, payload(&vec![metadata(2, "Tignes")]));
            settle().await;
            app.tasks.accept(
                first,
                payload(&vec![metadata(1, "Tignes"), metadata(3, "Tignes-le-Lac")]),
            );
        }
    );

    a.unwrap();
    b.unwrap();
    assert_eq!(
        app.chooser.loaded_ski_areas.get(),
        LoadedSkiAreas::Found(vec![metadata(2, "Tignes")])
    );
    assert_eq!(app.actions.loading.get(), 0);
}

#[tokio::test]
async fn test_cancel_search() {
    let (app, backend) = test_app();

    let (result, ()) = tokio::join!(app.actions.find_ski_areas_by_name("Val"), async {
        let task = backend.wait_for_task("find_ski_areas_by_name", 0).await;
        app.actions.cancel_search().await.unwrap();
        assert_eq!(backend.task_ids("cancel_task"), vec![task]);
        // The backend confirms with a failed task.
        app.tasks.reject(task, BackendError::cancelled());
    });

    result.unwrap();
    assert_eq!(app.chooser.loaded_ski_areas.get(), LoadedSkiAreas::Idle);
    assert!(!app.actions.is_loading());

    // Nothing left to cancel.
    app.actions.cancel_search().await.unwrap();
    assert_eq!(backend.call_count("cancel_task"), 1);
}

#[tokio::test]
async fn test_cached_ski_areas_flow() {
    let (app, backend) = test_app();
    *backend.cached_list.borrow_mut() = vec![
        cached("u1", 1, "Tignes", 1),
        cached("u2", 2, "Val Thorens", 2),
    ];
    backend
        .cached
        .borrow_mut()
        .insert("u2".to_string(), ski_area("Val Thorens"));

    app.actions.list_cached_ski_areas().await.unwrap();
    assert_eq!(app.chooser.cached_ski_areas.get().len(), 2);

    assert!(!app.actions.accept_single_choice("").await.unwrap());
    assert!(app.actions.accept_single_choice("thor").await.unwrap());
    assert_eq!(app.map.borrow().ski_area().unwrap().name, "Val Thorens");
    assert!(!app.chooser.has_choosable_ski_area());

    app.actions.list_cached_ski_areas().await.unwrap();
    app.actions.remove_cached_ski_area("u1").await.unwrap();
    let uuids: Vec<_> = app
        .chooser
        .cached_ski_areas
        .get()
        .into_iter()
        .map(|c| c.uuid)
        .collect();
    assert_eq!(uuids, vec!["u2"]);
    assert_eq!(backend.call_count("remove_cached_ski_area"), 1);
}

#[tokio::test]
async fn test_candidate_outline_preview() {
    let (app, _) = test_app();

    app.actions
        .highlight_candidate(&metadata(1, "Tignes"))
        .unwrap();
    assert!(app.map.borrow().outline_layer().is_some());

    app.actions.unhighlight_candidate();
    assert!(app.map.borrow().outline_layer().is_none());
}

#[tokio::test]
async fn test_load_route_needs_ski_area() {
    let (app, backend) = test_app();
    let path = PathBuf::from("/routes/r.json");
    backend.routes.borrow_mut().insert(path.clone(), track());

    let result = app.actions.load_route(&path).await;
    assert!(matches!(result, Err(AppError::SkiAreaNotLoaded)));

    app.map
        .borrow_mut()
        .load_ski_area(ski_map_client::models::index_ski_area(ski_area("A")), true)
        .unwrap();
    app.actions.load_route(&path).await.unwrap();
    assert!(app.map.borrow().track().is_some());

    app.actions
        .save_current_route(Path::new("/routes/copy.json"))
        .await
        .unwrap();
    assert_eq!(backend.call_count("save_current_route"), 1);
}
