mod common;

use common::{controller, spawn, ScriptedDecoder};
use futures::executor::LocalPool;
use futures::future::{abortable, Aborted};
use glb_viewer::prelude::*;
use std::time::Duration;
use web_time::Instant;

#[test]
fn rapid_loads_never_decode_concurrently() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let first = spawn(&pool, controller.load_single(LoadRequest::new("a.glb")));
    let rejected: Vec<_> = (0..5)
        .map(|_| spawn(&pool, controller.load_single(LoadRequest::new("b.glb"))))
        .collect();
    pool.run_until_stalled();

    assert_eq!(decoder.in_flight(), 1);
    assert_eq!(decoder.started(), vec!["a.glb"]);
    for slot in &rejected {
        assert_eq!(*slot.borrow(), Some(Err(ViewerError::AlreadyLoading)));
    }
    assert_eq!(controller.status(), LoadStatus::Loading);

    decoder.succeed();
    pool.run_until_stalled();
    assert!(matches!(*first.borrow(), Some(Ok(_))));
    assert_eq!(controller.status(), LoadStatus::Loaded);
}

#[test]
fn dropping_a_load_cancels_it() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    drop(controller.load_single(LoadRequest::new("a.glb")));
    assert_eq!(controller.status(), LoadStatus::Idle);
    assert!(decoder.started().is_empty());

    // Cancelled while the decode is pending.
    let (load, handle) = abortable(controller.load_single(LoadRequest::new("b.glb")));
    let aborted = spawn(&pool, load);
    pool.run_until_stalled();
    assert_eq!(controller.status(), LoadStatus::Loading);
    handle.abort();
    pool.run_until_stalled();

    assert_eq!(*aborted.borrow(), Some(Err(Aborted)));
    assert_eq!(controller.status(), LoadStatus::Idle);

    // The abandoned decode answers late and is ignored.
    decoder.succeed();
    pool.run_until_stalled();
    assert_eq!(controller.renderer().added_count(), 0);

    let next = spawn(&pool, controller.load_single(LoadRequest::new("c.glb")));
    pool.run_until_stalled();
    assert_eq!(decoder.started(), vec!["b.glb", "c.glb"]);
    decoder.succeed();
    pool.run_until_stalled();

    assert!(matches!(*next.borrow(), Some(Ok(_))));
    assert_eq!(controller.status(), LoadStatus::Loaded);
    assert_eq!(controller.renderer().live_names(), vec!["c.glb"]);
}

#[test]
fn dropping_a_cycle_aborts_its_preload() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let sources = vec!["a.glb".into(), "b.glb".into()];
    let (cycle, handle) =
        abortable(controller.start_cycle(sources, Duration::from_millis(10), Placement::IDENTITY));
    let _ = spawn(&pool, cycle);
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();
    assert!(controller.is_cycling());

    handle.abort();
    pool.run_until_stalled();

    assert!(!controller.is_cycling());
    assert_eq!(controller.status(), LoadStatus::Idle);
    assert!(!controller.poll_timer(Instant::now() + Duration::from_secs(1)));

    let next = spawn(&pool, controller.load_single(LoadRequest::new("c.glb")));
    pool.run_until_stalled();
    assert_eq!(decoder.started(), vec!["a.glb", "b.glb", "c.glb"]);
    decoder.succeed();
    decoder.succeed();
    pool.run_until_stalled();

    assert!(matches!(*next.borrow(), Some(Ok(_))));
    assert_eq!(controller.renderer().live_names(), vec!["c.glb"]);
}

#[test]
fn a_cycle_cannot_start_while_a_model_loads() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let load = spawn(&pool, controller.load_single(LoadRequest::new("a.glb")));
    let sources = vec!["b.glb".into(), "c.glb".into()];
    let cycle = spawn(
        &pool,
        controller.start_cycle(sources, Duration::from_secs(1), Placement::IDENTITY),
    );
    pool.run_until_stalled();

    assert_eq!(*cycle.borrow(), Some(Err(ViewerError::AlreadyLoading)));
    assert_eq!(decoder.started(), vec!["a.glb"]);
    assert_eq!(controller.status(), LoadStatus::Loading);
    assert!(!controller.is_cycling());

    decoder.succeed();
    pool.run_until_stalled();
    assert!(matches!(*load.borrow(), Some(Ok(_))));
    assert_eq!(controller.source_count(), 1);
}

#[test]
fn successful_load_releases_the_previous_fragment() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    for name in ["a.glb", "b.glb", "c.glb"] {
        let _ = spawn(&pool, controller.load_single(LoadRequest::new(name)));
        pool.run_until_stalled();
        decoder.succeed();
        pool.run_until_stalled();

        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(controller.renderer().live_names(), vec![name]);
    }

    assert_eq!(controller.renderer().added_count(), 3);
    assert_eq!(controller.renderer().removed_count(), 2);
}

#[test]
fn a_single_source_cycle_is_a_plain_load() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let _ = spawn(
        &pool,
        controller.start_cycle(vec!["a.glb".into()], Duration::from_millis(10), Placement::IDENTITY),
    );
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();

    assert_eq!(controller.status(), LoadStatus::Loaded);
    assert_eq!(controller.current_index(), Some(0));
    assert_eq!(controller.source_count(), 1);
    assert!(!controller.is_cycling());
    assert!(!controller.poll_timer(Instant::now() + Duration::from_secs(10)));
    assert_eq!(controller.renderer().added_count(), 1);
}

#[test]
fn cycling_never_visits_a_failed_model() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let sources = vec!["a.glb".into(), "b.glb".into(), "c.glb".into()];
    let done = spawn(
        &pool,
        controller.start_cycle(sources, Duration::from_secs(1), Placement::IDENTITY),
    );

    // Sources are preloaded one at a time.
    pool.run_until_stalled();
    assert_eq!(decoder.in_flight(), 1);
    decoder.succeed();
    pool.run_until_stalled();
    decoder.fail("404");
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();

    assert!(done.borrow().is_some());
    assert!(controller.is_cycling());
    assert_eq!(controller.status(), LoadStatus::Loaded);

    let mut visited = vec![controller.current_index().unwrap()];
    for _ in 0..5 {
        controller.tick();
        visited.push(controller.current_index().unwrap());
    }
    assert_eq!(visited, vec![0, 2, 0, 2, 0, 2]);
    assert_eq!(controller.renderer().live_fragments(), 1);
    assert_eq!(decoder.started().len(), 3);
}

#[test]
fn cycling_starts_at_the_first_model_that_decoded() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let sources = vec!["a.glb".into(), "b.glb".into()];
    let _ = spawn(
        &pool,
        controller.start_cycle(sources, Duration::from_secs(1), Placement::IDENTITY),
    );
    pool.run_until_stalled();
    decoder.fail("404");
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();

    assert_eq!(controller.current_index(), Some(1));
    controller.tick();
    assert_eq!(controller.current_index(), Some(1));
    assert_eq!(controller.renderer().added_count(), 1);
}

#[test]
fn no_swap_after_stop_cycle() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let sources = vec!["a.glb".into(), "b.glb".into()];
    let _ = spawn(
        &pool,
        controller.start_cycle(sources, Duration::from_millis(100), Placement::IDENTITY),
    );
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();

    controller.stop_cycle();
    let added = controller.renderer().added_count();

    let start = Instant::now();
    for period in 1..20 {
        assert!(!controller.poll_timer(start + Duration::from_millis(100 * period)));
    }
    controller.tick();

    assert_eq!(controller.renderer().added_count(), added);
    assert_eq!(controller.current_index(), Some(0));
    assert_eq!(controller.renderer().live_names(), vec!["a.glb"]);
}

#[test]
fn stopping_aborts_a_preload() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let sources = vec!["a.glb".into(), "b.glb".into()];
    let done = spawn(
        &pool,
        controller.start_cycle(sources, Duration::from_secs(1), Placement::IDENTITY),
    );
    pool.run_until_stalled();
    controller.stop_cycle();
    assert_eq!(controller.status(), LoadStatus::Idle);

    decoder.succeed();
    pool.run_until_stalled();

    assert!(done.borrow().is_some());
    assert_eq!(decoder.in_flight(), 0);
    assert_eq!(controller.renderer().added_count(), 0);
    assert!(!controller.is_cycling());
}

#[test]
fn dispose_during_a_decode_is_silent() {
    for succeed in [true, false] {
        let mut pool = LocalPool::new();
        let decoder = ScriptedDecoder::default();
        let controller = controller(&decoder);

        let pending = spawn(&pool, controller.load_single(LoadRequest::new("a.glb")));
        pool.run_until_stalled();
        controller.dispose();

        if succeed {
            decoder.succeed();
        } else {
            decoder.fail("network error");
        }
        pool.run_until_stalled();

        assert_eq!(*pending.borrow(), Some(Err(ViewerError::Disposed)));
        assert_eq!(controller.status(), LoadStatus::Disposed);
        assert_eq!(controller.renderer().added_count(), 0);
        assert_eq!(controller.last_error(), None);
    }
}

#[test]
fn dispose_during_a_preload_arms_nothing() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let sources = vec!["a.glb".into(), "b.glb".into()];
    let _ = spawn(
        &pool,
        controller.start_cycle(sources, Duration::from_millis(1), Placement::IDENTITY),
    );
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();
    controller.dispose();
    decoder.succeed();
    pool.run_until_stalled();

    assert!(!controller.is_cycling());
    assert!(!controller.poll_timer(Instant::now() + Duration::from_secs(1)));
    assert_eq!(controller.renderer().added_count(), 0);
    assert!(!controller.renderer().is_attached());
}

#[test]
fn a_load_stops_the_running_cycle() {
    let mut pool = LocalPool::new();
    let decoder = ScriptedDecoder::default();
    let controller = controller(&decoder);

    let sources = vec!["a.glb".into(), "b.glb".into()];
    let _ = spawn(
        &pool,
        controller.start_cycle(sources, Duration::from_millis(1), Placement::IDENTITY),
    );
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();
    assert!(controller.is_cycling());

    let _ = spawn(&pool, controller.load_single(LoadRequest::new("dropped.glb")));
    assert!(!controller.is_cycling());
    pool.run_until_stalled();
    decoder.succeed();
    pool.run_until_stalled();

    assert_eq!(controller.source_count(), 1);
    assert_eq!(controller.renderer().live_names(), vec!["dropped.glb"]);
    assert!(!controller.poll_timer(Instant::now() + Duration::from_secs(1)));
}
