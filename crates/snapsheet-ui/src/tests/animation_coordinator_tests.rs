use super::*;

use snapsheet_animation::Easing;
use snapsheet_core::{DefaultScheduler, Runtime, FRAME_NANOS_60HZ};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

fn spring() -> SpringSpec {
    SpringSpec::from_tension_friction(100.0, 8.0).with_thresholds(0.5, 0.5)
}

fn coordinator(runtime: &Runtime) -> AnimationCoordinator {
    AnimationCoordinator::new(
        runtime.handle(),
        1000.0,
        spring(),
        AnimationSpec::tween(300, Easing::EaseInOut),
        0.5,
    )
}

/// Pumps 60 fps frames until nothing is scheduled. Returns the frame count.
fn pump(runtime: &Runtime, frame_time: &mut u64, max_frames: usize) -> usize {
    let handle = runtime.handle();
    let mut frames = 0;
    while frames < max_frames && handle.has_frame_callbacks() {
        *frame_time += FRAME_NANOS_60HZ;
        handle.drain_frame_callbacks(*frame_time);
        frames += 1;
    }
    frames
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let captured = count.clone();
    (count, move || captured.set(captured.get() + 1))
}

#[test]
fn opacity_policy_is_binary() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let coordinator = coordinator(&runtime);

    assert_eq!(coordinator.opacity_for(0.2), 0.5);
    assert_eq!(coordinator.opacity_for(1.0), 0.5);
    assert_eq!(coordinator.opacity_for(0.0), 0.0);
}

#[test]
fn both_channels_reach_targets_before_completion() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let (count, on_complete) = counter();
    let mut frame_time = 0;

    coordinator.animate_to_then(500.0, 0.5, on_complete);
    assert!(coordinator.is_animating());
    assert_eq!(count.get(), 0, "completion is never synchronous");

    pump(&runtime, &mut frame_time, 600);

    assert_eq!(count.get(), 1);
    assert_eq!(coordinator.offset(), 500.0);
    assert_eq!(coordinator.backdrop_opacity(), 0.5);
    assert!(!coordinator.is_animating());
}

#[test]
fn animate_without_completion_reaches_targets() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let mut frame_time = 0;

    coordinator.animate_to(250.0, 0.5);
    assert!(coordinator.is_animating());
    pump(&runtime, &mut frame_time, 600);

    assert_eq!(coordinator.offset(), 250.0);
    assert_eq!(coordinator.backdrop_opacity(), 0.5);
    assert!(!coordinator.is_animating());
}

#[test]
fn animate_without_completion_drops_pending_one() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let (count, on_complete) = counter();
    let mut frame_time = 0;

    coordinator.animate_to_then(500.0, 0.5, on_complete);
    pump(&runtime, &mut frame_time, 3);
    coordinator.animate_to(800.0, 0.5);
    pump(&runtime, &mut frame_time, 600);

    assert_eq!(count.get(), 0);
    assert_eq!(coordinator.offset(), 800.0);
}

#[test]
fn superseded_completion_never_fires() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let (first, first_complete) = counter();
    let (second, second_complete) = counter();
    let mut frame_time = 0;

    coordinator.animate_to_then(500.0, 0.5, first_complete);
    pump(&runtime, &mut frame_time, 5);
    coordinator.animate_to_then(100.0, 0.5, second_complete);
    pump(&runtime, &mut frame_time, 600);

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
    assert_eq!(coordinator.offset(), 100.0);
}

#[test]
fn mirroring_cancels_pending_completion() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let (count, on_complete) = counter();
    let mut frame_time = 0;

    coordinator.animate_to_then(500.0, 0.5, on_complete);
    pump(&runtime, &mut frame_time, 3);
    coordinator.mirror_offset(640.0);
    assert_eq!(coordinator.offset(), 640.0);

    pump(&runtime, &mut frame_time, 600);
    assert_eq!(count.get(), 0);
    assert_eq!(coordinator.offset(), 640.0);
    // The backdrop kept going.
    assert_eq!(coordinator.backdrop_opacity(), 0.5);
}

#[test]
fn idle_backdrop_at_target_does_not_delay_completion() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let mut frame_time = 0;

    coordinator.snap_to(500.0, 0.5);
    let (count, on_complete) = counter();
    // Already at rest on both channels: the spring confirms on its first frame.
    coordinator.animate_to_then(500.0, 0.5, on_complete);
    let frames = pump(&runtime, &mut frame_time, 600);

    assert_eq!(count.get(), 1);
    assert_eq!(frames, 1);
}

#[test]
fn completion_may_start_another_animation() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let coordinator = Rc::new(RefCell::new(coordinator(&runtime)));
    let (count, on_complete) = counter();
    let mut frame_time = 0;

    let chained = coordinator.clone();
    coordinator.borrow_mut().animate_to_then(0.0, 0.5, move || {
        chained.borrow_mut().animate_to_then(1000.0, 0.0, on_complete);
    });
    pump(&runtime, &mut frame_time, 1200);

    assert_eq!(count.get(), 1);
    assert_eq!(coordinator.borrow().offset(), 1000.0);
    assert_eq!(coordinator.borrow().backdrop_opacity(), 0.0);
}

#[test]
fn retarget_keeps_the_pending_completion() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let (count, on_complete) = counter();
    let mut frame_time = 0;

    coordinator.animate_to_then(500.0, 0.5, on_complete);
    pump(&runtime, &mut frame_time, 4);
    coordinator.retarget_offset(300.0);
    pump(&runtime, &mut frame_time, 600);

    assert_eq!(count.get(), 1);
    assert_eq!(coordinator.offset(), 300.0);
}

#[test]
fn snap_cancels_everything() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut coordinator = coordinator(&runtime);
    let (count, on_complete) = counter();
    let mut frame_time = 0;

    coordinator.animate_to_then(500.0, 0.5, on_complete);
    pump(&runtime, &mut frame_time, 2);
    coordinator.snap_to(1000.0, 0.0);
    pump(&runtime, &mut frame_time, 600);

    assert_eq!(count.get(), 0);
    assert_eq!(coordinator.offset(), 1000.0);
    assert_eq!(coordinator.backdrop_opacity(), 0.0);
    assert!(!coordinator.is_animating());
}
