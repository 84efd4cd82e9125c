use super::*;
use crate::{DefaultScheduler, Runtime};
use std::cell::Cell;
use std::sync::Arc;
use std::task::Context;

#[test]
fn with_frame_millis_converts_timestamp() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let seen = Rc::new(Cell::new(0u64));

    let slot = Rc::clone(&seen);
    let _registration = clock.with_frame_millis(move |millis| slot.set(millis));
    runtime.handle().drain_frame_callbacks(33_000_000);

    assert_eq!(seen.get(), 33);
}

#[test]
fn dropping_registration_unregisters_callback() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let fired = Rc::new(Cell::new(false));

    let flag = Rc::clone(&fired);
    let registration = clock.with_frame_nanos(move |_| flag.set(true));
    assert!(registration.id().is_some());
    drop(registration);

    runtime.handle().drain_frame_callbacks(0);
    assert!(!fired.get());
}

#[test]
fn registration_on_dropped_runtime_is_inactive() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    drop(runtime);

    let registration = clock.with_frame_nanos(|_| {});
    assert_eq!(registration.id(), None);
    registration.cancel();
}

#[test]
fn next_frame_resolves_after_drain() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    let mut future = Box::pin(runtime.frame_clock().next_frame());
    let waker = futures_task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    assert!(future.as_mut().poll(&mut cx).is_pending());
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(7);
    assert_eq!(future.as_mut().poll(&mut cx), Poll::Ready(7));
}

#[test]
fn dropping_pending_next_frame_cancels_callback() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    let mut future = Box::pin(runtime.frame_clock().next_frame());
    let waker = futures_task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    assert!(future.as_mut().poll(&mut cx).is_pending());
    drop(future);

    assert!(!handle.has_frame_callbacks());
}
