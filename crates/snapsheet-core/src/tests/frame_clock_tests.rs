use crate::FrameRuntime;

use std::cell::Cell;
use std::rc::Rc;

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = FrameRuntime::new();
    let clock = runtime.frame_clock();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        clock.with_frame_nanos(move |_| fired.set(true))
    };
    assert!(registration.is_active());
    drop(registration);

    runtime.drain_frame_callbacks(16_666_667);
    assert!(!fired.get());
}

#[test]
fn callback_fires_once_with_frame_time() {
    let runtime = FrameRuntime::new();
    let clock = runtime.frame_clock();
    let seen = Rc::new(Cell::new(0u64));

    let _registration = {
        let seen = Rc::clone(&seen);
        clock.with_frame_nanos(move |nanos| seen.set(seen.get() + nanos))
    };

    runtime.drain_frame_callbacks(33_333_334);
    runtime.drain_frame_callbacks(50_000_000);
    assert_eq!(seen.get(), 33_333_334);
}

#[test]
fn registration_without_runtime_is_inactive() {
    let runtime = FrameRuntime::new();
    let clock = runtime.frame_clock();
    drop(runtime);

    assert!(!clock.is_attached());
    let registration = clock.with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    registration.cancel();
}
