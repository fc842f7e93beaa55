use super::*;

use snapsheet_core::{FrameRuntime, FRAME_INTERVAL_NANOS};
use std::cell::RefCell;
use std::rc::Rc;

struct Frames {
    runtime: FrameRuntime,
    time: u64,
}

impl Frames {
    fn new() -> Self {
        Self {
            runtime: FrameRuntime::new(),
            time: 0,
        }
    }

    fn tick(&mut self) {
        self.time += FRAME_INTERVAL_NANOS;
        self.runtime.drain_frame_callbacks(self.time);
    }

    /// Ticks until nothing is scheduled, returning the number of frames.
    fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            assert!(frames < max_frames, "animation did not settle in {max_frames} frames");
            self.tick();
            frames += 1;
        }
        frames
    }
}

fn recorder() -> (Rc<RefCell<Vec<AnimationEnd>>>, impl FnOnce(AnimationEnd) + 'static) {
    let ends = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ends);
    (ends, move |end| sink.borrow_mut().push(end))
}

#[test]
fn spring_reaches_target_through_intermediate_values() {
    let mut frames = Frames::new();
    let value = Animatable::new(1000.0, frames.runtime.frame_clock());
    let (ends, on_end) = recorder();

    value.animate_to(600.0, SpringSpec::sheet(), on_end);
    assert!(value.is_running());
    assert_eq!(value.value(), 1000.0);

    let mut saw_midpoint = false;
    for _ in 0..10 {
        frames.tick();
        let current = value.value();
        if current < 1000.0 && current > 600.0 {
            saw_midpoint = true;
        }
    }
    assert!(saw_midpoint, "spring should report intermediate values");

    frames.run_until_idle(600);
    assert_eq!(value.value(), 600.0);
    assert!(!value.is_running());
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn sheet_spring_is_monotonic_toward_target() {
    let mut frames = Frames::new();
    let value = Animatable::new(0.0, frames.runtime.frame_clock());
    value.animate_to(500.0, SpringSpec::sheet(), |_| {});

    let mut previous = value.value();
    while value.is_running() {
        frames.tick();
        let current = value.value();
        assert!(current >= previous, "overdamped spring moved backwards");
        assert!(current <= 500.0, "clamped spring overshot");
        previous = current;
    }
}

#[test]
fn stop_freezes_value_mid_flight() {
    let mut frames = Frames::new();
    let value = Animatable::new(1000.0, frames.runtime.frame_clock());
    let (ends, on_end) = recorder();
    value.animate_to(0.0, SpringSpec::sheet(), on_end);

    for _ in 0..6 {
        frames.tick();
    }
    let stopped_at = value.stop();
    assert!(stopped_at > 0.0 && stopped_at < 1000.0);
    assert_eq!(value.value(), stopped_at);
    assert_eq!(value.target(), stopped_at);
    assert!(!value.is_running());
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Interrupted]);

    frames.tick();
    frames.tick();
    assert_eq!(value.value(), stopped_at);
}

#[test]
fn new_target_supersedes_running_animation() {
    let mut frames = Frames::new();
    let value = Animatable::new(1000.0, frames.runtime.frame_clock());
    let (first, first_end) = recorder();
    let (second, second_end) = recorder();

    value.animate_to(0.0, SpringSpec::sheet(), first_end);
    frames.tick();
    frames.tick();
    frames.tick();
    let retarget_from = value.value();
    value.animate_to(800.0, SpringSpec::sheet(), second_end);

    assert_eq!(first.borrow().as_slice(), &[AnimationEnd::Interrupted]);
    assert_eq!(value.value(), retarget_from);
    assert_eq!(value.velocity(), 0.0);

    frames.run_until_idle(600);
    assert_eq!(value.value(), 800.0);
    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn overshoot_clamping_stops_at_target() {
    let mut frames = Frames::new();
    let value = Animatable::new(0.0, frames.runtime.frame_clock());
    let bouncy = SpringSpec::with_damping_ratio(0.2, 400.0).with_overshoot_clamping(true);
    value.animate_to(100.0, bouncy, |_| {});

    while value.is_running() {
        frames.tick();
        assert!(value.value() <= 100.0);
    }
    assert_eq!(value.value(), 100.0);
}

#[test]
fn underdamped_spring_overshoots_without_clamping() {
    let mut frames = Frames::new();
    let value = Animatable::new(0.0, frames.runtime.frame_clock());
    let bouncy = SpringSpec::with_damping_ratio(0.2, 400.0);
    value.animate_to(100.0, bouncy, |_| {});

    let mut peak = 0.0f32;
    for _ in 0..120 {
        frames.tick();
        peak = peak.max(value.value());
    }
    assert!(peak > 100.0, "expected overshoot, peak was {peak}");
}

#[test]
fn snap_to_jumps_without_animation() {
    let mut frames = Frames::new();
    let value = Animatable::new(10.0, frames.runtime.frame_clock());
    let (ends, on_end) = recorder();
    value.animate_to(500.0, SpringSpec::sheet(), on_end);
    frames.tick();

    value.snap_to(42.0);
    assert_eq!(value.value(), 42.0);
    assert_eq!(value.target(), 42.0);
    assert!(!value.is_running());
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Interrupted]);
    assert_eq!(frames.run_until_idle(4), 0);
}

#[test]
fn finishes_immediately_without_runtime() {
    let runtime = FrameRuntime::new();
    let value = Animatable::new(0.0, runtime.frame_clock());
    drop(runtime);

    let (ends, on_end) = recorder();
    value.animate_to(300.0, SpringSpec::sheet(), on_end);
    assert_eq!(value.value(), 300.0);
    assert!(!value.is_running());
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn completion_callback_may_start_next_animation() {
    let mut frames = Frames::new();
    let value = Animatable::new(0.0, frames.runtime.frame_clock());
    let chained = value.clone();
    value.animate_to(100.0, SpringSpec::sheet(), move |end| {
        if end == AnimationEnd::Finished {
            chained.animate_to(200.0, SpringSpec::sheet(), |_| {});
        }
    });

    frames.run_until_idle(1200);
    assert_eq!(value.value(), 200.0);
}

#[test]
fn sheet_spring_constants() {
    let spec = SpringSpec::default();
    assert_eq!(spec.stiffness, 120.0);
    assert_eq!(spec.damping, 25.0);
    assert_eq!(spec.mass, 0.5);
    assert!(spec.overshoot_clamping);
    assert!(spec.damping_ratio() > 1.0, "sheet spring should be overdamped");
}

#[test]
fn damping_ratio_round_trips() {
    let spec = SpringSpec::with_damping_ratio(0.5, 1500.0);
    assert!((spec.damping_ratio() - 0.5).abs() < 1e-4);
}
