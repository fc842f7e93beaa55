//! Spring-driven animatable value.
//!
//! The spring is integrated explicitly, one frame callback at a time, so the
//! current value is always observable and the animation can be halted at an
//! arbitrary point without losing its position.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use snapsheet_core::{FrameCallbackRegistration, FrameClock};

/// Fixed integration step (240 Hz). Frame deltas are split into steps of at
/// most this length.
const TIMESTEP_SECONDS: f32 = 1.0 / 240.0;

/// Upper bound on simulated time per frame so a stalled host does not make
/// a single frame integrate for seconds.
const MAX_FRAME_SECONDS: f32 = 0.25;

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The spring came to rest at its target.
    Finished,
    /// The animation was stopped or superseded before reaching its target.
    Interrupted,
}

/// Spring animation configuration in physical terms (stiffness, damping
/// coefficient, mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Spring constant `k`. Higher values pull harder toward the target.
    pub stiffness: f32,
    /// Damping coefficient `c`.
    pub damping: f32,
    /// Mass of the animated body.
    pub mass: f32,
    /// Stop as soon as the value crosses the target instead of oscillating.
    pub overshoot_clamping: bool,
    /// Displacement below which the spring may be considered at rest.
    pub rest_displacement_threshold: f32,
    /// Speed (units/second) below which the spring may be considered at rest.
    pub rest_speed_threshold: f32,
}

impl SpringSpec {
    /// Constants used by the bottom sheet: overdamped and clamped, so the
    /// panel never bounces past a snap point.
    pub fn sheet() -> Self {
        Self {
            stiffness: 120.0,
            damping: 25.0,
            mass: 0.5,
            overshoot_clamping: true,
            rest_displacement_threshold: 0.01,
            rest_speed_threshold: 0.01,
        }
    }

    /// Build a spring from a damping ratio (1.0 = critically damped) with unit mass.
    pub fn with_damping_ratio(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            stiffness,
            damping: 2.0 * damping_ratio * stiffness.sqrt(),
            mass: 1.0,
            overshoot_clamping: false,
            ..Self::sheet()
        }
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// `c / (2 * sqrt(k * m))`
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::sheet()
    }
}

type EndCallback = Box<dyn FnOnce(AnimationEnd) + 'static>;

enum FrameOutcome {
    Stale,
    Continue,
    Finished(Option<EndCallback>),
}

struct AnimatableInner {
    clock: FrameClock,
    value: f32,
    velocity: f32,
    target: f32,
    spec: SpringSpec,
    running: bool,
    /// Side of the target the animation started on; used for overshoot clamping.
    start_sign: f32,
    /// Bumped on every start/stop so stale frame callbacks can detect that
    /// they no longer belong to the running animation.
    generation: u64,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndCallback>,
}

impl AnimatableInner {
    /// Halts the running animation and hands back its completion callback.
    fn interrupt(&mut self) -> Option<EndCallback> {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
        self.last_frame_nanos = None;
        self.velocity = 0.0;
        if !self.running {
            return None;
        }
        self.running = false;
        self.target = self.value;
        self.on_end.take()
    }

    fn settle(&mut self) -> Option<EndCallback> {
        self.value = self.target;
        self.velocity = 0.0;
        self.running = false;
        self.last_frame_nanos = None;
        self.registration = None;
        self.on_end.take()
    }

    /// Integrates the spring over `dt` seconds. Returns `true` once at rest.
    fn advance(&mut self, dt: f32) -> bool {
        let spec = self.spec;
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = TIMESTEP_SECONDS.min(remaining);
            let displacement = self.value - self.target;
            let force = -spec.stiffness * displacement - spec.damping * self.velocity;
            self.velocity += force / spec.mass * step;
            self.value += self.velocity * step;
            remaining -= step;

            if spec.overshoot_clamping && (self.value - self.target) * self.start_sign <= 0.0 {
                return true;
            }
        }

        let at_rest = self.velocity.abs() < spec.rest_speed_threshold;
        let near_target = (self.value - self.target).abs() < spec.rest_displacement_threshold;
        at_rest && near_target
    }
}

/// A single `f32` driven toward targets by a spring.
///
/// Cloning yields another handle to the same value.
#[derive(Clone)]
pub struct Animatable {
    inner: Rc<RefCell<AnimatableInner>>,
}

impl Animatable {
    pub fn new(initial: f32, clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            clock,
            value: initial,
            velocity: 0.0,
            target: initial,
            spec: SpringSpec::default(),
            running: false,
            start_sign: 0.0,
            generation: 0,
            last_frame_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Current (possibly mid-flight) value.
    pub fn value(&self) -> f32 {
        self.inner.borrow().value
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    /// Target of the running animation, or the resting value when idle.
    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn spec(&self) -> SpringSpec {
        self.inner.borrow().spec
    }

    /// Starts a spring from the current value toward `target`.
    ///
    /// A running animation is stopped where it is and its `on_end` receives
    /// [`AnimationEnd::Interrupted`]. The new animation starts at rest.
    pub fn animate_to(
        &self,
        target: f32,
        spec: SpringSpec,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.target = target;
            inner.spec = spec;
            inner.start_sign = (inner.value - target).signum();
            inner.running = true;
            inner.on_end = Some(Box::new(on_end));
            log::trace!("spring {} -> {target}", inner.value);
            interrupted
        };
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
        Self::schedule_frame(&self.inner);
    }

    /// Stops any running animation in place and returns the value it stopped at.
    pub fn stop(&self) -> f32 {
        let (value, interrupted) = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            (inner.value, interrupted)
        };
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
        value
    }

    /// Stops any running animation and jumps to `value` without a spring.
    pub fn snap_to(&self, value: f32) {
        self.stop();
        let mut inner = self.inner.borrow_mut();
        inner.value = value;
        inner.target = value;
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner>>) {
        let (clock, generation) = {
            let inner = this.borrow();
            (inner.clock.clone(), inner.generation)
        };
        let weak: Weak<RefCell<AnimatableInner>> = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |frame_time_nanos| {
            if let Some(inner) = weak.upgrade() {
                Animatable::on_frame(&inner, generation, frame_time_nanos);
            }
        });

        if registration.is_active() {
            let mut inner = this.borrow_mut();
            if inner.generation == generation {
                inner.registration = Some(registration);
            }
            return;
        }

        // No frame runtime left to drive the spring: jump to the target.
        log::debug!("frame runtime unavailable; finishing animation immediately");
        let callback = {
            let mut inner = this.borrow_mut();
            if inner.generation != generation || !inner.running {
                return;
            }
            inner.settle()
        };
        if let Some(callback) = callback {
            callback(AnimationEnd::Finished);
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner>>, generation: u64, frame_time_nanos: u64) {
        let outcome = {
            let mut inner = this.borrow_mut();
            if inner.generation != generation || !inner.running {
                FrameOutcome::Stale
            } else {
                inner.registration = None;
                match inner.last_frame_nanos.replace(frame_time_nanos) {
                    // First frame anchors the timeline.
                    None => FrameOutcome::Continue,
                    Some(last) => {
                        let dt = (frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0)
                            .min(MAX_FRAME_SECONDS);
                        if inner.advance(dt) {
                            FrameOutcome::Finished(inner.settle())
                        } else {
                            log::trace!(
                                "spring sample value={} velocity={}",
                                inner.value,
                                inner.velocity
                            );
                            FrameOutcome::Continue
                        }
                    }
                }
            }
        };

        match outcome {
            FrameOutcome::Stale => {}
            FrameOutcome::Continue => Self::schedule_frame(this),
            FrameOutcome::Finished(callback) => {
                if let Some(callback) = callback {
                    callback(AnimationEnd::Finished);
                }
            }
        }
    }
}

impl fmt::Debug for Animatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("value", &inner.value)
            .field("target", &inner.target)
            .field("velocity", &inner.velocity)
            .field("running", &inner.running)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
