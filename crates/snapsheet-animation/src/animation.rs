//! Time-based and spring animations driven by the runtime frame clock.
//!
//! Note: `Animatable` uses camelCase for `animateTo`/`snapTo` to keep the
//! Compose animation vocabulary recognisable.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;

use snapsheet_core::{FrameCallbackRegistration, RuntimeHandle};

use crate::easing::Easing;

/// Fixed integration step for springs, in seconds.
const SPRING_TIMESTEP: f32 = 1.0 / 240.0;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Scalar values that can be driven by a spring.
pub trait SpringScalar: Lerp + Clone {
    fn to_f32(&self) -> f32;

    fn from_f32(value: f32) -> Self;
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

impl SpringScalar for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(value: f32) -> Self {
        value as f64
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration (unit mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity (units/second) under which the spring may come to rest.
    pub velocity_threshold: f32,
    /// Distance from the target under which the spring may come to rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    /// Converts the "origami" tension/friction pair into stiffness and damping ratio.
    ///
    /// `from_tension_friction(100.0, 8.0)` is the sheet's default position spring.
    pub fn from_tension_friction(tension: f32, friction: f32) -> Self {
        let stiffness = ((tension - 30.0) * 3.62 + 194.0).max(f32::EPSILON);
        let damping = ((friction - 8.0) * 3.0 + 25.0).max(0.0);
        Self {
            damping_ratio: damping / (2.0 * stiffness.sqrt()),
            stiffness,
            velocity_threshold: 0.01,
            position_threshold: 0.01,
        }
    }

    pub fn with_thresholds(mut self, position_threshold: f32, velocity_threshold: f32) -> Self {
        self.position_threshold = position_threshold;
        self.velocity_threshold = velocity_threshold;
        self
    }

    /// Absolute damping coefficient `c = 2ζ√k`.
    pub fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

type EndCallback = Box<dyn FnOnce() + 'static>;

/// A value that animates toward a target on the runtime's frame clock.
///
/// Only one animation runs at a time. `animateTo` and `snapTo` both
/// supersede whatever was running: the old frame callback is cancelled and
/// its completion callback is dropped without being called.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    runtime: RuntimeHandle,
    current: T,
    /// Units per second; carried across retargets so springs stay continuous.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    generation: u64,
    running: bool,
    on_end: Option<EndCallback>,
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    fn supersede(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
        self.on_end = None;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
    }

    fn settle_at_target(&mut self) -> Option<EndCallback> {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.velocity = 0.0;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.running = false;
        self.on_end.take()
    }

    /// Advances a tween; returns true once it reached its target.
    fn step_tween(&mut self, spec: AnimationSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let delay_nanos = spec.delay_millis * 1_000_000;
        if elapsed_nanos < delay_nanos {
            return false;
        }

        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
        let linear_progress =
            ((elapsed_nanos - delay_nanos) as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        let previous = self.current.to_f32();
        self.current = self
            .start
            .lerp(&self.target, spec.easing.transform(linear_progress));

        if let Some(last) = self.last_frame_nanos {
            let dt = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
            if dt > 0.0 {
                self.velocity = (self.current.to_f32() - previous) / dt;
            }
        }
        self.last_frame_nanos = Some(frame_time_nanos);

        linear_progress >= 1.0
    }

    /// Advances a spring; returns true once it came to rest.
    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let Some(last) = self.last_frame_nanos.replace(frame_time_nanos) else {
            self.start_time_nanos = Some(frame_time_nanos);
            return self.spring_at_rest(spec);
        };

        let mut remaining = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
        let target = self.target.to_f32();
        let damping = spec.damping();
        let mut position = self.current.to_f32();
        let mut velocity = self.velocity;

        // Semi-implicit Euler in fixed sub-steps.
        while remaining > 0.0 {
            let step = SPRING_TIMESTEP.min(remaining);
            let force = -spec.stiffness * (position - target) - damping * velocity;
            velocity += force * step;
            position += velocity * step;
            remaining -= step;
        }

        self.current = T::from_f32(position);
        self.velocity = velocity;
        self.spring_at_rest(spec)
    }

    fn spring_at_rest(&self, spec: SpringSpec) -> bool {
        let displacement = (self.current.to_f32() - self.target.to_f32()).abs();
        displacement < spec.position_threshold && self.velocity.abs() < spec.velocity_threshold
    }
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            generation: 0,
            running: false,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate to the target value using the specified animation.
    pub fn animateTo(&mut self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None);
    }

    /// Like [`animateTo`](Self::animateTo), but runs `on_end` once the target
    /// is reached. `on_end` is discarded if another command supersedes this
    /// animation first.
    pub fn animateToThen(
        &mut self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce() + 'static,
    ) {
        self.start_animation(target, animation, Some(Box::new(on_end)));
    }

    /// Snap immediately to the target value without animating.
    pub fn snapTo(&mut self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.supersede();
        inner.current = value.clone();
        inner.start = value.clone();
        inner.target = value;
        inner.velocity = 0.0;
        inner.running = false;
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    fn start_animation(&mut self, target: T, animation: AnimationType, on_end: Option<EndCallback>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.supersede();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.running = true;
            inner.on_end = on_end;
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let (runtime, generation) = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            (inner.runtime.clone(), inner.generation)
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });
        if registration.id().is_none() {
            log::debug!("animation scheduled without a live runtime; it will not advance");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, generation: u64, frame_time_nanos: u64) {
        let (finished, on_end) = {
            let mut inner = this.borrow_mut();
            if inner.generation != generation || !inner.running {
                return;
            }
            if let Some(registration) = inner.registration.take() {
                registration.disarm();
            }

            let finished = match inner.animation_type {
                AnimationType::Tween(spec) => inner.step_tween(spec, frame_time_nanos),
                AnimationType::Spring(spec) => inner.step_spring(spec, frame_time_nanos),
            };
            log::trace!(
                "animatable frame t={} value={:.3} target={:.3} finished={}",
                frame_time_nanos,
                inner.current.to_f32(),
                inner.target.to_f32(),
                finished
            );

            if finished {
                (true, inner.settle_at_target())
            } else {
                (false, None)
            }
        };

        if finished {
            if let Some(on_end) = on_end {
                on_end();
            }
        } else {
            Self::schedule_frame(this);
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
