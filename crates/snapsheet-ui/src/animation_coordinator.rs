//! Drives the sheet's two visual channels, vertical offset and backdrop
//! opacity, toward a common target.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use snapsheet_animation::{Animatable, AnimationSpec, AnimationType, SpringSpec};
use snapsheet_core::RuntimeHandle;

type CompletionCallback = Box<dyn FnOnce() + 'static>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    Offset,
    Opacity,
}

#[derive(Default)]
struct Completion {
    /// Bumped by every command; channel callbacks carry the value they were
    /// started with.
    generation: u64,
    offset_pending: bool,
    opacity_pending: bool,
    on_complete: Option<CompletionCallback>,
}

impl Completion {
    fn reset(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.offset_pending = false;
        self.opacity_pending = false;
        self.on_complete = None;
        self.generation
    }
}

/// Two coupled animations with a single completion.
///
/// Every command supersedes the previous one on both channels. The
/// completion passed to [`animate_to_then`](Self::animate_to_then) fires
/// once, after both channels reached their targets, and never after a later
/// command. It always fires from a frame callback, never from inside
/// `animate_to_then`.
pub struct AnimationCoordinator {
    offset: Animatable<f32>,
    opacity: Animatable<f32>,
    position_spring: SpringSpec,
    backdrop_fade: AnimationSpec,
    backdrop_opacity_max: f32,
    completion: Rc<RefCell<Completion>>,
}

impl AnimationCoordinator {
    pub fn new(
        runtime: RuntimeHandle,
        initial_offset: f32,
        position_spring: SpringSpec,
        backdrop_fade: AnimationSpec,
        backdrop_opacity_max: f32,
    ) -> Self {
        Self {
            offset: Animatable::new(initial_offset, runtime.clone()),
            opacity: Animatable::new(0.0, runtime),
            position_spring,
            backdrop_fade,
            backdrop_opacity_max,
            completion: Rc::new(RefCell::new(Completion::default())),
        }
    }

    /// Backdrop opacity for a sheet heading to `target_fraction`: full
    /// configured opacity for any visible height, transparent when closed.
    pub fn opacity_for(&self, target_fraction: f32) -> f32 {
        if target_fraction > 0.0 {
            self.backdrop_opacity_max
        } else {
            0.0
        }
    }

    pub fn backdrop_opacity_max(&self) -> f32 {
        self.backdrop_opacity_max
    }

    /// Starts both channels and returns immediately.
    pub fn animate_to(&mut self, offset_target: f32, opacity_target: f32) {
        self.start(offset_target, opacity_target, None);
    }

    /// Like [`animate_to`](Self::animate_to), then calls `on_complete` once
    /// both channels have settled.
    pub fn animate_to_then(
        &mut self,
        offset_target: f32,
        opacity_target: f32,
        on_complete: impl FnOnce() + 'static,
    ) {
        self.start(offset_target, opacity_target, Some(Box::new(on_complete)));
    }

    fn start(
        &mut self,
        offset_target: f32,
        opacity_target: f32,
        on_complete: Option<CompletionCallback>,
    ) {
        let generation = {
            let mut completion = self.completion.borrow_mut();
            let generation = completion.reset();
            completion.offset_pending = true;
            completion.on_complete = on_complete;
            generation
        };
        log::trace!(
            "coordinator #{} -> offset {:.1}, opacity {:.2}",
            generation,
            offset_target,
            opacity_target
        );

        let callback = self.channel_callback(generation, Channel::Offset);
        self.offset.animateToThen(
            offset_target,
            AnimationType::Spring(self.position_spring),
            callback,
        );

        // An idle backdrop already at its target has nothing to wait for; the
        // offset spring always takes at least a frame, so completion stays
        // asynchronous.
        if self.opacity.is_running() || self.opacity.value() != opacity_target {
            self.completion.borrow_mut().opacity_pending = true;
            let callback = self.channel_callback(generation, Channel::Opacity);
            self.opacity.animateToThen(
                opacity_target,
                AnimationType::Tween(self.backdrop_fade),
                callback,
            );
        }
    }

    /// Moves the offset channel to a new target without restarting the
    /// backdrop or touching the pending completion. A finished offset
    /// channel snaps instead.
    pub fn retarget_offset(&mut self, offset_target: f32) {
        let (generation, offset_pending) = {
            let completion = self.completion.borrow();
            (completion.generation, completion.offset_pending)
        };
        if offset_pending {
            let callback = self.channel_callback(generation, Channel::Offset);
            self.offset.animateToThen(
                offset_target,
                AnimationType::Spring(self.position_spring),
                callback,
            );
        } else {
            self.offset.snapTo(offset_target);
        }
    }

    /// Sets the offset directly, as while dragging. Cancels the offset
    /// animation and any pending completion; the backdrop keeps animating.
    pub fn mirror_offset(&mut self, offset: f32) {
        let mut completion = self.completion.borrow_mut();
        if completion.on_complete.is_some() || completion.offset_pending {
            completion.reset();
        }
        drop(completion);
        self.offset.snapTo(offset);
    }

    /// Jumps both channels, cancelling everything in flight.
    pub fn snap_to(&mut self, offset: f32, opacity: f32) {
        self.completion.borrow_mut().reset();
        self.offset.snapTo(offset);
        self.opacity.snapTo(opacity);
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn offset_target(&self) -> f32 {
        self.offset.target()
    }

    pub fn backdrop_opacity(&self) -> f32 {
        self.opacity.value()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_running() || self.opacity.is_running()
    }

    fn channel_callback(&self, generation: u64, channel: Channel) -> impl FnOnce() + 'static {
        let weak = Rc::downgrade(&self.completion);
        move || Self::finish_channel(&weak, generation, channel)
    }

    fn finish_channel(completion: &Weak<RefCell<Completion>>, generation: u64, channel: Channel) {
        let Some(completion) = completion.upgrade() else {
            return;
        };
        let on_complete = {
            let mut completion = completion.borrow_mut();
            if completion.generation != generation {
                return;
            }
            match channel {
                Channel::Offset => completion.offset_pending = false,
                Channel::Opacity => completion.opacity_pending = false,
            }
            if completion.offset_pending || completion.opacity_pending {
                return;
            }
            completion.on_complete.take()
        };
        // Released before calling out: the callback may issue a new command.
        if let Some(on_complete) = on_complete {
            on_complete();
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_coordinator_tests.rs"]
mod tests;
