//! Core runtime for snapsheet.
//!
//! A deliberately small, single-threaded frame runtime: animations register
//! one-shot frame callbacks, the host drains them once per display frame with
//! a monotonic timestamp, and everything else (gestures, state transitions)
//! happens synchronously on the same thread.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

/// Identifier handed out for every registered frame callback.
pub type FrameCallbackId = u64;

/// Nanoseconds in one 60 Hz frame, rounded.
pub const FRAME_NANOS_60HZ: u64 = 16_666_667;
