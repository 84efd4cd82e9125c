//! Platform abstraction traits for the snapsheet runtime.
//!
//! The host UI loop owns the real display refresh. These traits let the
//! runtime ask for a frame without knowing which windowing or animation
//! system sits underneath.

/// Schedules work for the snapsheet runtime.
///
/// Implementations are responsible for arranging that the host calls
/// [`RuntimeHandle::drain_frame_callbacks`](crate::RuntimeHandle::drain_frame_callbacks)
/// on its next frame. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
