//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels and logical pixels per second. Positive
//! vertical velocity points toward the bottom of the screen.

/// Release speed above which a vertical drag counts as a deliberate swipe.
///
/// A swipe moves the sheet exactly one snap point in the swipe direction
/// regardless of where the finger was lifted.
pub const FAST_SWIPE_VELOCITY: f32 = 500.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity on a baseline density.
/// Measured release velocities are clamped to this before they reach any
/// snapping decision.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
