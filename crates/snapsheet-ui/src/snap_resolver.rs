//! Release-time snapping policy.
//!
//! All decisions about where a released sheet goes live here, as a pure
//! function of the release state.

use snapsheet_foundation::FAST_SWIPE_VELOCITY;

use crate::snap_points::SnapPoints;

/// Where a released sheet should go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapTarget {
    Rest(usize),
    Dismiss,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapResolver {
    fast_swipe_velocity: f32,
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::new(FAST_SWIPE_VELOCITY)
    }
}

impl SnapResolver {
    pub fn new(fast_swipe_velocity: f32) -> Self {
        Self {
            fast_swipe_velocity: fast_swipe_velocity.abs(),
        }
    }

    pub fn fast_swipe_velocity(&self) -> f32 {
        self.fast_swipe_velocity
    }

    /// Decides the outcome of a release.
    ///
    /// * `current_fraction`: visible fraction at release, `1 - offset / height`.
    /// * `velocity`: px/s, positive toward the bottom (closing).
    /// * `current_index`: snap index the sheet rested at before the drag.
    ///
    /// A fast swipe moves exactly one step from `current_index`; anything
    /// slower goes to the nearest snap point. Landing on index 0 always
    /// dismisses: the lowest snap point is never a resting state after a
    /// gesture.
    pub fn resolve(
        &self,
        current_fraction: f32,
        velocity: f32,
        current_index: usize,
        points: &SnapPoints,
    ) -> SnapTarget {
        let last_index = points.last_index();
        let current_index = current_index.min(last_index);

        let target = if velocity > self.fast_swipe_velocity {
            current_index.saturating_sub(1)
        } else if velocity < -self.fast_swipe_velocity {
            (current_index + 1).min(last_index)
        } else {
            points.nearest_index(current_fraction)
        };

        if target == 0 {
            SnapTarget::Dismiss
        } else {
            SnapTarget::Rest(target)
        }
    }
}
