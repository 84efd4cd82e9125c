//! Drag tracking relative to a per-gesture baseline.

/// Snapshot of one drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Absolute offset of the dragged surface when contact began.
    pub base_offset: f32,
    /// `base_offset` plus the cumulative drag delta.
    pub live_offset: f32,
    /// Release velocity in px/s, positive toward the bottom of the screen.
    /// Zero until the gesture ends.
    pub release_velocity: f32,
}

impl GestureSample {
    fn apply_delta(&mut self, delta_since_begin: f32) {
        let live_offset = self.base_offset + delta_since_begin;
        if live_offset.is_finite() {
            self.live_offset = live_offset;
        } else {
            log::debug!("dropping non-finite drag delta {}", delta_since_begin);
        }
    }
}

/// Converts cumulative drag deltas into absolute offsets.
///
/// The baseline is whatever offset the surface had at first contact, not
/// zero: a sheet resting halfway up keeps its position when a new drag
/// starts instead of jumping to the top.
#[derive(Debug, Default, Clone)]
pub struct GestureTracker {
    active: Option<GestureSample>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking from `current_offset`. Restarting an active gesture
    /// rebases it.
    pub fn begin(&mut self, current_offset: f32) {
        self.active = Some(GestureSample {
            base_offset: current_offset,
            live_offset: current_offset,
            release_velocity: 0.0,
        });
    }

    /// Returns the live offset for a delta measured since `begin`, or `None`
    /// when no gesture is being tracked. A non-finite delta leaves the live
    /// offset where it was.
    pub fn update(&mut self, delta_since_begin: f32) -> Option<f32> {
        let sample = self.active.as_mut()?;
        sample.apply_delta(delta_since_begin);
        Some(sample.live_offset)
    }

    /// Finishes the gesture and hands back its final sample. A non-finite
    /// velocity is reported as zero.
    pub fn end(&mut self, delta_since_begin: f32, velocity: f32) -> Option<GestureSample> {
        let mut sample = self.active.take()?;
        sample.apply_delta(delta_since_begin);
        sample.release_velocity = if velocity.is_finite() { velocity } else { 0.0 };
        Some(sample)
    }

    /// Drops the active gesture without producing a sample.
    pub fn reset(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<GestureSample> {
        self.active
    }
}
