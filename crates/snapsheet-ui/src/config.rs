//! Host-facing sheet options.

use smallvec::SmallVec;
use snapsheet_animation::{AnimationSpec, Easing, SpringSpec};
use snapsheet_foundation::FAST_SWIPE_VELOCITY;

use crate::error::ConfigurationError;
use crate::snap_points::SnapPoints;

pub const DEFAULT_SNAP_POINTS: [f32; 3] = [0.2, 0.5, 0.9];
pub const DEFAULT_INITIAL_SNAP_POINT: usize = 1;
pub const DEFAULT_BACKDROP_OPACITY: f32 = 0.5;
pub const DEFAULT_BACKDROP_FADE_MILLIS: u64 = 300;

/// Options for a [`SheetController`](crate::SheetController).
///
/// Nothing is checked until the controller is built; see
/// [`SheetConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct SheetConfig {
    pub is_visible: bool,
    pub snap_points: SmallVec<[f32; 4]>,
    pub initial_snap_point: usize,
    pub enable_backdrop_dismiss: bool,
    pub enable_pan_gesture: bool,
    /// Backdrop opacity while the sheet is open.
    pub backdrop_opacity: f32,
    /// Release speed (px/s) above which a drag counts as a swipe.
    pub fast_swipe_velocity: f32,
    pub position_spring: SpringSpec,
    pub backdrop_fade: AnimationSpec,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            is_visible: false,
            snap_points: SmallVec::from_slice(&DEFAULT_SNAP_POINTS),
            initial_snap_point: DEFAULT_INITIAL_SNAP_POINT,
            enable_backdrop_dismiss: true,
            enable_pan_gesture: true,
            backdrop_opacity: DEFAULT_BACKDROP_OPACITY,
            fast_swipe_velocity: FAST_SWIPE_VELOCITY,
            // Thresholds in pixels: sub-pixel motion is invisible.
            position_spring: SpringSpec::from_tension_friction(100.0, 8.0).with_thresholds(0.5, 0.5),
            backdrop_fade: AnimationSpec::tween(DEFAULT_BACKDROP_FADE_MILLIS, Easing::EaseInOut),
        }
    }
}

impl SheetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visible(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    pub fn with_snap_points(mut self, snap_points: &[f32]) -> Self {
        self.snap_points = SmallVec::from_slice(snap_points);
        self
    }

    pub fn with_initial_snap_point(mut self, index: usize) -> Self {
        self.initial_snap_point = index;
        self
    }

    pub fn with_backdrop_dismiss(mut self, enabled: bool) -> Self {
        self.enable_backdrop_dismiss = enabled;
        self
    }

    pub fn with_pan_gesture(mut self, enabled: bool) -> Self {
        self.enable_pan_gesture = enabled;
        self
    }

    pub fn with_backdrop_opacity(mut self, opacity: f32) -> Self {
        self.backdrop_opacity = opacity;
        self
    }

    pub fn with_fast_swipe_velocity(mut self, velocity: f32) -> Self {
        self.fast_swipe_velocity = velocity;
        self
    }

    pub fn with_position_spring(mut self, spring: SpringSpec) -> Self {
        self.position_spring = spring;
        self
    }

    pub fn with_backdrop_fade(mut self, fade: AnimationSpec) -> Self {
        self.backdrop_fade = fade;
        self
    }

    /// Checks every option and returns the validated snap list.
    pub fn validate(&self) -> Result<SnapPoints, ConfigurationError> {
        let points = SnapPoints::new(&self.snap_points)?;
        if self.initial_snap_point >= points.len() {
            return Err(ConfigurationError::InitialSnapPointOutOfRange {
                index: self.initial_snap_point,
                len: points.len(),
            });
        }
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(ConfigurationError::InvalidBackdropOpacity {
                opacity: self.backdrop_opacity,
            });
        }
        Ok(points)
    }
}

pub(crate) fn validate_screen_height(height: f32) -> Result<f32, ConfigurationError> {
    if height.is_finite() && height > 0.0 {
        Ok(height)
    } else {
        Err(ConfigurationError::InvalidScreenHeight { height })
    }
}
