//! Vertical pan recogniser: raw pointer events in, pan events out.

use smallvec::SmallVec;

use crate::gesture_constants::MAX_FLING_VELOCITY;
use crate::nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker1D;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    Began,
    /// `translation` is the vertical distance from the press position.
    Changed { translation: f32 },
    /// `velocity` is in px/s, positive toward the bottom of the screen.
    Ended { translation: f32, velocity: f32 },
}

struct ActivePan {
    pointer: PointerId,
    start_y: f32,
    last_translation: f32,
}

/// Tracks a single pointer from down to up and reports its vertical travel.
///
/// No touch slop is applied: the sheet follows the finger from the first
/// move. A second pointer pressed mid-gesture is ignored. `Cancel` ends the
/// pan in place with zero velocity so the owner still settles somewhere.
pub struct PanGestureDetector {
    enabled: bool,
    active: Option<ActivePan>,
    velocity: VelocityTracker1D,
}

impl Default for PanGestureDetector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PanGestureDetector {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            active: None,
            velocity: VelocityTracker1D::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_panning(&self) -> bool {
        self.active.is_some()
    }

    /// Feeds one pointer event. Returns the pan events it produced, in order.
    pub fn handle(&mut self, event: &PointerEvent) -> SmallVec<[PanEvent; 2]> {
        let mut out = SmallVec::new();
        if !self.enabled {
            return out;
        }

        match event.kind {
            PointerEventKind::Down => {
                if self.active.is_some() {
                    return out;
                }
                self.velocity.reset();
                self.velocity
                    .add_data_point(event.uptime_ms, event.position.y);
                self.active = Some(ActivePan {
                    pointer: event.id,
                    start_y: event.position.y,
                    last_translation: 0.0,
                });
                out.push(PanEvent::Began);
            }
            PointerEventKind::Move => {
                let Some(active) = self.active.as_mut().filter(|a| a.pointer == event.id) else {
                    return out;
                };
                self.velocity
                    .add_data_point(event.uptime_ms, event.position.y);
                let translation = event.position.y - active.start_y;
                active.last_translation = translation;
                event.consume();
                out.push(PanEvent::Changed { translation });
            }
            PointerEventKind::Up => {
                if !self.active.as_ref().is_some_and(|a| a.pointer == event.id) {
                    return out;
                }
                let Some(active) = self.active.take() else {
                    return out;
                };
                self.velocity
                    .add_data_point(event.uptime_ms, event.position.y);
                let translation = event.position.y - active.start_y;
                let velocity = self.velocity.calculate_velocity_with_max(MAX_FLING_VELOCITY);
                event.consume();
                out.push(PanEvent::Ended {
                    translation,
                    velocity,
                });
            }
            PointerEventKind::Cancel => {
                if !self.active.as_ref().is_some_and(|a| a.pointer == event.id) {
                    return out;
                }
                let Some(active) = self.active.take() else {
                    return out;
                };
                log::debug!("pan cancelled at translation {:.1}", active.last_translation);
                out.push(PanEvent::Ended {
                    translation: active.last_translation,
                    velocity: 0.0,
                });
            }
        }
        out
    }
}
