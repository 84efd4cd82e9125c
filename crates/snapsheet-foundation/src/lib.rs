//! Foundation input layer for snapsheet: pointer events, velocity tracking
//! and the drag gestures the sheet is driven by.

pub mod gesture_constants;
pub mod nodes;
pub mod velocity_tracker;

pub use gesture_constants::{FAST_SWIPE_VELOCITY, MAX_FLING_VELOCITY};
pub use nodes::input::gestures::{GestureSample, GestureTracker, PanEvent, PanGestureDetector};
pub use nodes::input::types::{Point, PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::VelocityTracker1D;
