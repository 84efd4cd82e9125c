pub mod gestures;
pub mod types;

pub use gestures::{GestureSample, GestureTracker, PanEvent, PanGestureDetector};
pub use types::{Point, PointerEvent, PointerEventKind, PointerId};
