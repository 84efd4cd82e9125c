pub mod drag;
pub mod pan;

pub use drag::{GestureSample, GestureTracker};
pub use pan::{PanEvent, PanGestureDetector};
