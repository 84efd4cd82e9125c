//! Draggable bottom sheet built on the snapsheet runtime.
//!
//! The sheet rests at one of several snap points (fractions of the screen
//! height), follows the finger while dragged, and on release either settles
//! at a snap point or dismisses, moving its backdrop along with it.

mod animation_coordinator;
mod config;
mod error;
mod sheet_controller;
mod snap_points;
mod snap_resolver;
pub mod widgets;

pub use animation_coordinator::AnimationCoordinator;
pub use config::{
    SheetConfig, DEFAULT_BACKDROP_FADE_MILLIS, DEFAULT_BACKDROP_OPACITY,
    DEFAULT_INITIAL_SNAP_POINT, DEFAULT_SNAP_POINTS,
};
pub use error::{ConfigurationError, SheetError};
pub use sheet_controller::{SheetController, SheetState};
pub use snap_points::SnapPoints;
pub use snap_resolver::{SnapResolver, SnapTarget};
pub use widgets::{BottomSheet, SheetFrame};

// Re-exported so hosts can feed input without naming the foundation crate.
pub use snapsheet_foundation::{Point, PointerEvent, PointerEventKind};

pub mod prelude {
    pub use crate::widgets::{BottomSheet, SheetFrame};
    pub use crate::{SheetConfig, SheetController, SheetError, SheetState, SnapTarget};
}
