//! Host-facing sheet widgets

pub mod bottom_sheet;

pub use bottom_sheet::*;
