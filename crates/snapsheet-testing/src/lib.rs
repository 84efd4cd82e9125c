//! Testing utilities and harness for snapsheet

pub mod testing;

pub use testing::*;

pub mod prelude {
    pub use crate::testing::*;
}
