//! Animation system for snapsheet
//!
//! This crate provides animation primitives including tweens, springs, and easing functions.

#![allow(non_snake_case)]

pub mod animation;
pub mod easing;

pub use animation::*;
pub use easing::Easing;

pub mod prelude {
    pub use crate::animation::{
        Animatable, AnimationSpec, AnimationType, Lerp, SpringScalar, SpringSpec,
    };
    pub use crate::easing::Easing;
}
