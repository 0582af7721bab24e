//! Frame-clocked interpolation used by the animated reset
//!
//! A [`Tween`] interpolates one value over a fixed duration. It starts on
//! the first frame it is sampled and yields its exact end value on the
//! frame that reaches the duration. Several tweens can write the same field;
//! the caller applies them in submission order.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Interpolate, Tween};
