//! Counter UI system for embedded displays
//!
//! - Core traits for drawable, touchable and measurable elements
//! - The counter badge and the host's push buttons
//! - Scaled monospace text rendering
//! - Colors and padding

pub mod components;
pub mod core;
pub mod styling;
pub mod text;

pub use components::{Button, CounterBadge};
pub use self::core::{
    Action, DirtyRegion, Drawable, MeasureSpec, Measurable, TouchEvent, TouchPoint, TouchResult,
    Touchable,
};
pub use styling::{ButtonPalette, Padding};
pub use text::{CounterTextStyle, ScaledTarget};
