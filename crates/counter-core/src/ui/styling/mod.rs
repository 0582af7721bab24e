//! Styling primitives for the counter UI
//!
//! - [`colors`] - RGB565 color constants and the button palette
//! - [`layout`] - padding around element content

pub mod colors;
pub mod layout;

pub use colors::{BLACK, BLUE, ButtonPalette, CIRCLE_BLUE, RED, RESET_RED, WHITE, rgb888};
pub use layout::Padding;
