//! Color definitions for the counter badge and its host controls
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Pure red
pub const RED: Rgb565 = Rgb565::new(31, 0, 0);

/// Pure blue
pub const BLUE: Rgb565 = Rgb565::new(0, 0, 31);

/// Default circle fill of a freshly created badge
pub const CIRCLE_BLUE: Rgb565 = BLUE;

/// Circle fill the reset animation settles on
pub const RESET_RED: Rgb565 = RED;

/// Screen background behind the badge - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Button surface - teal-green
pub const COLOR_BUTTON: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Button surface while held down
pub const COLOR_BUTTON_PRESSED: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);

/// Pack an 8-bit-per-channel color into RGB565.
pub const fn rgb888(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Colors used by [`Button`](crate::ui::components::Button).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPalette {
    pub normal: Rgb565,
    pub pressed: Rgb565,
    pub label: Rgb565,
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self {
            normal: COLOR_BUTTON,
            pressed: COLOR_BUTTON_PRESSED,
            label: WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    #[test]
    fn rgb888_truncates_to_channel_depth() {
        assert_eq!(rgb888(255, 255, 255), WHITE);
        assert_eq!(rgb888(255, 0, 0), RED);
        assert_eq!(rgb888(0, 0, 255), BLUE);
        assert_eq!(rgb888(8, 4, 8), Rgb565::new(1, 1, 1));
    }

    #[test]
    fn named_colors_match_embedded_graphics() {
        assert_eq!(WHITE, Rgb565::WHITE);
        assert_eq!(RED, Rgb565::RED);
        assert_eq!(BLUE, Rgb565::BLUE);
        assert_eq!(BLACK, Rgb565::BLACK);
    }
}
