//! Declarative style attributes of the counter badge
//!
//! Attributes arrive as name/value string pairs, either directly from the
//! host or from a compiled attribute resource (postcard-encoded
//! [`AttributeResource`]). They are read once when the badge is created.
//! A missing or malformed value falls back to its default and is logged;
//! construction never fails.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::ui::styling::{BLACK, BLUE, CIRCLE_BLUE, Padding, RED, WHITE, rgb888};

/// Default text size before density scaling.
pub const DEFAULT_TEXT_SIZE_SP: f32 = 64.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    #[error("invalid color value: {0}")]
    InvalidColor(heapless::String<32>),
    #[error("invalid dimension value: {0}")]
    InvalidDimension(heapless::String<32>),
    #[error("attribute resource could not be decoded")]
    Decode,
}

fn truncated(value: &str) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Density factors used to turn `dp`/`sp` dimensions into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Pixels per `dp`
    pub density: f32,
    /// Pixels per `sp` (density times the user's font scale)
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            scaled_density: 1.0,
        }
    }
}

/// Compiled attribute resource.
///
/// Every field holds the same string form accepted by
/// [`CounterAttributes::from_attributes`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct AttributeResource<'a> {
    #[serde(borrow)]
    pub text_size: Option<&'a str>,
    #[serde(borrow)]
    pub text_color: Option<&'a str>,
    #[serde(borrow)]
    pub circle_color: Option<&'a str>,
    #[serde(borrow)]
    pub padding: Option<&'a str>,
}

impl<'a> AttributeResource<'a> {
    /// Attribute name/value pairs present in this resource.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'a str)> {
        [
            ("textSize", self.text_size),
            ("textColor", self.text_color),
            ("circleColor", self.circle_color),
            ("padding", self.padding),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// Resolved style of a counter badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAttributes {
    /// Text cell height in pixels
    pub text_size: u32,
    pub text_color: Rgb565,
    pub circle_color: Rgb565,
    pub padding: Padding,
}

impl Default for CounterAttributes {
    fn default() -> Self {
        Self::defaults(&DisplayMetrics::default())
    }
}

impl CounterAttributes {
    /// Defaults for a display: 64sp white text on a blue circle, no padding.
    pub fn defaults(metrics: &DisplayMetrics) -> Self {
        Self {
            text_size: round_px(DEFAULT_TEXT_SIZE_SP * metrics.scaled_density),
            text_color: WHITE,
            circle_color: CIRCLE_BLUE,
            padding: Padding::default(),
        }
    }

    /// Read attributes from name/value pairs.
    ///
    /// Recognised names: `textSize`, `textColor`, `circleColor`, `padding`,
    /// `paddingLeft`, `paddingTop`, `paddingRight` and `paddingBottom`.
    /// `padding` takes precedence over the per-side values. Unknown names
    /// are ignored.
    pub fn from_attributes<'n, 'v, I>(attributes: I, metrics: &DisplayMetrics) -> Self
    where
        I: IntoIterator<Item = (&'n str, &'v str)>,
    {
        let mut attrs = Self::defaults(metrics);
        let mut uniform_padding = None;

        for (name, value) in attributes {
            match name {
                "textSize" => {
                    if let Some(px) = or_warn(name, parse_dimension(value, metrics)) {
                        attrs.text_size = px;
                    }
                }
                "textColor" => {
                    if let Some(color) = or_warn(name, parse_color(value)) {
                        attrs.text_color = color;
                    }
                }
                "circleColor" => {
                    if let Some(color) = or_warn(name, parse_color(value)) {
                        attrs.circle_color = color;
                    }
                }
                "padding" => {
                    if let Some(px) = or_warn(name, parse_dimension(value, metrics)) {
                        uniform_padding = Some(px);
                    }
                }
                "paddingLeft" | "paddingTop" | "paddingRight" | "paddingBottom" => {
                    if let Some(px) = or_warn(name, parse_dimension(value, metrics)) {
                        match name {
                            "paddingLeft" => attrs.padding.left = px,
                            "paddingTop" => attrs.padding.top = px,
                            "paddingRight" => attrs.padding.right = px,
                            _ => attrs.padding.bottom = px,
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(px) = uniform_padding {
            attrs.padding = Padding::all(px);
        }

        attrs
    }

    /// Read attributes from a postcard-encoded [`AttributeResource`].
    pub fn from_resource(bytes: &[u8], metrics: &DisplayMetrics) -> Self {
        match decode_resource(bytes) {
            Ok(resource) => Self::from_attributes(resource.pairs(), metrics),
            Err(e) => {
                warn!("{}; using default counter attributes", e);
                Self::defaults(metrics)
            }
        }
    }
}

/// Decode a compiled attribute resource.
pub fn decode_resource(bytes: &[u8]) -> Result<AttributeResource<'_>, AttributeError> {
    postcard::from_bytes(bytes).map_err(|_| AttributeError::Decode)
}

fn or_warn<T>(name: &str, result: Result<T, AttributeError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("attribute {}: {}; keeping default", name, e);
            None
        }
    }
}

fn round_px(value: f32) -> u32 {
    if value <= 0.0 { 0 } else { (value + 0.5) as u32 }
}

/// Parse a dimension: `"<n>sp"`, `"<n>dp"`, `"<n>dip"`, `"<n>px"` or a bare
/// pixel count. Returns whole pixels.
pub fn parse_dimension(value: &str, metrics: &DisplayMetrics) -> Result<u32, AttributeError> {
    let value = value.trim();
    let (number, factor) = if let Some(n) = value.strip_suffix("sp") {
        (n, metrics.scaled_density)
    } else if let Some(n) = value.strip_suffix("dip") {
        (n, metrics.density)
    } else if let Some(n) = value.strip_suffix("dp") {
        (n, metrics.density)
    } else if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else {
        (value, 1.0)
    };

    let amount: f32 = number
        .trim()
        .parse()
        .map_err(|_| AttributeError::InvalidDimension(truncated(value)))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(AttributeError::InvalidDimension(truncated(value)));
    }

    Ok(round_px(amount * factor))
}

/// Parse a color: `#RGB`, `#RRGGBB`, `#AARRGGBB` (alpha ignored) or a
/// basic color name.
pub fn parse_color(value: &str) -> Result<Rgb565, AttributeError> {
    let value = value.trim();
    let invalid = || AttributeError::InvalidColor(truncated(value));

    let Some(hex) = value.strip_prefix('#') else {
        return named_color(value).ok_or_else(invalid);
    };

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let packed = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;

    let (r, g, b) = match hex.len() {
        3 => (
            ((packed >> 8) & 0xF) as u8 * 17,
            ((packed >> 4) & 0xF) as u8 * 17,
            (packed & 0xF) as u8 * 17,
        ),
        6 | 8 => (
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        ),
        _ => return Err(invalid()),
    };

    Ok(rgb888(r, g, b))
}

fn named_color(name: &str) -> Option<Rgb565> {
    const NAMED: [(&str, Rgb565); 9] = [
        ("white", WHITE),
        ("black", BLACK),
        ("red", RED),
        ("green", Rgb565::new(0, 63, 0)),
        ("blue", BLUE),
        ("yellow", Rgb565::new(31, 63, 0)),
        ("cyan", Rgb565::new(0, 63, 31)),
        ("magenta", Rgb565::new(31, 0, 31)),
        ("gray", rgb888(0x88, 0x88, 0x88)),
    ];

    NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, color)| color)
}

/// Render a color as `#RRGGBB` (channels widened from RGB565).
pub fn format_color(color: Rgb565) -> heapless::String<8> {
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;

    let wide = Rgb888::from(color);
    let mut out = heapless::String::new();
    let _ = write!(out, "#{:02X}{:02X}{:02X}", wide.r(), wide.g(), wide.b());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn defaults_follow_scaled_density() {
        let attrs = CounterAttributes::default();
        assert_eq!(attrs.text_size, 64);
        assert_eq!(attrs.text_color, WHITE);
        assert_eq!(attrs.circle_color, BLUE);
        assert_eq!(attrs.padding, Padding::default());

        let dense = DisplayMetrics {
            density: 2.0,
            scaled_density: 2.5,
        };
        assert_eq!(CounterAttributes::defaults(&dense).text_size, 160);
    }

    #[test]
    fn dimension_units() {
        let metrics = DisplayMetrics {
            density: 2.0,
            scaled_density: 3.0,
        };
        assert_eq!(parse_dimension("10sp", &metrics), Ok(30));
        assert_eq!(parse_dimension("10dp", &metrics), Ok(20));
        assert_eq!(parse_dimension("10dip", &metrics), Ok(20));
        assert_eq!(parse_dimension("10px", &metrics), Ok(10));
        assert_eq!(parse_dimension(" 12 ", &metrics), Ok(12));
        assert_eq!(parse_dimension("1.25dp", &metrics), Ok(3));
    }

    #[test]
    fn malformed_dimensions_are_rejected() {
        let metrics = DisplayMetrics::default();
        for bad in ["", "sp", "-4px", "big", "NaN", "inf"] {
            assert!(
                matches!(
                    parse_dimension(bad, &metrics),
                    Err(AttributeError::InvalidDimension(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn hex_and_named_colors() {
        assert_eq!(parse_color("#FFFFFF"), Ok(WHITE));
        assert_eq!(parse_color("#f00"), Ok(RED));
        assert_eq!(parse_color("#800000FF"), Ok(BLUE));
        assert_eq!(parse_color("Blue"), Ok(BLUE));
        assert_eq!(parse_color(" red "), Ok(RED));
        assert_eq!(parse_color("#123456"), Ok(rgb888(0x12, 0x34, 0x56)));
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for bad in ["#12345", "#GGGGGG", "chartreuse", "#", "#+12"] {
            assert!(
                matches!(parse_color(bad), Err(AttributeError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_messages_carry_value() {
        let err = parse_color("nope").unwrap_err();
        assert_eq!(alloc::format!("{err}"), "invalid color value: nope");
    }

    #[test]
    fn attributes_override_defaults() {
        let attrs = CounterAttributes::from_attributes(
            [
                ("textSize", "32px"),
                ("textColor", "#000000"),
                ("circleColor", "red"),
                ("paddingLeft", "4"),
                ("paddingBottom", "6"),
                ("android:id", "@+id/counter"),
            ],
            &DisplayMetrics::default(),
        );
        assert_eq!(attrs.text_size, 32);
        assert_eq!(attrs.text_color, BLACK);
        assert_eq!(attrs.circle_color, RED);
        assert_eq!(attrs.padding, Padding::new(0, 0, 6, 4));
    }

    #[test]
    fn uniform_padding_wins_over_sides() {
        let attrs = CounterAttributes::from_attributes(
            [("paddingLeft", "4"), ("padding", "10"), ("paddingTop", "1")],
            &DisplayMetrics::default(),
        );
        assert_eq!(attrs.padding, Padding::all(10));
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let attrs = CounterAttributes::from_attributes(
            [
                ("textSize", "huge"),
                ("textColor", "#zz"),
                ("circleColor", ""),
            ],
            &DisplayMetrics::default(),
        );
        assert_eq!(attrs, CounterAttributes::default());
    }

    #[test]
    fn compiled_resource_round_trip() {
        let resource = AttributeResource {
            text_size: Some("20sp"),
            circle_color: Some("#00FF00"),
            ..Default::default()
        };
        let bytes: Vec<u8> = postcard::to_allocvec(&resource).unwrap();

        let attrs = CounterAttributes::from_resource(&bytes, &DisplayMetrics::default());
        assert_eq!(attrs.text_size, 20);
        assert_eq!(attrs.circle_color, Rgb565::new(0, 63, 0));
        assert_eq!(attrs.text_color, WHITE);
    }

    #[test]
    fn undecodable_resource_yields_defaults() {
        assert_eq!(decode_resource(&[0xFF]), Err(AttributeError::Decode));
        let attrs = CounterAttributes::from_resource(&[0xFF, 0x01], &DisplayMetrics::default());
        assert_eq!(attrs, CounterAttributes::default());
    }

    #[test]
    fn format_color_widens_channels() {
        assert_eq!(format_color(WHITE).as_str(), "#FFFFFF");
        assert_eq!(format_color(RED).as_str(), "#FF0000");
        assert_eq!(format_color(BLACK).as_str(), "#000000");
    }
}
