//! Scaled monospace text for the counter badge
//!
//! embedded-graphics ships bitmap fonts that top out at 20 px. Counter
//! digits are usually requested much larger than that, so text is rendered
//! with the closest mono font and blown up by an integer factor through
//! [`ScaledTarget`].

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};

/// Mono fonts to pick from, ordered by cell height.
const FONTS: [&MonoFont<'static>; 8] = [
    &ascii::FONT_4X6,
    &ascii::FONT_5X8,
    &ascii::FONT_6X10,
    &ascii::FONT_6X13,
    &ascii::FONT_7X14,
    &ascii::FONT_9X15,
    &ascii::FONT_9X18,
    &ascii::FONT_10X20,
];

/// Text style of the counter digits: font, integer scale and color.
#[derive(Clone, Copy)]
pub struct CounterTextStyle {
    font: &'static MonoFont<'static>,
    scale: u32,
    color: Rgb565,
}

impl core::fmt::Debug for CounterTextStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CounterTextStyle")
            .field("cell", &self.font.character_size)
            .field("scale", &self.scale)
            .field("color", &self.color)
            .finish()
    }
}

impl CounterTextStyle {
    pub fn new(font: &'static MonoFont<'static>, scale: u32, color: Rgb565) -> Self {
        Self {
            font,
            scale: scale.max(1),
            color,
        }
    }

    /// Pick the font and scale whose rendered cell height is closest to
    /// `text_size` pixels. Ties go to the larger font.
    pub fn from_text_size(text_size: u32, color: Rgb565) -> Self {
        let target = text_size.max(1);
        let mut best = (FONTS[0], 1u32, u32::MAX);

        for font in FONTS {
            let cell = font.character_size.height;
            let scale = ((target + cell / 2) / cell).max(1);
            let error = (cell * scale).abs_diff(target);
            if error <= best.2 {
                best = (font, scale, error);
            }
        }

        Self::new(best.0, best.1, color)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    /// Rendered cell height in pixels.
    pub fn line_height(&self) -> u32 {
        self.font.character_size.height * self.scale
    }

    fn mono_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font, self.color)
    }

    /// Horizontal advance of `text` in pixels.
    pub fn measure_width(&self, text: &str) -> u32 {
        let metrics = self
            .mono_style()
            .measure_string(text, Point::zero(), Baseline::Alphabetic);
        metrics.next_position.x.max(0) as u32 * self.scale
    }

    /// Height of the rows `text` actually inks, in pixels.
    ///
    /// Blank rows of the font cell above and below the glyphs are not
    /// counted, so digits center on their visible shape.
    pub fn ink_height(&self, text: &str) -> u32 {
        let mut ink = InkRows::default();
        let glyphs = Text::with_baseline(text, Point::zero(), self.mono_style(), Baseline::Alphabetic);
        let Ok(_) = glyphs.draw(&mut ink);
        ink.height() * self.scale
    }

    /// Draw `text` with its baseline starting at `baseline_left`.
    pub fn draw<D>(&self, text: &str, baseline_left: Point, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut scaled = ScaledTarget::new(display, baseline_left, self.scale);
        Text::with_baseline(text, Point::zero(), self.mono_style(), Baseline::Alphabetic)
            .draw(&mut scaled)?;
        Ok(())
    }
}

/// Records which rows receive pixels without drawing anything.
#[derive(Default)]
struct InkRows {
    rows: Option<(i32, i32)>,
}

impl InkRows {
    fn height(&self) -> u32 {
        self.rows.map_or(0, |(top, bottom)| (bottom - top + 1) as u32)
    }
}

impl Dimensions for InkRows {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::new(-4096, -4096), Size::new(8192, 8192))
    }
}

impl DrawTarget for InkRows {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, _) in pixels {
            self.rows = Some(match self.rows {
                Some((top, bottom)) => (top.min(point.y), bottom.max(point.y)),
                None => (point.y, point.y),
            });
        }
        Ok(())
    }
}

/// `DrawTarget` adapter that draws every pixel as a `scale x scale` block
/// placed relative to `origin` on the wrapped target.
pub struct ScaledTarget<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<'a, D: DrawTarget> ScaledTarget<'a, D> {
    pub fn new(target: &'a mut D, origin: Point, scale: u32) -> Self {
        Self {
            target,
            origin,
            scale: scale.max(1),
        }
    }

    fn map(&self, point: Point) -> Point {
        self.origin + point * self.scale as i32
    }
}

impl<D: DrawTarget> Dimensions for ScaledTarget<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        let scale = self.scale as i32;
        Rectangle::new(
            (outer.top_left - self.origin) / scale - Point::new(1, 1),
            outer.size / self.scale + Size::new(2, 2),
        )
    }
}

impl<D: DrawTarget> DrawTarget for ScaledTarget<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new(self.scale, self.scale);
        for Pixel(point, color) in pixels {
            let area = Rectangle::new(self.map(point), block);
            self.target.fill_solid(&area, color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let scaled = Rectangle::new(self.map(area.top_left), area.size * self.scale);
        self.target.fill_solid(&scaled, color)
    }
}
