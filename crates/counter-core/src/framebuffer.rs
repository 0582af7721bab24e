//! Heap-backed framebuffer with per-pixel change detection.
//!
//! The host draws the widget into this RAM buffer and then flushes only the
//! rectangular region containing changed pixels to the real display.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }
}

/// Framebuffer implementing `DrawTarget<Color = Rgb565>`.
///
/// Tracks a dirty bounding box so that only changed pixels are flushed.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a new framebuffer of `size` filled with black pixels.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Color at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = self.index_of(point)?;
        Some(self.pixels[y * self.width + x])
    }

    /// Number of pixels that differ from `background`.
    pub fn lit_pixels(&self, background: Rgb565) -> usize {
        self.pixels.iter().filter(|&&c| c != background).count()
    }

    /// Smallest rectangle holding every pixel that differs from `background`.
    pub fn bounding_box_of(&self, background: Rgb565) -> Option<Rectangle> {
        let mut rect: Option<DirtyRect> = None;
        for (idx, color) in self.pixels.iter().enumerate() {
            if *color == background {
                continue;
            }
            let (x, y) = (idx % self.width, idx / self.width);
            match &mut rect {
                Some(r) => r.expand(x, y),
                None => rect = Some(DirtyRect::from_point(x, y)),
            }
        }
        rect.map(|r| {
            Rectangle::new(
                Point::new(r.min_x as i32, r.min_y as i32),
                Size::new((r.max_x - r.min_x + 1) as u32, (r.max_y - r.min_y + 1) as u32),
            )
        })
    }

    fn index_of(&self, point: Point) -> Option<(usize, usize)> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Write a single pixel, expanding the dirty rect only if the color changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Flush the dirty region to a display at `offset`, then reset the dirty state.
    ///
    /// If nothing changed, this is a no-op.
    pub fn flush<D>(&mut self, display: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let width = rect.max_x - rect.min_x + 1;
        let height = rect.max_y - rect.min_y + 1;

        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            width, height, rect.min_x, rect.min_y
        );

        let area = Rectangle::new(
            offset + Point::new(rect.min_x as i32, rect.min_y as i32),
            Size::new(width as u32, height as u32),
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some((x, y)) = self.index_of(coord) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };

        for y in clipped.top_left.y..=bottom_right.y {
            for x in clipped.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}
