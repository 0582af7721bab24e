//! Push button used by host screens to drive the counter

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Baseline, Text, TextStyleBuilder};

use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::ButtonPalette;

/// Rounded button with a text label that emits an [`Action`] when pressed.
///
/// # Touch Behavior
/// - Triggers its action immediately on an in-bounds press
/// - Shows the pressed color until released or dragged off
///
/// # Examples
/// ```ignore
/// let increment = Button::new(
///     Rectangle::new(Point::new(20, 180), Size::new(130, 44)),
///     "Increment",
///     Action::Increment,
/// );
/// ```
pub struct Button {
    bounds: Rectangle,
    label: heapless::String<32>,
    action: Action,
    pressed: bool,
    palette: ButtonPalette,
    corner_radius: u32,
    dirty: bool,
}

impl Button {
    /// Create a button. Labels longer than 32 bytes are cut short.
    pub fn new(bounds: Rectangle, label: &str, action: Action) -> Self {
        let mut label_string = heapless::String::new();
        for c in label.chars() {
            if label_string.push(c).is_err() {
                break;
            }
        }

        Self {
            bounds,
            label: label_string,
            action,
            pressed: false,
            palette: ButtonPalette::default(),
            corner_radius: 8,
            dirty: true,
        }
    }

    pub fn with_palette(mut self, palette: ButtonPalette) -> Self {
        self.palette = palette;
        self.dirty = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.dirty = true;
        }
    }

    fn fill(&self) -> Rgb565 {
        if self.pressed {
            self.palette.pressed
        } else {
            self.palette.normal
        }
    }
}

impl Drawable for Button {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let corner = Size::new(self.corner_radius, self.corner_radius);
        RoundedRectangle::with_equal_corners(self.bounds, corner)
            .into_styled(PrimitiveStyle::with_fill(self.fill()))
            .draw(display)?;

        let character_style = MonoTextStyle::new(&FONT_6X10, self.palette.label);
        let text_style = TextStyleBuilder::new()
            .alignment(TextAlignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(&self.label, self.bounds.center(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for Button {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press { point, .. } if self.contains_point(point) => {
                self.set_pressed(true);
                TouchResult::Action(self.action)
            }
            TouchEvent::Drag { point, .. } if self.pressed => {
                let over = self.contains_point(point);
                self.set_pressed(over);
                TouchResult::Handled
            }
            TouchEvent::Release { .. } if self.pressed => {
                self.set_pressed(false);
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use embassy_time::Instant;

    fn button() -> Button {
        Button::new(
            Rectangle::new(Point::new(10, 10), Size::new(80, 30)),
            "Reset",
            Action::Reset,
        )
    }

    fn at(x: u16, y: u16) -> (TouchPoint, Instant) {
        (TouchPoint::new(x, y), Instant::from_millis(0))
    }

    #[test]
    fn press_inside_emits_action() {
        let mut button = button();
        let (point, at) = at(20, 20);
        assert_eq!(
            button.handle_touch(TouchEvent::Press { point, at }),
            TouchResult::Action(Action::Reset)
        );
        assert!(button.is_pressed());

        assert_eq!(
            button.handle_touch(TouchEvent::Release { point, at }),
            TouchResult::Handled
        );
        assert!(!button.is_pressed());
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut button = button();
        let (point, at) = at(200, 200);
        assert_eq!(
            button.handle_touch(TouchEvent::Press { point, at }),
            TouchResult::NotHandled
        );
        assert!(!button.is_pressed());
    }

    #[test]
    fn dragging_off_releases_visual_state() {
        let mut button = button();
        let (inside, t) = at(20, 20);
        button.handle_touch(TouchEvent::Press { point: inside, at: t });
        button.mark_clean();

        let (outside, t) = at(150, 20);
        button.handle_touch(TouchEvent::Drag { point: outside, at: t });
        assert!(!button.is_pressed());
        assert!(button.is_dirty());
    }

    #[test]
    fn long_labels_are_truncated() {
        let long = "a label that is much longer than thirty-two bytes";
        let button = Button::new(Rectangle::zero(), long, Action::Increment);
        assert_eq!(button.label().len(), 32);
        assert_eq!(button.action(), Action::Increment);
    }

    #[test]
    fn draws_fill_and_label() {
        let button = button();
        let mut fb = FrameBuffer::new(Size::new(100, 50));
        button.draw(&mut fb).unwrap();

        let palette = ButtonPalette::default();
        assert_eq!(fb.pixel(Point::new(12, 25)), Some(palette.normal));
        assert_eq!(fb.pixel(Point::new(5, 5)), Some(Rgb565::BLACK));
        let label_pixels = (10..40)
            .flat_map(|y| (10..90).map(move |x| Point::new(x, y)))
            .filter(|&p| fb.pixel(p) == Some(palette.label))
            .count();
        assert!(label_pixels > 0);
    }
}
