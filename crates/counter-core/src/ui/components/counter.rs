//! Circular counter badge

use alloc::vec::Vec;
use core::fmt::Write;

use embassy_time::{Duration, Instant};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use log::{debug, trace};

use crate::animation::{Easing, Tween};
use crate::config::{CounterAttributes, format_color};
use crate::gesture::{Gesture, LongPressDetector};
use crate::ui::core::{
    Drawable, MeasureSpec, Measurable, TouchEvent, TouchPoint, TouchResult, Touchable,
};
use crate::ui::styling::{Padding, RESET_RED};
use crate::ui::text::CounterTextStyle;

/// Largest value the badge displays.
pub const MAX_COUNT: u16 = 9999;

/// Length of the animated reset.
pub const RESET_DURATION: Duration = Duration::from_millis(2000);

/// Widest text the badge ever shows; sizing reserves room for it.
const MAX_COUNT_TEXT: &str = "9999";

/// One in-flight interpolation of the animated reset.
#[derive(Debug, Clone, Copy)]
enum Track {
    Count(Tween<i32>),
    Color(Tween<Rgb565>),
}

impl Track {
    fn is_finished(&self) -> bool {
        match self {
            Track::Count(tween) => tween.is_finished(),
            Track::Color(tween) => tween.is_finished(),
        }
    }
}

/// A filled circle showing a count between 0 and [`MAX_COUNT`].
///
/// # Mutation contract
/// Every mutator clamps the value, recomputes the displayed text and then
/// marks the badge dirty, in that order. The host redraws when
/// [`Drawable::is_dirty`] is set.
///
/// # Animated reset
/// [`reset`](Self::reset) queues two independent tracks over
/// [`RESET_DURATION`]: the count bounces down to zero and the circle fades
/// linearly to red. Tracks start on the next [`update`](Self::update).
/// Calling `reset` again while animating queues another pair without
/// cancelling the first; each frame applies tracks in the order they were
/// queued, so the newest one wins.
///
/// # Touch
/// Holding a press on the badge for the long-press timeout triggers
/// `reset`. No other gesture is recognised; taps are left to the host.
///
/// # Examples
/// ```ignore
/// let mut badge = CounterBadge::new(&CounterAttributes::default());
/// let size = badge.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
/// badge.set_bounds(Rectangle::new(Point::new(80, 20), size));
///
/// badge.increment();
/// badge.reset();
/// badge.update(Instant::now());
/// ```
#[derive(Debug)]
pub struct CounterBadge {
    bounds: Rectangle,
    padding: Padding,
    count: u16,
    count_text: heapless::String<4>,
    circle_color: Rgb565,
    text_style: CounterTextStyle,
    long_press: LongPressDetector,
    tracks: Vec<Track>,
    dirty: bool,
}

impl CounterBadge {
    /// Create a badge at zero, styled from `attributes`.
    ///
    /// Bounds start empty; the host assigns them after measuring.
    pub fn new(attributes: &CounterAttributes) -> Self {
        let mut badge = Self {
            bounds: Rectangle::zero(),
            padding: attributes.padding,
            count: 0,
            count_text: heapless::String::new(),
            circle_color: attributes.circle_color,
            text_style: CounterTextStyle::from_text_size(
                attributes.text_size,
                attributes.text_color,
            ),
            long_press: LongPressDetector::new(),
            tracks: Vec::new(),
            dirty: true,
        };
        badge.set_count(0);
        debug!(
            "counter created: {:?}, circle {}",
            badge.text_style,
            format_color(badge.circle_color)
        );
        badge
    }

    /// Replace the long-press detector (custom timeout or slop).
    pub fn with_long_press(mut self, detector: LongPressDetector) -> Self {
        self.long_press = detector;
        self
    }

    /// Current count, always within `0..=MAX_COUNT`.
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Decimal rendering of the count.
    pub fn count_text(&self) -> &str {
        &self.count_text
    }

    pub fn circle_color(&self) -> Rgb565 {
        self.circle_color
    }

    pub fn text_style(&self) -> &CounterTextStyle {
        &self.text_style
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Whether any reset track is still running.
    pub fn is_animating(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Set the count, clamped to `0..=MAX_COUNT`, and request a redraw.
    pub fn set_count(&mut self, value: i32) {
        self.count = value.clamp(0, MAX_COUNT as i32) as u16;
        self.count_text.clear();
        // Four digits always fit.
        let _ = write!(self.count_text, "{}", self.count);
        self.dirty = true;
    }

    /// Add one, saturating at [`MAX_COUNT`].
    pub fn increment(&mut self) {
        self.set_count(self.count as i32 + 1);
    }

    /// Set the circle fill immediately, without animation.
    pub fn set_circle_color(&mut self, color: Rgb565) {
        self.circle_color = color;
        self.dirty = true;
    }

    /// Start the animated reset from the current count and color.
    pub fn reset(&mut self) {
        debug!(
            "reset from {} ({} track(s) already running)",
            self.count,
            self.tracks.len()
        );

        self.tracks.push(Track::Count(
            Tween::new(self.count as i32, 0, RESET_DURATION).with_easing(Easing::Bounce),
        ));
        self.tracks.push(Track::Color(Tween::new(
            self.circle_color,
            RESET_RED,
            RESET_DURATION,
        )));
    }

    /// Frame callback: fire a due long press, then advance the reset tracks.
    pub fn update(&mut self, now: Instant) {
        if let Some(Gesture::LongPress(point)) = self.long_press.poll(now) {
            debug!("long press at ({}, {})", point.x, point.y);
            self.reset();
        }

        if self.tracks.is_empty() {
            return;
        }

        let mut tracks = core::mem::take(&mut self.tracks);
        for track in tracks.iter_mut() {
            match track {
                Track::Count(tween) => {
                    if let Some(value) = tween.sample(now) {
                        trace!("reset frame: count {}", value);
                        self.set_count(value);
                    }
                }
                Track::Color(tween) => {
                    if let Some(color) = tween.sample(now) {
                        self.set_circle_color(color);
                    }
                }
            }
        }
        tracks.retain(|track| !track.is_finished());
        self.tracks = tracks;

        if self.tracks.is_empty() {
            debug!("reset animation settled at {}", self.count);
        }
    }

    /// Assign the rectangle the host laid the badge out in.
    pub fn set_bounds(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }
}

impl Measurable for CounterBadge {
    /// Desired size reserves the width of `"9999"` plus padding on both axes,
    /// so the badge never has to grow as the count does.
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let max_text_width = self.text_style.measure_width(MAX_COUNT_TEXT);
        Size::new(
            width.resolve(max_text_width + self.padding.horizontal()),
            height.resolve(max_text_width + self.padding.vertical()),
        )
    }
}

impl Drawable for CounterBadge {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let center = self.bounds.center();

        Circle::with_center(center, self.bounds.size.width)
            .into_styled(PrimitiveStyle::with_fill(self.circle_color))
            .draw(display)?;

        let text_width = self.text_style.measure_width(&self.count_text);
        let text_height = self.text_style.ink_height(&self.count_text);
        let baseline_left = Point::new(
            center.x - (text_width / 2) as i32,
            center.y + (text_height / 2) as i32,
        );

        self.text_style.draw(&self.count_text, baseline_left, display)
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

impl Touchable for CounterBadge {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    /// Presses outside the bounds are ignored. Once a press has started on
    /// the badge its drags and release are followed wherever they go.
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if let TouchEvent::Press { point, .. } = event
            && !self.contains_point(point)
        {
            return TouchResult::NotHandled;
        }
        if !matches!(event, TouchEvent::Press { .. }) && !self.long_press.is_tracking() {
            return TouchResult::NotHandled;
        }

        if let Some(Gesture::LongPress(point)) = self.long_press.on_touch(event) {
            debug!("long press at ({}, {})", point.x, point.y);
            self.reset();
        }
        TouchResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayMetrics;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::{BLACK, BLUE, RED, WHITE};
    use alloc::string::ToString;

    fn ms(v: u64) -> Instant {
        Instant::from_millis(v)
    }

    fn badge() -> CounterBadge {
        CounterBadge::new(&CounterAttributes::default())
    }

    fn laid_out(text_size: u32) -> CounterBadge {
        let attrs = CounterAttributes {
            text_size,
            ..CounterAttributes::default()
        };
        let mut badge = CounterBadge::new(&attrs);
        let size = badge.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        badge.set_bounds(Rectangle::new(Point::zero(), size));
        badge
    }

    fn press(x: u16, y: u16, at: u64) -> TouchEvent {
        TouchEvent::Press {
            point: TouchPoint::new(x, y),
            at: ms(at),
        }
    }

    fn release(x: u16, y: u16, at: u64) -> TouchEvent {
        TouchEvent::Release {
            point: TouchPoint::new(x, y),
            at: ms(at),
        }
    }

    #[test]
    fn starts_at_zero_with_configured_color() {
        let badge = badge();
        assert_eq!(badge.count(), 0);
        assert_eq!(badge.count_text(), "0");
        assert_eq!(badge.circle_color(), BLUE);
        assert!(badge.is_dirty());
        assert!(!badge.is_animating());
    }

    #[test]
    fn increments_count_up() {
        let mut badge = badge();
        for _ in 0..37 {
            badge.increment();
        }
        assert_eq!(badge.count(), 37);
        assert_eq!(badge.count_text(), "37");
    }

    #[test]
    fn increment_saturates_at_max() {
        let mut badge = badge();
        for _ in 0..10_050 {
            badge.increment();
        }
        assert_eq!(badge.count(), MAX_COUNT);
        assert_eq!(badge.count_text(), "9999");
    }

    #[test]
    fn text_is_plain_decimal() {
        let mut badge = badge();
        for value in [0, 7, 42, 100, 1000, 9999] {
            badge.set_count(value);
            assert_eq!(badge.count_text(), value.to_string());
        }
    }

    #[test]
    fn set_count_clamps() {
        let mut badge = badge();
        badge.set_count(10_005);
        assert_eq!(badge.count(), 9999);
        badge.set_count(-3);
        assert_eq!(badge.count(), 0);
        assert_eq!(badge.count_text(), "0");
    }

    #[test]
    fn max_count_text_matches_max_count() {
        assert_eq!(MAX_COUNT_TEXT, MAX_COUNT.to_string());
    }

    #[test]
    fn mutations_request_redraw() {
        let mut badge = badge();
        badge.mark_clean();
        badge.increment();
        assert!(badge.is_dirty());

        badge.mark_clean();
        badge.set_circle_color(RED);
        assert!(badge.is_dirty());
        assert_eq!(badge.circle_color(), RED);

        badge.mark_clean();
        badge.set_count(3);
        assert!(badge.dirty_region().is_some());
    }

    #[test]
    fn reset_reaches_zero_and_red() {
        let mut badge = badge();
        badge.set_count(50);
        badge.reset();
        assert!(badge.is_animating());

        badge.update(ms(1_000));
        assert_eq!(badge.count(), 50);
        assert_eq!(badge.circle_color(), BLUE);

        badge.update(ms(2_000));
        assert!(badge.count() <= 50);
        assert_ne!(badge.circle_color(), BLUE);
        assert_ne!(badge.circle_color(), RED);

        badge.update(ms(3_000));
        assert_eq!(badge.count(), 0);
        assert_eq!(badge.circle_color(), RED);
        assert!(!badge.is_animating());
    }

    #[test]
    fn reset_bounce_touches_zero_on_first_landing() {
        let mut badge = badge();
        badge.set_count(50);
        badge.reset();
        badge.update(ms(0));

        // First landing of the bounce curve is at ~31.5% of the run.
        badge.update(ms(628));
        assert_eq!(badge.count(), 0);
        assert_eq!(badge.count_text(), "0");

        // Then the number bounces back up before settling.
        badge.update(ms(974));
        assert!(badge.count() > 0);
        assert!(badge.is_animating());
    }

    #[test]
    fn reset_frames_stay_in_range() {
        let mut badge = badge();
        badge.set_count(800);
        badge.reset();
        let mut t = 0;
        while t <= 2_000 {
            badge.update(ms(t));
            assert!(badge.count() <= 800, "t={t} count={}", badge.count());
            t += 16;
        }
        badge.update(ms(2_016));
        assert_eq!(badge.count(), 0);
    }

    #[test]
    fn double_reset_settles_at_zero() {
        let mut badge = badge();
        badge.set_count(100);
        badge.reset();
        badge.update(ms(0));
        badge.update(ms(100));
        badge.reset();

        let mut t = 116;
        while t <= 2_400 {
            badge.update(ms(t));
            t += 16;
        }
        assert!(!badge.is_animating());
        assert_eq!(badge.count(), 0);
        assert_eq!(badge.circle_color(), RED);
    }

    #[test]
    fn newest_reset_writes_last() {
        let mut badge = badge();
        badge.set_count(100);
        badge.reset();
        badge.update(ms(0));
        badge.set_count(60);
        badge.reset();
        // Both tracks write this frame; the second one, still at its start
        // value, overrides the first.
        badge.update(ms(10));
        assert_eq!(badge.count(), 60);
    }

    #[test]
    fn reset_from_zero_only_changes_color() {
        let mut badge = badge();
        badge.reset();
        badge.update(ms(0));
        badge.update(ms(2_000));
        assert_eq!(badge.count(), 0);
        assert_eq!(badge.circle_color(), RED);
    }

    #[test]
    fn measured_size_ignores_count() {
        let mut badge = badge();
        let unconstrained = (MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        let expected = badge.measure(unconstrained.0, unconstrained.1);
        assert!(expected.width > 0);

        for value in [0, 9, 99, 999, 9999] {
            badge.set_count(value);
            assert_eq!(badge.measure(unconstrained.0, unconstrained.1), expected);
        }
    }

    #[test]
    fn measure_reserves_max_text_plus_padding() {
        let attrs = CounterAttributes {
            text_size: 20,
            padding: Padding::new(1, 2, 3, 4),
            ..CounterAttributes::default()
        };
        let badge = CounterBadge::new(&attrs);
        assert_eq!(badge.padding(), Padding::new(1, 2, 3, 4));
        let text = badge.text_style().measure_width("9999");
        assert_eq!(text, 40);

        assert_eq!(
            badge.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified),
            Size::new(46, 44)
        );
        assert_eq!(
            badge.measure(MeasureSpec::AtMost(30), MeasureSpec::Exactly(90)),
            Size::new(30, 90)
        );
    }

    #[test]
    fn attributes_flow_into_style() {
        let attrs = CounterAttributes::from_attributes(
            [("textSize", "20sp"), ("textColor", "black"), ("circleColor", "#FF0000")],
            &DisplayMetrics::default(),
        );
        let badge = CounterBadge::new(&attrs);
        assert_eq!(badge.text_style().line_height(), 20);
        assert_eq!(badge.text_style().color(), BLACK);
        assert_eq!(badge.circle_color(), RED);
    }

    #[test]
    fn long_press_resets_like_explicit_reset() {
        let mut pressed = laid_out(20);
        let mut explicit = laid_out(20);
        pressed.set_count(50);
        explicit.set_count(50);

        assert_eq!(pressed.handle_touch(press(20, 20, 0)), TouchResult::Handled);
        pressed.update(ms(300));
        assert!(!pressed.is_animating());
        pressed.update(ms(500));
        assert!(pressed.is_animating());

        explicit.update(ms(300));
        explicit.reset();
        explicit.update(ms(500));

        for t in [1_000, 1_700, 2_500] {
            pressed.update(ms(t));
            explicit.update(ms(t));
            assert_eq!(pressed.count(), explicit.count());
            assert_eq!(pressed.circle_color(), explicit.circle_color());
        }
        assert_eq!(pressed.count(), 0);
        assert_eq!(pressed.circle_color(), RED);

        assert_eq!(pressed.handle_touch(release(20, 20, 2_600)), TouchResult::Handled);
    }

    #[test]
    fn short_tap_does_not_reset() {
        let mut badge = laid_out(20);
        badge.set_count(5);
        badge.handle_touch(press(20, 20, 0));
        badge.handle_touch(release(20, 20, 100));
        badge.update(ms(1_000));
        assert!(!badge.is_animating());
        assert_eq!(badge.count(), 5);
    }

    #[test]
    fn press_outside_is_not_handled() {
        let mut badge = laid_out(20);
        assert_eq!(
            badge.handle_touch(press(500, 500, 0)),
            TouchResult::NotHandled
        );
        assert_eq!(
            badge.handle_touch(release(500, 500, 10)),
            TouchResult::NotHandled
        );
        badge.update(ms(1_000));
        assert!(!badge.is_animating());
    }

    #[test]
    fn draws_circle_and_centered_text() {
        let mut badge = laid_out(20);
        badge.set_count(8);
        let size = badge.bounds().size;
        assert_eq!(size, Size::new(40, 40));

        let mut fb = FrameBuffer::new(size);
        badge.draw(&mut fb).unwrap();

        let center = badge.bounds().center();
        // Corners are outside the circle.
        assert_eq!(fb.pixel(Point::new(0, 0)), Some(BLACK));
        assert_eq!(fb.pixel(Point::new(39, 39)), Some(BLACK));
        // Just inside the top edge is circle fill.
        assert_eq!(fb.pixel(Point::new(center.x, 2)), Some(BLUE));

        // The digit is white and sits roughly in the middle.
        let mut white = 0;
        let mut sum_x = 0;
        let mut sum_y = 0;
        for y in 0..40 {
            for x in 0..40 {
                if fb.pixel(Point::new(x, y)) == Some(WHITE) {
                    white += 1;
                    sum_x += x;
                    sum_y += y;
                }
            }
        }
        assert!(white > 0);
        assert!((sum_x / white - center.x).abs() <= 3);
        assert!((sum_y / white - center.y).abs() <= 4);
    }

    #[test]
    fn digits_center_on_their_ink() {
        let mut badge = laid_out(20);
        badge.set_count(8);
        let mut fb = FrameBuffer::new(badge.bounds().size);
        badge.draw(&mut fb).unwrap();

        let rows: Vec<i32> = (0..40)
            .filter(|&y| (0..40).any(|x| fb.pixel(Point::new(x, y)) == Some(WHITE)))
            .collect();
        let top = rows[0];
        let bottom = rows[rows.len() - 1];
        let center = badge.bounds().center();
        assert!((top + bottom - 2 * center.y).abs() <= 2, "ink rows {top}..={bottom}");
    }

    #[test]
    fn drawing_reflects_latest_color() {
        let mut badge = laid_out(20);
        badge.set_circle_color(RED);
        let mut fb = FrameBuffer::new(badge.bounds().size);
        badge.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(Point::new(20, 3)), Some(RED));
    }
}
