//! A single timed interpolation between two values

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::easing::Easing;

/// Values a [`Tween`] can interpolate.
pub trait Interpolate: Copy {
    /// Value at `fraction` of the way from `from` to `to`. `fraction` may
    /// leave `0.0..=1.0` slightly for overshooting easings.
    fn interpolate(from: Self, to: Self, fraction: f32) -> Self;
}

impl Interpolate for i32 {
    /// Truncates the whole interpolated value toward zero.
    fn interpolate(from: Self, to: Self, fraction: f32) -> Self {
        (from as f32 + fraction * (to - from) as f32) as i32
    }
}

impl Interpolate for Rgb565 {
    /// Linear per channel, rounded to the nearest step of each channel.
    fn interpolate(from: Self, to: Self, fraction: f32) -> Self {
        Rgb565::new(
            lerp_channel(from.r(), to.r(), fraction, Rgb565::MAX_R),
            lerp_channel(from.g(), to.g(), fraction, Rgb565::MAX_G),
            lerp_channel(from.b(), to.b(), fraction, Rgb565::MAX_B),
        )
    }
}

fn lerp_channel(from: u8, to: u8, fraction: f32, max: u8) -> u8 {
    let value = from as f32 + fraction * (to as f32 - from as f32);
    // Manual rounding: `f32::round` is not available without std.
    let rounded = (value + 0.5) as i32;
    rounded.clamp(0, max as i32) as u8
}

/// Interpolation from `from` to `to` over `duration`.
///
/// The clock starts on the first call to [`Tween::sample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: Duration,
    easing: Easing,
    started_at: Option<Instant>,
    finished: bool,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::Linear,
            started_at: None,
            finished: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Linear progress in `0.0..=1.0` at `now`.
    fn progress(&mut self, now: Instant) -> f32 {
        let start = *self.started_at.get_or_insert(now);
        let elapsed = now.checked_duration_since(start).unwrap_or(Duration::MIN);
        let total = self.duration.as_ticks();
        if total == 0 || elapsed >= self.duration {
            return 1.0;
        }
        elapsed.as_ticks() as f32 / total as f32
    }

    /// Value for the frame at `now`, or `None` once the final value has
    /// already been produced.
    pub fn sample(&mut self, now: Instant) -> Option<T> {
        if self.finished {
            return None;
        }

        let progress = self.progress(now);
        if progress >= 1.0 {
            self.finished = true;
            return Some(self.to);
        }

        Some(T::interpolate(
            self.from,
            self.to,
            self.easing.apply(progress),
        ))
    }
}
