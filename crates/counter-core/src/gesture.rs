//! Long-press recognition on top of raw touch events
//!
//! The detector is fed every touch event of the element that owns it and
//! polled once per frame. A press that is held for [`LONG_PRESS_TIMEOUT`]
//! without wandering further than [`TOUCH_SLOP_PX`] reports a long press,
//! once, while the finger is still down.

use embassy_time::{Duration, Instant};
use log::debug;

use crate::ui::core::{TouchEvent, TouchPoint};

/// How long a press must be held to count as a long press.
pub const LONG_PRESS_TIMEOUT: Duration = Duration::from_millis(500);

/// Movement tolerated before a press stops being a candidate.
pub const TOUCH_SLOP_PX: u16 = 8;

/// Gestures the detector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    LongPress(TouchPoint),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PressState {
    Idle,
    /// Finger down, long press not yet reported
    Tracking { origin: TouchPoint, pressed_at: Instant },
    /// Long press already reported for this touch
    Fired,
}

/// Detects long presses from a stream of [`TouchEvent`]s.
#[derive(Debug, Clone)]
pub struct LongPressDetector {
    timeout: Duration,
    touch_slop: u16,
    state: PressState,
}

impl Default for LongPressDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LongPressDetector {
    pub fn new() -> Self {
        Self {
            timeout: LONG_PRESS_TIMEOUT,
            touch_slop: TOUCH_SLOP_PX,
            state: PressState::Idle,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: u16) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    /// Whether a finger that went down on the owner is still down and has
    /// not moved away.
    pub fn is_tracking(&self) -> bool {
        !matches!(self.state, PressState::Idle)
    }

    /// Feed one touch event.
    ///
    /// The deadline is checked at the event's own timestamp first, so a
    /// release arriving after the timeout still yields the long press that
    /// was due before it.
    pub fn on_touch(&mut self, event: TouchEvent) -> Option<Gesture> {
        let due = self.poll(event.at());

        match event {
            TouchEvent::Press { point, at } => {
                self.state = PressState::Tracking {
                    origin: point,
                    pressed_at: at,
                };
            }
            TouchEvent::Drag { point, .. } => {
                if let PressState::Tracking { origin, .. } = self.state
                    && self.beyond_slop(origin, point)
                {
                    debug!("long press cancelled: moved past slop");
                    self.state = PressState::Idle;
                }
            }
            TouchEvent::Release { .. } => {
                self.state = PressState::Idle;
            }
        }

        due
    }

    /// Report a long press whose deadline has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Gesture> {
        let PressState::Tracking { origin, pressed_at } = self.state else {
            return None;
        };

        let held = now.checked_duration_since(pressed_at)?;
        if held < self.timeout {
            return None;
        }

        self.state = PressState::Fired;
        Some(Gesture::LongPress(origin))
    }

    fn beyond_slop(&self, origin: TouchPoint, point: TouchPoint) -> bool {
        origin.x.abs_diff(point.x) > self.touch_slop || origin.y.abs_diff(point.y) > self.touch_slop
    }
}
