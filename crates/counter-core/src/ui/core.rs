//! Core UI traits and types shared by the widget and its host

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events delivered by the host, stamped with the host's frame clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// Finger down at a point
    Press { point: TouchPoint, at: Instant },
    /// Finger moved while down
    Drag { point: TouchPoint, at: Instant },
    /// Finger lifted
    Release { point: TouchPoint, at: Instant },
}

impl TouchEvent {
    pub fn point(&self) -> TouchPoint {
        match *self {
            TouchEvent::Press { point, .. }
            | TouchEvent::Drag { point, .. }
            | TouchEvent::Release { point, .. } => point,
        }
    }

    pub fn at(&self) -> Instant {
        match *self {
            TouchEvent::Press { at, .. }
            | TouchEvent::Drag { at, .. }
            | TouchEvent::Release { at, .. } => at,
        }
    }
}

/// Result from handling a touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to next element
    NotHandled,
    /// Event triggered an action
    Action(Action),
}

/// Actions the host's controls can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Bump the counter by one
    Increment,
    /// Run the animated reset
    Reset,
}

/// Size constraint handed down by the host for one axis.
///
/// Mirrors the exact / at-most / unspecified negotiation of a typical
/// layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The host dictates the size
    Exactly(u32),
    /// The element may be at most this large
    AtMost(u32),
    /// No constraint, take the desired size
    Unspecified,
}

impl MeasureSpec {
    /// Reconcile a desired size against this constraint.
    pub fn resolve(self, desired: u32) -> u32 {
        match self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(limit) => desired.min(limit),
            MeasureSpec::Unspecified => desired,
        }
    }
}

/// Dirty region tracking for efficient rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
    pub is_dirty: bool,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            is_dirty: true,
        }
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }
}

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Draw the element to the display within its bounds
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);

    /// Get the dirty region for partial updates
    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.bounds()))
        } else {
            None
        }
    }
}

/// Trait for UI elements that respond to touch events
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any action
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}

/// Trait for UI elements that negotiate their size with the host
pub trait Measurable {
    /// Compute the measured size under the host's per-axis constraints.
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size;
}
