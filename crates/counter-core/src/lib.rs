//! Hardware-independent core library for the circle counter badge
//!
//! This crate contains the platform-agnostic pieces of the counter widget:
//! measurement, drawing, long-press detection, the animated reset and the
//! declarative style attributes it is configured from.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).
//!
//! The host owns the display and the frame loop. Each frame it forwards
//! touch input through [`ui::Touchable::handle_touch`], advances the widget
//! with [`CounterBadge::update`] and redraws when [`ui::Drawable::is_dirty`]
//! reports a pending redraw.

#![no_std]

extern crate alloc;

pub mod animation;
pub mod config;
pub mod framebuffer;
pub mod gesture;
pub mod ui;

pub use config::{AttributeError, CounterAttributes, DisplayMetrics};
pub use ui::components::counter::{CounterBadge, MAX_COUNT, RESET_DURATION};
