//! Desktop simulator hosting the circle counter badge.
//!
//! Renders one badge above an "Increment" and a "Reset" button in an SDL2
//! window via `embedded-graphics-simulator`. Mouse input is forwarded as
//! touch events, so holding the mouse button on the badge exercises the
//! long-press reset.
//!
//! # Key bindings
//!
//! | Key   | Action            |
//! |-------|-------------------|
//! | Space | Increment         |
//! | R     | Reset             |
//! | Q     | Quit              |

use std::time::Duration as StdDuration;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, info, trace};

use counter_core::framebuffer::FrameBuffer;
use counter_core::gesture::LongPressDetector;
use counter_core::ui::styling::colors::COLOR_BACKGROUND;
use counter_core::ui::styling::{RED, WHITE, rgb888};
use counter_core::ui::{
    Action, Button, ButtonPalette, CounterBadge, Drawable, MeasureSpec, Measurable, TouchEvent,
    TouchPoint, TouchResult, Touchable,
};
use counter_core::{CounterAttributes, DisplayMetrics};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~60 FPS).
const FRAME_DURATION: StdDuration = StdDuration::from_millis(16);

/// Movement allowed while holding the badge before the long press is dropped.
const MOUSE_TOUCH_SLOP_PX: u16 = 12;

const RESET_BUTTON: Rgb565 = rgb888(196, 64, 64);
const RESET_BUTTON_PRESSED: Rgb565 = rgb888(150, 40, 40);

const BUTTON_SIZE: Size = Size::new(130, 40);
const BUTTON_MARGIN_PX: i32 = 20;

/// Style attributes of the badge, as a layout file would declare them.
const COUNTER_ATTRIBUTES: [(&str, &str); 3] = [
    ("textSize", "64sp"),
    ("textColor", "white"),
    ("circleColor", "blue"),
];

// ---------------------------------------------------------------------------
// Host screen
// ---------------------------------------------------------------------------

/// The badge and the two controls wired to it.
struct HostScreen {
    counter: CounterBadge,
    increment: Button,
    reset: Button,
}

impl HostScreen {
    fn new() -> Self {
        let attrs =
            CounterAttributes::from_attributes(COUNTER_ATTRIBUTES, &DisplayMetrics::default());
        // Mouse pointers wobble more than fingers on a small panel.
        let mut counter = CounterBadge::new(&attrs)
            .with_long_press(LongPressDetector::new().with_touch_slop(MOUSE_TOUCH_SLOP_PX));

        let button_top = DISPLAY_HEIGHT_PX as i32 - BUTTON_SIZE.height as i32 - BUTTON_MARGIN_PX;
        let size = counter.measure(
            MeasureSpec::AtMost(DISPLAY_WIDTH_PX),
            MeasureSpec::AtMost((button_top - BUTTON_MARGIN_PX / 2).max(0) as u32),
        );
        // The circle follows the width; keep it square so it fits vertically.
        let side = size.width.min(size.height);
        let left = (DISPLAY_WIDTH_PX - side) as i32 / 2;
        counter.set_bounds(Rectangle::new(Point::new(left, 8), Size::new(side, side)));
        info!("Counter measured {}x{}, laid out {}x{}", size.width, size.height, side, side);

        let increment = Button::new(
            Rectangle::new(Point::new(BUTTON_MARGIN_PX, button_top), BUTTON_SIZE),
            "Increment",
            Action::Increment,
        );
        let reset = Button::new(
            Rectangle::new(
                Point::new(
                    DISPLAY_WIDTH_PX as i32 - BUTTON_MARGIN_PX - BUTTON_SIZE.width as i32,
                    button_top,
                ),
                BUTTON_SIZE,
            ),
            "Reset",
            Action::Reset,
        )
        .with_palette(ButtonPalette {
            normal: RESET_BUTTON,
            pressed: RESET_BUTTON_PRESSED,
            label: WHITE,
        });

        Self {
            counter,
            increment,
            reset,
        }
    }

    fn perform(&mut self, action: Action) {
        info!("Action {:?}", action);
        match action {
            Action::Increment => {
                self.counter.increment();
                self.counter.set_circle_color(RED);
            }
            Action::Reset => self.counter.reset(),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) {
        for result in [
            self.increment.handle_touch(event),
            self.reset.handle_touch(event),
            self.counter.handle_touch(event),
        ] {
            if let TouchResult::Action(action) = result {
                self.perform(action);
            }
        }
    }

    fn is_dirty(&self) -> bool {
        let regions = [
            self.counter.dirty_region(),
            self.increment.dirty_region(),
            self.reset.dirty_region(),
        ];
        regions
            .iter()
            .flatten()
            .inspect(|region| trace!("Dirty {:?}", region.bounds))
            .count()
            > 0
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        display.clear(COLOR_BACKGROUND)?;
        self.counter.draw(display)?;
        self.increment.draw(display)?;
        self.reset.draw(display)?;

        self.counter.mark_clean();
        self.increment.mark_clean();
        self.reset.mark_clean();
        Ok(())
    }
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting counter simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: Space=Increment  R=Reset  Q=Quit; hold the badge to reset");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Counter Simulator", &output_settings);

    let mut back_buffer = FrameBuffer::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let mut screen = HostScreen::new();
    let mut mouse_down = false;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = screen.draw(&mut back_buffer);
    let _ = back_buffer.flush(&mut display, Point::zero());
    window.update(&display);

    'running: loop {
        let frame_start = std::time::Instant::now();
        let now = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::Space => screen.perform(Action::Increment),
                    Keycode::R => screen.perform(Action::Reset),
                    _ => {}
                },

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    screen.handle_touch(TouchEvent::Press {
                        point: touch_point(point),
                        at: now,
                    });
                }

                SimulatorEvent::MouseMove { point } if mouse_down => {
                    screen.handle_touch(TouchEvent::Drag {
                        point: touch_point(point),
                        at: now,
                    });
                }

                SimulatorEvent::MouseButtonUp { point, .. } => {
                    mouse_down = false;
                    screen.handle_touch(TouchEvent::Release {
                        point: touch_point(point),
                        at: now,
                    });
                }

                _ => {}
            }
        }

        // --- Frame tick -----------------------------------------------------
        screen.counter.update(now);

        // --- Render -------------------------------------------------------
        if screen.is_dirty() {
            if let Err(e) = screen.draw(&mut back_buffer) {
                log::error!("Draw error: {:?}", e);
            }
            if let Err(e) = back_buffer.flush(&mut display, Point::zero()) {
                log::error!("Flush error: {:?}", e);
            }
            debug!(
                "count={} animating={}",
                screen.counter.count(),
                screen.counter.is_animating()
            );
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
