//! Easing functions for animations

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Falls onto the end value and bounces a few times before settling.
    Bounce,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Bounce => bounce_out(t),
        }
    }
}

fn bounce(t: f32) -> f32 {
    t * t * 8.0
}

/// Piecewise-parabolic bounce. Each arc peaks lower than the one before,
/// landing at 1.0 when `t` reaches 1.0.
fn bounce_out(t: f32) -> f32 {
    let t = t * 1.1226;
    if t < 0.3535 {
        bounce(t)
    } else if t < 0.7408 {
        bounce(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        bounce(t - 0.8526) + 0.9
    } else {
        bounce(t - 1.0435) + 0.95
    }
}
