//! Small animation toolkit: easing curves and dt-driven tweens.
//!
//! Everything here is driven by the frame delta the app computes in
//! `update()`; there are no timers or threads. A `Tween` advances by
//! `dt / duration` per frame and clamps at 1.0.

/// Linear interpolation between two values.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-out for smooth deceleration.
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Decelerating curve with a tunable strength: 1 - (1 - t)^(2*factor).
///
/// factor 1.0 matches [`ease_out_quad`]; factor 2.0 gives the softer
/// landing used by the pull-back and thumb-hide animations.
pub fn decelerate(t: f32, factor: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powf(2.0 * factor)
}

/// A value animating from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    duration: f32,
    progress: f32,
    factor: f32,
}

impl Tween {
    /// Decelerating tween (factor 1.0 = quadratic ease-out).
    pub fn new(from: f32, to: f32, duration: f32, factor: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(f32::EPSILON),
            progress: 0.0,
            factor,
        }
    }

    /// Advance by the frame delta and return the current value.
    pub fn update(&mut self, dt: f32) -> f32 {
        self.progress = (self.progress + dt / self.duration).min(1.0);
        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> f32 {
        lerp(self.from, self.to, decelerate(self.progress, self.factor))
    }

    /// Raw eased progress in 0..=1.
    pub fn eased_progress(&self) -> f32 {
        decelerate(self.progress, self.factor)
    }

    pub fn finished(&self) -> bool {
        self.progress >= 1.0
    }
}
