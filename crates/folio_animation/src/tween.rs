//! Duration-based tweens
//!
//! A tween eases a value from where it currently is to a target over a
//! fixed duration. Retargeting mid-flight restarts from the current value,
//! the same overwrite behaviour as firing a new `to()` tween at an element
//! that is already moving.

use crate::easing::Easing;

/// Shortest allowed duration (one 120 Hz frame); nothing moves instantly
pub const MIN_DURATION: f32 = 1.0 / 120.0;

/// A retargetable eased interpolation
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    value: f32,
    elapsed: f32,
    duration: f32,
    delay: f32,
    easing: Easing,
}

impl Tween {
    /// A finished tween resting at `initial`
    pub fn new(initial: f32) -> Self {
        Self {
            from: initial,
            to: initial,
            value: initial,
            elapsed: MIN_DURATION,
            duration: MIN_DURATION,
            delay: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Start easing toward `to` from the current value
    pub fn retarget(&mut self, to: f32, duration: f32, easing: Easing) {
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;
        self.delay = 0.0;
        self.duration = sanitize_duration(duration);
        self.easing = easing;
    }

    /// Same as [`Tween::retarget`] but holds still for `delay` seconds first
    pub fn retarget_delayed(&mut self, to: f32, duration: f32, delay: f32, easing: Easing) {
        self.retarget(to, duration, easing);
        self.delay = delay.max(0.0);
    }

    /// Place the value without animating (initial layout only)
    pub fn set_immediate(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.value = value;
        self.elapsed = self.duration;
        self.delay = 0.0;
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() || self.is_finished() {
            return;
        }

        let mut dt = dt;
        if self.delay > 0.0 {
            let consumed = dt.min(self.delay);
            self.delay -= consumed;
            dt -= consumed;
            if dt <= 0.0 {
                return;
            }
        }

        self.elapsed = (self.elapsed + dt).min(self.duration);
        // Frame deltas summed in f32 land a hair short of the duration
        if self.duration - self.elapsed < 1e-5 {
            self.elapsed = self.duration;
        }
        let progress = self.easing.apply(self.elapsed / self.duration);
        self.value = self.from + (self.to - self.from) * progress;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Time left including any pending delay
    pub fn remaining(&self) -> f32 {
        self.delay + (self.duration - self.elapsed).max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.delay <= 0.0 && self.elapsed >= self.duration
    }
}

fn sanitize_duration(duration: f32) -> f32 {
    if duration.is_finite() {
        duration.max(MIN_DURATION)
    } else {
        MIN_DURATION
    }
}
