//! Folio Animation System
//!
//! Spring physics, eased tweens, and frame scheduling.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Duration-based easing that restarts from the current value
//!   when retargeted
//! - **Intervals**: Fixed-period timers advanced by frame deltas
//! - **Scheduler**: Slot-keyed storage that advances many animations at once
//!
//! Every animated value in the motion components goes through one of these,
//! so no component ever moves a value without easing.

pub mod easing;
pub mod interval;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use easing::{Easing, UnknownEasing};
pub use interval::IntervalTimer;
pub use scheduler::{AnimationScheduler, SpringId, TweenId};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;

/// Round to 3 decimal places, used for pixel offsets and angles that feed
/// transforms so frame-to-frame output doesn't jitter at sub-pixel scale
pub fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
