//! Spring physics
//!
//! A damped harmonic oscillator pulled toward a target:
//!
//! ```text
//! a = (-stiffness * (x - target) - damping * v) / mass
//! ```
//!
//! Integrated with RK4. Large frame deltas are split into fixed
//! sub-steps so a dropped frame doesn't destabilize stiff springs.
//! Retargeting keeps the current velocity, so interrupted motion stays
//! continuous.

use serde::{Deserialize, Serialize};

/// Largest integration step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Longest stretch simulated by one `step`; longer gaps are cut short
const MAX_STEP_DT: f32 = 1.0;

/// Distance and speed under which a spring counts as at rest
const REST_THRESHOLD: f32 = 0.001;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Fast, no visible overshoot
    pub const fn stiff() -> Self {
        Self::new(400.0, 40.0, 1.0)
    }

    /// Quick with a hint of overshoot
    pub const fn snappy() -> Self {
        Self::new(300.0, 22.0, 1.0)
    }

    /// Slow and soft
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible oscillation before settling
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Damping at which the spring returns fastest without overshoot
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio ζ; 1.0 is critical, below oscillates
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical <= 0.0 {
            return 0.0;
        }
        self.damping / critical
    }

    /// Same stiffness and mass, damped critically
    pub fn critically_damped(mut self) -> Self {
        self.damping = self.critical_damping();
        self
    }

    /// Positive, finite parameters
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.damping, self.mass]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }
}

/// A single animated value driven by a spring
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Move the rest point; current value and velocity are kept
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop there
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < REST_THRESHOLD && (self.value - self.target).abs() < REST_THRESHOLD
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() || self.is_settled() {
            return;
        }

        let dt = dt.min(MAX_STEP_DT);
        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
        }

        if !self.value.is_finite() || !self.velocity.is_finite() {
            tracing::warn!(config = ?self.config, "spring diverged, snapping to target");
            self.snap_to(self.target);
            return;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass.max(f32::EPSILON)
    }

    fn rk4(&mut self, h: f32) {
        let x0 = self.value;
        let v0 = self.velocity;

        let k1x = v0;
        let k1v = self.acceleration(x0, v0);

        let k2x = v0 + 0.5 * h * k1v;
        let k2v = self.acceleration(x0 + 0.5 * h * k1x, k2x);

        let k3x = v0 + 0.5 * h * k2v;
        let k3v = self.acceleration(x0 + 0.5 * h * k2x, k3x);

        let k4x = v0 + h * k3v;
        let k4v = self.acceleration(x0 + h * k3x, k4x);

        self.value = x0 + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v0 + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_new_spring_is_settled() {
        let spring = Spring::new(SpringConfig::default(), 3.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 3.0);
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        run(&mut spring, 2.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_spring_does_not_snap() {
        let mut spring = Spring::new(SpringConfig::new(100.0, 30.0, 2.0), 0.0);
        spring.set_target(10.0);
        spring.step(1.0 / 60.0);
        assert!(spring.value() > 0.0);
        assert!(spring.value() < 1.0);
    }

    #[test]
    fn test_overdamped_spring_never_overshoots() {
        let config = SpringConfig::new(100.0, 30.0, 2.0);
        assert!(config.damping_ratio() >= 1.0);

        let mut spring = Spring::new(config, 0.0);
        spring.set_target(14.0);
        for _ in 0..600 {
            spring.step(1.0 / 60.0);
            assert!(spring.value() <= 14.0 + 1e-3);
        }
    }

    #[test]
    fn test_wobbly_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(1.0);
        let mut peak: f32 = 0.0;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(50.0);
        spring.step(0.5);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 50.0).abs() < 50.0);
    }

    #[test]
    fn test_huge_dt_is_capped() {
        let mut long = Spring::new(SpringConfig::new(100.0, 30.0, 2.0), 0.0);
        long.set_target(14.0);
        long.step(1.0e5);

        let mut capped = Spring::new(SpringConfig::new(100.0, 30.0, 2.0), 0.0);
        capped.set_target(14.0);
        capped.step(MAX_STEP_DT);

        assert_eq!(long.value(), capped.value());
        assert_eq!(long.velocity(), capped.velocity());
        assert!(long.value() > 0.0 && long.value() <= 14.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        spring.set_target(100.0);
        spring.step(1.0 / 60.0);
        let v = spring.velocity();
        spring.set_target(0.0);
        assert_eq!(spring.velocity(), v);
    }

    #[test]
    fn test_diverging_spring_snaps() {
        let mut spring = Spring::new(SpringConfig::new(1e30, 0.0, 1e-30), 0.0);
        spring.set_target(1.0);
        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }
        assert!(spring.value().is_finite());
        assert!(spring.velocity().is_finite());
    }

    #[test]
    fn test_critical_damping() {
        let config = SpringConfig::new(100.0, 0.0, 1.0).critically_damped();
        assert!((config.damping - 20.0).abs() < 1e-4);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_config_from_toml() {
        let config: SpringConfig =
            toml::from_str("stiffness = 100\ndamping = 30\nmass = 2").unwrap();
        assert_eq!(config, SpringConfig::new(100.0, 30.0, 2.0));
        assert!(config.is_valid());
        assert!(!SpringConfig::new(0.0, 1.0, 1.0).is_valid());
    }
}
