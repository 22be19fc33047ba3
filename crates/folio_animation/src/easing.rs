//! Easing functions for animations
//!
//! Includes the `powerN.out` family the page's tweens are authored with:
//! `power1` is quadratic, `power2` cubic, `power3` quartic, `power4`
//! quintic.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Power1Out,
    Power2Out,
    Power3Out,
    Power4Out,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::Power4Out => 1.0 - (1.0 - t).powi(5),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// Canonical name, as accepted by [`Easing::from_str`]
    pub fn name(&self) -> String {
        match self {
            Easing::Linear => "linear".into(),
            Easing::EaseIn => "ease-in".into(),
            Easing::EaseOut => "ease-out".into(),
            Easing::EaseInOut => "ease-in-out".into(),
            Easing::Power1Out => "power1.out".into(),
            Easing::Power2Out => "power2.out".into(),
            Easing::Power3Out => "power3.out".into(),
            Easing::Power4Out => "power4.out".into(),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Unrecognized easing name
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown easing {0:?}")]
pub struct UnknownEasing(pub String);

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let easing = match name.as_str() {
            "linear" | "none" => Easing::Linear,
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            "power1.out" | "power1" => Easing::Power1Out,
            "power2.out" | "power2" => Easing::Power2Out,
            "power3.out" | "power3" => Easing::Power3Out,
            "power4.out" | "power4" => Easing::Power4Out,
            other => return parse_cubic_bezier(other).ok_or_else(|| UnknownEasing(s.to_string())),
        };
        Ok(easing)
    }
}

fn parse_cubic_bezier(s: &str) -> Option<Easing> {
    let inner = s.strip_prefix("cubic-bezier(")?.strip_suffix(')')?;
    let values: Vec<f32> = inner
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [x1, y1, x2, y2] => Some(Easing::CubicBezier(*x1, *y1, *x2, *y2)),
        _ => None,
    }
}

impl TryFrom<String> for Easing {
    type Error = UnknownEasing;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.name()
    }
}

/// One axis of a CSS `cubic-bezier()` curve with fixed end points at 0
/// and 1, in polynomial form `((a·t + b)·t + c)·t`
#[derive(Clone, Copy)]
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (f64::from(p1), f64::from(p2));
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn at(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Parameter whose x equals `x`: Newton steps, then bisection when the
    /// curve is too flat for Newton to converge
    fn solve(&self, x: f64) -> f64 {
        const EPS: f64 = 1e-7;

        let mut t = x;
        for _ in 0..8 {
            let err = self.at(t) - x;
            if err.abs() < EPS {
                return t;
            }
            let slope = self.slope(t);
            if slope.abs() < EPS {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..24 {
            let err = self.at(t) - x;
            if err.abs() < EPS {
                break;
            }
            if err < 0.0 {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        t
    }
}

/// Evaluated in f64 so 120 Hz frame steps don't jitter
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let param = BezierAxis::new(x1, x2).solve(f64::from(t));
    BezierAxis::new(y1, y2).at(param) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseInOut,
            Easing::Power1Out,
            Easing::Power3Out,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        }
    }

    #[test]
    fn test_power_out_is_front_loaded() {
        // Stronger power curves cover more ground early
        let p1 = Easing::Power1Out.apply(0.25);
        let p3 = Easing::Power3Out.apply(0.25);
        assert!(p1 > 0.25);
        assert!(p3 > p1);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("power3.out".parse::<Easing>(), Ok(Easing::Power3Out));
        assert_eq!(" Power1.OUT ".parse::<Easing>(), Ok(Easing::Power1Out));
        assert_eq!(
            "cubic-bezier(0.4, 0, 0.2, 1)".parse::<Easing>(),
            Ok(Easing::CubicBezier(0.4, 0.0, 0.2, 1.0))
        );
        assert!("bounce.out".parse::<Easing>().is_err());
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for t in [0.1, 0.33, 0.5, 0.9] {
            assert!((linear.apply(t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn test_name_round_trips() {
        assert_eq!(Easing::Power4Out.name().parse::<Easing>(), Ok(Easing::Power4Out));
    }
}
