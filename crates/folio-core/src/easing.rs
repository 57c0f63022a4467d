//! Easing curves for scroll timeline segments.
//!
//! Every curve maps `[0, 1]` onto a value that starts at exactly 0 and ends at
//! exactly 1. Back and elastic curves overshoot in between.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    BackIn,
    BackOut,
    BackInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    CubicBezier(f32, f32, f32, f32),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EasingError {
    #[error("unknown easing `{0}`")]
    Unknown(String),
}

const BACK_C1: f32 = 1.701_58;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

/// Registry of names accepted by [`Easing::from_name`]. GSAP names first,
/// then the dashed short forms.
pub const EASING_NAMES: &[(&str, Easing)] = &[
    ("none", Easing::Linear),
    ("linear", Easing::Linear),
    ("power1.in", Easing::QuadIn),
    ("power1.out", Easing::QuadOut),
    ("power1.inOut", Easing::QuadInOut),
    ("power2.in", Easing::CubicIn),
    ("power2.out", Easing::CubicOut),
    ("power2.inOut", Easing::CubicInOut),
    ("power3.in", Easing::QuartIn),
    ("power3.out", Easing::QuartOut),
    ("power3.inOut", Easing::QuartInOut),
    ("sine.inOut", Easing::SineInOut),
    ("expo.in", Easing::ExpoIn),
    ("expo.out", Easing::ExpoOut),
    ("expo.inOut", Easing::ExpoInOut),
    ("back.in", Easing::BackIn),
    ("back.out", Easing::BackOut),
    ("back.inOut", Easing::BackInOut),
    ("elastic.in", Easing::ElasticIn),
    ("elastic.out", Easing::ElasticOut),
    ("elastic.inOut", Easing::ElasticInOut),
    ("quad-in", Easing::QuadIn),
    ("quad-out", Easing::QuadOut),
    ("quad-in-out", Easing::QuadInOut),
    ("cubic-in", Easing::CubicIn),
    ("cubic-out", Easing::CubicOut),
    ("cubic-in-out", Easing::CubicInOut),
    ("quart-in", Easing::QuartIn),
    ("quart-out", Easing::QuartOut),
    ("quart-in-out", Easing::QuartInOut),
    ("sine-in-out", Easing::SineInOut),
    ("expo-in", Easing::ExpoIn),
    ("expo-out", Easing::ExpoOut),
    ("expo-in-out", Easing::ExpoInOut),
    ("back-in", Easing::BackIn),
    ("back-out", Easing::BackOut),
    ("back-in-out", Easing::BackInOut),
    ("elastic-in", Easing::ElasticIn),
    ("elastic-out", Easing::ElasticOut),
    ("elastic-in-out", Easing::ElasticInOut),
];

impl Easing {
    /// Look up a curve by name in [`EASING_NAMES`].
    pub fn from_name(name: &str) -> Result<Self, EasingError> {
        let name = name.trim();
        EASING_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, e)| *e)
            .ok_or_else(|| EasingError::Unknown(name.to_string()))
    }

    /// Apply the curve to a progress value. Input outside `[0, 1]` is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::QuartIn => t * t * t * t,
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExpoIn => 2.0_f32.powf(10.0 * t - 10.0),
            Easing::ExpoOut => 1.0 - 2.0_f32.powf(-10.0 * t),
            Easing::ExpoInOut => {
                if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::BackIn => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Easing::BackOut => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
            }
            Easing::BackInOut => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2)
                        + 2.0)
                        / 2.0
                }
            }
            Easing::ElasticIn => {
                -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
            }
            Easing::ElasticOut => {
                2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
            }
            Easing::ElasticInOut => {
                if t < 0.5 {
                    -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                } else {
                    (2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                        + 1.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

impl FromStr for Easing {
    type Err = EasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Easing::CubicBezier(x1, y1, x2, y2) = self {
            return write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})");
        }
        let name = EASING_NAMES
            .iter()
            .find(|(_, e)| e == self)
            .map(|(n, _)| *n)
            .unwrap_or("linear");
        f.write_str(name)
    }
}

/// CSS-style cubic bezier. Newton-Raphson with a bisection fallback, in f64.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }
    bezier_sample(p, y1, y2) as f32
}

#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
