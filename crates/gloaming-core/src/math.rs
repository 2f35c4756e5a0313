use crate::types::Millis;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Easing curves used by tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// 1 - (1 - t)^2
    #[default]
    QuadOut,
    /// 1 - (1 - t)^3
    CubicOut,
}

impl Easing {
    /// Map linear progress `t` (clamped to [0, 1]) onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = clamp01(t);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Clamp into [0, 1]; NaN maps to 0.
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Linear progress of a timed task. Zero or negative durations complete instantly.
pub fn progress(now: Millis, start: Millis, duration: Millis) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    clamp01(((now - start) / duration) as f32)
}

/// Wrap an angle into [-PI, PI].
pub fn wrap_pi(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can land exactly on TAU for tiny negative inputs
    wrapped.clamp(-PI, PI)
}
