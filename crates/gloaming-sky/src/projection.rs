use glam::Vec2;
use gloaming_core::CelestialPosition;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Map horizontal coordinates to screen space.
///
/// `x` is a horizontal percentage in [0, 100], azimuth -PI on the left
/// edge and PI on the right. `y` is a vertical offset in viewport-height
/// units: `-vertical_travel` at the zenith, `+vertical_travel` at the
/// nadir. Out-of-range angles clamp; non-finite angles count as 0.
pub fn project(position: CelestialPosition, vertical_travel: f32) -> Vec2 {
    let azimuth = finite_or_zero(position.azimuth);
    let altitude = finite_or_zero(position.altitude);

    let x_percent = (((azimuth + PI) / TAU) * 100.0).clamp(0.0, 100.0);
    let altitude_norm = (altitude / FRAC_PI_2).clamp(-1.0, 1.0);
    Vec2::new(x_percent as f32, -(altitude_norm as f32) * vertical_travel)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
