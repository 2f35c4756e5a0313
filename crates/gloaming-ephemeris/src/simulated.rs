//! Deterministic stand-in sky used whenever the ephemeris fails.
//!
//! Depends on local time-of-day only: no date, season, or location.
//! The sun arcs 06:00-18:00 and the moon 18:00-06:00; each is a half-sine
//! in altitude with a linear azimuth sweep. Outside its window a body
//! rests on the horizon at the end of its sweep.

use crate::time::{local_hour, MS_PER_DAY};
use chrono::{DateTime, TimeZone, Utc};
use gloaming_core::constants::{
    REFERENCE_NEW_MOON_UNIX_MS, SIMULATED_ARC_HOURS, SIMULATED_AZIMUTH_SWEEP,
    SIMULATED_MOON_PEAK, SIMULATED_MOON_START_HOUR, SIMULATED_SUN_PEAK,
    SIMULATED_SUN_START_HOUR, SYNODIC_MONTH_DAYS,
};
use gloaming_core::{CelestialPosition, MoonIllumination};
use std::f64::consts::{PI, TAU};

/// Progress through a 12-hour arc starting at `start_hour`, clamped to [0, 1].
fn arc_progress(hour: f64, start_hour: f64) -> f64 {
    let t = (hour - start_hour) / SIMULATED_ARC_HOURS;
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Half-sine bump over [0, 1], exactly zero at both ends so a body that
/// has finished its arc reads as below the horizon.
fn half_sine(t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        0.0
    } else {
        (PI * t).sin()
    }
}

/// Simulated sun for a local hour in [0, 24).
pub fn simulated_sun_at_hour(hour: f64) -> CelestialPosition {
    let t = arc_progress(hour, SIMULATED_SUN_START_HOUR);
    CelestialPosition {
        azimuth: -PI * SIMULATED_AZIMUTH_SWEEP + t * PI * 2.0 * SIMULATED_AZIMUTH_SWEEP,
        altitude: half_sine(t) * SIMULATED_SUN_PEAK,
    }
}

/// Simulated moon for a local hour in [0, 24). The arc wraps past midnight.
pub fn simulated_moon_at_hour(hour: f64) -> CelestialPosition {
    let unwrapped = if hour < SIMULATED_SUN_START_HOUR {
        hour + 24.0
    } else {
        hour
    };
    let t = arc_progress(unwrapped, SIMULATED_MOON_START_HOUR);
    CelestialPosition {
        azimuth: PI * SIMULATED_AZIMUTH_SWEEP - t * PI * 2.0 * SIMULATED_AZIMUTH_SWEEP,
        altitude: half_sine(t) * SIMULATED_MOON_PEAK,
    }
}

pub fn simulated_sun<Tz: TimeZone>(now: &DateTime<Tz>) -> CelestialPosition {
    simulated_sun_at_hour(local_hour(now))
}

pub fn simulated_moon<Tz: TimeZone>(now: &DateTime<Tz>) -> CelestialPosition {
    simulated_moon_at_hour(local_hour(now))
}

/// Mean-phase illumination from the synodic month. Angle is always 0.
pub fn simulated_illumination(at: DateTime<Utc>) -> MoonIllumination {
    let elapsed_days = (at.timestamp_millis() - REFERENCE_NEW_MOON_UNIX_MS) as f64 / MS_PER_DAY;
    let phase = (elapsed_days / SYNODIC_MONTH_DAYS).rem_euclid(1.0);
    MoonIllumination {
        fraction: (1.0 - (TAU * phase).cos()) / 2.0,
        phase,
        angle: 0.0,
    }
}
