//! Low-precision solar and lunar almanac.
//!
//! Mean-element theory good to a fraction of a degree for the sun and
//! about a degree for the moon over a few centuries around J2000. That
//! is plenty for placing two discs on a background; it is not meant for
//! navigation.

use crate::time::days_since_j2000;
use crate::Ephemeris;
use chrono::{DateTime, Utc};
use gloaming_core::{CelestialPosition, EphemerisError, GeoCoordinate, MoonIllumination};
use std::f64::consts::{FRAC_PI_2, PI};

const RAD: f64 = PI / 180.0;

/// Obliquity of the ecliptic at J2000.
const OBLIQUITY: f64 = 23.4397 * RAD;

/// Mean earth-sun distance in km.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Longitude of the sun's perihelion.
const PERIHELION: f64 = 102.9372 * RAD;

#[derive(Debug, Clone, Copy)]
struct Equatorial {
    right_ascension: f64,
    declination: f64,
}

impl Equatorial {
    /// Convert ecliptic longitude/latitude to equatorial coordinates.
    fn from_ecliptic(longitude: f64, latitude: f64) -> Self {
        let (sin_l, cos_l) = longitude.sin_cos();
        let (sin_e, cos_e) = OBLIQUITY.sin_cos();
        Self {
            right_ascension: (sin_l * cos_e - latitude.tan() * sin_e).atan2(cos_l),
            declination: (latitude.sin() * cos_e + latitude.cos() * sin_e * sin_l).asin(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct MoonCoords {
    equatorial: Equatorial,
    distance_km: f64,
}

/// Local sidereal time in radians; `west_longitude` is positive west.
fn sidereal_time(days: f64, west_longitude: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * days) - west_longitude
}

fn horizontal(hour_angle: f64, latitude: f64, declination: f64) -> CelestialPosition {
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_phi, cos_phi) = latitude.sin_cos();
    CelestialPosition {
        azimuth: sin_h.atan2(cos_h * sin_phi - declination.tan() * cos_phi),
        altitude: (sin_phi * declination.sin() + cos_phi * declination.cos() * cos_h).asin(),
    }
}

fn sun_coords(days: f64) -> Equatorial {
    let mean_anomaly = RAD * (357.5291 + 0.985_600_28 * days);
    let center = RAD
        * (1.9148 * mean_anomaly.sin()
            + 0.02 * (2.0 * mean_anomaly).sin()
            + 0.0003 * (3.0 * mean_anomaly).sin());
    let ecliptic_longitude = mean_anomaly + center + PERIHELION + PI;
    Equatorial::from_ecliptic(ecliptic_longitude, 0.0)
}

fn moon_coords(days: f64) -> MoonCoords {
    let mean_longitude = RAD * (218.316 + 13.176_396 * days);
    let mean_anomaly = RAD * (134.963 + 13.064_993 * days);
    let mean_distance = RAD * (93.272 + 13.229_350 * days);

    let longitude = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let latitude = RAD * 5.128 * mean_distance.sin();
    MoonCoords {
        equatorial: Equatorial::from_ecliptic(longitude, latitude),
        distance_km: 385_001.0 - 20_905.0 * mean_anomaly.cos(),
    }
}

/// Atmospheric refraction for a true altitude, in radians.
fn refraction(altitude: f64) -> f64 {
    // the formula diverges below the horizon
    let h = altitude.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

fn check_location(location: GeoCoordinate) -> Result<(f64, f64), EphemerisError> {
    let GeoCoordinate {
        latitude_deg,
        longitude_deg,
    } = location;
    let in_range = (-90.0..=90.0).contains(&latitude_deg)
        && (-180.0..=180.0).contains(&longitude_deg);
    if !in_range {
        return Err(EphemerisError::InvalidCoordinate {
            latitude: latitude_deg,
            longitude: longitude_deg,
        });
    }
    Ok((RAD * latitude_deg, RAD * -longitude_deg))
}

fn check_finite(value: f64, field: &'static str) -> Result<f64, EphemerisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EphemerisError::NonFinite(field))
    }
}

/// Built-in ephemeris. Stateless; every call is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Almanac;

impl Ephemeris for Almanac {
    fn sun_position(
        &self,
        at: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<CelestialPosition, EphemerisError> {
        let (latitude, west_longitude) = check_location(location)?;
        let days = days_since_j2000(at);
        let sun = sun_coords(days);
        let hour_angle = sidereal_time(days, west_longitude) - sun.right_ascension;
        let pos = horizontal(hour_angle, latitude, sun.declination);
        Ok(CelestialPosition {
            azimuth: check_finite(pos.azimuth, "sun azimuth")?,
            altitude: check_finite(pos.altitude, "sun altitude")?,
        })
    }

    fn moon_position(
        &self,
        at: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<CelestialPosition, EphemerisError> {
        let (latitude, west_longitude) = check_location(location)?;
        let days = days_since_j2000(at);
        let moon = moon_coords(days);
        let hour_angle = sidereal_time(days, west_longitude) - moon.equatorial.right_ascension;
        let pos = horizontal(hour_angle, latitude, moon.equatorial.declination);
        let apparent = (pos.altitude + refraction(pos.altitude)).clamp(-FRAC_PI_2, FRAC_PI_2);
        Ok(CelestialPosition {
            azimuth: check_finite(pos.azimuth, "moon azimuth")?,
            altitude: check_finite(apparent, "moon altitude")?,
        })
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<MoonIllumination, EphemerisError> {
        let days = days_since_j2000(at);
        let sun = sun_coords(days);
        let moon = moon_coords(days);
        let moon_eq = moon.equatorial;

        let delta_ra = sun.right_ascension - moon_eq.right_ascension;
        let elongation = (sun.declination.sin() * moon_eq.declination.sin()
            + sun.declination.cos() * moon_eq.declination.cos() * delta_ra.cos())
        .clamp(-1.0, 1.0)
        .acos();
        let inclination = (SUN_DISTANCE_KM * elongation.sin())
            .atan2(moon.distance_km - SUN_DISTANCE_KM * elongation.cos());
        let angle = (sun.declination.cos() * delta_ra.sin()).atan2(
            sun.declination.sin() * moon_eq.declination.cos()
                - sun.declination.cos() * moon_eq.declination.sin() * delta_ra.cos(),
        );
        let waning = if angle < 0.0 { -1.0 } else { 1.0 };

        Ok(MoonIllumination {
            fraction: check_finite((1.0 + inclination.cos()) / 2.0, "moon fraction")?,
            phase: check_finite(0.5 + 0.5 * inclination * waning / PI, "moon phase")?,
            angle: check_finite(angle, "moon angle")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const KYIV: GeoCoordinate = GeoCoordinate {
        latitude_deg: 50.5,
        longitude_deg: 30.5,
    };

    fn reference_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_sun_position_reference() {
        let pos = Almanac
            .sun_position(reference_instant(), KYIV)
            .expect("valid location");
        assert!((pos.azimuth - -2.500_317_590_716_838_5).abs() < 1e-6, "{pos:?}");
        assert!((pos.altitude - -0.700_040_683_878_161_1).abs() < 1e-6, "{pos:?}");
    }

    #[test]
    fn test_moon_position_reference() {
        let pos = Almanac
            .moon_position(reference_instant(), KYIV)
            .expect("valid location");
        assert!((pos.azimuth - -0.978_399_952_243_822_6).abs() < 1e-6, "{pos:?}");
        // includes ~7.5 mrad of refraction
        assert!((pos.altitude - 0.014_551_482_243_892_2).abs() < 1e-6, "{pos:?}");
    }

    #[test]
    fn test_moon_illumination_reference() {
        let ill = Almanac
            .moon_illumination(reference_instant())
            .expect("finite");
        assert!((ill.fraction - 0.484_806_820_245_637_3).abs() < 1e-6, "{ill:?}");
        assert!((ill.phase - 0.754_836_883_853_876_2).abs() < 1e-6, "{ill:?}");
        assert!((ill.angle - 1.673_294_267_857_834_6).abs() < 1e-6, "{ill:?}");
    }

    #[test]
    fn test_positions_well_formed_across_a_day() {
        let start = reference_instant();
        for step in 0..96 {
            let at = start + chrono::Duration::minutes(15 * step);
            let sun = Almanac.sun_position(at, KYIV).expect("sun");
            let moon = Almanac.moon_position(at, KYIV).expect("moon");
            assert!(sun.is_well_formed(), "sun at step {step}: {sun:?}");
            assert!(moon.is_well_formed(), "moon at step {step}: {moon:?}");
        }
    }

    #[test]
    fn test_sun_is_up_at_local_noon() {
        // Hyderabad local noon is roughly 06:45 UTC
        let at = Utc.with_ymd_and_hms(2024, 3, 20, 6, 45, 0).unwrap();
        let pos = Almanac
            .sun_position(at, GeoCoordinate::new(17.40235, 78.390468))
            .expect("valid");
        assert!(pos.altitude > 1.0, "{pos:?}");
    }

    #[test]
    fn test_invalid_location_rejected() {
        let err = Almanac
            .sun_position(reference_instant(), GeoCoordinate::new(91.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, EphemerisError::InvalidCoordinate { .. }));
        assert!(Almanac
            .moon_position(reference_instant(), GeoCoordinate::new(0.0, f64::NAN))
            .is_err());
    }
}
