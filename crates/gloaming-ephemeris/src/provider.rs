use crate::simulated::{simulated_illumination, simulated_moon, simulated_sun};
use crate::Ephemeris;
use chrono::{DateTime, FixedOffset, Utc};
use gloaming_core::{CelestialPosition, EphemerisError, GeoCoordinate, MoonIllumination};
use std::f64::consts::{FRAC_PI_2, PI};

/// Where a tick's sun/moon positions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSource {
    Ephemeris,
    Simulated,
}

/// Everything the scheduler needs from the sky for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPositions {
    pub sun: CelestialPosition,
    pub moon: CelestialPosition,
    pub illumination: MoonIllumination,
    pub source: PositionSource,
}

/// Wraps an ephemeris with a fixed observer and never fails.
///
/// Sun and moon are taken from the ephemeris together or simulated
/// together; a half-real, half-simulated sky is never produced.
pub struct PositionProvider<E> {
    ephemeris: E,
    location: GeoCoordinate,
}

impl<E: Ephemeris> PositionProvider<E> {
    pub fn new(ephemeris: E, location: GeoCoordinate) -> Self {
        Self {
            ephemeris,
            location,
        }
    }

    pub fn location(&self) -> GeoCoordinate {
        self.location
    }

    /// Compute fresh positions for `now`. No caching.
    pub fn compute_positions(&self, now: &DateTime<FixedOffset>) -> SkyPositions {
        let utc = now.with_timezone(&Utc);

        let (sun, moon, source) = match self.bodies_from_ephemeris(utc) {
            Ok((sun, moon)) => (sun, moon, PositionSource::Ephemeris),
            Err(e) => {
                log::warn!("Ephemeris failed ({e}), using simulated sky");
                (simulated_sun(now), simulated_moon(now), PositionSource::Simulated)
            }
        };

        let illumination = match self.ephemeris.moon_illumination(utc) {
            Ok(ill) => ill.sanitized(),
            Err(e) => {
                log::warn!("Moon illumination failed ({e}), using mean phase");
                simulated_illumination(utc)
            }
        };

        SkyPositions {
            sun,
            moon,
            illumination,
            source,
        }
    }

    fn bodies_from_ephemeris(
        &self,
        at: DateTime<Utc>,
    ) -> Result<(CelestialPosition, CelestialPosition), EphemerisError> {
        let sun = validated(self.ephemeris.sun_position(at, self.location)?, "sun")?;
        let moon = validated(self.ephemeris.moon_position(at, self.location)?, "moon")?;
        Ok((sun, moon))
    }
}

/// Reject malformed ephemeris output so garbage never reaches the scheduler.
fn validated(
    pos: CelestialPosition,
    body: &'static str,
) -> Result<CelestialPosition, EphemerisError> {
    if !pos.azimuth.is_finite() || !pos.altitude.is_finite() {
        return Err(EphemerisError::NonFinite(body));
    }
    if !(-PI..=PI).contains(&pos.azimuth) {
        return Err(EphemerisError::OutOfRange {
            field: "azimuth",
            value: pos.azimuth,
        });
    }
    if !(-FRAC_PI_2..=FRAC_PI_2).contains(&pos.altitude) {
        return Err(EphemerisError::OutOfRange {
            field: "altitude",
            value: pos.altitude,
        });
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::{simulated_moon_at_hour, simulated_sun_at_hour};
    use crate::Almanac;
    use chrono::TimeZone;

    /// Ephemeris double returning canned results.
    struct Canned {
        sun: Result<CelestialPosition, EphemerisError>,
        moon: Result<CelestialPosition, EphemerisError>,
        illumination: Result<MoonIllumination, EphemerisError>,
    }

    impl Ephemeris for Canned {
        fn sun_position(
            &self,
            _at: DateTime<Utc>,
            _location: GeoCoordinate,
        ) -> Result<CelestialPosition, EphemerisError> {
            self.sun.clone()
        }

        fn moon_position(
            &self,
            _at: DateTime<Utc>,
            _location: GeoCoordinate,
        ) -> Result<CelestialPosition, EphemerisError> {
            self.moon.clone()
        }

        fn moon_illumination(&self, _at: DateTime<Utc>) -> Result<MoonIllumination, EphemerisError> {
            self.illumination.clone()
        }
    }

    fn good() -> Canned {
        Canned {
            sun: Ok(CelestialPosition::new(0.1, 0.4)),
            moon: Ok(CelestialPosition::new(-0.2, -0.3)),
            illumination: Ok(MoonIllumination {
                fraction: 0.5,
                phase: 0.25,
                angle: 1.0,
            }),
        }
    }

    fn at_local(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(5 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, hour, minute, 0)
            .unwrap()
    }

    fn provider(eph: Canned) -> PositionProvider<Canned> {
        PositionProvider::new(eph, GeoCoordinate::new(17.4, 78.4))
    }

    #[test]
    fn test_ephemeris_path() {
        let out = provider(good()).compute_positions(&at_local(9, 0));
        assert_eq!(out.source, PositionSource::Ephemeris);
        assert_eq!(out.sun, CelestialPosition::new(0.1, 0.4));
        assert_eq!(out.moon, CelestialPosition::new(-0.2, -0.3));
        assert_eq!(out.illumination.phase, 0.25);
    }

    #[test]
    fn test_error_falls_back_for_both_bodies() {
        let eph = Canned {
            moon: Err(EphemerisError::Unavailable("offline".into())),
            ..good()
        };
        let out = provider(eph).compute_positions(&at_local(12, 0));
        assert_eq!(out.source, PositionSource::Simulated);
        assert_eq!(out.sun, simulated_sun_at_hour(12.0));
        assert_eq!(out.moon, simulated_moon_at_hour(12.0));
    }

    #[test]
    fn test_malformed_output_falls_back() {
        for bad in [
            CelestialPosition::new(f64::NAN, 0.1),
            CelestialPosition::new(0.0, f64::INFINITY),
            CelestialPosition::new(4.0, 0.1),
            CelestialPosition::new(0.0, -2.0),
        ] {
            let eph = Canned {
                sun: Ok(bad),
                ..good()
            };
            let out = provider(eph).compute_positions(&at_local(18, 30));
            assert_eq!(out.source, PositionSource::Simulated, "{bad:?}");
            assert!(out.sun.is_well_formed());
            assert!(out.moon.is_well_formed());
        }
    }

    #[test]
    fn test_fallback_uses_local_time_of_day() {
        let eph = Canned {
            sun: Err(EphemerisError::Unavailable("offline".into())),
            ..good()
        };
        // 12:00 at +05:30 is 06:30 UTC; the simulated sun must peak anyway
        let out = provider(eph).compute_positions(&at_local(12, 0));
        assert!((out.sun.altitude - PI / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_illumination_failure_uses_mean_phase() {
        let eph = Canned {
            illumination: Err(EphemerisError::Unavailable("offline".into())),
            ..good()
        };
        let now = at_local(21, 0);
        let out = provider(eph).compute_positions(&now);
        assert_eq!(out.source, PositionSource::Ephemeris);
        assert_eq!(out.illumination, simulated_illumination(now.with_timezone(&Utc)));
    }

    #[test]
    fn test_malformed_illumination_sanitized() {
        let eph = Canned {
            illumination: Ok(MoonIllumination {
                fraction: f64::NAN,
                phase: -0.2,
                angle: 0.7,
            }),
            ..good()
        };
        let out = provider(eph).compute_positions(&at_local(21, 0));
        assert_eq!(out.illumination.fraction, 0.0);
        assert_eq!(out.illumination.phase, 0.0);
        assert_eq!(out.illumination.angle, 0.7);
    }

    #[test]
    fn test_invalid_location_with_almanac_falls_back() {
        let provider = PositionProvider::new(Almanac, GeoCoordinate::new(120.0, 0.0));
        let out = provider.compute_positions(&at_local(8, 0));
        assert_eq!(out.source, PositionSource::Simulated);
    }
}
