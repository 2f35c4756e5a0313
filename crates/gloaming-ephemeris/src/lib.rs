pub mod almanac;
pub mod provider;
pub mod simulated;
pub mod time;

use chrono::{DateTime, Utc};
use gloaming_core::{CelestialPosition, EphemerisError, GeoCoordinate, MoonIllumination};

pub use almanac::Almanac;
pub use provider::{PositionProvider, PositionSource, SkyPositions};

/// Source of sun and moon positions for an instant and observer.
///
/// Implementations may fail or return garbage; `PositionProvider`
/// validates every result and substitutes the simulated sky on failure.
pub trait Ephemeris {
    fn sun_position(
        &self,
        at: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<CelestialPosition, EphemerisError>;

    fn moon_position(
        &self,
        at: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<CelestialPosition, EphemerisError>;

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<MoonIllumination, EphemerisError>;
}
