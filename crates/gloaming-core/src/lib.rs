pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use config::SkyConfig;
pub use error::{ConfigError, EphemerisError, GloamingError};
pub use types::{Body, CelestialPosition, Cue, GeoCoordinate, Millis, MoonIllumination, ThemeState};
