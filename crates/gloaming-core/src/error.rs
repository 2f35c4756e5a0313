use thiserror::Error;

/// Failures reported by an ephemeris. Always recovered by the simulated
/// fallback; never shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("coordinate out of range: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("ephemeris produced a non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("ephemeris produced an out-of-range {field}: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("ephemeris unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while parsing or validating `SkyConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse sky config RON: {0}")]
    Parse(String),

    #[error("invalid sky config: {0}")]
    Invalid(String),
}

/// Errors that can occur while wiring the engine into a page.
#[derive(Debug, Error)]
pub enum GloamingError {
    #[error("required element #{0} not found")]
    MissingElement(String),

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
