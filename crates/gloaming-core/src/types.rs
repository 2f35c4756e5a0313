use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Monotonic milliseconds (the browser's `performance.now()` clock).
pub type Millis = f64;

/// Observer location in degrees, north and east positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoCoordinate {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

/// Horizontal coordinates of a body as seen by the observer.
///
/// Azimuth is measured from south, positive westward, in [-PI, PI].
/// Altitude is in [-PI/2, PI/2] and negative below the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CelestialPosition {
    pub azimuth: f64,
    pub altitude: f64,
}

impl CelestialPosition {
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Self { azimuth, altitude }
    }

    /// True when both angles are finite and inside their declared ranges.
    pub fn is_well_formed(&self) -> bool {
        self.azimuth.is_finite()
            && self.altitude.is_finite()
            && (-PI..=PI).contains(&self.azimuth)
            && (-FRAC_PI_2..=FRAC_PI_2).contains(&self.altitude)
    }

    /// Geometric visibility. The horizon itself counts as below.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// Lit portion and phase of the moon.
///
/// `phase` runs 0..1: 0 and 1 are new moon, 0.25 first quarter,
/// 0.5 full, 0.75 last quarter. `angle` is the midpoint angle of the
/// lit limb in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoonIllumination {
    pub fraction: f64,
    pub phase: f64,
    pub angle: f64,
}

impl MoonIllumination {
    /// Replace non-finite fields with 0 and clamp fraction/phase into [0, 1].
    pub fn sanitized(self) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            fraction: finite_or_zero(self.fraction).clamp(0.0, 1.0),
            phase: finite_or_zero(self.phase).clamp(0.0, 1.0),
            angle: finite_or_zero(self.angle),
        }
    }
}

/// Visual/audio theme of the page. Exactly one is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeState {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl ThemeState {
    pub const ALL: [ThemeState; 4] = [
        ThemeState::Morning,
        ThemeState::Afternoon,
        ThemeState::Evening,
        ThemeState::Night,
    ];

    /// Lowercase name, also used as the CSS class on the page root.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeState::Morning => "morning",
            ThemeState::Afternoon => "afternoon",
            ThemeState::Evening => "evening",
            ThemeState::Night => "night",
        }
    }

    /// The greeting shown while this theme is live.
    pub fn message(self) -> &'static str {
        match self {
            ThemeState::Morning => "Good Morning ☀️ Let's build something beautiful today.",
            ThemeState::Afternoon => "Good Afternoon 🌤 Keep shining and creating!",
            ThemeState::Evening => "Good Evening 🌇 Time to relax or dream up new ideas.",
            ThemeState::Night => {
                "It's late 🌙 Meet you tomorrow! If you're up for work, drop me a message 💬"
            }
        }
    }

    /// Daytime themes suppress the moon body.
    pub fn is_daytime(self) -> bool {
        matches!(self, ThemeState::Morning | ThemeState::Afternoon)
    }

    pub fn index(self) -> usize {
        match self {
            ThemeState::Morning => 0,
            ThemeState::Afternoon => 1,
            ThemeState::Evening => 2,
            ThemeState::Night => 3,
        }
    }
}

/// The two animated sky bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    pub fn rise_cue(self) -> Cue {
        match self {
            Body::Sun => Cue::SunRise,
            Body::Moon => Cue::MoonRise,
        }
    }

    pub fn set_cue(self) -> Cue {
        match self {
            Body::Sun => Cue::SunSet,
            Body::Moon => Cue::MoonSet,
        }
    }
}

/// One-shot sound effects tied to rise/set edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    SunRise,
    SunSet,
    MoonRise,
    MoonSet,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::SunRise, Cue::SunSet, Cue::MoonRise, Cue::MoonSet];

    pub fn as_str(self) -> &'static str {
        match self {
            Cue::SunRise => "sunRise",
            Cue::SunSet => "sunSet",
            Cue::MoonRise => "moonRise",
            Cue::MoonSet => "moonSet",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Cue::SunRise => 0,
            Cue::SunSet => 1,
            Cue::MoonRise => 2,
            Cue::MoonSet => 3,
        }
    }
}
