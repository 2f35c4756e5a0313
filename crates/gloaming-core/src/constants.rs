//! Single source of truth for shared constants.
//! `SkyConfig::default()` is built from these; the embedded RON file may
//! override the tunable ones.

use std::f64::consts::PI;

/// Fixed observer latitude in degrees (Hyderabad).
pub const DEFAULT_LATITUDE_DEG: f64 = 17.402350;

/// Fixed observer longitude in degrees (Hyderabad).
pub const DEFAULT_LONGITUDE_DEG: f64 = 78.390468;

/// Period of the recompute tick in milliseconds.
pub const TICK_PERIOD_MS: f64 = 60_000.0;

/// Gestures earlier than this after startup never unlock audio.
pub const UNLOCK_DELAY_MS: f64 = 50.0;

/// Target volume for the audible ambient track and for cues.
pub const AMBIENT_VOLUME: f32 = 0.5;

/// Fade-out duration applied to outgoing ambient tracks on a theme change.
pub const CROSSFADE_OUT_MS: f64 = 300.0;

/// Fade-in duration applied to the incoming ambient track on a theme change.
pub const CROSSFADE_IN_MS: f64 = 500.0;

/// Fade-in duration when ambient playback starts after unlock or resume.
pub const RESUME_FADE_MS: f64 = 250.0;

/// Vertical travel amplitude in viewport-height units.
pub const VERTICAL_TRAVEL_VH: f32 = 40.0;

/// Duration of the eased position tween for each body.
pub const POSITION_TWEEN_MS: f64 = 2_200.0;

/// Duration of the eased opacity tween for each body.
pub const OPACITY_TWEEN_MS: f64 = 500.0;

/// Initial horizontal placement of both bodies, in percent.
pub const INITIAL_X_PERCENT: f32 = 50.0;

/// Initial vertical placement of both bodies (below the horizon), in vh.
pub const INITIAL_Y_OFFSET: f32 = 50.0;

/// Sun altitude above which the theme is afternoon (radians).
pub const AFTERNOON_ALTITUDE: f64 = 0.6;

/// Sun altitude above which the theme is morning (radians).
pub const MORNING_ALTITUDE: f64 = 0.25;

/// Sun altitude above which the theme is evening (radians).
pub const EVENING_ALTITUDE: f64 = 0.0;

/// Moon phases below this are treated as new moon and hidden.
pub const NEW_MOON_LOW: f64 = 0.03;

/// Moon phases above this are treated as new moon and hidden.
pub const NEW_MOON_HIGH: f64 = 0.97;

/// Peak altitude of the simulated sun arc.
pub const SIMULATED_SUN_PEAK: f64 = PI / 4.0;

/// Peak altitude of the simulated moon arc. Kept distinct from the sun's.
pub const SIMULATED_MOON_PEAK: f64 = PI / 5.0;

/// Local hour at which the simulated sun rises.
pub const SIMULATED_SUN_START_HOUR: f64 = 6.0;

/// Local hour at which the simulated moon rises.
pub const SIMULATED_MOON_START_HOUR: f64 = 18.0;

/// Length of each simulated arc in hours.
pub const SIMULATED_ARC_HOURS: f64 = 12.0;

/// Half-width of the simulated azimuth sweep, as a multiple of PI.
pub const SIMULATED_AZIMUTH_SWEEP: f64 = 0.6;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// A reference new moon: 2000-01-06 18:14 UTC, in Unix milliseconds.
pub const REFERENCE_NEW_MOON_UNIX_MS: i64 = 947_182_440_000;
