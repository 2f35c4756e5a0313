//! Engine configuration. Defaults come from `constants`; a RON document
//! baked into the host may override any subset of fields.

use crate::constants::*;
use crate::error::ConfigError;
use crate::math::Easing;
use crate::types::{Cue, GeoCoordinate, Millis, ThemeState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub location: GeoCoordinate,
    pub tick_period_ms: Millis,
    pub audio: AudioConfig,
    pub motion: MotionConfig,
    pub assets: AssetManifest,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            location: GeoCoordinate::new(DEFAULT_LATITUDE_DEG, DEFAULT_LONGITUDE_DEG),
            tick_period_ms: TICK_PERIOD_MS,
            audio: AudioConfig::default(),
            motion: MotionConfig::default(),
            assets: AssetManifest::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Target volume (0.0-1.0) for the active ambient track and for cues.
    pub volume: f32,
    pub unlock_delay_ms: Millis,
    pub crossfade_out_ms: Millis,
    pub crossfade_in_ms: Millis,
    pub resume_fade_ms: Millis,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: AMBIENT_VOLUME,
            unlock_delay_ms: UNLOCK_DELAY_MS,
            crossfade_out_ms: CROSSFADE_OUT_MS,
            crossfade_in_ms: CROSSFADE_IN_MS,
            resume_fade_ms: RESUME_FADE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub vertical_travel_vh: f32,
    pub position_tween_ms: Millis,
    pub opacity_tween_ms: Millis,
    pub position_easing: Easing,
    pub opacity_easing: Easing,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            vertical_travel_vh: VERTICAL_TRAVEL_VH,
            position_tween_ms: POSITION_TWEEN_MS,
            opacity_tween_ms: OPACITY_TWEEN_MS,
            position_easing: Easing::CubicOut,
            opacity_easing: Easing::QuadOut,
        }
    }
}

/// Logical names of the eight audio assets, resolved to URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
    pub night: String,
    pub sun_rise: String,
    pub sun_set: String,
    pub moon_rise: String,
    pub moon_set: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            morning: "/sounds/morning.mp3".into(),
            afternoon: "/sounds/afternoon.mp3".into(),
            evening: "/sounds/evening.mp3".into(),
            night: "/sounds/night.mp3".into(),
            sun_rise: "/sounds/sun-rise.mp3".into(),
            sun_set: "/sounds/sun-set.mp3".into(),
            moon_rise: "/sounds/moon-rise.mp3".into(),
            moon_set: "/sounds/moon-set.mp3".into(),
        }
    }
}

impl AssetManifest {
    pub fn ambient_url(&self, theme: ThemeState) -> &str {
        match theme {
            ThemeState::Morning => &self.morning,
            ThemeState::Afternoon => &self.afternoon,
            ThemeState::Evening => &self.evening,
            ThemeState::Night => &self.night,
        }
    }

    pub fn cue_url(&self, cue: Cue) -> &str {
        match cue {
            Cue::SunRise => &self.sun_rise,
            Cue::SunSet => &self.sun_set,
            Cue::MoonRise => &self.moon_rise,
            Cue::MoonSet => &self.moon_set,
        }
    }
}

impl SkyConfig {
    /// Parse a RON document and validate it. Missing fields take defaults.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        let config: SkyConfig = options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GeoCoordinate {
            latitude_deg,
            longitude_deg,
        } = self.location;
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ConfigError::Invalid(format!(
                "latitude {latitude_deg} outside [-90, 90]"
            )));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(ConfigError::Invalid(format!(
                "longitude {longitude_deg} outside [-180, 180]"
            )));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!(
                "volume {} outside [0, 1]",
                self.audio.volume
            )));
        }
        let durations = [
            ("tick_period_ms", self.tick_period_ms),
            ("crossfade_out_ms", self.audio.crossfade_out_ms),
            ("crossfade_in_ms", self.audio.crossfade_in_ms),
            ("resume_fade_ms", self.audio.resume_fade_ms),
            ("position_tween_ms", self.motion.position_tween_ms),
            ("opacity_tween_ms", self.motion.opacity_tween_ms),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.motion.position_tween_ms >= self.tick_period_ms {
            return Err(ConfigError::Invalid(
                "position tween must finish before the next tick".into(),
            ));
        }
        if !self.audio.unlock_delay_ms.is_finite() || self.audio.unlock_delay_ms < 0.0 {
            return Err(ConfigError::Invalid("unlock_delay_ms must be >= 0".into()));
        }
        if !self.motion.vertical_travel_vh.is_finite() {
            return Err(ConfigError::Invalid("vertical_travel_vh must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        SkyConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = SkyConfig::from_ron_str(
            "(location: (latitude_deg: 51.5, longitude_deg: -0.12), audio: (volume: 0.3))",
        )
        .expect("parse");
        assert_eq!(config.location.latitude_deg, 51.5);
        assert!((config.audio.volume - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.audio.crossfade_in_ms, CROSSFADE_IN_MS);
        assert_eq!(config.tick_period_ms, TICK_PERIOD_MS);
        assert_eq!(config.assets, AssetManifest::default());
    }

    #[test]
    fn test_parse_error_reported() {
        let err = SkyConfig::from_ron_str("(location: oops").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = SkyConfig::from_ron_str("(location: (latitude_deg: 95.0, longitude_deg: 0.0))")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SkyConfig::from_ron_str("(audio: (volume: 1.5))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SkyConfig::from_ron_str("(motion: (position_tween_ms: 90000.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_asset_lookup() {
        let assets = AssetManifest::default();
        assert_eq!(assets.ambient_url(ThemeState::Night), "/sounds/night.mp3");
        assert_eq!(assets.cue_url(Cue::MoonSet), "/sounds/moon-set.mp3");
    }
}
