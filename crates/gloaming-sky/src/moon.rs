use gloaming_core::constants::{NEW_MOON_HIGH, NEW_MOON_LOW};
use gloaming_core::ThemeState;

/// Whether the moon body should render this tick.
///
/// Requires the moon above the horizon, a non-daytime theme, and a phase
/// outside the new-moon band. No hysteresis: inputs are fresh every tick.
pub fn should_show_moon(moon_altitude: f64, theme: ThemeState, moon_phase: f64) -> bool {
    let above_horizon = moon_altitude > 0.0;
    let near_new = moon_phase < NEW_MOON_LOW || moon_phase > NEW_MOON_HIGH;
    above_horizon && !theme.is_daytime() && !near_new
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daytime_theme_hides_moon() {
        for phase in [0.1, 0.25, 0.5, 0.75, 0.9] {
            assert!(!should_show_moon(0.3, ThemeState::Afternoon, phase));
            assert!(!should_show_moon(0.3, ThemeState::Morning, phase));
        }
    }

    #[test]
    fn test_night_full_moon_shows() {
        assert!(should_show_moon(0.3, ThemeState::Night, 0.5));
        assert!(should_show_moon(0.3, ThemeState::Evening, 0.5));
    }

    #[test]
    fn test_new_moon_band_hides() {
        assert!(!should_show_moon(0.3, ThemeState::Night, 0.01));
        assert!(!should_show_moon(0.3, ThemeState::Night, 0.98));
        assert!(should_show_moon(0.3, ThemeState::Night, 0.03));
        assert!(should_show_moon(0.3, ThemeState::Night, 0.97));
    }

    #[test]
    fn test_below_horizon_hides() {
        assert!(!should_show_moon(0.0, ThemeState::Night, 0.5));
        assert!(!should_show_moon(-0.2, ThemeState::Night, 0.5));
    }
}
