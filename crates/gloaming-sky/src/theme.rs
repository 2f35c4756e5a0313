use gloaming_core::constants::{AFTERNOON_ALTITUDE, EVENING_ALTITUDE, MORNING_ALTITUDE};
use gloaming_core::ThemeState;

/// Map solar altitude (radians) to a theme and its message.
///
/// Bands are checked steepest first and are exclusive on the low side:
/// exactly 0.6 is morning, 0.25 evening, 0 night. NaN is night.
pub fn classify(sun_altitude: f64) -> (ThemeState, &'static str) {
    let theme = if sun_altitude > AFTERNOON_ALTITUDE {
        ThemeState::Afternoon
    } else if sun_altitude > MORNING_ALTITUDE {
        ThemeState::Morning
    } else if sun_altitude > EVENING_ALTITUDE {
        ThemeState::Evening
    } else {
        ThemeState::Night
    };
    (theme, theme.message())
}

/// A theme transition the engine must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChange {
    pub from: ThemeState,
    pub to: ThemeState,
}

/// Holds the live theme and reports only genuine changes.
#[derive(Debug, Clone, Copy)]
pub struct ThemeTracker {
    current: ThemeState,
}

impl ThemeTracker {
    pub fn new(initial: ThemeState) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> ThemeState {
        self.current
    }

    pub fn message(&self) -> &'static str {
        self.current.message()
    }

    /// Classify `sun_altitude`; returns a change only when the band differs.
    pub fn observe(&mut self, sun_altitude: f64) -> Option<ThemeChange> {
        let (next, _) = classify(sun_altitude);
        if next == self.current {
            return None;
        }
        let change = ThemeChange {
            from: self.current,
            to: next,
        };
        self.current = next;
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify(0.0).0, ThemeState::Night);
        assert_eq!(classify(0.25).0, ThemeState::Evening);
        assert_eq!(classify(0.6).0, ThemeState::Morning);
    }

    #[test]
    fn test_band_interiors() {
        assert_eq!(classify(1.2).0, ThemeState::Afternoon);
        assert_eq!(classify(0.6 + 1e-9).0, ThemeState::Afternoon);
        assert_eq!(classify(0.4).0, ThemeState::Morning);
        assert_eq!(classify(0.1).0, ThemeState::Evening);
        assert_eq!(classify(1e-12).0, ThemeState::Evening);
        assert_eq!(classify(-0.5).0, ThemeState::Night);
        assert_eq!(classify(f64::NAN).0, ThemeState::Night);
    }

    #[test]
    fn test_message_matches_theme() {
        let (theme, message) = classify(0.4);
        assert_eq!(message, theme.message());
        assert!(message.starts_with("Good Morning"));
        assert!(classify(-1.0).1.starts_with("It's late"));
    }

    #[test]
    fn test_tracker_only_reports_changes() {
        let mut tracker = ThemeTracker::new(ThemeState::Morning);
        assert_eq!(tracker.observe(0.4), None);
        assert_eq!(tracker.observe(0.5), None);
        assert_eq!(
            tracker.observe(0.7),
            Some(ThemeChange {
                from: ThemeState::Morning,
                to: ThemeState::Afternoon
            })
        );
        assert_eq!(tracker.observe(0.9), None);
        assert_eq!(tracker.current(), ThemeState::Afternoon);
    }
}
