use crate::edges::VisibilityEdge;
use crate::moon::should_show_moon;
use crate::projection::project;
use crate::theme::{ThemeChange, ThemeTracker};
use crate::tween::{BodyFrame, BodyTween};
use glam::Vec2;
use gloaming_core::config::MotionConfig;
use gloaming_core::constants::{INITIAL_X_PERCENT, INITIAL_Y_OFFSET};
use gloaming_core::{Cue, Millis, MoonIllumination, ThemeState};
use gloaming_ephemeris::SkyPositions;

/// What one tick decided, before any audio policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub theme: ThemeState,
    pub theme_change: Option<ThemeChange>,
    /// Rise/set edges detected this tick, sun first.
    pub edges: Vec<Cue>,
    pub moon_shown: bool,
    pub sun_target: BodyFrame,
    pub moon_target: BodyFrame,
    pub illumination: MoonIllumination,
}

/// Both bodies as they should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    pub sun: BodyFrame,
    pub moon: BodyFrame,
}

/// Scheduler-owned state carried between ticks: the live theme, last
/// visibility, and the body tweens.
pub struct SkySession {
    theme: ThemeTracker,
    edges: VisibilityEdge,
    sun: BodyTween,
    moon: BodyTween,
    vertical_travel: f32,
    illumination: MoonIllumination,
    ticks: u64,
}

impl SkySession {
    pub fn new(motion: &MotionConfig, initial_theme: ThemeState) -> Self {
        let parked = BodyFrame {
            position: Vec2::new(INITIAL_X_PERCENT, INITIAL_Y_OFFSET),
            opacity: 0.0,
        };
        Self {
            theme: ThemeTracker::new(initial_theme),
            edges: VisibilityEdge::default(),
            sun: BodyTween::new(parked, motion),
            moon: BodyTween::new(parked, motion),
            vertical_travel: motion.vertical_travel_vh,
            illumination: MoonIllumination::default(),
            ticks: 0,
        }
    }

    pub fn theme(&self) -> ThemeState {
        self.theme.current()
    }

    pub fn message(&self) -> &'static str {
        self.theme.message()
    }

    pub fn edges(&self) -> VisibilityEdge {
        self.edges
    }

    /// Illumination from the most recent tick.
    pub fn illumination(&self) -> MoonIllumination {
        self.illumination
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Run one tick: theme, moon policy, edges, projection, tween retarget.
    pub fn apply(&mut self, positions: &SkyPositions, now: Millis) -> TickOutcome {
        let theme_change = self.theme.observe(positions.sun.altitude);
        let theme = self.theme.current();

        let moon_shown = should_show_moon(
            positions.moon.altitude,
            theme,
            positions.illumination.phase,
        );

        let sun_visible = positions.sun.is_above_horizon();
        let moon_visible = positions.moon.is_above_horizon();
        let edges = self.edges.advance(sun_visible, moon_visible);

        let sun_target = BodyFrame {
            position: project(positions.sun, self.vertical_travel),
            opacity: if sun_visible { 1.0 } else { 0.0 },
        };
        // moon_shown already folds in geometric visibility
        let moon_target = BodyFrame {
            position: project(positions.moon, self.vertical_travel),
            opacity: if moon_shown { 1.0 } else { 0.0 },
        };
        self.sun.retarget(sun_target, now);
        self.moon.retarget(moon_target, now);

        self.illumination = positions.illumination;
        self.ticks += 1;

        TickOutcome {
            theme,
            theme_change,
            edges,
            moon_shown,
            sun_target,
            moon_target,
            illumination: positions.illumination,
        }
    }

    pub fn frame(&self, now: Millis) -> RenderFrame {
        RenderFrame {
            sun: self.sun.sample(now),
            moon: self.moon.sample(now),
        }
    }

    pub fn is_settled(&self, now: Millis) -> bool {
        self.sun.is_done(now) && self.moon.is_done(now)
    }
}
