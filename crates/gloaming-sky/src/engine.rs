use crate::session::{RenderFrame, SkySession};
use chrono::{DateTime, FixedOffset};
use gloaming_audio::{AmbienceMixer, AudioEffect, PageActivity};
use gloaming_core::{Cue, Millis, MoonIllumination, SkyConfig, ThemeState};
use gloaming_ephemeris::{Ephemeris, PositionProvider, PositionSource};

/// Result of one scheduler tick, ready for a host to render and play.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub theme: ThemeState,
    pub message: &'static str,
    pub theme_changed: bool,
    /// Rise/set edges detected this tick, whether or not they were audible.
    pub edges: Vec<Cue>,
    pub moon_shown: bool,
    pub illumination: MoonIllumination,
    pub source: PositionSource,
    pub audio: Vec<AudioEffect>,
}

/// One animation frame's worth of output.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub frame: RenderFrame,
    pub audio: Vec<AudioEffect>,
}

/// Ties position lookup, the sky session and the mixer together.
///
/// The host drives it with four kinds of input: `tick` on the recompute
/// period, `animate` every animation frame, gestures, and page
/// visibility/focus changes. Every call returns effects for the host to
/// apply; the engine itself never touches the page.
pub struct Engine<E> {
    provider: PositionProvider<E>,
    session: SkySession,
    mixer: AmbienceMixer,
    tick_period: Millis,
    last_tick: Option<Millis>,
}

impl<E: Ephemeris> Engine<E> {
    pub fn new(ephemeris: E, config: &SkyConfig, started_at: Millis) -> Self {
        let initial_theme = ThemeState::default();
        Self {
            provider: PositionProvider::new(ephemeris, config.location),
            session: SkySession::new(&config.motion, initial_theme),
            mixer: AmbienceMixer::new(config.audio.clone(), initial_theme, started_at),
            tick_period: config.tick_period_ms,
            last_tick: None,
        }
    }

    pub fn preload_effects(&self) -> Vec<AudioEffect> {
        self.mixer.preload_effects()
    }

    pub fn theme(&self) -> ThemeState {
        self.session.theme()
    }

    pub fn message(&self) -> &'static str {
        self.session.message()
    }

    pub fn session(&self) -> &SkySession {
        &self.session
    }

    pub fn mixer(&self) -> &AmbienceMixer {
        &self.mixer
    }

    /// True before the first tick and once a full period has passed since the last.
    pub fn is_tick_due(&self, now_ms: Millis) -> bool {
        self.last_tick
            .map_or(true, |last| now_ms - last >= self.tick_period)
    }

    /// Recompute the sky for `now`, retarget tweens, and collect audio effects.
    pub fn tick(&mut self, now: &DateTime<FixedOffset>, now_ms: Millis) -> TickReport {
        self.last_tick = Some(now_ms);

        let positions = self.provider.compute_positions(now);
        let outcome = self.session.apply(&positions, now_ms);

        let mut audio = Vec::new();
        if let Some(change) = outcome.theme_change {
            log::info!(
                "Theme {} -> {}",
                change.from.as_str(),
                change.to.as_str()
            );
            audio.extend(self.mixer.change_theme(change.to, now_ms));
        }
        for cue in &outcome.edges {
            audio.extend(self.mixer.play_cue(*cue));
        }

        TickReport {
            theme: outcome.theme,
            message: outcome.theme.message(),
            theme_changed: outcome.theme_change.is_some(),
            edges: outcome.edges,
            moon_shown: outcome.moon_shown,
            illumination: outcome.illumination,
            source: positions.source,
            audio,
        }
    }

    /// Sample body tweens and step audio fades.
    pub fn animate(&mut self, now_ms: Millis) -> FrameUpdate {
        FrameUpdate {
            frame: self.session.frame(now_ms),
            audio: self.mixer.advance(now_ms),
        }
    }

    pub fn observe_gesture(&mut self, now_ms: Millis) -> Vec<AudioEffect> {
        self.mixer.observe_gesture(now_ms)
    }

    pub fn set_page_activity(&mut self, page: PageActivity, now_ms: Millis) -> Vec<AudioEffect> {
        self.mixer.set_page_activity(page, now_ms)
    }

    pub fn set_visible(&mut self, visible: bool, now_ms: Millis) -> Vec<AudioEffect> {
        self.mixer.set_visible(visible, now_ms)
    }

    pub fn set_focused(&mut self, focused: bool, now_ms: Millis) -> Vec<AudioEffect> {
        self.mixer.set_focused(focused, now_ms)
    }

    pub fn shutdown(&mut self) -> Vec<AudioEffect> {
        self.mixer.shutdown()
    }
}
