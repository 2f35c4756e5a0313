use crate::channel::{AmbientChannel, ChannelState};
use crate::effects::{AudioEffect, TrackId};
use gloaming_core::config::AudioConfig;
use gloaming_core::{Cue, Millis, ThemeState};

/// Session-wide audio readiness. Moves Locked -> Unlocked once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Locked,
    Unlocked,
}

/// Whether the page is on screen and has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageActivity {
    pub visible: bool,
    pub focused: bool,
}

impl PageActivity {
    pub const ACTIVE: PageActivity = PageActivity {
        visible: true,
        focused: true,
    };

    pub fn is_active(self) -> bool {
        self.visible && self.focused
    }
}

impl Default for PageActivity {
    fn default() -> Self {
        Self::ACTIVE
    }
}

/// Ambient/cue mixer. Pure state machine: every operation returns the
/// media effects to apply and never touches a real audio element.
///
/// One ambient loop per theme; only the current theme's loop is ever the
/// fade-in target. Cues are one-shots restarted from zero.
pub struct AmbienceMixer {
    config: AudioConfig,
    readiness: Readiness,
    /// Gestures before this instant never unlock.
    armed_at: Millis,
    page: PageActivity,
    theme: ThemeState,
    channels: [AmbientChannel; 4],
    shut_down: bool,
}

impl AmbienceMixer {
    /// Create a locked mixer for `theme`. `started_at` anchors the unlock delay.
    pub fn new(config: AudioConfig, theme: ThemeState, started_at: Millis) -> Self {
        let armed_at = started_at + config.unlock_delay_ms;
        Self {
            config,
            readiness: Readiness::Locked,
            armed_at,
            page: PageActivity::default(),
            theme,
            channels: Default::default(),
            shut_down: false,
        }
    }

    /// Effects that put freshly loaded tracks into their initial state:
    /// ambient loops muted at zero volume.
    pub fn preload_effects(&self) -> Vec<AudioEffect> {
        ThemeState::ALL
            .into_iter()
            .flat_map(|theme| {
                let track = TrackId::Ambient(theme);
                [
                    AudioEffect::SetMuted { track, muted: true },
                    AudioEffect::SetVolume { track, volume: 0.0 },
                ]
            })
            .collect()
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_unlocked(&self) -> bool {
        self.readiness == Readiness::Unlocked
    }

    pub fn theme(&self) -> ThemeState {
        self.theme
    }

    pub fn page(&self) -> PageActivity {
        self.page
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn channel_state(&self, theme: ThemeState) -> ChannelState {
        self.channels[theme.index()].state()
    }

    pub fn volume(&self, theme: ThemeState) -> f32 {
        self.channels[theme.index()].volume()
    }

    /// Feed a user gesture. The first one after the arming delay unlocks
    /// audio; every other call is a no-op.
    pub fn observe_gesture(&mut self, now: Millis) -> Vec<AudioEffect> {
        if self.shut_down || self.is_unlocked() {
            return Vec::new();
        }
        if now < self.armed_at {
            log::debug!("Ignoring gesture before unlock delay elapsed");
            return Vec::new();
        }

        self.readiness = Readiness::Unlocked;
        log::info!("Audio unlocked by user gesture");

        let mut effects: Vec<AudioEffect> = ThemeState::ALL
            .into_iter()
            .map(|theme| AudioEffect::SetMuted {
                track: TrackId::Ambient(theme),
                muted: false,
            })
            .collect();
        if self.page.is_active() {
            self.start_current(now, self.config.resume_fade_ms, &mut effects);
        }
        effects
    }

    /// Update page visibility/focus. Going inactive hard-stops every track;
    /// coming back resumes the current ambient loop if already unlocked.
    pub fn set_page_activity(&mut self, page: PageActivity, now: Millis) -> Vec<AudioEffect> {
        if self.shut_down {
            return Vec::new();
        }
        let was_active = self.page.is_active();
        self.page = page;

        let mut effects = Vec::new();
        match (was_active, page.is_active()) {
            (true, false) => self.pause_all(&mut effects),
            (false, true) if self.is_unlocked() => {
                self.start_current(now, self.config.resume_fade_ms, &mut effects);
            }
            _ => {}
        }
        effects
    }

    pub fn set_visible(&mut self, visible: bool, now: Millis) -> Vec<AudioEffect> {
        let page = PageActivity {
            visible,
            ..self.page
        };
        self.set_page_activity(page, now)
    }

    pub fn set_focused(&mut self, focused: bool, now: Millis) -> Vec<AudioEffect> {
        let page = PageActivity {
            focused,
            ..self.page
        };
        self.set_page_activity(page, now)
    }

    /// Switch the active ambient loop. Crossfades when audio is unlocked
    /// and the page is active; otherwise only records the theme so the
    /// next unlock or resume starts the right loop.
    pub fn change_theme(&mut self, theme: ThemeState, now: Millis) -> Vec<AudioEffect> {
        if self.shut_down || theme == self.theme {
            return Vec::new();
        }
        self.theme = theme;

        let mut effects = Vec::new();
        let crossfade = self.is_unlocked() && self.page.is_active();
        for other in ThemeState::ALL.into_iter().filter(|t| *t != theme) {
            let channel = &mut self.channels[other.index()];
            if crossfade {
                if channel.is_playing() || channel.volume() > 0.0 {
                    channel.fade_to(0.0, now, self.config.crossfade_out_ms);
                }
            } else if channel.snap(0.0) {
                // paused loops drop straight to zero so a later switch back fades in
                effects.push(AudioEffect::SetVolume {
                    track: TrackId::Ambient(other),
                    volume: 0.0,
                });
            }
        }
        if !crossfade {
            return effects;
        }
        self.start_current(now, self.config.crossfade_in_ms, &mut effects);
        effects
    }

    /// Fire a one-shot cue. Dropped (not queued) when locked or inactive.
    pub fn play_cue(&mut self, cue: Cue) -> Vec<AudioEffect> {
        if self.shut_down {
            return Vec::new();
        }
        if !self.is_unlocked() || !self.page.is_active() {
            log::debug!("Dropping cue {} (audio locked or page inactive)", cue.as_str());
            return Vec::new();
        }
        let track = TrackId::Cue(cue);
        vec![
            AudioEffect::SetVolume {
                track,
                volume: self.config.volume,
            },
            AudioEffect::Restart(track),
        ]
    }

    /// Step running fades. Call once per animation frame.
    pub fn advance(&mut self, now: Millis) -> Vec<AudioEffect> {
        let mut effects = Vec::new();
        if self.shut_down {
            return effects;
        }
        for theme in ThemeState::ALL {
            let track = TrackId::Ambient(theme);
            let channel = &mut self.channels[theme.index()];
            let step = channel.step(now);
            if let Some(volume) = step.volume {
                effects.push(AudioEffect::SetVolume { track, volume });
            }
            // a finished fade-out parks the loop; it stays loaded for an instant restart
            let parked = step.finished && theme != self.theme && channel.volume() <= 0.0;
            if parked && channel.is_playing() {
                channel.set_playing(false);
                effects.push(AudioEffect::Pause(track));
            }
        }
        effects
    }

    /// Stop and release every track. The mixer is inert afterwards.
    pub fn shutdown(&mut self) -> Vec<AudioEffect> {
        if self.shut_down {
            return Vec::new();
        }
        self.shut_down = true;
        for channel in &mut self.channels {
            channel.set_playing(false);
            channel.snap(0.0);
        }
        TrackId::all()
            .flat_map(|track| [AudioEffect::Pause(track), AudioEffect::Detach(track)])
            .collect()
    }

    fn start_current(&mut self, now: Millis, fade_ms: Millis, effects: &mut Vec<AudioEffect>) {
        let track = TrackId::Ambient(self.theme);
        let channel = &mut self.channels[self.theme.index()];
        if !channel.is_playing() {
            channel.set_playing(true);
            effects.push(AudioEffect::Play(track));
        }
        channel.fade_to(self.config.volume, now, fade_ms);
    }

    fn pause_all(&mut self, effects: &mut Vec<AudioEffect>) {
        for theme in ThemeState::ALL {
            let channel = &mut self.channels[theme.index()];
            channel.set_playing(false);
            let settled = if theme == self.theme {
                channel.volume()
            } else {
                0.0
            };
            if channel.snap(settled) {
                effects.push(AudioEffect::SetVolume {
                    track: TrackId::Ambient(theme),
                    volume: settled,
                });
            }
        }
        effects.extend(TrackId::all().map(AudioEffect::Pause));
    }
}
