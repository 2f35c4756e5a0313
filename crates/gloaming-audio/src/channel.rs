use gloaming_core::math::progress;
use gloaming_core::Millis;

/// Lifecycle of one ambient loop as seen by the mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Silent,
    FadingIn,
    Audible,
    FadingOut,
}

/// A linear volume ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    start: Millis,
    duration: Millis,
}

impl Fade {
    fn sample(&self, now: Millis) -> f32 {
        let t = progress(now, self.start, self.duration);
        self.from + (self.to - self.from) * t
    }

    fn is_done(&self, now: Millis) -> bool {
        progress(now, self.start, self.duration) >= 1.0
    }
}

/// Result of stepping a channel's fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Step {
    /// New volume, when it changed.
    pub volume: Option<f32>,
    /// The fade finished this step.
    pub finished: bool,
}

/// Mixer-side shadow of an ambient media element: its volume, any running
/// fade, and whether playback has been requested.
#[derive(Debug, Clone, Default)]
pub(crate) struct AmbientChannel {
    volume: f32,
    fade: Option<Fade>,
    playing: bool,
}

impl AmbientChannel {
    pub fn state(&self) -> ChannelState {
        match self.fade {
            Some(f) if f.to > f.from => ChannelState::FadingIn,
            Some(f) if f.to < f.from => ChannelState::FadingOut,
            _ if self.playing && self.volume > 0.0 => ChannelState::Audible,
            _ => ChannelState::Silent,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Start a ramp from the current volume. A ramp to the current volume
    /// just cancels whatever was running.
    pub fn fade_to(&mut self, target: f32, now: Millis, duration: Millis) {
        self.fade = if (target - self.volume).abs() <= f32::EPSILON {
            None
        } else {
            Some(Fade {
                from: self.volume,
                to: target,
                start: now,
                duration,
            })
        };
    }

    /// Drop any running fade and jump to `volume`. Returns true if the volume changed.
    pub fn snap(&mut self, volume: f32) -> bool {
        self.fade = None;
        let changed = (self.volume - volume).abs() > f32::EPSILON;
        self.volume = volume;
        changed
    }

    pub fn step(&mut self, now: Millis) -> Step {
        let Some(fade) = self.fade else {
            return Step {
                volume: None,
                finished: false,
            };
        };
        let finished = fade.is_done(now);
        let next = if finished { fade.to } else { fade.sample(now) };
        if finished {
            self.fade = None;
        }
        let changed = (next - self.volume).abs() > f32::EPSILON;
        self.volume = next;
        Step {
            volume: changed.then_some(next),
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_progression() {
        let mut ch = AmbientChannel::default();
        ch.set_playing(true);
        ch.fade_to(0.5, 1000.0, 500.0);
        assert_eq!(ch.state(), ChannelState::FadingIn);

        let mid = ch.step(1250.0);
        assert!((mid.volume.expect("changed") - 0.25).abs() < 1e-6);
        assert!(!mid.finished);

        let end = ch.step(1600.0);
        assert!((end.volume.expect("changed") - 0.5).abs() < 1e-6);
        assert!(end.finished);
        assert_eq!(ch.state(), ChannelState::Audible);
    }

    #[test]
    fn test_fade_out_reaches_silent() {
        let mut ch = AmbientChannel::default();
        ch.set_playing(true);
        ch.snap(0.5);
        ch.fade_to(0.0, 0.0, 300.0);
        assert_eq!(ch.state(), ChannelState::FadingOut);
        let step = ch.step(300.0);
        assert!(step.finished);
        assert_eq!(ch.volume(), 0.0);
        ch.set_playing(false);
        assert_eq!(ch.state(), ChannelState::Silent);
    }

    #[test]
    fn test_fade_to_current_volume_cancels() {
        let mut ch = AmbientChannel::default();
        ch.fade_to(0.0, 0.0, 300.0);
        assert_eq!(ch.state(), ChannelState::Silent);
        assert_eq!(
            ch.step(100.0),
            Step {
                volume: None,
                finished: false
            }
        );
    }

    #[test]
    fn test_retarget_starts_from_current_volume() {
        let mut ch = AmbientChannel::default();
        ch.set_playing(true);
        ch.fade_to(0.5, 0.0, 500.0);
        ch.step(250.0);
        ch.fade_to(0.0, 250.0, 250.0);
        assert_eq!(ch.state(), ChannelState::FadingOut);
        let step = ch.step(375.0);
        assert!((step.volume.expect("changed") - 0.125).abs() < 1e-6);
    }
}
