use gloaming_core::{Cue, ThemeState};

/// Logical address of one of the eight media tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackId {
    Ambient(ThemeState),
    Cue(Cue),
}

impl TrackId {
    /// All eight tracks, ambient loops first.
    pub fn all() -> impl Iterator<Item = TrackId> {
        ThemeState::ALL
            .into_iter()
            .map(TrackId::Ambient)
            .chain(Cue::ALL.into_iter().map(TrackId::Cue))
    }

    pub fn is_ambient(self) -> bool {
        matches!(self, TrackId::Ambient(_))
    }
}

/// A media command produced by the mixer and executed by a bridge.
///
/// Effects are fire-and-forget: the bridge swallows any failure and the
/// mixer never learns the outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioEffect {
    SetMuted { track: TrackId, muted: bool },
    SetVolume { track: TrackId, volume: f32 },
    /// Resume playback from the current position.
    Play(TrackId),
    /// Seek to zero, then play.
    Restart(TrackId),
    Pause(TrackId),
    /// Release the media source. Only issued at teardown.
    Detach(TrackId),
}

impl AudioEffect {
    pub fn track(&self) -> TrackId {
        match *self {
            AudioEffect::SetMuted { track, .. } | AudioEffect::SetVolume { track, .. } => track,
            AudioEffect::Play(track)
            | AudioEffect::Restart(track)
            | AudioEffect::Pause(track)
            | AudioEffect::Detach(track) => track,
        }
    }

    /// Whether this effect asks the media element to start producing sound.
    pub fn starts_playback(&self) -> bool {
        matches!(self, AudioEffect::Play(_) | AudioEffect::Restart(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tracks_distinct() {
        let tracks: Vec<TrackId> = TrackId::all().collect();
        assert_eq!(tracks.len(), 8);
        for (i, a) in tracks.iter().enumerate() {
            for b in &tracks[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(tracks.iter().filter(|t| t.is_ambient()).count(), 4);
    }

    #[test]
    fn test_effect_track_and_playback() {
        let track = TrackId::Cue(Cue::SunSet);
        assert_eq!(AudioEffect::Restart(track).track(), track);
        assert!(AudioEffect::Restart(track).starts_playback());
        assert!(AudioEffect::Play(track).starts_playback());
        assert!(!AudioEffect::Pause(track).starts_playback());
        assert!(!AudioEffect::SetVolume { track, volume: 0.5 }.starts_playback());
    }
}
