use crate::effects::{AudioEffect, TrackId};
use gloaming_core::config::AssetManifest;
use gloaming_core::{Cue, ThemeState};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Owns the eight `<audio>` elements and executes mixer effects on them.
///
/// Every media failure stops here: `play()` rejections (autoplay policy,
/// decode errors) are logged at debug level and dropped.
pub struct AudioBridge {
    ambient: [HtmlAudioElement; 4],
    cues: [HtmlAudioElement; 4],
}

impl AudioBridge {
    /// Create and start loading every track. Ambient loops begin muted at volume 0.
    pub fn new(assets: &AssetManifest) -> Result<Self, JsValue> {
        let ambient = [
            ambient_track(assets.ambient_url(ThemeState::Morning))?,
            ambient_track(assets.ambient_url(ThemeState::Afternoon))?,
            ambient_track(assets.ambient_url(ThemeState::Evening))?,
            ambient_track(assets.ambient_url(ThemeState::Night))?,
        ];
        let cues = [
            cue_track(assets.cue_url(Cue::SunRise))?,
            cue_track(assets.cue_url(Cue::SunSet))?,
            cue_track(assets.cue_url(Cue::MoonRise))?,
            cue_track(assets.cue_url(Cue::MoonSet))?,
        ];
        log::info!("Audio bridge created ({} ambient, {} cues)", ambient.len(), cues.len());
        Ok(Self { ambient, cues })
    }

    pub fn apply(&self, effects: &[AudioEffect]) {
        for effect in effects {
            self.apply_one(*effect);
        }
    }

    fn element(&self, track: TrackId) -> &HtmlAudioElement {
        match track {
            TrackId::Ambient(theme) => &self.ambient[theme.index()],
            TrackId::Cue(cue) => &self.cues[cue.index()],
        }
    }

    fn apply_one(&self, effect: AudioEffect) {
        let track = effect.track();
        let el = self.element(track);
        match effect {
            AudioEffect::SetMuted { muted, .. } => el.set_muted(muted),
            AudioEffect::SetVolume { volume, .. } => {
                el.set_volume(f64::from(volume.clamp(0.0, 1.0)));
            }
            AudioEffect::Play(_) => play_detached(el, track),
            AudioEffect::Restart(_) => {
                el.set_current_time(0.0);
                play_detached(el, track);
            }
            AudioEffect::Pause(_) => {
                let _ = el.pause();
            }
            AudioEffect::Detach(_) => {
                let _ = el.remove_attribute("src");
                el.load();
            }
        }
    }
}

fn ambient_track(url: &str) -> Result<HtmlAudioElement, JsValue> {
    let el = HtmlAudioElement::new_with_src(url)?;
    el.set_loop(true);
    el.set_volume(0.0);
    el.set_muted(true);
    el.set_preload("auto");
    el.load();
    Ok(el)
}

fn cue_track(url: &str) -> Result<HtmlAudioElement, JsValue> {
    let el = HtmlAudioElement::new_with_src(url)?;
    el.set_preload("auto");
    Ok(el)
}

/// Start playback without waiting on it. The outcome is observed only to
/// swallow rejections; nothing is retried.
fn play_detached(el: &HtmlAudioElement, track: TrackId) {
    match el.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("play() rejected for {track:?}: {e:?}");
            }
        }),
        Err(e) => log::debug!("play() threw for {track:?}: {e:?}"),
    }
}
