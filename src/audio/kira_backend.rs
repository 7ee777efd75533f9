use std::path::Path;

use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::{
        PlaybackState,
        static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    },
    tween::Tween,
    Volume,
};

use super::{AudioBackend, ClipId};
use crate::error::AudioError;

/// One decoded clip plus the handle of its current playback, if any.
struct Clip {
    data: StaticSoundData,
    handle: Option<StaticSoundHandle>,
    /// Where the next fresh playback starts.
    start: f64,
    volume: f32,
    looping: bool,
    /// Set by `pause`, cleared by `play`. The handle's own state lags behind
    /// until the audio thread has processed the command.
    paused: bool,
}

impl Clip {
    fn new(data: StaticSoundData, looping: bool) -> Self {
        Self { data, handle: None, start: 0.0, volume: 1.0, looping, paused: false }
    }

    fn is_live(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !matches!(h.state(), PlaybackState::Stopped))
    }
}

/// [`AudioBackend`] on top of kira.
///
/// Works without an audio device: every clip then reports
/// [`AudioError::Unavailable`] on play and stays paused.
pub struct KiraBackend {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    music: Option<Clip>,
    effects: Vec<Option<Clip>>,
}

impl KiraBackend {
    /// Open the default output device and decode the music track (looping)
    /// and the effect clips. Files that fail to load are logged and left empty.
    pub fn load<P: AsRef<Path>>(music: P, effects: &[P]) -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!("failed to initialize audio manager: {e}; audio disabled");
                None
            }
        };

        Self {
            manager,
            music: load_clip(music.as_ref(), true),
            effects: effects.iter().map(|p| load_clip(p.as_ref(), false)).collect(),
        }
    }

    /// Returns true if audio hardware is available.
    pub fn is_available(&self) -> bool { self.manager.is_some() }

    /// True unless the clip exists and is currently sounding.
    pub fn is_paused(&self, clip: ClipId) -> bool {
        self.clip(clip).is_none_or(|c| c.paused || !c.is_live())
    }

    fn clip(&self, id: ClipId) -> Option<&Clip> {
        match id {
            ClipId::Music => self.music.as_ref(),
            ClipId::Effect(i) => self.effects.get(i).and_then(Option::as_ref),
        }
    }

    fn clip_mut(&mut self, id: ClipId) -> Option<&mut Clip> {
        match id {
            ClipId::Music => self.music.as_mut(),
            ClipId::Effect(i) => self.effects.get_mut(i).and_then(Option::as_mut),
        }
    }
}

fn load_clip(path: &Path, looping: bool) -> Option<Clip> {
    match StaticSoundData::from_file(path) {
        Ok(data) => Some(Clip::new(data, looping)),
        Err(e) => {
            tracing::warn!("failed to load '{}': {e}", path.display());
            None
        }
    }
}

impl AudioBackend for KiraBackend {
    fn effect_count(&self) -> usize {
        self.effects.len()
    }

    fn duration(&self, clip: ClipId) -> Option<f64> {
        self.clip(clip).map(|c| c.data.duration().as_secs_f64())
    }

    fn position(&self, clip: ClipId) -> f64 {
        match self.clip(clip) {
            Some(Clip { handle: Some(h), .. }) => h.position(),
            Some(c) => c.start,
            None => 0.0,
        }
    }

    fn seek(&mut self, clip: ClipId, seconds: f64) {
        let Some(c) = self.clip_mut(clip) else { return };
        c.start = seconds;
        if let Some(handle) = c.handle.as_mut() {
            let _ = handle.seek_to(seconds);
        }
    }

    fn play(&mut self, clip: ClipId) -> Result<(), AudioError> {
        let Some(manager) = self.manager.as_mut() else {
            return Err(AudioError::Unavailable);
        };
        let c = match clip {
            ClipId::Music => self.music.as_mut(),
            ClipId::Effect(i) => self.effects.get_mut(i).and_then(Option::as_mut),
        }
        .ok_or(AudioError::MissingClip(clip))?;

        if c.paused {
            if let Some(handle) = c.handle.as_mut() {
                let _ = handle.resume(Tween::default());
                c.paused = false;
                return Ok(());
            }
        }
        // A looping track that is still going needs nothing; a one-shot
        // starts over from `start`.
        if c.looping && c.is_live() {
            return Ok(());
        }
        if let Some(mut old) = c.handle.take() {
            let _ = old.stop(Tween::default());
        }

        let mut settings = StaticSoundSettings::new();
        if c.looping {
            settings = settings.loop_region(0.0..);
        }
        settings.volume = Volume::Amplitude(c.volume as f64).into();
        settings.start_position = c.start.into();

        let handle = manager
            .play(c.data.clone().with_settings(settings))
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        c.handle = Some(handle);
        c.paused = false;
        Ok(())
    }

    fn pause(&mut self, clip: ClipId) {
        let Some(c) = self.clip_mut(clip) else { return };
        if c.paused {
            return;
        }
        if let Some(handle) = c.handle.as_mut() {
            let _ = handle.pause(Tween::default());
            c.start = handle.position();
            c.paused = true;
        }
    }

    fn set_volume(&mut self, clip: ClipId, volume: f32) {
        let Some(c) = self.clip_mut(clip) else { return };
        c.volume = volume;
        if let Some(handle) = c.handle.as_mut() {
            let _ = handle.set_volume(Volume::Amplitude(volume as f64), Tween::default());
        }
    }
}
