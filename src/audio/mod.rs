pub mod kira_backend;

pub use kira_backend::KiraBackend;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AudioError;

/// Effects are mixed quieter than the music.
pub const EFFECT_VOLUME_RATIO: f32 = 0.7;
/// A fresh music start lands somewhere in the first 80 % of the track.
pub const FRESH_START_WINDOW: f64 = 0.8;

/// Identifies one clip owned by an [`AudioBackend`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClipId {
    Music,
    Effect(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MusicState {
    Paused,
    Playing,
}

/// Per-clip playback primitives. Positions and durations are in seconds.
pub trait AudioBackend {
    /// Number of effect clips; valid effect ids are `0..effect_count()`.
    fn effect_count(&self) -> usize;
    /// `None` while the duration is unknown (e.g. the clip failed to load).
    fn duration(&self, clip: ClipId) -> Option<f64>;
    fn position(&self, clip: ClipId) -> f64;
    fn seek(&mut self, clip: ClipId, seconds: f64);
    /// Start or resume playback from the current position.
    fn play(&mut self, clip: ClipId) -> Result<(), AudioError>;
    /// Pause, keeping the current position.
    fn pause(&mut self, clip: ClipId);
    fn set_volume(&mut self, clip: ClipId, volume: f32);
}

/// Music toggle, shared volume and random swing effects.
pub struct AudioController<B: AudioBackend> {
    backend: B,
    volume: f32,
    /// What the player last asked for; backends may apply it later.
    music: MusicState,
    started_once: bool,
    rng: StdRng,
}

impl<B: AudioBackend> AudioController<B> {
    pub fn new(backend: B, volume: f32) -> Self {
        Self::with_rng(backend, volume, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(backend: B, volume: f32, seed: u64) -> Self {
        Self::with_rng(backend, volume, StdRng::seed_from_u64(seed))
    }

    fn with_rng(backend: B, volume: f32, rng: StdRng) -> Self {
        let mut controller =
            Self { backend, volume: 0.0, music: MusicState::Paused, started_once: false, rng };
        controller.set_volume(volume);
        controller
    }

    pub fn backend(&self) -> &B { &self.backend }

    pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }

    pub fn volume(&self) -> f32 { self.volume }

    pub fn music_state(&self) -> MusicState { self.music }

    /// Flip the music between paused and playing.
    ///
    /// The very first start jumps to a random point early in the track; every
    /// later start resumes where the last pause left off. A failed start is
    /// returned so the caller can tell the player.
    pub fn toggle_music(&mut self) -> Result<MusicState, AudioError> {
        if self.music == MusicState::Playing {
            self.backend.pause(ClipId::Music);
            self.music = MusicState::Paused;
            tracing::debug!(position = self.backend.position(ClipId::Music), "music paused");
            return Ok(MusicState::Paused);
        }

        if !self.started_once {
            if let Some(duration) = self.backend.duration(ClipId::Music).filter(|d| *d > 0.0) {
                let offset = self.rng.gen_range(0.0..duration * FRESH_START_WINDOW);
                self.backend.seek(ClipId::Music, offset);
                self.started_once = true;
                tracing::debug!(offset, duration, "fresh music start");
            }
        }

        match self.backend.play(ClipId::Music) {
            Ok(()) => {
                self.music = MusicState::Playing;
                Ok(MusicState::Playing)
            }
            Err(e) => {
                tracing::error!("music playback failed: {e}");
                Err(e)
            }
        }
    }

    /// Set the shared volume, clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(ClipId::Music, self.volume);
        for i in 0..self.backend.effect_count() {
            self.backend.set_volume(ClipId::Effect(i), self.volume * EFFECT_VOLUME_RATIO);
        }
    }

    /// Play one effect chosen uniformly at random, from its start.
    /// Fire-and-forget: failures are only logged.
    pub fn play_random_effect(&mut self) {
        let count = self.backend.effect_count();
        if count == 0 {
            return;
        }
        let clip = ClipId::Effect(self.rng.gen_range(0..count));
        self.backend.seek(clip, 0.0);
        if let Err(e) = self.backend.play(clip) {
            tracing::warn!("error playing {clip:?}: {e}");
        }
    }
}
