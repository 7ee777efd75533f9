//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use dungeon_client::audio::{AudioBackend, ClipId};
use dungeon_client::error::{AudioError, NetError};
use dungeon_client::net::{Command, Dispatcher, Ticket};
use dungeon_client::renderer::{Canvas, Color, Rect, SrcRect, TextMetrics};
use dungeon_client::state::GameState;
use image::RgbaImage;

// ── RecordingCanvas ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear,
    Tile { src: SrcRect, dst: Rect },
    Fill { rect: Rect, color: Color },
    Line { from: [f32; 2], to: [f32; 2], color: Color },
    Text { text: String, origin: [f32; 2] },
}

/// Canvas that remembers every draw call since the last `clear`.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub size: (u32, u32),
    pub resizes: Vec<(u32, u32)>,
    pub has_sheet: bool,
    pub clears: usize,
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn tiles(&self) -> Vec<(SrcRect, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Tile { src, dst } => Some((*src, *dst)),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(Rect, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Line { .. })).count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resizes.push((width, height));
        self.ops.clear();
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.ops.clear();
    }

    fn set_tilesheet(&mut self, _sheet: RgbaImage) {
        self.has_sheet = true;
    }

    fn draw_tile(&mut self, src: SrcRect, dst: Rect) {
        self.ops.push(Op::Tile { src, dst });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(Op::Fill { rect, color });
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], color: Color) {
        self.ops.push(Op::Line { from, to, color });
    }

    fn draw_text(&mut self, text: &str, origin: [f32; 2], _color: Color) {
        self.ops.push(Op::Text { text: text.to_string(), origin });
    }

    fn text_metrics(&self) -> TextMetrics {
        TextMetrics::default()
    }
}

// ── FakeAudio ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeClip {
    pub duration: Option<f64>,
    pub position: f64,
    pub playing: bool,
    pub volume: f32,
    pub seeks: Vec<f64>,
    /// Position at each `play` call.
    pub plays: Vec<f64>,
}

/// In-memory backend: positions only move when the test says so.
#[derive(Debug, Default)]
pub struct FakeAudio {
    pub clips: HashMap<ClipId, FakeClip>,
    pub effects: usize,
    pub fail_play: bool,
    /// Queue play/pause like a real mixer thread; `settle` applies them.
    pub deferred: bool,
    pending: Vec<(ClipId, bool)>,
}

impl FakeAudio {
    pub fn new(music_duration: Option<f64>, effects: usize) -> Self {
        let mut clips = HashMap::new();
        clips.insert(ClipId::Music, FakeClip { duration: music_duration, ..FakeClip::default() });
        for i in 0..effects {
            clips.insert(ClipId::Effect(i), FakeClip { duration: Some(0.5), ..FakeClip::default() });
        }
        Self { clips, effects, ..Self::default() }
    }

    pub fn clip(&self, id: ClipId) -> &FakeClip {
        &self.clips[&id]
    }

    pub fn effect_plays(&self) -> usize {
        (0..self.effects).map(|i| self.clip(ClipId::Effect(i)).plays.len()).sum()
    }

    /// Apply every queued play/pause.
    pub fn settle(&mut self) {
        for (id, playing) in std::mem::take(&mut self.pending) {
            if let Some(c) = self.clips.get_mut(&id) {
                c.playing = playing;
            }
        }
    }

    fn set_playing(&mut self, id: ClipId, playing: bool) {
        if self.deferred {
            self.pending.push((id, playing));
        } else if let Some(c) = self.clips.get_mut(&id) {
            c.playing = playing;
        }
    }

    /// Pretend the music has been playing for `seconds`.
    pub fn advance_music(&mut self, seconds: f64) {
        if let Some(c) = self.clips.get_mut(&ClipId::Music) {
            if c.playing {
                c.position += seconds;
            }
        }
    }
}

impl AudioBackend for FakeAudio {
    fn effect_count(&self) -> usize {
        self.effects
    }

    fn duration(&self, clip: ClipId) -> Option<f64> {
        self.clips.get(&clip).and_then(|c| c.duration)
    }

    fn position(&self, clip: ClipId) -> f64 {
        self.clips.get(&clip).map_or(0.0, |c| c.position)
    }

    fn seek(&mut self, clip: ClipId, seconds: f64) {
        if let Some(c) = self.clips.get_mut(&clip) {
            c.position = seconds;
            c.seeks.push(seconds);
        }
    }

    fn play(&mut self, clip: ClipId) -> Result<(), AudioError> {
        if self.fail_play {
            return Err(AudioError::Unavailable);
        }
        let c = self.clips.get_mut(&clip).ok_or(AudioError::MissingClip(clip))?;
        c.plays.push(c.position);
        self.set_playing(clip, true);
        Ok(())
    }

    fn pause(&mut self, clip: ClipId) {
        self.set_playing(clip, false);
    }

    fn set_volume(&mut self, clip: ClipId, volume: f32) {
        if let Some(c) = self.clips.get_mut(&clip) {
            c.volume = volume;
        }
    }
}

// ── FakeDispatcher ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeDispatcher {
    pub sent: Vec<(Ticket, Command)>,
}

impl FakeDispatcher {
    pub fn last(&self) -> (Ticket, Command) {
        *self.sent.last().expect("nothing dispatched")
    }
}

impl Dispatcher for FakeDispatcher {
    fn dispatch(&mut self, ticket: Ticket, command: Command) {
        self.sent.push((ticket, command));
    }
}

// ── Snapshots ────────────────────────────────────────────────────────────────

pub fn state(json: &str) -> GameState {
    GameState::from_json(json).expect("valid snapshot")
}

pub fn ok(json: &str) -> Result<GameState, NetError> {
    Ok(state(json))
}

pub fn sheet() -> RgbaImage {
    RgbaImage::new(17 * 32, 17 * 16)
}
