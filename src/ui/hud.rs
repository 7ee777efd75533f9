//! Side panel and game-over overlay.
//!
//! The composed frame is the scene canvas with the panel to its right:
//!
//! ```text
//! +---------------------+-----------+
//! |                     | status    |
//! |  scene (grid)       | music     |
//! |                     | volume    |
//! |                     | log       |
//! |                     | reset     |
//! +---------------------+-----------+
//! ```

use super::{MessageLog, StatusPanel, outline, progress_bar};
use crate::audio::MusicState;
use crate::renderer::{Canvas, Color, Rect, TextMetrics};

pub const PANEL_WIDTH: u32 = 240;
/// The panel never gets shorter than this, even for tiny grids.
pub const MIN_FRAME_HEIGHT: u32 = 480;

const PAD: f32 = 8.0;
const SLIDER_HEIGHT: f32 = 10.0;

const PANEL_BG: Color = Color::rgba8(0x22, 0x22, 0x22, 0xFF);
const BUTTON_BG: Color = Color::rgba8(0x44, 0x44, 0x44, 0xFF);
const BUTTON_BORDER: Color = Color::rgba8(0x88, 0x88, 0x88, 0xFF);
const TEXT: Color = Color::rgba8(0xEE, 0xEE, 0xEE, 0xFF);
const NOTICE: Color = Color::rgba8(0xFF, 0x66, 0x66, 0xFF);
const SLIDER_FILL: Color = Color::rgba8(0x4C, 0xAF, 0x50, 0xFF);
const SLIDER_TRACK: Color = Color::rgba8(0x11, 0x11, 0x11, 0xFF);
const OVERLAY_SHADE: Color = Color([0.0, 0.0, 0.0, 0.7]);
const OVERLAY_TITLE: Color = Color::rgba8(0xFF, 0x44, 0x44, 0xFF);

/// A click on one of the panel controls.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HudAction {
    ToggleMusic,
    SetVolume(f32),
    Reset,
}

/// Where each panel element sits, in frame pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct HudLayout {
    pub panel: Rect,
    pub status: Rect,
    pub music_button: Rect,
    pub volume_label: [f32; 2],
    pub volume_slider: Rect,
    pub notice: [f32; 2],
    pub log: Rect,
    pub reset_button: Rect,
}

impl HudLayout {
    pub fn new(panel: Rect, metrics: TextMetrics) -> Self {
        let line = metrics.line_height;
        let x = panel.x + PAD;
        let w = panel.w - 2.0 * PAD;
        let button_h = line + 8.0;

        let mut y = panel.y + PAD;
        let status = Rect::new(x, y, w, 3.0 * line + 28.0);
        y += status.h + PAD;

        let music_button = Rect::new(x, y, w, button_h);
        y += button_h + PAD;

        let volume_label = [x, y];
        y += line + 2.0;
        let volume_slider = Rect::new(x, y, w, SLIDER_HEIGHT);
        y += SLIDER_HEIGHT + PAD;

        let notice = [x, y];
        y += line + PAD;

        let reset_button = Rect::new(x, panel.y + panel.h - PAD - button_h, w, button_h);
        let log = Rect::new(x, y, w, (reset_button.y - PAD - y).max(0.0));

        Self { panel, status, music_button, volume_label, volume_slider, notice, log, reset_button }
    }
}

/// Everything the panel shows, borrowed from the client for one draw.
pub struct HudView<'a> {
    pub status: &'a StatusPanel,
    pub log: &'a MessageLog,
    pub music: MusicState,
    pub volume: f32,
    pub notice: Option<&'a str>,
    pub game_over: bool,
}

pub struct Hud {
    scene_width: u32,
    scene_height: u32,
    layout: HudLayout,
}

impl Hud {
    /// Lay the panel out next to a `scene_width × scene_height` scene canvas.
    pub fn new(scene_width: u32, scene_height: u32, metrics: TextMetrics) -> Self {
        let height = scene_height.max(MIN_FRAME_HEIGHT);
        let panel = Rect::new(scene_width as f32, 0.0, PANEL_WIDTH as f32, height as f32);
        Self { scene_width, scene_height, layout: HudLayout::new(panel, metrics) }
    }

    /// Size of the composed frame.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.scene_width + PANEL_WIDTH, self.scene_height.max(MIN_FRAME_HEIGHT))
    }

    pub fn scene_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.scene_width as f32, self.scene_height as f32)
    }

    pub fn layout(&self) -> &HudLayout { &self.layout }

    /// Which control, if any, sits under frame pixel `(px, py)`.
    pub fn hit_test(&self, px: f32, py: f32) -> Option<HudAction> {
        let l = &self.layout;
        if l.music_button.contains(px, py) {
            Some(HudAction::ToggleMusic)
        } else if l.reset_button.contains(px, py) {
            Some(HudAction::Reset)
        } else if l.volume_slider.contains(px, py) {
            let v = (px - l.volume_slider.x) / l.volume_slider.w;
            Some(HudAction::SetVolume(v.clamp(0.0, 1.0)))
        } else {
            None
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, view: &HudView<'_>) {
        let l = &self.layout;
        canvas.fill_rect(l.panel, PANEL_BG);

        view.status.draw(canvas, l.status);

        let music = match view.music {
            MusicState::Playing => "MUSIC: ON",
            MusicState::Paused => "MUSIC: OFF",
        };
        button(canvas, l.music_button, music);

        let percent = (view.volume * 100.0).round() as u32;
        canvas.draw_text(&format!("VOLUME {percent}%"), l.volume_label, TEXT);
        progress_bar(canvas, l.volume_slider, view.volume, SLIDER_FILL, SLIDER_TRACK);

        if let Some(notice) = view.notice {
            canvas.draw_text(notice, l.notice, NOTICE);
        }

        view.log.draw(canvas, l.log);
        button(canvas, l.reset_button, "RESET");

        if view.game_over {
            self.draw_overlay(canvas);
        }
    }

    /// Shade the scene and announce the end of the game.
    pub fn draw_overlay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let scene = self.scene_rect();
        canvas.fill_rect(scene, OVERLAY_SHADE);

        let metrics = canvas.text_metrics();
        let centre_y = scene.y + scene.h / 2.0;
        for (i, (text, color)) in [("GAME OVER", OVERLAY_TITLE), ("Press R or click RESET", TEXT)]
            .into_iter()
            .enumerate()
        {
            let width = text.chars().count() as f32 * metrics.char_advance;
            let x = scene.x + (scene.w - width) / 2.0;
            let y = centre_y - metrics.line_height + i as f32 * (metrics.line_height + 4.0);
            canvas.draw_text(text, [x, y], color);
        }
    }
}

fn button<C: Canvas + ?Sized>(canvas: &mut C, rect: Rect, label: &str) {
    canvas.fill_rect(rect, BUTTON_BG);
    outline(canvas, rect, BUTTON_BORDER);
    let metrics = canvas.text_metrics();
    let width = label.chars().count() as f32 * metrics.char_advance;
    let x = rect.x + (rect.w - width) / 2.0;
    let y = rect.y + (rect.h - metrics.line_height) / 2.0;
    canvas.draw_text(label, [x, y], TEXT);
}
