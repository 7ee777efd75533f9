pub mod atlas;
pub mod framebuffer;
pub mod present;
pub mod scene;
pub mod text;
pub mod utils;

use image::RgbaImage;

// ── Color ──────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) RGBA in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0])
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

// ── Rectangles ─────────────────────────────────────────────────────────────

/// Pixel rectangle inside a source image (tilesheet or font atlas).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SrcRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Destination rectangle on a canvas, in canvas pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        crate::ui::rect_contains(self.x, self.y, self.w, self.h, px, py)
    }
}

// ── Canvas ─────────────────────────────────────────────────────────────────

/// Line metrics of whatever font a canvas draws text with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextMetrics {
    pub line_height: f32,
    /// Advance of a typical character; used for column-based word wrapping.
    pub char_advance: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self { line_height: 16.0, char_advance: 8.0 }
    }
}

/// A 2D draw target.
///
/// Each component that draws receives its own canvas at construction, so no
/// component reaches for a global surface.
pub trait Canvas {
    /// Resize the drawable area. Contents are discarded.
    fn resize(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    /// Reset every pixel to fully transparent.
    fn clear(&mut self);
    /// Provide the packed sprite image that `draw_tile` samples from.
    fn set_tilesheet(&mut self, sheet: RgbaImage);
    /// Copy `src` from the tilesheet into `dst`, scaling nearest-neighbour.
    fn draw_tile(&mut self, src: SrcRect, dst: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// One-pixel line between two points.
    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], color: Color);
    /// Single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: [f32; 2], color: Color);
    fn text_metrics(&self) -> TextMetrics;
}
