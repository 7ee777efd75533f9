use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;
use serde::Deserialize;

use super::{Rect, SrcRect};
use crate::error::AssetError;

// ── layout_line ───────────────────────────────────────────────────────────────

/// One glyph blit: where to read it in the font atlas and where to put it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub src: SrcRect,
    pub dst: Rect,
}

/// Lay `text` out as a list of glyph blits.
///
/// - `origin`: top-left corner of the text block in canvas pixels.
/// - `font_size`: desired line height in pixels. Glyph rectangles are scaled
///   uniformly by `font_size / font.line_height`.
///
/// `'\n'` resets the cursor to `origin.x` and moves down one scaled line.
/// Characters missing from the font are skipped. A font with a zero line
/// height lays out nothing.
pub fn layout_line(text: &str, font: &Font, origin: [f32; 2], font_size: f32) -> Vec<GlyphQuad> {
    if font.line_height == 0 {
        return Vec::new();
    }

    let scale = font_size / font.line_height as f32;
    let mut quads = Vec::with_capacity(text.len());
    let mut cursor_x = origin[0];
    let mut cursor_y = origin[1];

    for ch in text.chars() {
        if ch == '\n' {
            cursor_x = origin[0];
            cursor_y += font.line_height as f32 * scale;
            continue;
        }

        let Some(glyph) = font.glyphs.get(&ch) else {
            continue;
        };

        quads.push(GlyphQuad {
            src: SrcRect { x: glyph.x, y: glyph.y, w: glyph.width, h: glyph.height },
            dst: Rect::new(
                cursor_x + glyph.x_offset as f32 * scale,
                cursor_y + glyph.y_offset as f32 * scale,
                glyph.width as f32 * scale,
                glyph.height as f32 * scale,
            ),
        });

        cursor_x += glyph.x_advance as f32 * scale;
    }

    quads
}

/// Horizontal advance of `text` at the font's native size.
pub fn measure(text: &str, font: &Font) -> f32 {
    text.chars()
        .filter_map(|ch| font.glyphs.get(&ch))
        .map(|g| g.x_advance as f32)
        .sum()
}

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Metrics for a single character in the bitmap font atlas.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub id: char,
    /// Top-left pixel X of the glyph region in the atlas.
    pub x: u32,
    /// Top-left pixel Y of the glyph region in the atlas.
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Horizontal offset applied when rendering (may be negative).
    pub x_offset: i32,
    /// Vertical offset applied when rendering (may be negative).
    pub y_offset: i32,
    /// How far to advance the cursor after drawing this glyph.
    pub x_advance: u32,
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// A bitmap font described by JSON; the pixels live in a separate atlas image.
pub struct Font {
    pub glyphs: HashMap<char, Glyph>,
    /// Vertical distance between successive baselines in pixels.
    pub line_height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
}

impl Font {
    /// Deserialise a `Font` from the **atlas JSON** glyph map, where each key
    /// is a single character and the value is its pixel rectangle:
    ///
    /// ```json
    /// { "A": { "x": 0, "y": 0, "w": 16, "h": 24 }, ... }
    /// ```
    ///
    /// `x_advance` defaults to the glyph width; offsets are zero.
    pub fn from_atlas_json(
        json: &str,
        texture_width: u32,
        texture_height: u32,
    ) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct AtlasEntry { x: u32, y: u32, w: u32, h: u32 }

        let raw: HashMap<String, AtlasEntry> = serde_json::from_str(json)?;

        let line_height = raw.values().map(|e| e.h).max().unwrap_or(0);

        let glyphs = raw
            .into_iter()
            .filter_map(|(key, entry)| {
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() { return None; }

                Some((ch, Glyph {
                    id: ch,
                    x: entry.x,
                    y: entry.y,
                    width:    entry.w,
                    height:   entry.h,
                    x_offset: 0,
                    y_offset: 0,
                    x_advance: entry.w,
                }))
            })
            .collect();

        Ok(Self { glyphs, line_height, texture_width, texture_height })
    }

    /// Mean advance over the printable ASCII glyphs present.
    pub fn typical_advance(&self) -> f32 {
        let (sum, n) = self
            .glyphs
            .values()
            .filter(|g| g.id.is_ascii_graphic())
            .fold((0u32, 0u32), |(s, n), g| (s + g.x_advance, n + 1));
        if n == 0 { 0.0 } else { sum as f32 / n as f32 }
    }
}

// ── FontSheet ────────────────────────────────────────────────────────────────

/// A [`Font`] together with its decoded atlas pixels.
pub struct FontSheet {
    pub font: Font,
    pub image: RgbaImage,
}

impl FontSheet {
    /// Load an atlas PNG and its char-keyed glyph map.
    pub fn load(png_path: &Path, glyph_map_path: &Path) -> Result<Self, AssetError> {
        let image = load_rgba(png_path)?;
        let json = std::fs::read_to_string(glyph_map_path).map_err(|source| AssetError::Io {
            path: glyph_map_path.display().to_string(),
            source,
        })?;
        let font = Font::from_atlas_json(&json, image.width(), image.height())?;
        Ok(Self { font, image })
    }
}

/// Decode any supported image file into RGBA8.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, AssetError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| AssetError::Image { path: path.display().to_string(), source })
}
