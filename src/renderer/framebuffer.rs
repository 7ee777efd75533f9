use image::{Pixel, Rgba, RgbaImage};

use super::text::{FontSheet, layout_line};
use super::{Canvas, Color, Rect, SrcRect, TextMetrics};

/// CPU canvas backed by an RGBA image.
///
/// Everything is composited with straight-alpha "over" blending, so sprites
/// with transparent pixels and the translucent grid overlay layer correctly.
pub struct FrameBuffer {
    image: RgbaImage,
    tilesheet: Option<RgbaImage>,
    font: Option<FontSheet>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height), tilesheet: None, font: None }
    }

    pub fn image(&self) -> &RgbaImage { &self.image }

    pub fn set_font(&mut self, font: FontSheet) {
        self.font = Some(font);
    }

    pub fn has_font(&self) -> bool { self.font.is_some() }

    /// Composite another image on top with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, top: &RgbaImage, x: i64, y: i64) {
        image::imageops::overlay(&mut self.image, top, x, y);
    }

    /// Clip `rect` to the image; returns pixel bounds `(x0, y0, x1, y1)`, exclusive end.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.round().max(0.0);
        let y0 = rect.y.round().max(0.0);
        let x1 = (rect.x + rect.w).round().min(self.image.width() as f32);
        let y1 = (rect.y + rect.h).round().min(self.image.height() as f32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn blend(&mut self, x: u32, y: u32, px: Rgba<u8>) {
        if px[3] == 0 {
            return;
        }
        if let Some(dst) = self.image.get_pixel_mut_checked(x, y) {
            dst.blend(&px);
        }
    }

    /// Nearest-neighbour copy of `src` from `sheet` into `dst`, optionally
    /// multiplied by `tint`.
    fn blit(&mut self, sheet: &RgbaImage, src: SrcRect, dst: Rect, tint: Option<Color>) {
        let Some((x0, y0, x1, y1)) = self.clip(dst) else { return };
        if dst.w <= 0.0 || dst.h <= 0.0 {
            return;
        }
        let tint = tint.map(|c| c.0);
        for py in y0..y1 {
            let v = ((py as f32 + 0.5 - dst.y) / dst.h * src.h as f32) as u32;
            for px in x0..x1 {
                let u = ((px as f32 + 0.5 - dst.x) / dst.w * src.w as f32) as u32;
                let Some(texel) = sheet.get_pixel_checked(src.x + u.min(src.w - 1), src.y + v.min(src.h - 1))
                else {
                    continue;
                };
                let mut texel = *texel;
                if let Some(t) = tint {
                    for (channel, factor) in texel.0.iter_mut().zip(t) {
                        *channel = (*channel as f32 * factor).round() as u8;
                    }
                }
                self.blend(px, py, texel);
            }
        }
    }
}

impl Canvas for FrameBuffer {
    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    fn set_tilesheet(&mut self, sheet: RgbaImage) {
        self.tilesheet = Some(sheet);
    }

    fn draw_tile(&mut self, src: SrcRect, dst: Rect) {
        if src.w == 0 || src.h == 0 {
            return;
        }
        // Taken out for the duration of the blit so `self` can be borrowed mutably.
        let Some(sheet) = self.tilesheet.take() else { return };
        self.blit(&sheet, src, dst, None);
        self.tilesheet = Some(sheet);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else { return };
        let px = Rgba(color.to_rgba8());
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, px);
            }
        }
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], color: Color) {
        let px = Rgba(color.to_rgba8());
        let (mut x, mut y) = (from[0].round() as i64, from[1].round() as i64);
        let (x1, y1) = (to[0].round() as i64, to[1].round() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if x >= 0 && y >= 0 {
                self.blend(x as u32, y as u32, px);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_text(&mut self, text: &str, origin: [f32; 2], color: Color) {
        let Some(sheet) = self.font.take() else { return };
        let size = sheet.font.line_height as f32;
        for quad in layout_line(text, &sheet.font, origin, size) {
            self.blit(&sheet.image, quad.src, quad.dst, Some(color));
        }
        self.font = Some(sheet);
    }

    fn text_metrics(&self) -> TextMetrics {
        match &self.font {
            Some(sheet) => TextMetrics {
                line_height: sheet.font.line_height as f32,
                char_advance: sheet.font.typical_advance(),
            },
            None => TextMetrics::default(),
        }
    }
}
