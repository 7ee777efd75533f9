// ── HUD widgets & pure helpers ───────────────────────────────────────────────

pub mod hud;
pub mod message_log;
pub mod status;

pub use hud::{Hud, HudAction, HudLayout, HudView};
pub use message_log::MessageLog;
pub use status::StatusPanel;

use crate::renderer::{Canvas, Color, Rect};

/// Word-wrap `text` so every returned line is at most `max_cols` characters.
/// Words are split on whitespace; a single word longer than `max_cols` is
/// broken across as many lines as it needs.
pub fn word_wrap(text: &str, max_cols: usize) -> Vec<String> {
    if max_cols == 0 { return vec![]; }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_cols {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
        // Force-wrap a single word that exceeds max_cols.
        while current_len > max_cols {
            let split = current.char_indices().nth(max_cols).map_or(current.len(), |(i, _)| i);
            let rest = current.split_off(split);
            lines.push(std::mem::replace(&mut current, rest));
            current_len -= max_cols;
        }
    }
    if !current.is_empty() { lines.push(current); }
    lines
}

/// Returns `true` if pixel point `(px, py)` falls inside the rectangle
/// defined by origin `(rx, ry)` and size `(rw, rh)` using half-open intervals.
pub fn rect_contains(rx: f32, ry: f32, rw: f32, rh: f32, px: f32, py: f32) -> bool {
    px >= rx && px < rx + rw && py >= ry && py < ry + rh
}

/// Horizontal bar filling `[0, pct]` of `rect` with `filled` and the
/// remainder with `empty`. `pct` is clamped to `[0, 1]`.
pub fn progress_bar<C: Canvas + ?Sized>(canvas: &mut C, rect: Rect, pct: f32, filled: Color, empty: Color) {
    let pct = pct.clamp(0.0, 1.0);
    let fw = rect.w * pct;
    if fw > 0.0    { canvas.fill_rect(Rect::new(rect.x,      rect.y, fw,          rect.h), filled); }
    if fw < rect.w { canvas.fill_rect(Rect::new(rect.x + fw, rect.y, rect.w - fw, rect.h), empty);  }
}

/// One-pixel outline just inside `rect`.
pub fn outline<C: Canvas + ?Sized>(canvas: &mut C, rect: Rect, color: Color) {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.w - 1.0, rect.y + rect.h - 1.0);
    canvas.stroke_line([x0, y0], [x1, y0], color);
    canvas.stroke_line([x1, y0], [x1, y1], color);
    canvas.stroke_line([x1, y1], [x0, y1], color);
    canvas.stroke_line([x0, y1], [x0, y0], color);
}
