use super::word_wrap;
use crate::renderer::{Canvas, Color, Rect, TextMetrics};

const LOG_BG: Color = Color::rgba8(0x11, 0x11, 0x11, 0xFF);
const LOG_TEXT: Color = Color::rgba8(0xDD, 0xDD, 0xDD, 0xFF);
const PADDING: f32 = 4.0;

/// Server messages, newest last, shown bottom-aligned in a scrolling panel.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<String>,
    /// Wrapped lines hidden below the visible window. 0 = pinned to the bottom.
    scroll: usize,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with `messages` and scroll to the bottom.
    /// `None` leaves the log untouched; `Some(&[])` empties it.
    pub fn update(&mut self, messages: Option<&[String]>) {
        let Some(messages) = messages else { return };
        self.entries.clear();
        self.entries.extend(messages.iter().cloned());
        self.scroll = 0;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Scroll by `lines`; positive values reveal older lines. The upper
    /// bound is applied when the log is laid out, since it depends on width.
    pub fn scroll_by(&mut self, lines: i32) {
        self.scroll = self.scroll.saturating_add_signed(lines as isize);
    }

    /// The wrapped lines that fit in `area`, oldest first.
    pub fn visible_lines(&self, area: Rect, metrics: TextMetrics) -> Vec<String> {
        if metrics.char_advance <= 0.0 || metrics.line_height <= 0.0 {
            return Vec::new();
        }
        let max_cols = ((area.w - 2.0 * PADDING) / metrics.char_advance).floor().max(0.0) as usize;
        let rows = ((area.h - 2.0 * PADDING) / metrics.line_height).floor().max(0.0) as usize;

        let lines: Vec<String> = self
            .entries
            .iter()
            .flat_map(|entry| word_wrap(entry, max_cols))
            .collect();

        let hidden_max = lines.len().saturating_sub(rows);
        let end = lines.len() - self.scroll.min(hidden_max);
        let start = end.saturating_sub(rows);
        lines[start..end].to_vec()
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, area: Rect) {
        canvas.fill_rect(area, LOG_BG);
        let metrics = canvas.text_metrics();
        for (row, line) in self.visible_lines(area, metrics).iter().enumerate() {
            let y = area.y + PADDING + row as f32 * metrics.line_height;
            canvas.draw_text(line, [area.x + PADDING, y], LOG_TEXT);
        }
    }
}
