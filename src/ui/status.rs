use super::progress_bar;
use crate::renderer::{Canvas, Color, Rect};
use crate::state::{EntityEntry, first_player};

pub const HEALTHY: Color = Color::rgba8(0x4C, 0xAF, 0x50, 0xFF);
pub const WOUNDED: Color = Color::rgba8(0xFF, 0xA5, 0x00, 0xFF);
pub const CRITICAL: Color = Color::rgba8(0xFF, 0x00, 0x00, 0xFF);

const LABEL: Color = Color::rgba8(0xCC, 0xCC, 0xCC, 0xFF);
const BAR_EMPTY: Color = Color::rgba8(0x33, 0x33, 0x33, 0xFF);
const BAR_HEIGHT: f32 = 14.0;

/// Colour of the health bar at `percent` health.
pub fn bar_color(percent: f32) -> Color {
    if percent > 60.0 {
        HEALTHY
    } else if percent > 30.0 {
        WOUNDED
    } else {
        CRITICAL
    }
}

/// Player health bar plus the score and level counters.
#[derive(Debug)]
pub struct StatusPanel {
    health: f32,
    score: String,
    level: String,
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self { health: 100.0, score: "0".into(), level: "1".into() }
    }
}

impl StatusPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the first player in `entities`. Without a player nothing changes.
    pub fn update_health(&mut self, entities: &[EntityEntry]) {
        if let Some(player) = first_player(entities) {
            self.health = player.health.clamp(0.0, 100.0);
        }
    }

    pub fn update_score(&mut self, score: u32) {
        self.score = score.to_string();
    }

    pub fn update_level(&mut self, level: u32) {
        self.level = level.to_string();
    }

    /// Filled width of the bar in percent, `[0, 100]`.
    pub fn health_percent(&self) -> f32 { self.health }

    pub fn health_color(&self) -> Color { bar_color(self.health) }

    pub fn score_text(&self) -> &str { &self.score }

    pub fn level_text(&self) -> &str { &self.level }

    /// Lay the panel out top-down inside `area`.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, area: Rect) {
        let line = canvas.text_metrics().line_height;
        let mut y = area.y;

        canvas.draw_text("HEALTH", [area.x, y], LABEL);
        y += line + 2.0;
        let bar = Rect::new(area.x, y, area.w, BAR_HEIGHT);
        progress_bar(canvas, bar, self.health / 100.0, self.health_color(), BAR_EMPTY);
        y += BAR_HEIGHT + 6.0;

        canvas.draw_text(&format!("SCORE: {}", self.score), [area.x, y], LABEL);
        y += line + 2.0;
        canvas.draw_text(&format!("LEVEL: {}", self.level), [area.x, y], LABEL);
    }
}
