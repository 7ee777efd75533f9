use std::cmp::Ordering;
use std::rc::Rc;

use image::RgbaImage;

use super::atlas::{DISPLAY_TILE, SpriteAtlas, cell_rect};
use super::{Canvas, Color, Rect};
use crate::state::{Entity, EntityKind, GameState};

/// Variant used for every floor cell and every wall.
const FLOOR_VARIANT: &str = "stone";
const WALL_VARIANT: &str = "stone";

/// Health bar geometry, relative to the top edge of the entity's tile.
const HEALTH_BAR_HEIGHT: f32 = 3.0;
const HEALTH_BAR_LIFT: f32 = 4.0;
const HEALTH_BACK: Color = Color::rgba8(0xFF, 0x00, 0x00, 0xFF);
const HEALTH_FRONT: Color = Color::rgba8(0x00, 0xFF, 0x00, 0xFF);
const GRID_LINE: Color = Color([50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0, 0.5]);

// ── Draw order ──────────────────────────────────────────────────────────────

/// `(alive, is_player)`: the dead go under the living, players over the rest.
fn layer(entity: &Entity) -> (bool, bool) {
    (!entity.is_dead(), entity.kind == EntityKind::Player)
}

/// Dead entities first, then enemies, then players. Within each group,
/// players come after everything else.
pub fn compare_draw_order(a: &Entity, b: &Entity) -> Ordering {
    layer(a).cmp(&layer(b))
}

/// Entities in the order they must be composited. The sort is stable, so
/// entities of equal priority keep the server's order.
pub fn draw_order<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Vec<&'a Entity> {
    let mut sorted: Vec<&Entity> = entities.into_iter().collect();
    sorted.sort_by(|a, b| compare_draw_order(a, b));
    sorted
}

/// Fraction of the health bar that is filled, in `[0, 1]`.
pub fn health_fraction(health: f32) -> f32 {
    (health / 100.0).clamp(0.0, 1.0)
}

// ── SceneRenderer ───────────────────────────────────────────────────────────

/// Draws a [`GameState`] onto its canvas.
///
/// Nothing is drawn until the tilesheet has been handed over with
/// [`SceneRenderer::tiles_loaded`]. Until then `render` only remembers the
/// requested state; a single slot, so only the most recent request survives.
pub struct SceneRenderer<C: Canvas> {
    canvas: C,
    atlas: SpriteAtlas,
    tiles_ready: bool,
    pending: Option<Rc<GameState>>,
    dims: Option<(u32, u32)>,
    frames: u64,
}

impl<C: Canvas> SceneRenderer<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            atlas: SpriteAtlas::standard(),
            tiles_ready: false,
            pending: None,
            dims: None,
            frames: 0,
        }
    }

    /// Size the canvas for a `width × height` grid.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width * DISPLAY_TILE, height * DISPLAY_TILE);
        self.dims = Some((width, height));
    }

    /// Grid dimensions from the last `initialize`.
    pub fn dimensions(&self) -> Option<(u32, u32)> { self.dims }

    pub fn is_ready(&self) -> bool { self.tiles_ready }

    pub fn canvas(&self) -> &C { &self.canvas }

    /// Number of completed scene draws.
    pub fn frames_drawn(&self) -> u64 { self.frames }

    /// Hand over the tilesheet. A render requested before this point is
    /// performed now, once, with the latest requested state.
    pub fn tiles_loaded(&mut self, sheet: RgbaImage) {
        self.canvas.set_tilesheet(sheet);
        self.tiles_ready = true;
        if let Some(state) = self.pending.clone() {
            self.draw(&state);
        }
    }

    /// Draw `state`, or defer it until the tilesheet arrives.
    pub fn render(&mut self, state: Rc<GameState>) {
        self.pending = Some(Rc::clone(&state));
        if !self.tiles_ready {
            tracing::debug!("tilesheet not loaded yet; deferring render");
            return;
        }
        self.draw(&state);
    }

    fn draw(&mut self, state: &GameState) {
        self.canvas.clear();

        for x in 0..state.width as i32 {
            for y in 0..state.height as i32 {
                self.draw_sprite("floor", x, y, Some(FLOOR_VARIANT));
            }
        }

        for &(x, y) in &state.walls {
            self.draw_sprite("wall", x, y, Some(WALL_VARIANT));
        }

        let sorted = draw_order(state.entities.iter().map(|e| &e.entity));

        for entity in &sorted {
            if let Some(name) = entity.kind.sprite_name() {
                self.draw_sprite(name, entity.x, entity.y, entity.behavior.as_deref());
            }
        }

        // Health bars go on top of every sprite.
        for entity in &sorted {
            self.draw_health_bar(entity);
        }

        self.draw_grid(state.width, state.height);
        self.frames += 1;
    }

    fn draw_sprite(&mut self, kind: &str, x: i32, y: i32, variant: Option<&str>) {
        if let Some(src) = self.atlas.lookup(kind, variant) {
            self.canvas.draw_tile(src, cell_rect(x, y));
        }
    }

    fn draw_health_bar(&mut self, entity: &Entity) {
        if entity.is_dead() {
            return;
        }
        let tile = cell_rect(entity.x, entity.y);
        let y = tile.y - HEALTH_BAR_LIFT;
        self.canvas.fill_rect(Rect::new(tile.x, y, tile.w, HEALTH_BAR_HEIGHT), HEALTH_BACK);
        let filled = tile.w * health_fraction(entity.health);
        self.canvas.fill_rect(Rect::new(tile.x, y, filled, HEALTH_BAR_HEIGHT), HEALTH_FRONT);
    }

    fn draw_grid(&mut self, width: u32, height: u32) {
        let d = DISPLAY_TILE as f32;
        let (cw, ch) = self.canvas.size();
        for x in 0..=width {
            let px = x as f32 * d;
            self.canvas.stroke_line([px, 0.0], [px, ch as f32], GRID_LINE);
        }
        for y in 0..=height {
            let py = y as f32 * d;
            self.canvas.stroke_line([0.0, py], [cw as f32, py], GRID_LINE);
        }
    }
}
