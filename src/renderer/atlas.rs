//! Static sprite table for the packed `colored.png` tilesheet.
//!
//! The sheet is a grid of 16×16 tiles separated by a 1 px border, so a tile at
//! column `c`, row `r` starts at `(c * 17, r * 17)`.

use super::{Rect, SrcRect};

/// Base tile size in the source sheet.
pub const TILE_SIZE: u32 = 16;
/// Border between packed tiles in the source sheet.
pub const SPACING: u32 = 1;
/// Stride of one tile in the source sheet.
pub const TOTAL_TILE: u32 = TILE_SIZE + SPACING;
/// On-screen magnification.
pub const SCALE: u32 = 2;
/// On-screen size of one grid cell.
pub const DISPLAY_TILE: u32 = TILE_SIZE * SCALE;

/// Default and named alternate sprites for one sprite type, as sheet cells `(column, row)`.
#[derive(Debug)]
pub struct SpriteDescriptor {
    pub name: &'static str,
    pub default: (u32, u32),
    pub variants: &'static [(&'static str, (u32, u32))],
}

const SPRITES: &[SpriteDescriptor] = &[
    SpriteDescriptor {
        name: "player",
        default: (24, 0),
        variants: &[("dead", (0, 14))],
    },
    SpriteDescriptor {
        name: "enemy",
        default: (26, 0),
        variants: &[
            ("chase", (26, 0)),
            ("patrol", (27, 0)),
            ("spell_caster", (28, 0)),
            ("dead", (0, 15)),
        ],
    },
    SpriteDescriptor {
        name: "floor",
        default: (0, 0),
        variants: &[
            ("stone", (1, 0)),
            ("dirt", (2, 0)),
            ("wood", (3, 0)),
            ("smooth", (4, 0)),
            ("carpet", (5, 0)),
            ("grass", (6, 0)),
        ],
    },
    SpriteDescriptor {
        name: "wall",
        default: (0, 1),
        variants: &[("stone", (1, 1)), ("brick", (2, 1)), ("wood", (3, 1))],
    },
];

pub struct SpriteAtlas {
    sprites: &'static [SpriteDescriptor],
}

impl Default for SpriteAtlas {
    fn default() -> Self { Self::standard() }
}

impl SpriteAtlas {
    /// The compiled-in table for `colored.png`.
    pub const fn standard() -> Self {
        Self { sprites: SPRITES }
    }

    pub fn descriptor(&self, kind: &str) -> Option<&SpriteDescriptor> {
        self.sprites.iter().find(|s| s.name == kind)
    }

    /// Source rectangle for `kind`, using `variant` when the type defines it
    /// and the type's default otherwise. `None` means "draw nothing".
    pub fn lookup(&self, kind: &str, variant: Option<&str>) -> Option<SrcRect> {
        let desc = self.descriptor(kind)?;
        let (col, row) = variant
            .and_then(|v| desc.variants.iter().find(|(name, _)| *name == v))
            .map(|(_, cell)| *cell)
            .unwrap_or(desc.default);
        Some(SrcRect {
            x: col * TOTAL_TILE,
            y: row * TOTAL_TILE,
            w: TILE_SIZE,
            h: TILE_SIZE,
        })
    }
}

/// Canvas rectangle covered by grid cell `(x, y)`.
pub fn cell_rect(x: i32, y: i32) -> Rect {
    let d = DISPLAY_TILE as f32;
    Rect::new(x as f32 * d, y as f32 * d, d, d)
}

/// Grid cell under a pixel, given the pixel position of the canvas origin.
/// Pixels left of or above the canvas map to negative cells.
pub fn cell_at(px: f32, py: f32, origin: [f32; 2]) -> (i32, i32) {
    let d = DISPLAY_TILE as f32;
    (
        ((px - origin[0]) / d).floor() as i32,
        ((py - origin[1]) / d).floor() as i32,
    )
}
