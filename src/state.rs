//! Server snapshot types.
//!
//! A [`GameState`] is the complete authoritative world at one point in time.
//! The client never edits one: every server response replaces the previous
//! snapshot wholesale.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

// ── EntityKind ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Enemy,
    /// Any type tag this client has no sprite for. Never drawn.
    #[serde(other)]
    Unknown,
}

impl EntityKind {
    /// Sprite table key, or `None` for kinds that have no sprite.
    pub fn sprite_name(self) -> Option<&'static str> {
        match self {
            EntityKind::Player => Some("player"),
            EntityKind::Enemy => Some("enemy"),
            EntityKind::Unknown => None,
        }
    }
}

// ── Entity ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub x: i32,
    pub y: i32,
    pub health: f32,
    /// Behaviour tag doubling as the sprite variant (`chase`, `patrol`, `dead`, ...).
    #[serde(default)]
    pub behavior: Option<String>,
}

impl Entity {
    pub fn is_dead(&self) -> bool {
        self.behavior.as_deref() == Some("dead")
    }
}

/// An entity together with the server-side id it was keyed by.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityEntry {
    pub id: String,
    pub entity: Entity,
}

// ── GameState ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameState {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub walls: Vec<(i32, i32)>,
    /// Entities in the order the server listed them.
    #[serde(default, deserialize_with = "entities_in_order")]
    pub entities: Vec<EntityEntry>,
    /// `None` when the server omitted the field; an empty list clears the log.
    #[serde(default)]
    pub messages: Option<Vec<String>>,
    #[serde(default)]
    pub combat_this_turn: bool,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub score: Option<u32>,
}

impl GameState {
    /// Decode a snapshot from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The first player entity in server order.
    pub fn player(&self) -> Option<&Entity> {
        first_player(&self.entities)
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id).map(|e| &e.entity)
    }
}

pub fn first_player(entities: &[EntityEntry]) -> Option<&Entity> {
    entities
        .iter()
        .map(|e| &e.entity)
        .find(|e| e.kind == EntityKind::Player)
}

/// Decode the `entities` object into a list, keeping document order so that
/// "the first player" does not depend on hash map iteration order.
fn entities_in_order<'de, D>(deserializer: D) -> Result<Vec<EntityEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedEntities;

    impl<'de> Visitor<'de> for OrderedEntities {
        type Value = Vec<EntityEntry>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of entity id to entity")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, entity)) = map.next_entry::<String, Entity>()? {
                out.push(EntityEntry { id, entity });
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(OrderedEntities)
}
