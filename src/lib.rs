//! Native client for a turn-based dungeon served over HTTP.
//!
//! The server owns the game. This crate fetches snapshots, draws them, plays
//! sound cues and turns clicks into move requests.

pub mod app;
pub mod audio;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod net;
pub mod renderer;
pub mod state;
pub mod ui;
pub mod window;

pub use app::run;
pub use client::GameClient;
pub use config::{Args, ClientConfig};
pub use error::{AssetError, AudioError, ClientError, NetError};
pub use state::{Entity, EntityEntry, EntityKind, GameState};
