use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::ClientError;
use crate::window::WindowMode;

/// Asset file names, relative to the asset root. Only the root is configurable.
pub const TILESHEET_FILE: &str = "tilesets/colored.png";
pub const EFFECT_FILES: [&str; 3] = ["sfx/swing1.wav", "sfx/swing2.wav", "sfx/swing3.wav"];
pub const MUSIC_FILE: &str = "music/background.ogg";
pub const FONT_ATLAS_FILE: &str = "fonts/font_atlas.png";
pub const FONT_GLYPHS_FILE: &str = "fonts/font_glyph_map.json";

// ── Command line ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Parser)]
#[command(name = "dungeon-client", version, about = "Play a dungeon hosted by a game server")]
pub struct Args {
    /// Base URL of the game server.
    #[arg(long)]
    pub server: Option<String>,
    /// Directory holding tilesets/, sfx/, music/ and fonts/.
    #[arg(long)]
    pub assets: Option<PathBuf>,
    /// JSON file with any of the `ClientConfig` fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Initial volume in [0, 1].
    #[arg(long)]
    pub volume: Option<f32>,
    /// Open a borderless fullscreen window.
    #[arg(long)]
    pub borderless: bool,
}

// ── ClientConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub asset_root: PathBuf,
    pub title: String,
    pub volume: f32,
    pub window_mode: WindowMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            asset_root: PathBuf::from("static/assets"),
            title: "Dungeon".into(),
            volume: 0.5,
            window_mode: WindowMode::Windowed,
        }
    }
}

impl ClientConfig {
    /// Parse a config file body. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the effective config: defaults, then the config file, then flags.
    pub fn resolve(args: &Args) -> Result<Self, ClientError> {
        let mut config = match &args.config {
            Some(path) => {
                let body = std::fs::read_to_string(path).map_err(|e| ClientError::Config {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                Self::from_json(&body).map_err(|e| ClientError::Config {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            None => Self::default(),
        };

        if let Some(server) = &args.server {
            config.server_url = server.clone();
        }
        if let Some(assets) = &args.assets {
            config.asset_root = assets.clone();
        }
        if let Some(volume) = args.volume {
            config.volume = volume;
        }
        if args.borderless {
            config.window_mode = WindowMode::Borderless;
        }
        config.volume = config.volume.clamp(0.0, 1.0);
        config.server_url = config.server_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn asset(&self, relative: &str) -> PathBuf {
        self.asset_root.join(relative)
    }

    pub fn tilesheet_path(&self) -> PathBuf { self.asset(TILESHEET_FILE) }
    pub fn music_path(&self) -> PathBuf { self.asset(MUSIC_FILE) }

    pub fn effect_paths(&self) -> Vec<PathBuf> {
        EFFECT_FILES.iter().map(|f| self.asset(f)).collect()
    }

    pub fn font_paths(&self) -> (PathBuf, PathBuf) {
        (self.asset(FONT_ATLAS_FILE), self.asset(FONT_GLYPHS_FILE))
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }
}
