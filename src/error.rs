use thiserror::Error;

use crate::audio::ClipId;

/// Failure talking to the game server.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("malformed game state: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for NetError {
    fn from(e: ureq::Error) -> Self {
        NetError::Transport(Box::new(e))
    }
}

/// Failure starting or resuming playback.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio device available")]
    Unavailable,
    #[error("{0:?} was never loaded")]
    MissingClip(ClipId),
    #[error("{0}")]
    Playback(String),
}

/// Failure loading a tilesheet or font from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("bad glyph map: {0}")]
    GlyphMap(#[from] serde_json::Error),
}

/// Fatal startup errors returned from [`crate::app::run`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("config file '{path}': {reason}")]
    Config { path: String, reason: String },
}
