use serde::Deserialize;

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Standard decorated window sized to fit the frame.
    #[default]
    Windowed,
    /// Borderless window sized to match the monitor's native resolution.
    Borderless,
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window configuration snapshot.
///
/// - **physical** dimensions are the actual pixel size of the OS window.
/// - **logical** dimensions are the size of the composed frame (scene canvas
///   plus side panel) that gets letterboxed into the window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// Actual window width in physical pixels.
    pub physical_width: u32,
    /// Actual window height in physical pixels.
    pub physical_height: u32,
    /// Composed frame width.
    pub logical_width: u32,
    /// Composed frame height.
    pub logical_height: u32,
    /// Active window mode.
    pub mode: WindowMode,
}

impl WindowConfig {
    /// A windowed config whose window exactly matches the frame.
    pub fn fitted(width: u32, height: u32) -> Self {
        Self {
            physical_width: width,
            physical_height: height,
            logical_width: width,
            logical_height: height,
            mode: WindowMode::Windowed,
        }
    }
}
