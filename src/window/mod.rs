pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config` to `window`.
///
/// # Windowed
/// Leaves fullscreen, restores decorations and requests the window be resized
/// to `physical_width × physical_height`.
///
/// # Borderless
/// Enters a borderless fullscreen window on the current monitor. The frame is
/// letterboxed into whatever size the monitor provides.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);

            // `None` means the resize arrives later as `WindowEvent::Resized`,
            // which the app reconciles anyway.
            let _ = window.request_inner_size(PhysicalSize::new(
                config.physical_width,
                config.physical_height,
            ));
        }

        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}
