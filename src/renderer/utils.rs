// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// The composed frame (scene canvas + side panel) keeps its aspect ratio when
// the window is resized or goes borderless. The viewport is the largest
// uniformly scaled rectangle that fits, centred on both axes.

use crate::window::WindowConfig;

/// Where the frame lands inside the window, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Map a window pixel to a frame pixel. `None` when the point falls on a
    /// letterbox bar or the viewport is empty.
    pub fn to_frame(&self, config: &WindowConfig, px: f32, py: f32) -> Option<[f32; 2]> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let fx = (px - self.x) / self.width * config.logical_width as f32;
        let fy = (py - self.y) / self.height * config.logical_height as f32;
        let inside = fx >= 0.0
            && fy >= 0.0
            && fx < config.logical_width as f32
            && fy < config.logical_height as f32;
        inside.then_some([fx, fy])
    }
}

/// Calculate the letterbox `Viewport` for `config`:
///
/// ```text
/// scale = min(physical_width / logical_width, physical_height / logical_height)
/// x     = (physical_width  - logical_width  * scale) / 2
/// y     = (physical_height - logical_height * scale) / 2
/// ```
///
/// A zero logical dimension yields a zero-sized viewport at the origin.
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    if config.logical_width == 0 || config.logical_height == 0 {
        return Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    }

    let pw = config.physical_width  as f32;
    let ph = config.physical_height as f32;
    let lw = config.logical_width   as f32;
    let lh = config.logical_height  as f32;

    let scale = (pw / lw).min(ph / lh);

    let width  = lw * scale;
    let height = lh * scale;
    let x      = (pw - width)  / 2.0;
    let y      = (ph - height) / 2.0;

    Viewport { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowMode;

    fn cfg(pw: u32, ph: u32, lw: u32, lh: u32) -> WindowConfig {
        WindowConfig { physical_width: pw, physical_height: ph,
                       logical_width: lw,  logical_height: lh,
                       mode: WindowMode::Windowed }
    }

    #[test]
    fn exact_fit_no_offset() {
        let v = letterbox_viewport(&cfg(900, 640, 900, 640));
        assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 900.0, height: 640.0 });
    }

    #[test]
    fn wide_window_gets_side_bars() {
        // 640×640 frame in 1280×640 → scale 1, bars of 320 on each side.
        let v = letterbox_viewport(&cfg(1280, 640, 640, 640));
        assert!((v.x - 320.0).abs() < 1e-3, "x={}", v.x);
        assert_eq!(v.y, 0.0);
        assert!((v.width - 640.0).abs() < 1e-3);
    }

    #[test]
    fn zero_logical_size_returns_zero_viewport() {
        let v = letterbox_viewport(&cfg(1280, 720, 0, 720));
        assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0 });
    }

    #[test]
    fn to_frame_undoes_scale_and_offset() {
        // 2× upscale with 100 px bars left and right.
        let config = cfg(1000, 400, 400, 200);
        let v = letterbox_viewport(&config);
        assert_eq!(v.to_frame(&config, 100.0, 0.0), Some([0.0, 0.0]));
        assert_eq!(v.to_frame(&config, 200.0, 100.0), Some([50.0, 50.0]));
    }

    #[test]
    fn to_frame_rejects_points_on_bars() {
        let config = cfg(1000, 400, 400, 200);
        let v = letterbox_viewport(&config);
        assert_eq!(v.to_frame(&config, 50.0, 10.0), None);
        assert_eq!(v.to_frame(&config, 950.0, 10.0), None);
    }
}
