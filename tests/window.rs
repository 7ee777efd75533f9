use dungeon_client::config::{Args, ClientConfig, EFFECT_FILES};
use dungeon_client::renderer::utils::letterbox_viewport;
use dungeon_client::window::*;

#[test]
fn fitted_config_matches_frame() {
    let cfg = WindowConfig::fitted(560, 480);
    assert_eq!((cfg.physical_width, cfg.physical_height), (560, 480));
    assert_eq!((cfg.logical_width, cfg.logical_height), (560, 480));
    assert_eq!(cfg.mode, WindowMode::Windowed);
}

#[test]
fn tall_window_gets_bars_top_and_bottom() {
    let cfg = WindowConfig {
        physical_width: 560, physical_height: 960,
        logical_width: 560, logical_height: 480,
        mode: WindowMode::Borderless,
    };
    let v = letterbox_viewport(&cfg);
    assert_eq!(v.y, 240.0);
    let [fx, fy] = v.to_frame(&cfg, 50.0, 290.0).unwrap();
    assert!((fx - 50.0).abs() < 1e-3 && (fy - 50.0).abs() < 1e-3);
    assert_eq!(v.to_frame(&cfg, 50.0, 100.0), None);
}

#[test]
fn window_mode_parses_lowercase() {
    let mode: WindowMode = serde_json::from_str(r#""borderless""#).unwrap();
    assert_eq!(mode, WindowMode::Borderless);
}

// ── ClientConfig ─────────────────────────────────────────────────────────────

#[test]
fn defaults_without_flags() {
    let cfg = ClientConfig::resolve(&Args::default()).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.server_url, "http://127.0.0.1:5000");
}

#[test]
fn flags_override_and_are_normalised() {
    let args = Args {
        server: Some("http://game.local:8080/".into()),
        assets: Some("/srv/assets".into()),
        volume: Some(3.0),
        borderless: true,
        ..Args::default()
    };
    let cfg = ClientConfig::resolve(&args).unwrap();
    assert_eq!(cfg.server_url, "http://game.local:8080");
    assert_eq!(cfg.volume, 1.0);
    assert_eq!(cfg.window_mode, WindowMode::Borderless);
    assert_eq!(cfg.tilesheet_path(), std::path::Path::new("/srv/assets/tilesets/colored.png"));
    assert_eq!(cfg.effect_paths().len(), EFFECT_FILES.len());
}

#[test]
fn config_file_fields_are_optional() {
    let cfg = ClientConfig::from_json(r#"{"title": "Crypt", "volume": 0.2}"#).unwrap();
    assert_eq!(cfg.title, "Crypt");
    assert_eq!(cfg.volume, 0.2);
    assert_eq!(cfg.asset_root, ClientConfig::default().asset_root);
}

#[test]
fn unreadable_config_file_is_an_error() {
    let args = Args { config: Some("/nonexistent/client.json".into()), ..Args::default() };
    assert!(ClientConfig::resolve(&args).is_err());
}
