//! Reading configuration from JSON and TOML files.

use std::fs;

use trellis::render::Color;
use trellis::{App, Error, Rect, SurfaceConfig, UiConfig, WindowConfig};

#[test]
fn test_window_config_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("window.json");
    fs::write(
        &path,
        r#"{ "title": "Demo", "geometry": { "min": { "x": 0.0, "y": 0.0 }, "max": { "x": 800.0, "y": 600.0 } }, "fps": 30 }"#,
    )
    .unwrap();

    let config = WindowConfig::from_json_file(&path).unwrap();
    assert_eq!(config.title, "Demo");
    assert_eq!(config.geometry, Rect::from_size(800.0, 600.0));
    assert_eq!(config.fps, 30);
    assert_eq!(config.icon_file, None);
}

#[test]
fn test_ui_and_surface_config_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let ui_path = dir.path().join("ui.toml");
    fs::write(&ui_path, "click_distance = 3.0\npopup_ancestor_limit = 10\n").unwrap();
    let surface_path = dir.path().join("surface.toml");
    fs::write(&surface_path, "pixel_size = 2.0\n").unwrap();

    let ui = UiConfig::from_toml_file(&ui_path).unwrap();
    assert_eq!(ui.click_distance, 3.0);
    assert_eq!(ui.popup_ancestor_limit, 10);
    assert_eq!(ui.pixel_size, 1.0);

    let surface = SurfaceConfig::from_toml_file(&surface_path).unwrap();
    assert_eq!(surface.pixel_size, 2.0);
    assert_eq!(surface.back_color, None::<Color>);

    let app = App::new(WindowConfig::default(), surface);
    assert_eq!(app.surface().pixel_size, 2.0);
}

#[test]
fn test_config_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let err = UiConfig::from_json_file(&missing).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("missing.json"));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "click_distance = [").unwrap();
    assert!(matches!(UiConfig::from_toml_file(&bad), Err(Error::Toml { .. })));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{").unwrap();
    assert!(matches!(WindowConfig::from_json_file(&bad), Err(Error::Json { .. })));
}
