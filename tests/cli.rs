use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_scene(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("car.json");
    let scene = serde_json::json!({
        "cameras": [
            { "type": "perspective", "name": "front", "eye": [0, 0.5, 5], "forward": [0, 0, -1] },
            { "type": "perspective", "name": "side", "eye": [5, 0.5, 0], "forward": [-1, 0, 0] },
        ],
        "materials": [
            { "name": "PAINT_body", "nodes": [{ "type": "principled", "name": "principled" }] },
            { "name": "rubber", "color": [0.05, 0.05, 0.05] },
        ],
        "primitives": [
            { "type": "sphere", "name": "body", "radius": 1 },
            { "type": "sphere", "name": "wheel", "radius": 0.3 },
        ],
        "objects": [
            { "name": "body", "primitive": "body", "material": "PAINT_body" },
            { "name": "WHEELS_SPORT", "primitive": "wheel", "material": "rubber", "translate": [1, -0.8, 0] },
            { "name": "WHEELS_OFFROAD", "primitive": "wheel", "material": "rubber", "translate": [-1, -0.8, 0] },
        ],
        "lights": [{ "type": "point", "name": "key", "position": [2, 4, 4], "strength": [20, 20, 20] }],
    });
    std::fs::write(&path, scene.to_string()).unwrap();
    path
}

fn write_config(dir: &Path, angles: &[&str]) -> std::path::PathBuf {
    let path = dir.join("config.json");
    let config = serde_json::json!({
        "variants": [
            { "slug": "red", "color": "#ff0000", "wheels": "SPORT" },
            { "slug": "blue", "color": "#0000ff", "wheels": "OFFROAD" },
        ],
        "angles": angles,
        "out_dir": dir.join("renders"),
    });
    std::fs::write(&path, config.to_string()).unwrap();
    path
}

fn variant_render() -> Command {
    Command::cargo_bin("variant-render").unwrap()
}

#[test]
fn renders_every_variant_and_angle() {
    let dir = tempfile::tempdir().unwrap();
    let scene = write_scene(dir.path());
    let config = write_config(dir.path(), &["front", "side"]);

    variant_render()
        .arg("--config")
        .arg(&config)
        .arg("--scene")
        .arg(&scene)
        .args(["--width", "8", "--height", "6", "--samples", "1"])
        .assert()
        .success();

    for name in ["red_front", "red_side", "blue_front", "blue_side"] {
        let path = dir.path().join("renders").join(format!("{}.png", name));
        assert_eq!(image::image_dimensions(&path).unwrap(), (8, 6), "{}", name);
    }
}

#[test]
fn path_engine_renders_too() {
    let dir = tempfile::tempdir().unwrap();
    let scene = write_scene(dir.path());
    let config = write_config(dir.path(), &["front"]);

    variant_render()
        .arg("--config")
        .arg(&config)
        .arg("--scene")
        .arg(&scene)
        .args(["--engine", "path", "--width", "8", "--height", "6", "--samples", "2"])
        .assert()
        .success();

    let path = dir.path().join("renders").join("blue_front.png");
    assert_eq!(image::image_dimensions(&path).unwrap(), (8, 6));
}

#[test]
fn missing_camera_fails() {
    let dir = tempfile::tempdir().unwrap();
    let scene = write_scene(dir.path());
    let config = write_config(dir.path(), &["front", "top"]);

    variant_render()
        .arg("--config")
        .arg(&config)
        .arg("--scene")
        .arg(&scene)
        .args(["--width", "8", "--height", "6", "--samples", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("camera not found"));

    assert!(dir.path().join("renders").join("red_front.png").exists());
    assert!(!dir.path().join("renders").join("red_top.png").exists());
    assert!(!dir.path().join("renders").join("blue_front.png").exists());
}

#[test]
fn config_is_required() {
    let dir = tempfile::tempdir().unwrap();
    let scene = write_scene(dir.path());

    variant_render()
        .arg("--scene")
        .arg(&scene)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn missing_scene_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &["front"]);

    variant_render()
        .arg("--config")
        .arg(&config)
        .arg("--scene")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("can't load scene"));
}
