//! Preset, config file and flag layering as seen from the command line.

use std::fs;

use bw_master::{ConfigArgs, ConfigError, FrameGeometry};
use clap::Parser;

#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn parse(args: &[&str]) -> ConfigArgs {
    let mut argv = vec!["binwave"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().config
}

#[test]
fn file_overrides_preset_and_flags_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binwave.json");
    fs::write(
        &path,
        r#"{ "frame_width": 100, "tiling": false, "baseline_fps": 12.0, "loop_frames": [1, 3] }"#,
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let config = parse(&["--preset", "square", "--config", path]).resolve().unwrap();
    assert_eq!(config.geometry(), FrameGeometry::new(100, 64));
    assert!(!config.tiling);
    assert_eq!(config.baseline_fps, 12.0);
    assert_eq!(config.loop_frames, Some([1, 3]));

    let config = parse(&["--config", path, "--fps", "30", "--tiling", "--loop", "0", "5"])
        .resolve()
        .unwrap();
    assert_eq!(config.geometry(), FrameGeometry::new(100, 128));
    assert!(config.tiling);
    assert_eq!(config.baseline_fps, 30.0);
    assert_eq!(config.loop_frames, Some([0, 5]));
}

#[test]
fn unknown_keys_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "frame_wdith": 100 }"#).unwrap();
    let result = parse(&["--config", path.to_str().unwrap()]).resolve();
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn file_must_hold_an_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, "[1, 2]").unwrap();
    let result = parse(&["--config", path.to_str().unwrap()]).resolve();
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let result = parse(&["--config", path.to_str().unwrap()]).resolve();
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn file_values_are_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.json");
    fs::write(&path, r#"{ "visual_fps_cap": 0.0 }"#).unwrap();
    let result = parse(&["--config", path.to_str().unwrap()]).resolve();
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}
