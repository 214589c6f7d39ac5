//! Player configuration: presets, an optional JSON file, and command-line
//! overrides, applied in that order.

use std::fs;
use std::path::{Path, PathBuf};

use bw_engine::PlayerState;
use bw_ir::{FrameGeometry, LoopRegion, MediaBuffer, PlaybackRate, VOLUME_MAX};
use serde::{Deserialize, Serialize};

/// Error type for building a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Named frame layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// 64x128, tiled across the window
    #[default]
    Lane,
    /// 455x256, one frame
    Wide,
    /// 910x512, one frame
    Big,
    /// 64x64, one frame
    Square,
}

impl Preset {
    pub fn config(self) -> PlayerConfig {
        let base = PlayerConfig {
            frame_width: 64,
            frame_height: 128,
            baseline_fps: 24.0,
            tiling: true,
            visual_fps_cap: 24.0,
            window_scale: 4.0,
            volume: 1.0,
            rate: 1.0,
            loop_frames: None,
            boomerang: false,
            command_capacity: 256,
        };
        match self {
            Preset::Lane => base,
            Preset::Wide => PlayerConfig {
                frame_width: 455,
                frame_height: 256,
                tiling: false,
                window_scale: 2.0,
                ..base
            },
            Preset::Big => PlayerConfig {
                frame_width: 910,
                frame_height: 512,
                tiling: false,
                window_scale: 1.0,
                ..base
            },
            Preset::Square => PlayerConfig {
                frame_width: 64,
                frame_height: 64,
                tiling: false,
                ..base
            },
        }
    }
}

/// Everything needed to start a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Frames per second at rate 1.0
    pub baseline_fps: f64,
    /// Fill the window with consecutive frames instead of stretching one
    pub tiling: bool,
    /// Upper bound on redraws per second
    pub visual_fps_cap: f64,
    /// Screen pixels per frame pixel
    pub window_scale: f32,
    pub volume: f32,
    pub rate: f64,
    /// Initial loop as `[start, end]` frame indices; engaged when present
    pub loop_frames: Option<[u32; 2]>,
    pub boomerang: bool,
    /// Commands that may queue between two audio blocks
    pub command_capacity: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

impl PlayerConfig {
    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry::new(self.frame_width, self.frame_height)
    }

    /// Read a JSON file and apply the keys it sets over `self`.
    pub fn merged_with_file(self, path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let overlay: serde_json::Value = serde_json::from_str(&text).map_err(parse)?;
        let serde_json::Value::Object(overlay) = overlay else {
            return Err(ConfigError::Invalid(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        };
        let mut value = serde_json::to_value(&self).map_err(parse)?;
        if let serde_json::Value::Object(fields) = &mut value {
            fields.extend(overlay);
        }
        serde_json::from_value(value).map_err(parse)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if !self.geometry().is_valid() {
            return invalid(format!(
                "frame size {}x{} has no pixels",
                self.frame_width, self.frame_height
            ));
        }
        if !(self.baseline_fps.is_finite() && self.baseline_fps > 0.0) {
            return invalid(format!("baseline fps must be positive, got {}", self.baseline_fps));
        }
        if !(self.visual_fps_cap.is_finite() && self.visual_fps_cap > 0.0) {
            return invalid(format!("visual fps cap must be positive, got {}", self.visual_fps_cap));
        }
        if !(self.window_scale.is_finite() && self.window_scale > 0.0) {
            return invalid(format!("window scale must be positive, got {}", self.window_scale));
        }
        if !(0.0..=VOLUME_MAX).contains(&self.volume) {
            return invalid(format!("volume must be within 0..={}, got {}", VOLUME_MAX, self.volume));
        }
        if !self.rate.is_finite() {
            return invalid(format!("rate must be finite, got {}", self.rate));
        }
        if self.command_capacity == 0 {
            return invalid("command capacity must be at least 1".into());
        }
        Ok(())
    }

    /// Starting player state for `media`. Loop frames past the end of the
    /// file are clamped to the last frame.
    pub fn initial_state(&self, media: &MediaBuffer) -> PlayerState {
        let state = PlayerState::new()
            .with_rate(PlaybackRate::new(self.rate))
            .with_volume(self.volume);

        let Some([start, end]) = self.loop_frames else {
            return state.with_loop(LoopRegion::default().with_boomerang(self.boomerang));
        };
        let last = media.total_frames() - 1;
        let byte = |frame: u32| (frame as usize).min(last) as f64 * media.bytes_per_frame() as f64;
        let region = LoopRegion::new(byte(start), byte(end))
            .with_boomerang(self.boomerang)
            .engaged();
        state.with_loop(region).with_position(byte(start))
    }
}

/// Command-line flags shared by the viewer and the CLI.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct ConfigArgs {
    /// Frame layout preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// JSON file with settings, applied over the preset
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Frame width in bytes
    #[arg(long)]
    pub width: Option<u32>,

    /// Frame height in bytes
    #[arg(long)]
    pub height: Option<u32>,

    /// Baseline frames per second at rate 1.0
    #[arg(long)]
    pub fps: Option<f64>,

    /// Tile consecutive frames across the window
    #[arg(long, overrides_with = "no_tiling")]
    pub tiling: bool,

    /// Show a single stretched frame
    #[arg(long, overrides_with = "tiling")]
    pub no_tiling: bool,

    /// Maximum redraws per second
    #[arg(long)]
    pub fps_cap: Option<f64>,

    /// Screen pixels per frame pixel
    #[arg(long)]
    pub scale: Option<f32>,

    /// Initial volume (0-2)
    #[arg(long)]
    pub volume: Option<f32>,

    /// Initial rate; negative plays backward
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<f64>,

    /// Engage a loop between two frame indices
    #[arg(long = "loop", num_args = 2, value_names = ["START", "END"])]
    pub loop_frames: Option<Vec<u32>>,

    /// Bounce at the loop edges instead of jumping
    #[arg(long)]
    pub boomerang: bool,
}

impl ConfigArgs {
    /// Layer preset, config file and flags into a validated configuration.
    pub fn resolve(&self) -> Result<PlayerConfig, ConfigError> {
        let mut config = self.preset.unwrap_or_default().config();
        if let Some(path) = &self.config {
            config = config.merged_with_file(path)?;
        }

        if let Some(width) = self.width {
            config.frame_width = width;
        }
        if let Some(height) = self.height {
            config.frame_height = height;
        }
        if let Some(fps) = self.fps {
            config.baseline_fps = fps;
        }
        if self.tiling {
            config.tiling = true;
        }
        if self.no_tiling {
            config.tiling = false;
        }
        if let Some(cap) = self.fps_cap {
            config.visual_fps_cap = cap;
        }
        if let Some(scale) = self.scale {
            config.window_scale = scale;
        }
        if let Some(volume) = self.volume {
            config.volume = volume;
        }
        if let Some(rate) = self.rate {
            config.rate = rate;
        }
        if let Some(frames) = &self.loop_frames {
            if let [start, end] = frames[..] {
                config.loop_frames = Some([start, end]);
            }
        }
        if self.boomerang {
            config.boomerang = true;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().config
    }

    #[test]
    fn presets_have_expected_geometry() {
        assert_eq!(Preset::Lane.config().geometry(), FrameGeometry::new(64, 128));
        assert!(Preset::Lane.config().tiling);
        assert_eq!(Preset::Wide.config().geometry(), FrameGeometry::new(455, 256));
        assert_eq!(Preset::Big.config().geometry(), FrameGeometry::new(910, 512));
        assert_eq!(Preset::Square.config().geometry(), FrameGeometry::new(64, 64));
        for preset in [Preset::Lane, Preset::Wide, Preset::Big, Preset::Square] {
            preset.config().validate().unwrap();
        }
    }

    #[test]
    fn flags_override_preset() {
        let config = parse(&["--preset", "wide", "--fps", "30", "--tiling", "--rate", "-2.5"])
            .resolve()
            .unwrap();
        assert_eq!(config.geometry(), FrameGeometry::new(455, 256));
        assert_eq!(config.baseline_fps, 30.0);
        assert!(config.tiling);
        assert_eq!(config.rate, -2.5);
    }

    #[test]
    fn last_tiling_flag_wins() {
        let config = parse(&["--tiling", "--no-tiling"]).resolve().unwrap();
        assert!(!config.tiling);
    }

    #[test]
    fn loop_flag_takes_two_frames() {
        let config = parse(&["--loop", "2", "7", "--boomerang"]).resolve().unwrap();
        assert_eq!(config.loop_frames, Some([2, 7]));
        assert!(config.boomerang);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            parse(&["--width", "0"]).resolve(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse(&["--volume", "3"]).resolve(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse(&["--fps", "0"]).resolve(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn initial_state_clamps_loop_to_file() {
        let media = MediaBuffer::new(vec![0; 4 * 8192], FrameGeometry::new(64, 128)).unwrap();
        let config = PlayerConfig {
            loop_frames: Some([1, 34]),
            boomerang: true,
            ..PlayerConfig::default()
        };
        let state = config.initial_state(&media);
        assert!(state.region().is_enabled());
        assert!(state.region().is_boomerang());
        assert_eq!(state.region().start(), 8192.0);
        assert_eq!(state.region().end(), 3.0 * 8192.0);
        assert_eq!(state.position(), 8192.0);
    }

    #[test]
    fn no_loop_by_default() {
        let media = MediaBuffer::new(vec![0; 8192], FrameGeometry::new(64, 128)).unwrap();
        let state = PlayerConfig::default().initial_state(&media);
        assert!(!state.region().is_enabled());
        assert_eq!(state.rate(), PlaybackRate::BASELINE);
    }
}
