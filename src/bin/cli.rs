//! binwave CLI: headless playback, WAV export and heatmap PNG export.
//!
//! Usage:
//!   bw-cli path/to/file
//!   bw-cli path/to/file --wav output.wav --seconds 10
//!   bw-cli path/to/file --png frame.png --frame 3 --tiles 4 2

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bw_master::{AudioState, ConfigArgs, Controller};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bw-cli", version, about = "Play or export any file as sound and colour")]
struct Args {
    /// File to open
    path: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Render audio offline to a WAV file instead of playing
    #[arg(long, value_name = "OUT")]
    wav: Option<PathBuf>,

    /// Seconds to render or play (plays until interrupted when omitted)
    #[arg(long)]
    seconds: Option<f64>,

    /// Write the heatmap of a frame to a PNG file instead of playing
    #[arg(long, value_name = "OUT")]
    png: Option<PathBuf>,

    /// First frame of the PNG (0-based)
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Tile the PNG as COLS x ROWS consecutive frames
    #[arg(long, num_args = 2, value_names = ["COLS", "ROWS"])]
    tiles: Option<Vec<u32>>,

    /// Sample rate for WAV export
    #[arg(long, default_value_t = 44_100)]
    sample_rate: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = args.config.resolve().unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(2);
    });

    let mut ctrl = Controller::open(&args.path, config).unwrap_or_else(|e| {
        eprintln!("Failed to open {}: {}", args.path.display(), e);
        std::process::exit(1);
    });

    print_info(&ctrl);

    if let Some(png) = &args.png {
        let (cols, rows) = match args.tiles.as_deref() {
            Some(&[cols, rows]) => (cols, rows),
            _ => (1, 1),
        };
        export_png(&ctrl, png, args.frame, cols, rows);
    } else if let Some(wav) = &args.wav {
        render_to_wav(&ctrl, wav, args.sample_rate, args.seconds.unwrap_or(30.0));
    } else {
        play_audio(&mut ctrl, args.seconds);
    }
}

fn print_info(ctrl: &Controller) {
    let media = ctrl.media();
    let config = ctrl.config();
    let geometry = media.geometry();
    println!("Size:     {} bytes", media.len());
    println!(
        "Frame:    {}x{} ({} bytes)",
        geometry.width,
        geometry.height,
        media.bytes_per_frame()
    );
    println!("Frames:   {}", media.total_frames());
    println!(
        "Duration: {:.1} s at {} fps",
        media.total_frames() as f64 / config.baseline_fps,
        config.baseline_fps
    );
    println!();
}

fn play_audio(ctrl: &mut Controller, seconds: Option<f64>) {
    match ctrl.start_audio() {
        AudioState::Device { sample_rate } => println!("Playing at {} Hz...", sample_rate),
        AudioState::Fallback => println!("No audio device, advancing silently..."),
        AudioState::Stopped => {
            eprintln!("Playback could not start");
            std::process::exit(1);
        }
    }
    println!();

    let deadline = seconds.map(|s| Instant::now() + Duration::from_secs_f64(s.max(0.0)));
    let total = ctrl.media().total_frames();
    let fps = ctrl.config().baseline_fps;

    while deadline.map_or(true, |d| Instant::now() < d) {
        let snapshot = ctrl.poll();
        print!(
            "\rFrame: {}/{} | FPS: {:.1} | Pos: {:.0}    ",
            ctrl.media().frame_at(snapshot.position) + 1,
            total,
            fps * snapshot.rate,
            snapshot.position
        );
        let _ = std::io::stdout().flush();
        std::thread::sleep(Duration::from_millis(40));
    }

    ctrl.stop_audio();
    println!("\rDone.                                        ");
}

fn render_to_wav(ctrl: &Controller, path: &Path, sample_rate: u32, seconds: f64) {
    println!(
        "Rendering {:.1} s to {} at {} Hz...",
        seconds,
        path.display(),
        sample_rate
    );

    let wav = ctrl.render_to_wav(sample_rate, seconds).unwrap_or_else(|e| {
        eprintln!("Cannot render: {}", e);
        std::process::exit(1);
    });
    println!("Rendered {} bytes", wav.len());

    fs::write(path, &wav).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", path.display(), e);
        std::process::exit(1);
    });

    println!("Done.");
}

fn export_png(ctrl: &Controller, path: &Path, frame: usize, cols: u32, rows: u32) {
    println!(
        "Mapping {}x{} frame(s) from frame {} to {}...",
        cols,
        rows,
        frame,
        path.display()
    );
    ctrl.export_png(path, frame, cols, rows).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", path.display(), e);
        std::process::exit(1);
    });
    println!("Done.");
}
