//! Status overlay: playback readout, audio state and an Open button.

use bw_master::{AudioState, Controller, Snapshot};

use super::GuiState;

/// One-line playback summary, also used as the window title.
pub fn status_line(snapshot: &Snapshot, frame: usize, total: usize, baseline_fps: f64) -> String {
    let mut line = format!(
        "Frame: {}/{} - FPS: {:.1}",
        frame + 1,
        total,
        baseline_fps * snapshot.rate
    );
    if snapshot.paused {
        line.push_str(" [PAUSED]");
    }
    line
}

/// Loop, mute and volume flags as a short line.
pub fn flags_line(snapshot: &Snapshot, bytes_per_frame: usize) -> String {
    let frames = |pos: f64| (pos / bytes_per_frame.max(1) as f64) as usize + 1;
    let looping = if snapshot.loop_enabled {
        format!(
            "Loop {}-{}{}",
            frames(snapshot.loop_start),
            frames(snapshot.loop_end),
            if snapshot.boomerang { " (boomerang)" } else { "" }
        )
    } else {
        "Loop off".to_string()
    };
    let audio = if snapshot.audio_enabled {
        format!("Vol {:.0}%", snapshot.volume * 100.0)
    } else {
        "Muted".to_string()
    };
    format!("{} | {}", looping, audio)
}

pub fn audio_label(state: AudioState) -> String {
    match state {
        AudioState::Stopped => "Audio stopped".to_string(),
        AudioState::Device { sample_rate } => format!("Audio {} Hz", sample_rate),
        AudioState::Fallback => "No audio device".to_string(),
    }
}

pub fn transport_panel(ui: &imgui::Ui, gui: &mut GuiState, snapshot: &Snapshot) {
    let media = gui.controller.media();
    ui.text(status_line(
        snapshot,
        media.frame_at(snapshot.position),
        media.total_frames(),
        gui.controller.config().baseline_fps,
    ));
    ui.text(flags_line(snapshot, media.bytes_per_frame()));
    let frames_shown = gui.layout.map_or(1, |layout| layout.frames());
    ui.text(format!(
        "Pixel size: {} | Frames shown: {} | {}",
        gui.scale,
        frames_shown,
        audio_label(gui.controller.audio_state())
    ));

    if ui.button("Open") {
        open_dialog(gui);
    }
    if !gui.status.is_empty() {
        ui.same_line();
        ui.text(&gui.status);
    }
}

fn open_dialog(gui: &mut GuiState) {
    let Some(path) = rfd::FileDialog::new().pick_file() else {
        return;
    };

    match Controller::open(&path, gui.controller.config().clone()) {
        Err(e) => gui.status = format!("Open error: {}", e),
        Ok(controller) => {
            gui.controller.stop_audio();
            gui.controller = controller;
            gui.controller.start_audio();
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            gui.status = format!("Opened {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_shows_one_based_frame_and_signed_fps() {
        let snapshot = Snapshot {
            rate: -0.5,
            paused: true,
            ..Snapshot::default()
        };
        assert_eq!(
            status_line(&snapshot, 0, 12, 24.0),
            "Frame: 1/12 - FPS: -12.0 [PAUSED]"
        );
        let snapshot = Snapshot::default();
        assert_eq!(status_line(&snapshot, 11, 12, 24.0), "Frame: 12/12 - FPS: 24.0");
    }

    #[test]
    fn flags_report_loop_in_frames() {
        let snapshot = Snapshot {
            loop_start: 8192.0,
            loop_end: 3.0 * 8192.0,
            loop_enabled: true,
            boomerang: true,
            audio_enabled: false,
            ..Snapshot::default()
        };
        assert_eq!(flags_line(&snapshot, 8192), "Loop 2-4 (boomerang) | Muted");
        assert_eq!(
            flags_line(&Snapshot::default(), 8192),
            "Loop off | Vol 100%"
        );
    }
}
