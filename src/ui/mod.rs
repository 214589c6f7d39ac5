//! UI modules and layout composition.

mod canvas;
pub mod input;
mod transport;

use bw_master::{Command, Controller};
use canvas::{Canvas, TileLayout};
use input::{Binding, ViewerAction};

/// Something only the window owner can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowRequest {
    Fullscreen(bool),
    Quit,
}

/// UI-facing state bundle. No GL/imgui/renderer fields.
pub struct GuiState {
    pub controller: Controller,
    pub bindings: Vec<Binding>,
    /// Screen pixels per frame pixel while tiling
    pub scale: f32,
    pub tiling: bool,
    pub fullscreen: bool,
    pub show_overlay: bool,
    pub status: String,
    /// Window title for the last drawn frame
    pub title: String,
    pub layout: Option<TileLayout>,
    canvas: Canvas,
}

impl GuiState {
    pub fn new(controller: Controller) -> Self {
        let config = controller.config();
        let scale = config.window_scale;
        let tiling = config.tiling;
        Self {
            controller,
            bindings: input::default_bindings(),
            scale,
            tiling,
            fullscreen: false,
            show_overlay: true,
            status: String::new(),
            title: "binwave".to_string(),
            layout: None,
            canvas: Canvas::default(),
        }
    }
}

pub fn build_ui(ui: &imgui::Ui, gui: &mut GuiState) -> Vec<WindowRequest> {
    let actions = input::poll_actions(ui, &gui.bindings);
    let requests = process_actions(gui, &actions);

    let snapshot = gui.controller.poll();
    gui.layout = Some(gui.canvas.draw(ui, &gui.controller, gui.scale, gui.tiling));

    let media = gui.controller.media();
    gui.title = format!(
        "binwave - {} - Pixel size: {}",
        transport::status_line(
            &snapshot,
            media.frame_at(snapshot.position),
            media.total_frames(),
            gui.controller.config().baseline_fps,
        ),
        gui.scale
    );

    if gui.show_overlay {
        ui.window("binwave")
            .position([8.0, 8.0], imgui::Condition::FirstUseEver)
            .bg_alpha(0.6)
            .flags(
                imgui::WindowFlags::NO_TITLE_BAR
                    | imgui::WindowFlags::ALWAYS_AUTO_RESIZE
                    | imgui::WindowFlags::NO_FOCUS_ON_APPEARING,
            )
            .build(|| transport::transport_panel(ui, gui, &snapshot));
    }

    requests
}

/// Apply actions in order. Player commands go to the controller; window
/// changes are handed back to the caller.
pub fn process_actions(gui: &mut GuiState, actions: &[ViewerAction]) -> Vec<WindowRequest> {
    let mut requests = Vec::new();
    for action in actions {
        match *action {
            ViewerAction::Player(command) => send(gui, command),
            ViewerAction::AdjustScale(delta) => {
                gui.scale = (gui.scale + delta as f32).max(1.0);
            }
            ViewerAction::ToggleFullscreen => {
                gui.fullscreen = !gui.fullscreen;
                requests.push(WindowRequest::Fullscreen(gui.fullscreen));
            }
            ViewerAction::Escape => {
                if gui.fullscreen {
                    gui.fullscreen = false;
                    requests.push(WindowRequest::Fullscreen(false));
                } else {
                    requests.push(WindowRequest::Quit);
                }
            }
            ViewerAction::ToggleOverlay => gui.show_overlay = !gui.show_overlay,
        }
    }
    requests
}

fn send(gui: &mut GuiState, command: Command) {
    if gui.controller.send(command) {
        gui.status = command.label().to_string();
    } else {
        gui.status = "Busy, input dropped".to_string();
    }
}
