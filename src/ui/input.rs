//! Keyboard input mapping for the viewer.
//!
//! Keys go through a binding table so the layout can be swapped without
//! touching the player. Each binding produces a [`ViewerAction`].

use bw_master::{Command, Direction, Seek};

/// An action produced by keyboard input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerAction {
    /// Forward to the player
    Player(Command),
    /// Change the screen pixels per frame pixel by this many steps
    AdjustScale(i8),
    ToggleFullscreen,
    /// Leave fullscreen, or quit if windowed
    Escape,
    ToggleOverlay,
}

/// One key and what it does.
#[derive(Clone, Copy, Debug)]
pub struct Binding {
    pub key: imgui::Key,
    /// Fire repeatedly while held
    pub repeat: bool,
    pub action: ViewerAction,
}

const fn bind(key: imgui::Key, action: ViewerAction) -> Binding {
    Binding {
        key,
        repeat: false,
        action,
    }
}

const fn held(key: imgui::Key, action: ViewerAction) -> Binding {
    Binding {
        key,
        repeat: true,
        action,
    }
}

const fn player(command: Command) -> ViewerAction {
    ViewerAction::Player(command)
}

/// The default key layout.
pub fn default_bindings() -> Vec<Binding> {
    use imgui::Key;

    vec![
        // Transport
        bind(Key::Space, player(Command::TogglePause)),
        held(Key::RightArrow, player(Command::FRAME_FORWARD)),
        held(Key::LeftArrow, player(Command::FRAME_BACK)),
        bind(Key::Home, player(Command::Seek(Seek::Home))),
        bind(Key::End, player(Command::Seek(Seek::End))),
        bind(Key::Backspace, player(Command::Reset)),
        // Rate
        held(Key::UpArrow, player(Command::StepRate(1))),
        held(Key::DownArrow, player(Command::StepRate(-1))),
        held(Key::PageUp, player(Command::StepRate(1))),
        held(Key::PageDown, player(Command::StepRate(-1))),
        bind(Key::Alpha0, player(Command::ResetRate)),
        bind(Key::Z, player(Command::Freeze)),
        bind(Key::Minus, player(Command::Reverse)),
        bind(Key::R, player(Command::Reverse)),
        bind(Key::Equal, player(Command::SetDirection(Direction::Forward))),
        // Audio
        bind(Key::M, player(Command::ToggleMute)),
        held(Key::KeypadAdd, player(Command::VOLUME_UP)),
        held(Key::KeypadSubtract, player(Command::VOLUME_DOWN)),
        // Loop
        bind(Key::L, player(Command::ToggleLoop)),
        bind(Key::B, player(Command::ToggleBoomerang)),
        bind(Key::Comma, player(Command::MarkLoopStart)),
        bind(Key::Period, player(Command::MarkLoopEnd)),
        // Window
        bind(Key::LeftBracket, ViewerAction::AdjustScale(-1)),
        bind(Key::RightBracket, ViewerAction::AdjustScale(1)),
        bind(Key::F, ViewerAction::ToggleFullscreen),
        bind(Key::F11, ViewerAction::ToggleFullscreen),
        bind(Key::Escape, ViewerAction::Escape),
        bind(Key::Tab, ViewerAction::ToggleOverlay),
    ]
}

/// Poll imgui key state and return all triggered actions, in table order.
///
/// Nothing is consumed while an imgui text widget has focus.
pub fn poll_actions(ui: &imgui::Ui, bindings: &[Binding]) -> Vec<ViewerAction> {
    if ui.io().want_text_input {
        return Vec::new();
    }

    bindings
        .iter()
        .filter(|b| {
            if b.repeat {
                ui.is_key_pressed(b.key)
            } else {
                ui.is_key_pressed_no_repeat(b.key)
            }
        })
        .map(|b| b.action)
        .collect()
}
