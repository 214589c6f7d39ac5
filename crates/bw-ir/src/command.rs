//! Commands that input handling may send to the playback engine.

/// Volume change applied by one volume-up/down command.
pub const VOLUME_STEP: f32 = 0.05;

/// Upper bound of the volume range `[0, VOLUME_MAX]`.
pub const VOLUME_MAX: f32 = 2.0;

/// Traversal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Cursor seek target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Seek {
    /// Move by a whole number of frames (negative = back)
    Frames(i32),
    /// First byte of the file
    Home,
    /// First byte of the last whole frame
    End,
    /// Absolute byte offset (wrapped into the file)
    Absolute(f64),
}

/// A player command.
///
/// Commands are applied by the real-time producer between audio blocks, so
/// every command is atomic with respect to sample generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Point the rate forward or backward, keeping magnitude
    SetDirection(Direction),
    /// Replace the rate magnitude, keeping direction
    SetRateMagnitude(f64),
    /// Negate the rate
    Reverse,
    /// Rate back to baseline forward
    ResetRate,
    /// Rate to zero
    Freeze,
    /// Step the rate up (+) or down (-) by magnitude-dependent increments
    StepRate(i8),
    ToggleMute,
    TogglePause,
    Seek(Seek),
    ToggleLoop,
    ToggleBoomerang,
    /// Set loop start at the cursor (ignored while looping)
    MarkLoopStart,
    /// Set loop end at the cursor (ignored while looping)
    MarkLoopEnd,
    /// Add to volume, clamped to `[0, VOLUME_MAX]`
    AdjustVolume(f32),
    /// Cursor to 0, rate to baseline, unpause
    Reset,
}

impl Command {
    pub const VOLUME_UP: Command = Command::AdjustVolume(VOLUME_STEP);
    pub const VOLUME_DOWN: Command = Command::AdjustVolume(-VOLUME_STEP);
    pub const FRAME_FORWARD: Command = Command::Seek(Seek::Frames(1));
    pub const FRAME_BACK: Command = Command::Seek(Seek::Frames(-1));

    /// Short human-readable label, used for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Command::SetDirection(Direction::Forward) => "Forward",
            Command::SetDirection(Direction::Backward) => "Backward",
            Command::SetRateMagnitude(_) => "Set speed",
            Command::Reverse => "Reverse",
            Command::ResetRate => "Baseline speed",
            Command::Freeze => "Freeze",
            Command::StepRate(s) if *s >= 0 => "Faster",
            Command::StepRate(_) => "Slower",
            Command::ToggleMute => "Toggle mute",
            Command::TogglePause => "Toggle pause",
            Command::Seek(_) => "Seek",
            Command::ToggleLoop => "Toggle loop",
            Command::ToggleBoomerang => "Toggle boomerang",
            Command::MarkLoopStart => "Loop start",
            Command::MarkLoopEnd => "Loop end",
            Command::AdjustVolume(d) if *d >= 0.0 => "Volume up",
            Command::AdjustVolume(_) => "Volume down",
            Command::Reset => "Reset",
        }
    }
}
