//! Player state and the command surface that mutates it.

use bw_ir::{Command, LoopRegion, MediaBuffer, PlaybackRate, Seek, VOLUME_MAX};

use crate::cursor::{Cursor, Resolution};
use crate::snapshot::Snapshot;

/// Everything the producer mutates while playing.
///
/// Owned by the real-time producer; the UI only sees published [`Snapshot`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    cursor: Cursor,
    rate: PlaybackRate,
    region: LoopRegion,
    paused: bool,
    audio_enabled: bool,
    /// No output is listening: the cursor advances but frames are silent
    silent: bool,
    volume: f32,
    /// Commands ignored because they were not valid in the current state
    rejected: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            cursor: Cursor::default(),
            rate: PlaybackRate::BASELINE,
            region: LoopRegion::default(),
            paused: false,
            audio_enabled: true,
            silent: false,
            volume: 1.0,
            rejected: 0,
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from a published snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut region = LoopRegion::new(snapshot.loop_start, snapshot.loop_end)
            .with_boomerang(snapshot.boomerang);
        if snapshot.loop_enabled {
            region = region.engaged();
        }
        Self {
            cursor: Cursor::new(snapshot.position),
            rate: PlaybackRate::new(snapshot.rate),
            region,
            paused: snapshot.paused,
            audio_enabled: snapshot.audio_enabled,
            silent: snapshot.silent,
            volume: snapshot.volume,
            rejected: snapshot.rejected,
        }
    }

    pub fn with_position(mut self, position: f64) -> Self {
        self.cursor = Cursor::new(position);
        self
    }

    pub fn with_rate(mut self, rate: PlaybackRate) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_loop(mut self, region: LoopRegion) -> Self {
        self.region = region;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, VOLUME_MAX);
        self
    }

    pub fn with_audio_enabled(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn position(&self) -> f64 {
        self.cursor.position()
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn region(&self) -> &LoopRegion {
        &self.region
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Advance the cursor by `delta` bytes. A boomerang reflection inverts
    /// the rate so the next advance continues in the new direction.
    pub fn advance(&mut self, delta: f64, len: f64) -> Resolution {
        let resolution = self.cursor.advance(delta, len, &self.region);
        if resolution == Resolution::Reflected {
            self.rate = self.rate.inverted();
        }
        resolution
    }

    /// Apply one command. Returns `false` if it was ignored.
    pub fn apply(&mut self, command: Command, media: &MediaBuffer) -> bool {
        let len = media.len() as f64;
        match command {
            Command::SetDirection(direction) => self.rate = self.rate.with_direction(direction),
            Command::SetRateMagnitude(magnitude) => self.rate = self.rate.with_magnitude(magnitude),
            Command::Reverse => self.rate = self.rate.reversed(),
            Command::ResetRate => self.rate = PlaybackRate::BASELINE,
            Command::Freeze => self.rate = PlaybackRate::FROZEN,
            Command::StepRate(steps) => self.rate = self.rate.stepped(steps),
            Command::ToggleMute => self.audio_enabled = !self.audio_enabled,
            Command::TogglePause => self.paused = !self.paused,
            Command::Seek(seek) => self.seek(seek, media),
            Command::ToggleLoop => self.region.toggle_enabled(),
            Command::ToggleBoomerang => self.region.toggle_boomerang(),
            Command::MarkLoopStart => {
                let pos = self.cursor.position();
                if self.region.set_start(pos).is_err() {
                    return self.reject();
                }
            }
            Command::MarkLoopEnd => {
                let pos = self.cursor.position();
                if self.region.set_end(pos).is_err() {
                    return self.reject();
                }
            }
            Command::AdjustVolume(delta) => {
                if !delta.is_finite() {
                    return self.reject();
                }
                self.volume = (self.volume + delta).clamp(0.0, VOLUME_MAX);
            }
            Command::Reset => {
                self.cursor.seek(0.0, len);
                self.rate = PlaybackRate::BASELINE;
                self.paused = false;
            }
        }
        true
    }

    fn seek(&mut self, seek: Seek, media: &MediaBuffer) {
        let len = media.len() as f64;
        let target = match seek {
            Seek::Frames(n) => self.cursor.position() + n as f64 * media.bytes_per_frame() as f64,
            Seek::Home => 0.0,
            Seek::End => media.last_frame_position(),
            Seek::Absolute(pos) => pos,
        };
        self.cursor.seek(target, len);
    }

    fn reject(&mut self) -> bool {
        self.rejected = self.rejected.wrapping_add(1);
        false
    }
}
