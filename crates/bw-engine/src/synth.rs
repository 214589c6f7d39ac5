//! Sample synthesizer: advances the cursor once per output sample and turns
//! the byte under it into audio.

use alloc::sync::Arc;
use alloc::vec::Vec;
use bw_ir::{Command, MediaBuffer};

use crate::frame::Frame;
use crate::player::PlayerState;
use crate::snapshot::Snapshot;

/// The playback engine.
pub struct Engine {
    /// The loaded bytes, shared with the viewer
    media: Arc<MediaBuffer>,
    /// Cursor, rate, loop and transport flags
    state: PlayerState,
    /// Output sample rate (e.g., 44100)
    sample_rate: u32,
    /// Frames per second at rate 1.0
    baseline_fps: f64,
    /// Bytes the cursor moves per sample at rate 1.0
    distance_per_tick: f64,
}

impl Engine {
    /// Create an engine with default player state.
    pub fn new(media: Arc<MediaBuffer>, sample_rate: u32, baseline_fps: f64) -> Self {
        let distance_per_tick = distance_per_tick(media.bytes_per_frame(), baseline_fps, sample_rate);
        Self {
            media,
            state: PlayerState::new(),
            sample_rate,
            baseline_fps,
            distance_per_tick,
        }
    }

    /// Replace the player state, e.g. when resuming from a snapshot.
    pub fn with_state(mut self, state: PlayerState) -> Self {
        self.state = state;
        self
    }

    pub fn media(&self) -> &Arc<MediaBuffer> {
        &self.media
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn baseline_fps(&self) -> f64 {
        self.baseline_fps
    }

    pub fn distance_per_tick(&self) -> f64 {
        self.distance_per_tick
    }

    pub fn position(&self) -> f64 {
        self.state.position()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Apply one command. Returns `false` if it was ignored.
    pub fn apply(&mut self, command: Command) -> bool {
        self.state.apply(command, &self.media)
    }

    /// Generate one frame of audio.
    ///
    /// Paused, muted or empty playback yields silence and leaves the cursor
    /// where it is. A silent state advances the cursor but discards the sample.
    pub fn render_frame(&mut self) -> Frame {
        if self.state.is_paused() || !self.state.is_audio_enabled() || self.media.is_empty() {
            return Frame::silence();
        }

        let len = self.media.len() as f64;
        let delta = self.distance_per_tick * self.state.rate().value();
        self.state.advance(delta, len);
        if self.state.is_silent() {
            return Frame::silence();
        }

        let byte = self.media.byte_at(libm::floor(self.state.position()) as usize);
        let sample = (byte as f32 - 128.0) / 128.0 * self.state.volume();
        Frame::mono(sample)
    }

    /// Fill a block of split-channel output. Renders `min(left, right)` frames.
    pub fn render_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let frame = self.render_frame();
            *l = frame.left;
            *r = frame.right;
        }
    }

    /// Render `count` frames into a new buffer.
    pub fn render_frames(&mut self, count: usize) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(count);
        for _ in 0..count {
            frames.push(self.render_frame());
        }
        frames
    }
}

/// Bytes per output sample at rate 1.0, or 0 if the sample rate is 0.
pub fn distance_per_tick(bytes_per_frame: usize, baseline_fps: f64, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    bytes_per_frame as f64 * baseline_fps / sample_rate as f64
}
