//! Headless controller for the binwave player.
//!
//! Provides a unified API for loading media, playback, and rendering
//! that both the GUI and CLI can share.

mod config;
mod export;

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use bw_audio::{CpalOutput, NullOutput};
use bw_engine::{bridge, ControlHandle, Engine, PlayerState, Producer};

// Re-export common types so callers don't need bw-ir/bw-engine directly.
pub use bw_engine::{Frame, FrameImage, FrameMapper, Snapshot};
pub use bw_audio::{AudioError, AudioOutput, RenderBlock};
pub use bw_formats::{frames_to_wav, write_wav, FormatError, MAX_WAV_FRAMES};
pub use bw_ir::{Command, Direction, FrameGeometry, MediaBuffer, Seek};

pub use config::{ConfigArgs, ConfigError, PlayerConfig, Preset};
pub use export::{write_png, ExportError};

/// Sample rate of the silent clock that runs when no device is usable.
pub const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// Where the cursor's cadence currently comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioState {
    /// Nothing is driving the producer; commands apply immediately
    Stopped,
    /// Playing through the default output device
    Device { sample_rate: u32 },
    /// No usable device: a silent clock keeps the cursor moving without sound
    Fallback,
}

/// Headless player controller: owns the media and manages playback.
pub struct Controller {
    media: Arc<MediaBuffer>,
    config: PlayerConfig,
    mapper: FrameMapper,
    control: ControlHandle,
    /// Producer not currently handed to an output
    idle: Option<Producer>,
    output: Option<Box<dyn AudioOutput>>,
    audio: AudioState,
    rejected_seen: u32,
    /// Most recent commands sent to the current producer
    journal: VecDeque<Command>,
    /// Commands sent to the current producer, wrapping
    sent: u32,
}

impl Controller {
    /// Load `path` with the configured geometry.
    pub fn open(path: impl AsRef<Path>, config: PlayerConfig) -> Result<Self, FormatError> {
        let media = bw_formats::load_media(path, config.geometry())?;
        Ok(Self::new(media, config))
    }

    pub fn new(media: MediaBuffer, config: PlayerConfig) -> Self {
        let media = Arc::new(media);
        let state = config.initial_state(&media);
        let engine = Engine::new(media.clone(), FALLBACK_SAMPLE_RATE, config.baseline_fps)
            .with_state(state);
        let (producer, control) = bridge(engine, config.command_capacity);
        Self {
            media,
            mapper: FrameMapper::new(),
            control,
            idle: Some(producer),
            output: None,
            audio: AudioState::Stopped,
            rejected_seen: 0,
            journal: VecDeque::with_capacity(config.command_capacity),
            sent: 0,
            config,
        }
    }

    // --- Accessors ---

    pub fn media(&self) -> &MediaBuffer {
        &self.media
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn mapper(&self) -> &FrameMapper {
        &self.mapper
    }

    pub fn audio_state(&self) -> AudioState {
        self.audio
    }

    /// Latest state published by the producer.
    pub fn snapshot(&self) -> Snapshot {
        self.control.snapshot()
    }

    /// Index of the frame under the cursor.
    pub fn current_frame(&self) -> usize {
        self.media.frame_at(self.snapshot().position)
    }

    // --- Commands ---

    /// Queue a command. Returns `false` if the queue was full and it was dropped.
    pub fn send(&mut self, command: Command) -> bool {
        if let Err(command) = self.control.send(command) {
            log::debug!("command queue full, dropped {:?}", command);
            return false;
        }
        self.record(command);
        // Without an output nothing else drains the queue
        if let Some(producer) = &mut self.idle {
            producer.process(&mut [], &mut []);
        }
        true
    }

    /// Call once per UI tick: handles device loss and reports ignored commands.
    pub fn poll(&mut self) -> Snapshot {
        if self.output.as_ref().is_some_and(|o| o.is_lost()) {
            log::warn!("audio device lost, continuing without sound");
            self.stop_output();
            self.fallback();
        }

        let snapshot = self.control.snapshot();
        if snapshot.rejected != self.rejected_seen {
            log::debug!(
                "ignored {} command(s): loop bounds are locked while looping",
                snapshot.rejected.wrapping_sub(self.rejected_seen)
            );
            self.rejected_seen = snapshot.rejected;
        }
        snapshot
    }

    // --- Real-time playback ---

    /// Start playback on the default device, falling back to the silent
    /// clock if there is none or it fails to start.
    pub fn start_audio(&mut self) -> AudioState {
        match CpalOutput::new() {
            Ok(output) => self.start_with(Box::new(output)),
            Err(e) => {
                self.stop_audio();
                log::warn!("audio unavailable ({}), continuing without sound", e);
                self.fallback();
                self.audio
            }
        }
    }

    /// Start playback on `output`, falling back to the silent clock if it
    /// fails to start.
    pub fn start_with(&mut self, mut output: Box<dyn AudioOutput>) -> AudioState {
        self.stop_audio();

        let sample_rate = output.sample_rate();
        let state = self.current_state().with_silent(false);
        let producer = self.respawn(sample_rate, state);
        match output.start(Box::new(producer)) {
            Ok(()) => {
                self.output = Some(output);
                self.audio = AudioState::Device { sample_rate };
            }
            Err(e) => {
                log::warn!("audio stream failed ({}), continuing without sound", e);
                self.fallback();
            }
        }
        self.audio
    }

    /// Stop whatever drives the producer. Commands keep applying immediately.
    pub fn stop_audio(&mut self) {
        self.stop_output();
        if self.idle.is_none() {
            let state = self.current_state().with_silent(false);
            self.park(state);
        }
        self.audio = AudioState::Stopped;
    }

    fn stop_output(&mut self) {
        if let Some(mut output) = self.output.take() {
            if let Err(e) = output.stop() {
                log::warn!("failed to stop audio output: {}", e);
            }
        }
    }

    /// Drive the producer from a silent clock. The user's mute setting is kept.
    fn fallback(&mut self) {
        let state = self.current_state().with_silent(true);
        let producer = self.respawn(FALLBACK_SAMPLE_RATE, state);
        let mut output = NullOutput::new(FALLBACK_SAMPLE_RATE);
        match output.start(Box::new(producer)) {
            Ok(()) => {
                self.output = Some(Box::new(output));
                self.audio = AudioState::Fallback;
            }
            Err(e) => {
                log::error!("silent clock failed to start: {}", e);
                let state = self.current_state().with_silent(false);
                self.park(state);
                self.audio = AudioState::Stopped;
            }
        }
    }

    /// Player state as of the last published snapshot, after applying
    /// anything still queued on an idle producer.
    fn current_state(&mut self) -> PlayerState {
        if let Some(mut producer) = self.idle.take() {
            producer.process(&mut [], &mut []);
        }
        PlayerState::from_snapshot(&self.control.snapshot())
    }

    /// Keep a producer without an output and apply whatever it was handed.
    fn park(&mut self, state: PlayerState) {
        let mut producer = self.respawn(FALLBACK_SAMPLE_RATE, state);
        producer.process(&mut [], &mut []);
        self.idle = Some(producer);
    }

    /// Build a fresh producer at `sample_rate` and point the control handle at it.
    ///
    /// Commands the old producer never drained are queued again on the new one.
    fn respawn(&mut self, sample_rate: u32, state: PlayerState) -> Producer {
        let unapplied = self.sent.wrapping_sub(self.control.snapshot().applied) as usize;
        let skip = self.journal.len().saturating_sub(unapplied);
        let replay: Vec<Command> = self.journal.drain(..).skip(skip).collect();
        if !replay.is_empty() {
            log::debug!("replaying {} command(s) on the new producer", replay.len());
        }

        let engine = Engine::new(self.media.clone(), sample_rate, self.config.baseline_fps)
            .with_state(state);
        let (producer, control) = bridge(engine, self.config.command_capacity);
        self.control = control;
        self.sent = 0;
        for command in replay {
            if self.control.send(command).is_ok() {
                self.record(command);
            }
        }
        producer
    }

    fn record(&mut self, command: Command) {
        self.sent = self.sent.wrapping_add(1);
        if self.journal.len() == self.config.command_capacity {
            self.journal.pop_front();
        }
        self.journal.push_back(command);
    }

    // --- Visuals ---

    /// Map `cols × rows` frames starting at the cursor's frame into `image`.
    pub fn map_current(&self, cols: u32, rows: u32, image: &mut FrameImage) {
        self.map_from(self.current_frame(), cols, rows, image);
    }

    /// Map `cols × rows` frames starting at `first` into `image`.
    pub fn map_from(&self, first: usize, cols: u32, rows: u32, image: &mut FrameImage) {
        if cols <= 1 && rows <= 1 {
            self.mapper.map_frame(&self.media, first, image);
        } else {
            self.mapper
                .map_tiled(&self.media, first, cols.max(1), rows.max(1), image);
        }
    }

    pub fn export_png(
        &self,
        path: &Path,
        first: usize,
        cols: u32,
        rows: u32,
    ) -> Result<(), ExportError> {
        let mut image = FrameImage::default();
        self.map_from(first, cols, rows, &mut image);
        write_png(path, &image)
    }

    // --- Offline rendering ---

    /// Render from the current state as if audio were enabled and unpaused.
    pub fn render_frames(&self, sample_rate: u32, count: usize) -> Vec<Frame> {
        let state = PlayerState::from_snapshot(&self.snapshot())
            .with_audio_enabled(true)
            .with_silent(false)
            .with_paused(false);
        Engine::new(self.media.clone(), sample_rate, self.config.baseline_fps)
            .with_state(state)
            .render_frames(count)
    }

    /// Render `seconds` of audio as WAV bytes. Fails before rendering if the
    /// result would not fit in a WAV file.
    pub fn render_to_wav(&self, sample_rate: u32, seconds: f64) -> Result<Vec<u8>, FormatError> {
        let count = sample_rate as f64 * seconds.max(0.0);
        if count > MAX_WAV_FRAMES as f64 {
            return Err(FormatError::TooLong {
                frames: count as u64,
                sample_rate,
            });
        }
        let count = count as usize;
        bw_formats::check_wav_fits(count, sample_rate)?;
        let frames = self.render_frames(sample_rate, count);
        frames_to_wav(&frames, sample_rate)
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop_output();
    }
}
