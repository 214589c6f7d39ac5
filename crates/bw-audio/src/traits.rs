//! Audio output trait and error types.

use bw_engine::Producer;

/// Error type for audio operations.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// Failed to initialize audio device
    #[error("device init error: {0}")]
    DeviceInit(String),
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Playback error
    #[error("playback error: {0}")]
    Playback(String),
    /// No audio device available
    #[error("no audio device available")]
    NoDevice,
}

/// Something the host can pull split-channel blocks from.
///
/// Called from the real-time context: implementations must not block,
/// allocate or do I/O.
pub trait RenderBlock: Send + 'static {
    fn render(&mut self, left: &mut [f32], right: &mut [f32]);
}

impl RenderBlock for Producer {
    fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.process(left, right);
    }
}

/// Trait for audio output backends.
pub trait AudioOutput {
    /// Get the sample rate the source will be driven at.
    fn sample_rate(&self) -> u32;

    /// Start pulling blocks from `source` until stopped.
    fn start(&mut self, source: Box<dyn RenderBlock>) -> Result<(), AudioError>;

    /// Stop playback and drop the source.
    fn stop(&mut self) -> Result<(), AudioError>;

    /// Whether the device went away after starting.
    fn is_lost(&self) -> bool {
        false
    }
}
