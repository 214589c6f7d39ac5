//! CPAL-based audio output backend.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig, StreamError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::traits::{AudioError, AudioOutput, RenderBlock};

/// Frames rendered per call into the source.
const BLOCK: usize = 256;

/// CPAL-based audio output.
pub struct CpalOutput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    running: Arc<AtomicBool>,
    lost: Arc<AtomicBool>,
}

impl CpalOutput {
    /// Create a new CPAL output with default device.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;

        let mut config: StreamConfig = config.into();
        // Force stereo: the callback interleaves exactly two channels
        config.channels = 2;

        log::info!(
            "audio device {} at {} Hz",
            device.name().unwrap_or_else(|_| "<unnamed>".into()),
            config.sample_rate.0
        );

        Ok(Self {
            device,
            config,
            stream: None,
            running: Arc::new(AtomicBool::new(false)),
            lost: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Build the stream around `source`; it starts paused.
    fn build_stream(&self, mut source: Box<dyn RenderBlock>) -> Result<Stream, AudioError> {
        let running = self.running.clone();
        let lost = self.lost.clone();
        let channels = self.config.channels as usize;

        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !running.load(Ordering::Relaxed) {
                        data.fill(0.0);
                        return;
                    }

                    let mut left = [0.0f32; BLOCK];
                    let mut right = [0.0f32; BLOCK];
                    for chunk in data.chunks_mut(BLOCK * channels) {
                        let frames = chunk.len() / channels;
                        source.render(&mut left[..frames], &mut right[..frames]);
                        // Write stereo pair; zero-fill any extra channels
                        for (i, frame) in chunk.chunks_mut(channels).enumerate() {
                            for (c, sample) in frame.iter_mut().enumerate() {
                                *sample = match c {
                                    0 => left[i],
                                    1 => right[i],
                                    _ => 0.0,
                                };
                            }
                        }
                    }
                },
                move |err| {
                    if matches!(err, StreamError::DeviceNotAvailable) {
                        lost.store(true, Ordering::Relaxed);
                    }
                    log::warn!("audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))
    }
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn start(&mut self, source: Box<dyn RenderBlock>) -> Result<(), AudioError> {
        let stream = self.build_stream(source)?;
        self.running.store(true, Ordering::Relaxed);
        stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running.store(false, Ordering::Relaxed);
        if let Some(stream) = self.stream.take() {
            stream.pause().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }

    fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Relaxed)
    }
}
