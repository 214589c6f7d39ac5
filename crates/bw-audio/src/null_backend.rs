//! Silent output that still drives the source on a wall-clock schedule.
//!
//! Used when no device is available or the device is lost, so the cursor
//! keeps its cadence and commands keep applying.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::traits::{AudioError, AudioOutput, RenderBlock};

/// Frames rendered per wake-up.
const BLOCK: usize = 512;

/// A clock thread that renders into a scratch buffer and discards it.
pub struct NullOutput {
    sample_rate: u32,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl NullOutput {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }
}

impl AudioOutput for NullOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn start(&mut self, mut source: Box<dyn RenderBlock>) -> Result<(), AudioError> {
        self.stop()?;
        self.running.store(true, Ordering::Relaxed);

        let running = self.running.clone();
        let period = Duration::from_secs_f64(BLOCK as f64 / self.sample_rate as f64);
        let thread = thread::Builder::new()
            .name("bw-null-audio".into())
            .spawn(move || {
                let mut left = vec![0.0f32; BLOCK];
                let mut right = vec![0.0f32; BLOCK];
                let mut deadline = Instant::now();
                while running.load(Ordering::Relaxed) {
                    source.render(&mut left, &mut right);
                    deadline += period;
                    let now = Instant::now();
                    if deadline > now {
                        thread::sleep(deadline - now);
                    } else {
                        // Fell behind; don't try to catch up in a burst
                        deadline = now;
                    }
                }
            })
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;

        self.thread = Some(thread);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| AudioError::Playback("null audio thread panicked".into()))?;
        }
        Ok(())
    }
}

impl Drop for NullOutput {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
