//! Starting and stopping playback with or without a sound device.
//!
//! Whichever backend ends up driving the producer, commands must keep
//! applying and the state must survive a stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use bw_master::{
    AudioError, AudioOutput, AudioState, Command, Controller, FrameGeometry, MediaBuffer,
    PlayerConfig, RenderBlock, Seek,
};

const BLOCK: usize = 512;

fn controller() -> Controller {
    let media = MediaBuffer::new(vec![0x80; 8 * 8192], FrameGeometry::new(64, 128)).unwrap();
    Controller::new(media, PlayerConfig::default())
}

/// Poll until `done` holds or a second passes.
fn wait_for(ctrl: &mut Controller, done: impl Fn(&bw_master::Snapshot) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(1);
    while Instant::now() < deadline {
        if done(&ctrl.poll()) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

/// Device that renders only when asked and can be unplugged.
#[derive(Clone, Default)]
struct ManualOutput {
    source: Arc<Mutex<Option<Box<dyn RenderBlock>>>>,
    lost: Arc<AtomicBool>,
}

impl ManualOutput {
    fn render_blocks(&self, count: usize) {
        let mut left = [0.0; BLOCK];
        let mut right = [0.0; BLOCK];
        if let Some(source) = self.source.lock().unwrap().as_mut() {
            for _ in 0..count {
                source.render(&mut left, &mut right);
            }
        }
    }

    fn unplug(&self) {
        self.lost.store(true, Ordering::SeqCst);
    }
}

impl AudioOutput for ManualOutput {
    fn sample_rate(&self) -> u32 {
        44_100
    }

    fn start(&mut self, source: Box<dyn RenderBlock>) -> Result<(), AudioError> {
        *self.source.lock().unwrap() = Some(source);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.source.lock().unwrap().take();
        Ok(())
    }

    fn is_lost(&self) -> bool {
        self.lost.load(Ordering::SeqCst)
    }
}

/// Device that refuses to open a stream.
struct BrokenOutput;

impl AudioOutput for BrokenOutput {
    fn sample_rate(&self) -> u32 {
        48_000
    }

    fn start(&mut self, _source: Box<dyn RenderBlock>) -> Result<(), AudioError> {
        Err(AudioError::NoDevice)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

#[test]
fn commands_apply_under_any_backend() {
    let mut ctrl = controller();
    let state = ctrl.start_audio();
    assert_ne!(state, AudioState::Stopped);

    let snapshot = ctrl.snapshot();
    match state {
        AudioState::Fallback => assert!(snapshot.silent),
        _ => assert!(!snapshot.silent),
    }
    assert!(snapshot.audio_enabled);

    assert!(ctrl.send(Command::TogglePause));
    assert!(ctrl.send(Command::Seek(Seek::Absolute(100.0))));
    assert!(wait_for(&mut ctrl, |s| s.paused && s.position == 100.0));

    ctrl.stop_audio();
    assert_eq!(ctrl.audio_state(), AudioState::Stopped);
    let snapshot = ctrl.snapshot();
    assert!(snapshot.paused);
    assert_eq!(snapshot.position, 100.0);
}

#[test]
fn restart_keeps_position() {
    let mut ctrl = controller();
    ctrl.send(Command::TogglePause);
    ctrl.send(Command::Seek(Seek::Frames(3)));
    ctrl.start_audio();
    ctrl.stop_audio();
    ctrl.start_audio();
    assert!(wait_for(&mut ctrl, |s| s.position == 3.0 * 8192.0));
    ctrl.stop_audio();
}

#[test]
fn cursor_moves_without_a_device() {
    let mut ctrl = controller();
    assert_eq!(ctrl.start_with(Box::new(BrokenOutput)), AudioState::Fallback);

    let snapshot = ctrl.snapshot();
    assert!(snapshot.silent);
    assert!(snapshot.audio_enabled);
    assert!(wait_for(&mut ctrl, |s| s.position > 0.0));

    // Muting still freezes the cursor, and unmuting releases it
    ctrl.send(Command::ToggleMute);
    assert!(wait_for(&mut ctrl, |s| !s.audio_enabled));
    let held = ctrl.snapshot().position;
    thread::sleep(Duration::from_millis(50));
    assert_eq!(ctrl.poll().position, held);
    ctrl.send(Command::ToggleMute);
    assert!(wait_for(&mut ctrl, |s| s.position != held));
    ctrl.stop_audio();
    assert!(!ctrl.snapshot().silent);
}

#[test]
fn lost_device_keeps_cursor_rate_and_loop() {
    let mut ctrl = controller();
    let device = ManualOutput::default();
    assert_eq!(
        ctrl.start_with(Box::new(device.clone())),
        AudioState::Device { sample_rate: 44_100 }
    );

    for command in [
        Command::Seek(Seek::Absolute(8192.0)),
        Command::MarkLoopStart,
        Command::Seek(Seek::Absolute(40_960.0)),
        Command::MarkLoopEnd,
        Command::Seek(Seek::Absolute(16_384.0)),
        Command::ToggleLoop,
        Command::SetRateMagnitude(2.0),
    ] {
        assert!(ctrl.send(command));
    }
    device.render_blocks(1);
    ctrl.send(Command::TogglePause);
    device.render_blocks(1);
    let before = ctrl.poll();
    assert!(before.paused);
    assert!(before.position > 16_384.0 && before.position < 40_960.0);

    device.unplug();
    ctrl.poll();
    assert_eq!(ctrl.audio_state(), AudioState::Fallback);

    let after = ctrl.snapshot();
    assert_eq!(after.position, before.position);
    assert_eq!(after.rate, 2.0);
    assert!(after.loop_enabled);
    assert_eq!((after.loop_start, after.loop_end), (8192.0, 40_960.0));
    assert!(after.silent);

    ctrl.send(Command::TogglePause);
    assert!(wait_for(&mut ctrl, |s| !s.paused && s.position != before.position));
    let moving = ctrl.snapshot();
    assert_eq!(moving.rate, 2.0);
    assert!(moving.position >= 8192.0 && moving.position <= 40_960.0);
    ctrl.stop_audio();
}

#[test]
fn commands_sent_before_loss_is_noticed_still_apply() {
    let mut ctrl = controller();
    let device = ManualOutput::default();
    ctrl.start_with(Box::new(device.clone()));

    // The device dies before it drains anything
    device.unplug();
    assert!(ctrl.send(Command::Seek(Seek::Absolute(500.0))));
    assert!(ctrl.send(Command::TogglePause));
    ctrl.poll();
    assert_eq!(ctrl.audio_state(), AudioState::Fallback);

    assert!(wait_for(&mut ctrl, |s| s.paused && s.position == 500.0));
    ctrl.stop_audio();
    let snapshot = ctrl.snapshot();
    assert!(snapshot.paused);
    assert_eq!(snapshot.position, 500.0);
}
