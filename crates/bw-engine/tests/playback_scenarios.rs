//! End-to-end cursor scenarios driven through the synthesizer.
//!
//! Geometry is the default 64x128 lane at 24 fps, so one frame is 8192 bytes.
//! At 49152 Hz the cursor moves 4 bytes per sample, at 196608 Hz exactly 1.

use std::sync::Arc;

use bw_engine::{Engine, FrameMapper};
use bw_ir::{Command, FrameGeometry, MediaBuffer, Seek};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GEOMETRY: FrameGeometry = FrameGeometry::new(64, 128);
const BPF: usize = 64 * 128;
const FPS: f64 = 24.0;

fn engine(frames: usize, sample_rate: u32) -> Engine {
    let bytes = (0..frames * BPF).map(|i| (i % 251) as u8).collect();
    let media = MediaBuffer::new(bytes, GEOMETRY).unwrap();
    Engine::new(Arc::new(media), sample_rate, FPS)
}

fn seek(engine: &mut Engine, pos: f64) {
    engine.apply(Command::Seek(Seek::Absolute(pos)));
}

/// Engage a loop the way a user would: mark both ends, then enable.
fn set_loop(engine: &mut Engine, start: f64, end: f64, boomerang: bool) {
    seek(engine, start);
    assert!(engine.apply(Command::MarkLoopStart));
    seek(engine, end);
    assert!(engine.apply(Command::MarkLoopEnd));
    engine.apply(Command::ToggleLoop);
    if boomerang {
        engine.apply(Command::ToggleBoomerang);
    }
}

fn tick(engine: &mut Engine, n: usize) {
    for _ in 0..n {
        engine.render_frame();
    }
}

#[test]
fn one_frame_of_ticks_advances_one_frame() {
    let mut engine = engine(2, 49_152);
    let mapper = FrameMapper::new();
    assert_eq!(engine.distance_per_tick(), 4.0);

    tick(&mut engine, 2048);
    assert_eq!(engine.position(), 8192.0);
    assert_eq!(mapper.frame_index(engine.media(), engine.position()), 1);

    tick(&mut engine, 2048);
    assert_eq!(engine.position(), 0.0);
    assert_eq!(mapper.frame_index(engine.media(), engine.position()), 0);
}

#[test]
fn boomerang_reflects_at_loop_end() {
    let mut engine = engine(2, 49_152);
    set_loop(&mut engine, 0.0, BPF as f64, true);
    seek(&mut engine, 0.0);
    engine.apply(Command::SetRateMagnitude(2.0));

    tick(&mut engine, 1024);
    assert_eq!(engine.position(), 8192.0);
    assert_eq!(engine.state().rate().value(), 2.0);

    tick(&mut engine, 1);
    assert_eq!(engine.position(), 8184.0);
    assert_eq!(engine.state().rate().value(), -2.0);

    let mut last = engine.position();
    for _ in 0..100 {
        tick(&mut engine, 1);
        assert!(engine.position() < last);
        last = engine.position();
    }
}

#[test]
fn two_crossings_restore_direction() {
    let mut engine = engine(2, 49_152);
    set_loop(&mut engine, 0.0, BPF as f64, true);
    seek(&mut engine, 0.0);
    engine.apply(Command::SetRateMagnitude(2.0));

    // forward to the end, reflect, back to the start, reflect
    tick(&mut engine, 1025);
    assert_eq!(engine.state().rate().value(), -2.0);
    tick(&mut engine, 1023);
    assert_eq!(engine.position(), 0.0);
    tick(&mut engine, 1);
    assert_eq!(engine.position(), 8.0);
    assert_eq!(engine.state().rate().value(), 2.0);
}

#[test]
fn wrap_around_loop_runs_through_file_start() {
    let mut engine = engine(2, 196_608);
    let n = engine.media().len() as f64;
    assert_eq!(engine.distance_per_tick(), 1.0);

    set_loop(&mut engine, n - 10.0, 5.0, false);
    seek(&mut engine, n - 10.0);

    tick(&mut engine, 9);
    assert_eq!(engine.position(), n - 1.0);
    tick(&mut engine, 1);
    assert_eq!(engine.position(), 0.0);
    tick(&mut engine, 5);
    assert_eq!(engine.position(), 5.0);

    // 6 is the first position outside the arc
    tick(&mut engine, 1);
    assert_eq!(engine.position(), n - 10.0);
}

#[test]
fn wrap_around_loop_backward_snaps_to_end() {
    let mut engine = engine(2, 196_608);
    let n = engine.media().len() as f64;
    set_loop(&mut engine, n - 10.0, 5.0, false);
    seek(&mut engine, 2.0);
    engine.apply(Command::Reverse);

    tick(&mut engine, 12);
    assert_eq!(engine.position(), n - 10.0);
    tick(&mut engine, 1);
    assert_eq!(engine.position(), 5.0);
}

#[test]
fn pinned_loop_holds_position() {
    let mut engine = engine(2, 49_152);
    set_loop(&mut engine, 1000.0, 1000.0, false);
    for rate in [1.0, 37.5, 0.0] {
        engine.apply(Command::SetRateMagnitude(rate));
        tick(&mut engine, 500);
        assert_eq!(engine.position(), 1000.0);
    }
    engine.apply(Command::Reverse);
    tick(&mut engine, 500);
    assert_eq!(engine.position(), 1000.0);
}

#[test]
fn loop_bounds_cannot_move_while_looping() {
    let mut engine = engine(2, 49_152);
    set_loop(&mut engine, 100.0, 200.0, false);
    seek(&mut engine, 150.0);
    assert!(!engine.apply(Command::MarkLoopStart));
    assert!(!engine.apply(Command::MarkLoopEnd));
    assert_eq!(engine.state().region().start(), 100.0);
    assert_eq!(engine.state().region().end(), 200.0);
    assert_eq!(engine.snapshot().rejected, 2);
}

#[test]
fn non_boomerang_loops_contain_the_cursor() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let mut engine = engine(2, 49_152);
        let n = engine.media().len();
        let start = rng.random_range(0..n) as f64;
        let end = rng.random_range(0..n) as f64;
        set_loop(&mut engine, start, end, false);
        seek(&mut engine, start);

        let rate = rng.random_range(-100..100) as f64 / 4.0;
        engine.apply(Command::SetRateMagnitude(rate.abs()));
        if rate < 0.0 {
            engine.apply(Command::Reverse);
        }

        for _ in 0..2000 {
            engine.render_frame();
            let pos = engine.position();
            assert!(
                engine.state().region().covers(pos),
                "cursor {} left loop [{}, {}] at rate {}",
                pos,
                start,
                end,
                rate
            );
            assert!(pos >= 0.0 && pos < n as f64);
        }
    }
}

#[test]
fn free_running_cursor_stays_in_file() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = engine(3, 44_100);
    let n = engine.media().len() as f64;
    for _ in 0..200 {
        let steps: i8 = rng.random_range(-20..20);
        engine.apply(Command::StepRate(steps));
        for _ in 0..256 {
            engine.render_frame();
            let pos = engine.position();
            assert!((0.0..n).contains(&pos), "cursor {} outside file", pos);
        }
    }
}
