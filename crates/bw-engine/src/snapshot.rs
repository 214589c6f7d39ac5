//! Published player state and the seqlock it travels through.
//!
//! The producer is the only writer. Readers never block it: a read that
//! overlaps a write is simply retried.

use core::sync::atomic::{fence, AtomicU32, AtomicU64, Ordering};

use crate::player::PlayerState;

/// A consistent copy of the player state, as seen by the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub position: f64,
    pub rate: f64,
    pub loop_start: f64,
    pub loop_end: f64,
    pub loop_enabled: bool,
    pub boomerang: bool,
    pub paused: bool,
    pub audio_enabled: bool,
    /// Frames are discarded while the cursor keeps moving
    pub silent: bool,
    pub volume: f32,
    /// Running count of ignored commands
    pub rejected: u32,
    /// Running count of commands the producer has drained
    pub applied: u32,
}

impl Snapshot {
    pub fn capture(state: &PlayerState) -> Self {
        let region = state.region();
        Self {
            position: state.position(),
            rate: state.rate().value(),
            loop_start: region.start(),
            loop_end: region.end(),
            loop_enabled: region.is_enabled(),
            boomerang: region.is_boomerang(),
            paused: state.is_paused(),
            audio_enabled: state.is_audio_enabled(),
            silent: state.is_silent(),
            volume: state.volume(),
            rejected: state.rejected(),
            applied: 0,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::capture(&PlayerState::default())
    }
}

const LOOP_ENABLED: u32 = 1 << 0;
const BOOMERANG: u32 = 1 << 1;
const PAUSED: u32 = 1 << 2;
const AUDIO_ENABLED: u32 = 1 << 3;
const SILENT: u32 = 1 << 4;

/// Single-writer, multi-reader snapshot slot.
pub struct SnapshotCell {
    /// Odd while a write is in progress
    seq: AtomicU32,
    position: AtomicU64,
    rate: AtomicU64,
    loop_start: AtomicU64,
    loop_end: AtomicU64,
    volume: AtomicU32,
    rejected: AtomicU32,
    applied: AtomicU32,
    flags: AtomicU32,
}

impl SnapshotCell {
    pub fn new(initial: &Snapshot) -> Self {
        let cell = Self {
            seq: AtomicU32::new(0),
            position: AtomicU64::new(0),
            rate: AtomicU64::new(0),
            loop_start: AtomicU64::new(0),
            loop_end: AtomicU64::new(0),
            volume: AtomicU32::new(0),
            rejected: AtomicU32::new(0),
            applied: AtomicU32::new(0),
            flags: AtomicU32::new(0),
        };
        cell.publish(initial);
        cell
    }

    /// Store a new snapshot. Must only be called from one thread at a time.
    pub fn publish(&self, snapshot: &Snapshot) {
        let seq = self.seq.load(Ordering::Relaxed);
        self.seq.store(seq.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        let mut flags = 0;
        if snapshot.loop_enabled {
            flags |= LOOP_ENABLED;
        }
        if snapshot.boomerang {
            flags |= BOOMERANG;
        }
        if snapshot.paused {
            flags |= PAUSED;
        }
        if snapshot.audio_enabled {
            flags |= AUDIO_ENABLED;
        }
        if snapshot.silent {
            flags |= SILENT;
        }

        self.position
            .store(snapshot.position.to_bits(), Ordering::Relaxed);
        self.rate.store(snapshot.rate.to_bits(), Ordering::Relaxed);
        self.loop_start
            .store(snapshot.loop_start.to_bits(), Ordering::Relaxed);
        self.loop_end
            .store(snapshot.loop_end.to_bits(), Ordering::Relaxed);
        self.volume.store(snapshot.volume.to_bits(), Ordering::Relaxed);
        self.rejected.store(snapshot.rejected, Ordering::Relaxed);
        self.applied.store(snapshot.applied, Ordering::Relaxed);
        self.flags.store(flags, Ordering::Relaxed);

        self.seq.store(seq.wrapping_add(2), Ordering::Release);
    }

    /// Read the latest complete snapshot, retrying across concurrent writes.
    pub fn load(&self) -> Snapshot {
        loop {
            let before = self.seq.load(Ordering::Acquire);
            if before & 1 == 1 {
                core::hint::spin_loop();
                continue;
            }

            let flags = self.flags.load(Ordering::Relaxed);
            let snapshot = Snapshot {
                position: f64::from_bits(self.position.load(Ordering::Relaxed)),
                rate: f64::from_bits(self.rate.load(Ordering::Relaxed)),
                loop_start: f64::from_bits(self.loop_start.load(Ordering::Relaxed)),
                loop_end: f64::from_bits(self.loop_end.load(Ordering::Relaxed)),
                loop_enabled: flags & LOOP_ENABLED != 0,
                boomerang: flags & BOOMERANG != 0,
                paused: flags & PAUSED != 0,
                audio_enabled: flags & AUDIO_ENABLED != 0,
                silent: flags & SILENT != 0,
                volume: f32::from_bits(self.volume.load(Ordering::Relaxed)),
                rejected: self.rejected.load(Ordering::Relaxed),
                applied: self.applied.load(Ordering::Relaxed),
            };

            fence(Ordering::Acquire);
            if self.seq.load(Ordering::Relaxed) == before {
                return snapshot;
            }
            core::hint::spin_loop();
        }
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new(&Snapshot::default())
    }
}
