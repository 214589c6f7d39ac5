//! Producer/controller split.
//!
//! The [`Producer`] owns the engine and runs in the real-time context. The
//! [`ControlHandle`] lives with the UI: it pushes commands into a lock-free
//! SPSC queue and reads snapshots the producer publishes after every block.

use alloc::sync::Arc;
use bw_ir::Command;
use ringbuf::traits::{Consumer, Observer, Producer as _, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::snapshot::{Snapshot, SnapshotCell};
use crate::synth::Engine;

/// Real-time side: drains commands, renders, publishes.
pub struct Producer {
    engine: Engine,
    commands: HeapCons<Command>,
    shared: Arc<SnapshotCell>,
    /// Commands drained so far, wrapping
    applied: u32,
}

/// UI side: sends commands, reads snapshots.
pub struct ControlHandle {
    commands: HeapProd<Command>,
    shared: Arc<SnapshotCell>,
}

/// Split an engine into its producer and a control handle.
///
/// `capacity` bounds how many commands may be pending between two blocks.
pub fn bridge(engine: Engine, capacity: usize) -> (Producer, ControlHandle) {
    let (prod, cons) = HeapRb::<Command>::new(capacity.max(1)).split();
    let shared = Arc::new(SnapshotCell::new(&engine.snapshot()));
    (
        Producer {
            engine,
            commands: cons,
            shared: Arc::clone(&shared),
            applied: 0,
        },
        ControlHandle {
            commands: prod,
            shared,
        },
    )
}

impl Producer {
    /// Apply pending commands, then fill `left`/`right`, then publish.
    ///
    /// Never blocks, allocates or does I/O.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.process_block(left, right));
        #[cfg(not(feature = "alloc_check"))]
        self.process_block(left, right);
    }

    fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        while let Some(command) = self.commands.try_pop() {
            self.engine.apply(command);
            self.applied = self.applied.wrapping_add(1);
        }
        self.engine.render_block(left, right);
        self.shared.publish(&Snapshot {
            applied: self.applied,
            ..self.engine.snapshot()
        });
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }
}

impl ControlHandle {
    /// Queue a command for the next block. Gives the command back if the
    /// queue is full.
    pub fn send(&mut self, command: Command) -> Result<(), Command> {
        self.commands.try_push(command)
    }

    /// Commands queued but not yet applied.
    pub fn pending(&self) -> usize {
        self.commands.occupied_len()
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.shared.load()
    }
}
