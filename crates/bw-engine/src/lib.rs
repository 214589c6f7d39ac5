//! Playback engine for the binwave player.
//!
//! Moves a fractional cursor through the media at a signed rate, resolves it
//! against the loop region, samples it for audio and maps it to pixels.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bridge;
mod cursor;
mod frame;
mod frame_mapper;
mod player;
mod snapshot;
mod synth;

pub use bridge::{bridge, ControlHandle, Producer};
pub use cursor::{Cursor, Resolution};
pub use frame::Frame;
pub use frame_mapper::{FrameImage, FrameMapper};
pub use player::PlayerState;
pub use snapshot::{Snapshot, SnapshotCell};
pub use synth::{distance_per_tick, Engine};
