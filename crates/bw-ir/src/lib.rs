//! Core data model for the binwave player.
//!
//! This crate defines the types shared by the playback engine, the audio
//! backends and the viewer: the loaded media and its frame geometry, the
//! signed playback rate, the loop region and the command set that input
//! handling may send to the engine.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod command;
mod loop_region;
mod media;
mod palette;
mod rate;

pub use command::{Command, Direction, Seek, VOLUME_MAX, VOLUME_STEP};
pub use loop_region::{LoopEditError, LoopRegion, LoopTopology};
pub use media::{wrap_position, FrameGeometry, MediaBuffer, MediaError};
pub use palette::{byte_to_rgb, hue_and_level, Rgb, HUE_COUNT, INTENSITY_LEVELS, PALETTE};
pub use rate::{rate_step, PlaybackRate, MAX_RATE};
