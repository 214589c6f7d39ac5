//! File formats for the binwave player.
//!
//! Loads arbitrary files as raw media and writes rendered audio as WAV.

mod raw_format;
mod wav_format;

use std::path::PathBuf;

use bw_ir::MediaError;

pub use raw_format::{load_media, load_media_bytes};
pub use wav_format::{check_wav_fits, frames_to_wav, write_wav, MAX_WAV_FRAMES};

/// Error type for loading and writing files.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Reading or writing the file failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bytes cannot be played with the requested geometry
    #[error(transparent)]
    Media(#[from] MediaError),
    /// The audio does not fit the 32-bit size fields of a WAV header
    #[error("{frames} frames at {sample_rate} Hz do not fit in a WAV file")]
    TooLong { frames: u64, sample_rate: u32 },
    /// Encoding into a writer failed
    #[error("WAV encoding failed: {0}")]
    Encode(#[from] std::io::Error),
}
