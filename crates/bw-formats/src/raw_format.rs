//! Headerless input: every byte is both a pixel and an unsigned 8-bit sample.

use std::fs;
use std::path::Path;

use bw_ir::{FrameGeometry, MediaBuffer};

use crate::FormatError;

/// Read a file and wrap it as media with the given frame geometry.
pub fn load_media(path: impl AsRef<Path>, geometry: FrameGeometry) -> Result<MediaBuffer, FormatError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let media = load_media_bytes(data, geometry)?;
    log::info!(
        "loaded {} ({} bytes, {} frames of {}x{})",
        path.display(),
        media.len(),
        media.total_frames(),
        geometry.width,
        geometry.height
    );
    Ok(media)
}

/// Wrap bytes already in memory.
pub fn load_media_bytes(data: Vec<u8>, geometry: FrameGeometry) -> Result<MediaBuffer, FormatError> {
    Ok(MediaBuffer::new(data, geometry)?)
}
