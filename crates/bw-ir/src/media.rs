//! Loaded media bytes and frame geometry.

use alloc::vec::Vec;

/// Error type for media construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    /// The input contained no bytes at all
    #[error("file is empty")]
    EmptyFile,
    /// The input is shorter than a single frame
    #[error("file is {len} bytes, too small for one {bytes_per_frame}-byte frame")]
    InsufficientData { len: usize, bytes_per_frame: usize },
    /// Width or height is zero
    #[error("frame geometry {width}x{height} has no pixels")]
    InvalidGeometry { width: u32, height: u32 },
}

/// Width and height of one visual frame, in bytes (one byte per pixel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

impl FrameGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of bytes consumed by one frame.
    pub const fn bytes_per_frame(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Immutable byte sequence interpreted both as frames and as u8 audio.
///
/// Always holds at least one whole frame; trailing bytes that do not fill a
/// frame are still audible but never displayed on their own.
#[derive(Clone, Debug)]
pub struct MediaBuffer {
    data: Vec<u8>,
    geometry: FrameGeometry,
    total_frames: usize,
}

impl MediaBuffer {
    /// Wrap raw bytes, rejecting inputs that cannot hold one frame.
    pub fn new(data: Vec<u8>, geometry: FrameGeometry) -> Result<Self, MediaError> {
        if !geometry.is_valid() {
            return Err(MediaError::InvalidGeometry {
                width: geometry.width,
                height: geometry.height,
            });
        }
        if data.is_empty() {
            return Err(MediaError::EmptyFile);
        }
        let bytes_per_frame = geometry.bytes_per_frame();
        let total_frames = data.len() / bytes_per_frame;
        if total_frames == 0 {
            return Err(MediaError::InsufficientData {
                len: data.len(),
                bytes_per_frame,
            });
        }
        Ok(Self {
            data,
            geometry,
            total_frames,
        })
    }

    /// Total number of bytes (N).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn bytes_per_frame(&self) -> usize {
        self.geometry.bytes_per_frame()
    }

    /// Number of whole frames; always at least 1.
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Byte at `index`, clamped to the last valid byte.
    pub fn byte_at(&self, index: usize) -> u8 {
        self.data[index.min(self.data.len() - 1)]
    }

    /// Byte offset where frame `index` starts. Out-of-range indices wrap.
    pub fn frame_offset(&self, index: usize) -> usize {
        (index % self.total_frames) * self.bytes_per_frame()
    }

    /// The bytes of frame `index` (wrapping modulo `total_frames`).
    pub fn frame(&self, index: usize) -> &[u8] {
        let start = self.frame_offset(index);
        &self.data[start..start + self.bytes_per_frame()]
    }

    /// Frame containing byte position `pos`, clamped to the last whole frame.
    pub fn frame_at(&self, pos: f64) -> usize {
        let wrapped = wrap_position(pos, self.data.len() as f64);
        let index = libm::floor(wrapped / self.bytes_per_frame() as f64) as usize;
        index.min(self.total_frames - 1)
    }

    /// Byte position of the first byte of the last whole frame.
    pub fn last_frame_position(&self) -> f64 {
        (self.bytes_per_frame() * (self.total_frames - 1)) as f64
    }
}

/// Wrap `pos` into `[0, len)`, handling any number of over- or undershoots.
///
/// Returns 0 when `len` is not positive.
pub fn wrap_position(pos: f64, len: f64) -> f64 {
    if !(len > 0.0) || !pos.is_finite() {
        return 0.0;
    }
    if (0.0..len).contains(&pos) {
        return pos;
    }
    let mut wrapped = libm::fmod(pos, len);
    if wrapped < 0.0 {
        wrapped += len;
    }
    // -tiny + len rounds up to len
    if wrapped >= len {
        wrapped = 0.0;
    }
    wrapped
}
