//! Audio frame type.

/// A stereo audio frame, channels in `[-VOLUME_MAX, VOLUME_MAX]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub left: f32,
    pub right: f32,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
        }
    }

    /// Create a mono frame (same value for both channels).
    pub const fn mono(value: f32) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Convert to 16-bit PCM, clipping anything outside `[-1, 1]`.
    pub fn to_i16(self) -> [i16; 2] {
        let q = |s: f32| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        [q(self.left), q(self.right)]
    }
}
