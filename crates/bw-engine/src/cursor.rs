//! The playback cursor and its wrap/loop/boomerang transition rules.

use bw_ir::{wrap_position, LoopRegion, LoopTopology};

/// How an advance was resolved against the loop region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Landed inside the file (or loop) without touching a boundary
    Free,
    /// Wrapped around the end or start of the file
    Wrapped,
    /// Held on a pinned loop point
    Pinned,
    /// Crossed a loop boundary and snapped to the opposite one
    Snapped,
    /// Crossed a loop boundary and bounced back; the rate must be inverted
    Reflected,
}

/// Fractional byte offset into the media, always in `[0, len)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    position: f64,
}

impl Cursor {
    pub fn new(position: f64) -> Self {
        Self { position }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Place the cursor, wrapping into `[0, len)`.
    pub fn seek(&mut self, position: f64, len: f64) {
        self.position = wrap_position(position, len);
    }

    /// Move by `delta` bytes (already signed by the rate) and resolve the
    /// result against `region`.
    ///
    /// Reflection is single-shot: an overshoot wider than the loop is mirrored
    /// once and the result kept, it is not bounced repeatedly.
    pub fn advance(&mut self, delta: f64, len: f64, region: &LoopRegion) -> Resolution {
        let next = self.position + delta;

        if !region.is_enabled() {
            return self.place(next, len);
        }

        let forward = delta > 0.0;
        let boomerang = region.is_boomerang();

        match region.topology() {
            LoopTopology::Pinned(point) => {
                self.position = point;
                Resolution::Pinned
            }
            LoopTopology::Contiguous { start, end } => {
                if forward && next > end {
                    self.cross(start, end - (next - end), boomerang, len)
                } else if !forward && next < start {
                    self.cross(end, start + (start - next), boomerang, len)
                } else {
                    self.position = next;
                    Resolution::Free
                }
            }
            LoopTopology::WrapAround { start, end } => {
                let next = wrap_position(next, len);
                let outside = next > end && next < start;
                if outside && forward {
                    self.cross(start, end - (next - end), boomerang, len)
                } else if outside {
                    self.cross(end, start + (start - next), boomerang, len)
                } else {
                    self.position = next;
                    Resolution::Free
                }
            }
        }
    }

    fn cross(&mut self, snap: f64, reflect: f64, boomerang: bool, len: f64) -> Resolution {
        if boomerang {
            self.position = wrap_position(reflect, len);
            Resolution::Reflected
        } else {
            self.position = snap;
            Resolution::Snapped
        }
    }

    fn place(&mut self, next: f64, len: f64) -> Resolution {
        let wrapped = wrap_position(next, len);
        let resolution = if wrapped == next {
            Resolution::Free
        } else {
            Resolution::Wrapped
        };
        self.position = wrapped;
        resolution
    }
}
