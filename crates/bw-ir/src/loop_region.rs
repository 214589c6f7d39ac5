//! Loop region: a byte range the cursor is confined to while looping.

/// Rejection returned when editing bounds of an engaged loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoopEditError {
    #[error("loop bounds cannot change while the loop is enabled")]
    Locked,
}

/// Shape of an enabled loop, derived from its bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopTopology {
    /// `start == end`: the cursor is held on one byte
    Pinned(f64),
    /// `start < end`: covers `[start, end]`
    Contiguous { start: f64, end: f64 },
    /// `start > end`: covers `[start, N) ∪ [0, end]`
    WrapAround { start: f64, end: f64 },
}

/// Loop bounds plus enable/boomerang flags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoopRegion {
    start: f64,
    end: f64,
    enabled: bool,
    boomerang: bool,
}

impl LoopRegion {
    /// A disabled loop with the given bounds.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            enabled: false,
            boomerang: false,
        }
    }

    /// Same bounds, engaged.
    pub fn engaged(mut self) -> Self {
        self.enabled = true;
        self
    }

    pub fn with_boomerang(mut self, boomerang: bool) -> Self {
        self.boomerang = boomerang;
        self
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_boomerang(&self) -> bool {
        self.boomerang
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn toggle_boomerang(&mut self) {
        self.boomerang = !self.boomerang;
    }

    pub fn topology(&self) -> LoopTopology {
        if self.start == self.end {
            LoopTopology::Pinned(self.start)
        } else if self.start < self.end {
            LoopTopology::Contiguous {
                start: self.start,
                end: self.end,
            }
        } else {
            LoopTopology::WrapAround {
                start: self.start,
                end: self.end,
            }
        }
    }

    pub fn set_start(&mut self, pos: f64) -> Result<(), LoopEditError> {
        if self.enabled {
            return Err(LoopEditError::Locked);
        }
        self.start = pos;
        Ok(())
    }

    pub fn set_end(&mut self, pos: f64) -> Result<(), LoopEditError> {
        if self.enabled {
            return Err(LoopEditError::Locked);
        }
        self.end = pos;
        Ok(())
    }

    /// Whether `pos` lies in the range the loop covers (ignores `enabled`).
    pub fn covers(&self, pos: f64) -> bool {
        match self.topology() {
            LoopTopology::Pinned(p) => pos == p,
            LoopTopology::Contiguous { start, end } => pos >= start && pos <= end,
            LoopTopology::WrapAround { start, end } => pos >= start || pos <= end,
        }
    }
}
