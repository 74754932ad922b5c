//! Placement of a shape template on a strip.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a shape sits: an offset applied at read time plus the strip it
/// landed on.
///
/// Stored vertices are never rewritten by a placement, so one template can
/// be probed at many candidate positions without being copied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Offset along x.
    pub dx: f64,
    /// Offset along y.
    pub dy: f64,
    /// Strip the shape was committed to, if any.
    pub strip_id: Option<usize>,
}

impl Placement {
    /// Creates an uncommitted placement with the given offset.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            strip_id: None,
        }
    }

    /// Sets the strip index.
    pub fn with_strip(mut self, strip_id: usize) -> Self {
        self.strip_id = Some(strip_id);
        self
    }
}
