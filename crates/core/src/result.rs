//! Run report: strips used, area consumed per strip, unplaced items.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Area accumulated on one strip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StripUsage {
    /// Sum of the absolute areas of items placed on the strip.
    pub used_area: f64,
    /// Number of items placed on the strip.
    pub item_count: usize,
}

/// Result of a strip packing run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestReport {
    /// Area of a single strip (width × height).
    pub strip_area: f64,

    /// Usage of each opened strip, indexed by strip id.
    pub strips: Vec<StripUsage>,

    /// Input indices of items that could not be placed on any strip.
    pub unplaced: Vec<usize>,

    /// Number of placements abandoned because the footprint merge failed.
    pub merge_failures: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl NestReport {
    /// Creates an empty report for strips of the given area.
    pub fn new(strip_area: f64) -> Self {
        Self {
            strip_area,
            ..Default::default()
        }
    }

    /// Opens a new strip and returns its id.
    pub fn open_strip(&mut self) -> usize {
        self.strips.push(StripUsage::default());
        self.strips.len() - 1
    }

    /// Adds a placed item's area to a strip.
    ///
    /// Strips are opened on demand so the report can be rebuilt from an
    /// event stream alone.
    pub fn record_item(&mut self, strip_id: usize, area: f64) {
        if strip_id >= self.strips.len() {
            self.strips.resize(strip_id + 1, StripUsage::default());
        }
        let usage = &mut self.strips[strip_id];
        usage.used_area += area.abs();
        usage.item_count += 1;
    }

    /// Number of strips opened.
    pub fn strips_used(&self) -> usize {
        self.strips.len()
    }

    /// Total number of placed items.
    pub fn placed_count(&self) -> usize {
        self.strips.iter().map(|s| s.item_count).sum()
    }

    /// Returns true if every item was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Used area over strip area for one strip.
    pub fn utilization(&self, strip_id: usize) -> Option<f64> {
        let usage = self.strips.get(strip_id)?;
        if self.strip_area > 0.0 {
            Some(usage.used_area / self.strip_area)
        } else {
            None
        }
    }

    /// Used area over the total area of all opened strips.
    pub fn overall_utilization(&self) -> f64 {
        let total = self.strip_area * self.strips.len() as f64;
        if total > 0.0 {
            self.strips.iter().map(|s| s.used_area).sum::<f64>() / total
        } else {
            0.0
        }
    }
}
