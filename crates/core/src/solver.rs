//! Solver trait and run configuration.

use crate::event::NestEvent;
use crate::result::NestReport;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which remaining items are offered to each strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemOrder {
    /// Largest absolute area first.
    #[default]
    AreaDecreasing,
    /// Widest bounding box first.
    WidthDecreasing,
}

/// Configuration of a strip packing run.
///
/// Immutable once a run starts: the packer takes its own copy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Strip width (x extent).
    pub strip_width: f64,

    /// Strip height (y extent).
    pub strip_height: f64,

    /// Minimum distance kept between neighbouring items.
    pub item_gap: f64,

    /// Rotate each item once to its minimum bounding-box orientation.
    pub allow_rotation: bool,

    /// Ordering applied to the remaining items at the start of every strip.
    pub order: ItemOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strip_width: 1000.0,
            strip_height: 1000.0,
            item_gap: 0.0,
            allow_rotation: true,
            order: ItemOrder::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strip dimensions.
    pub fn with_strip(mut self, width: f64, height: f64) -> Self {
        self.strip_width = width;
        self.strip_height = height;
        self
    }

    /// Sets the gap kept between items.
    pub fn with_item_gap(mut self, gap: f64) -> Self {
        self.item_gap = gap;
        self
    }

    /// Enables or disables rotate-to-minimum-bounds.
    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    /// Sets the item ordering.
    pub fn with_order(mut self, order: ItemOrder) -> Self {
        self.order = order;
        self
    }

    /// Area of one strip.
    pub fn strip_area(&self) -> f64 {
        self.strip_width * self.strip_height
    }

    /// Checks that the configuration describes a usable strip.
    pub fn validate(&self) -> Result<()> {
        if !(self.strip_width.is_finite() && self.strip_width > 0.0) {
            return Err(Error::ConfigError(format!(
                "strip width must be positive, got {}",
                self.strip_width
            )));
        }
        if !(self.strip_height.is_finite() && self.strip_height > 0.0) {
            return Err(Error::ConfigError(format!(
                "strip height must be positive, got {}",
                self.strip_height
            )));
        }
        if !(self.item_gap.is_finite() && self.item_gap >= 0.0) {
            return Err(Error::ConfigError(format!(
                "item gap must be non-negative, got {}",
                self.item_gap
            )));
        }
        Ok(())
    }
}

/// Trait for strip packing solvers.
pub trait Solver {
    /// The item type this solver places.
    type Item;

    /// Packs all items and returns the run report.
    fn solve(&self, items: &[Self::Item]) -> Result<NestReport> {
        self.solve_with_events(items, &mut |_| {})
    }

    /// Packs all items, reporting every step to `sink` as it happens.
    fn solve_with_events(
        &self,
        items: &[Self::Item],
        sink: &mut dyn FnMut(NestEvent<Self::Item>),
    ) -> Result<NestReport>;
}
