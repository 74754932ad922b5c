//! Rigid transform used to rotate item outlines.

use nalgebra::{Isometry2, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rotation about the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform2D {
    iso: Isometry2<f64>,
}

impl Transform2D {
    /// Rotation about the origin by `degrees` (anticlockwise for y-up).
    pub fn rotation_deg(degrees: f64) -> Self {
        Self {
            iso: Isometry2::rotation(degrees.to_radians()),
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.iso.transform_point(&Point2::new(x, y));
        (p.x, p.y)
    }

    /// Maps every point of a ring.
    pub fn apply_all(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points.iter().map(|&(x, y)| self.apply(x, y)).collect()
    }
}
