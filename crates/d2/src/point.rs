//! 2D point/vector primitive and the tolerant predicates built on it.
//!
//! Every floating-point comparison in this crate goes through [`fuzzy_equal`],
//! so two coordinates closer than [`FLOAT_TOL`] are the same coordinate.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tolerance for coordinate comparisons.
pub const FLOAT_TOL: f64 = 1e-9;

/// Returns true if `a` and `b` differ by less than [`FLOAT_TOL`].
#[inline]
pub fn fuzzy_equal(a: f64, b: f64) -> bool {
    fuzzy_equal_with(a, b, FLOAT_TOL)
}

/// Returns true if `a` and `b` differ by less than `tolerance`.
#[inline]
pub fn fuzzy_equal_with(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// A point or displacement in the plane.
///
/// Equality is tolerance based: `a == b` iff both coordinates are
/// [`fuzzy_equal`].
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns true if both coordinates are within tolerance of zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        fuzzy_equal(self.x, 0.0) && fuzzy_equal(self.y, 0.0)
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Point> {
        let len2 = self.length_squared();
        if fuzzy_equal(len2, 1.0) {
            return Some(self);
        }
        if len2 == 0.0 || !len2.is_finite() {
            return None;
        }
        Some(self * (1.0 / len2.sqrt()))
    }

    /// Linear blend `self * (1 - t) + other * t`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self * (1.0 - t) + other * t
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        fuzzy_equal(self.x, other.x) && fuzzy_equal(self.y, other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// Turn direction at `k1` when walking `k -> k1 -> k2`.
///
/// Positive for a left turn in y-up coordinates, zero when colinear.
#[inline]
pub fn z_cross_product(k: Point, k1: Point, k2: Point) -> f64 {
    (k1 - k).cross(k2 - k1)
}

/// Returns true iff `p` lies strictly between `a` and `b` on segment `ab`.
///
/// Endpoints are excluded.
pub fn on_segment(a: Point, b: Point, p: Point) -> bool {
    // vertical
    if fuzzy_equal(a.x, b.x) && fuzzy_equal(p.x, a.x) {
        return !fuzzy_equal(p.y, b.y)
            && !fuzzy_equal(p.y, a.y)
            && p.y < a.y.max(b.y)
            && p.y > a.y.min(b.y);
    }

    // horizontal
    if fuzzy_equal(a.y, b.y) && fuzzy_equal(p.y, a.y) {
        return !fuzzy_equal(p.x, b.x)
            && !fuzzy_equal(p.x, a.x)
            && p.x < a.x.max(b.x)
            && p.x > a.x.min(b.x);
    }

    if (p.x < a.x && p.x < b.x)
        || (p.x > a.x && p.x > b.x)
        || (p.y < a.y && p.y < b.y)
        || (p.y > a.y && p.y > b.y)
    {
        return false;
    }

    if p == a || p == b {
        return false;
    }

    let ab = b - a;
    let ap = p - a;
    if ab.cross(ap).abs() > FLOAT_TOL {
        return false;
    }

    let dot = ap.dot(ab);
    if dot < 0.0 || fuzzy_equal(dot, 0.0) {
        return false;
    }

    let len2 = ab.length_squared();
    !(dot > len2 || fuzzy_equal(dot, len2))
}

/// Intersection of segment `ab` with segment `ef`.
///
/// With `infinite` set both are treated as unbounded lines. Returns `None`
/// for parallel lines, for an intersection outside either segment, and for a
/// point that is an endpoint of both segments.
pub fn line_intersect(a: Point, b: Point, e: Point, f: Point, infinite: bool) -> Option<Point> {
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = b.x * a.y - a.x * b.y;
    let a2 = f.y - e.y;
    let b2 = e.x - f.x;
    let c2 = f.x * e.y - e.x * f.y;

    let denom = a1 * b2 - a2 * b1;
    let x = (b1 * c2 - b2 * c1) / denom;
    let y = (a2 * c1 - a1 * c2) / denom;

    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let p = Point::new(x, y);
    if infinite {
        return Some(p);
    }

    if !within_range(x, a.x, b.x)
        || !within_range(y, a.y, b.y)
        || !within_range(x, e.x, f.x)
        || !within_range(y, e.y, f.y)
    {
        return None;
    }

    if (p == a || p == b) && (p == e || p == f) {
        return None;
    }

    Some(p)
}

/// Range test along one axis; an axis with no extent accepts anything.
#[inline]
fn within_range(v: f64, lo: f64, hi: f64) -> bool {
    if (lo - hi).abs() <= FLOAT_TOL {
        return true;
    }
    v >= lo.min(hi) && v <= lo.max(hi)
}
