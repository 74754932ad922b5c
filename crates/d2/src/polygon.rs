//! Polygon entity: an open ring of vertices with cached bounds and area.
//!
//! Geometric queries on [`Polygon`] act on the stored ring. The polygon's
//! [`Placement`] is only applied by the `placed_*` accessors, so a template
//! can be positioned without rewriting its vertices.

use crate::point::{
    fuzzy_equal, fuzzy_equal_with, line_intersect, on_segment, z_cross_product, Point,
};
use stripnest_core::{Error, Placement, Result, Transform2D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Bounds of a ring with fewer than three vertices.
    pub const INVALID: Rect = Rect {
        x: f64::MAX,
        y: f64::MAX,
        width: f64::MAX,
        height: f64::MAX,
    };

    /// Creates a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns false for [`Rect::INVALID`].
    pub fn is_valid(&self) -> bool {
        *self != Rect::INVALID
    }

    /// Maximum x.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Maximum y.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// The same rectangle shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        if !self.is_valid() {
            return *self;
        }
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns true if the rectangle lies within `[0, width] × [0, height]`,
    /// allowing for [`FLOAT_TOL`](crate::point::FLOAT_TOL) overshoot.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.is_valid()
            && not_below(self.x, 0.0)
            && not_below(width, self.right())
            && not_below(self.y, 0.0)
            && not_below(height, self.top())
    }
}

#[inline]
fn not_below(v: f64, limit: f64) -> bool {
    v >= limit || fuzzy_equal(v, limit)
}

/// Outcome of a point-in-polygon test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointInPolygon {
    Inside,
    Outside,
    /// The point sits on a vertex or an edge, or the ring is degenerate.
    Invalid,
}

// ============================================================================
// Ring view
// ============================================================================

/// Borrowed view of a ring translated by an offset.
///
/// The orbiter positions the movable polygon through this view instead of
/// translating its vertices.
#[derive(Debug, Clone, Copy)]
pub struct OffsetRing<'a> {
    points: &'a [Point],
    offset: Point,
}

impl<'a> OffsetRing<'a> {
    /// Creates a view of `points` shifted by `offset`.
    pub fn new(points: &'a [Point], offset: Point) -> Self {
        Self { points, offset }
    }

    /// Same ring with a different offset.
    pub fn with_offset(self, offset: Point) -> Self {
        Self { offset, ..self }
    }

    /// Current offset.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex `i` with the offset applied.
    #[inline]
    pub fn at(&self, i: usize) -> Point {
        self.points[i] + self.offset
    }

    /// Index of the vertex after `i`, wrapping around.
    #[inline]
    pub fn next(&self, i: usize) -> usize {
        if i + 1 == self.points.len() {
            0
        } else {
            i + 1
        }
    }

    /// Index of the vertex before `i`, wrapping around.
    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        if i == 0 {
            self.points.len() - 1
        } else {
            i - 1
        }
    }

    /// Ray-casting containment test.
    pub fn contain_point(&self, point: Point) -> PointInPolygon {
        let n = self.len();
        if n < 3 {
            return PointInPolygon::Invalid;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.at(i);
            let pj = self.at(j);

            if pi == point || on_segment(pi, pj, point) {
                return PointInPolygon::Invalid;
            }

            // zero-length edge
            if pi == pj {
                j = i;
                continue;
            }

            let crosses = (pi.y > point.y) != (pj.y > point.y)
                && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if crosses {
                inside = !inside;
            }
            j = i;
        }

        if inside {
            PointInPolygon::Inside
        } else {
            PointInPolygon::Outside
        }
    }

    /// Returns true if the boundaries of the two rings properly cross.
    ///
    /// Touching vertices and shared edges are not crossings: when a vertex
    /// of one ring lies on the other ring's edge, the crossing is decided by
    /// whether that vertex's neighbours fall on opposite sides of the other
    /// ring.
    pub fn intersects(&self, other: &OffsetRing<'_>) -> bool {
        let n = self.len();
        let m = other.len();
        if n < 3 || m < 3 {
            return false;
        }

        for i in 0..n {
            let i1 = self.next(i);
            let a1 = self.at(i);
            let a2 = self.at(i1);

            let mut ia0 = self.prev(i);
            if self.at(ia0) == a1 {
                ia0 = self.prev(ia0);
            }
            let mut ia3 = self.next(i1);
            if self.at(ia3) == a2 {
                ia3 = self.next(ia3);
            }
            let a0 = self.at(ia0);
            let a3 = self.at(ia3);

            for j in 0..m {
                let j1 = other.next(j);
                let b1 = other.at(j);
                let b2 = other.at(j1);

                let mut ib0 = other.prev(j);
                if other.at(ib0) == b1 {
                    ib0 = other.prev(ib0);
                }
                let mut ib3 = other.next(j1);
                if other.at(ib3) == b2 {
                    ib3 = other.next(ib3);
                }
                let b0 = other.at(ib0);
                let b3 = other.at(ib3);

                if on_segment(a1, a2, b1) || a1 == b1 {
                    if straddles(self, b0, b2) {
                        return true;
                    }
                    continue;
                }

                if on_segment(a1, a2, b2) || a2 == b2 {
                    if straddles(self, b1, b3) {
                        return true;
                    }
                    continue;
                }

                if on_segment(b1, b2, a1) || a1 == b2 {
                    if straddles(other, a0, a2) {
                        return true;
                    }
                    continue;
                }

                if on_segment(b1, b2, a2) || a2 == b1 {
                    if straddles(other, a1, a3) {
                        return true;
                    }
                    continue;
                }

                if line_intersect(b1, b2, a1, a2, false).is_some() {
                    return true;
                }
            }
        }

        false
    }
}

/// One point strictly inside `ring` and the other strictly outside.
fn straddles(ring: &OffsetRing<'_>, p: Point, q: Point) -> bool {
    matches!(
        (ring.contain_point(p), ring.contain_point(q)),
        (PointInPolygon::Inside, PointInPolygon::Outside)
            | (PointInPolygon::Outside, PointInPolygon::Inside)
    )
}

// ============================================================================
// Polygon
// ============================================================================

/// A simple polygon stored as an open ring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
    bounds: Rect,
    area: f64,
    placement: Placement,
}

impl Polygon {
    /// Creates a polygon from an open ring of vertices.
    pub fn new(vertices: Vec<Point>) -> Self {
        let mut polygon = Self {
            vertices,
            bounds: Rect::INVALID,
            area: 0.0,
            placement: Placement::default(),
        };
        polygon.refresh();
        polygon
    }

    /// Creates a polygon from coordinate pairs.
    ///
    /// A closing vertex equal to the first one is dropped.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        let mut vertices: Vec<Point> = coords.iter().map(|&c| Point::from(c)).collect();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self::new(vertices)
    }

    /// Like [`from_coords`](Self::from_coords) but rejects rings that cannot
    /// be packed.
    pub fn try_from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        if coords.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(Error::InvalidGeometry(
                "coordinates must be finite".into(),
            ));
        }
        let polygon = Self::from_coords(coords);
        if !polygon.is_valid() {
            return Err(Error::InvalidGeometry(format!(
                "polygon needs at least 3 vertices, got {}",
                polygon.len()
            )));
        }
        if fuzzy_equal(polygon.area, 0.0) {
            return Err(Error::InvalidGeometry("polygon has zero area".into()));
        }
        Ok(polygon)
    }

    /// Axis-aligned `width × height` rectangle with a corner at the origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ])
    }

    fn refresh(&mut self) {
        self.bounds = compute_bounds(&self.vertices);
        self.area = compute_area(&self.vertices);
    }

    /// Stored vertices.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if the ring has at least three vertices.
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Signed area; negative for counter-clockwise rings in y-up coordinates.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Absolute area.
    pub fn abs_area(&self) -> f64 {
        self.area.abs()
    }

    /// Cached bounding rectangle of the stored ring.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn x(&self) -> f64 {
        self.bounds.x
    }

    pub fn y(&self) -> f64 {
        self.bounds.y
    }

    pub fn width(&self) -> f64 {
        self.bounds.width
    }

    pub fn height(&self) -> f64 {
        self.bounds.height
    }

    /// View of the stored ring.
    pub fn ring(&self) -> OffsetRing<'_> {
        OffsetRing::new(&self.vertices, Point::default())
    }

    // ----- Orientation -----

    /// Returns true when [`area`](Self::area) is negative.
    pub fn is_anticlockwise(&self) -> bool {
        self.area < 0.0
    }

    /// Reverses the ring if it is not already anticlockwise.
    pub fn set_anticlockwise(&mut self) {
        if !self.is_anticlockwise() {
            self.reverse();
        }
    }

    /// Reverses the vertex order.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
        self.area = -self.area;
    }

    // ----- Transforms -----

    /// Moves every vertex by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            v.x += dx;
            v.y += dy;
        }
        self.refresh();
    }

    /// Rotates every vertex about the origin by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        let coords: Vec<(f64, f64)> = self.vertices.iter().map(|&p| p.into()).collect();
        let rotated = Transform2D::rotation_deg(degrees).apply_all(&coords);
        self.vertices = rotated.into_iter().map(Point::from).collect();
        self.refresh();
    }

    /// Translates the ring so its bounds origin lands on `(x, y)`.
    pub fn set_location(&mut self, x: f64, y: f64) {
        if !self.bounds.is_valid() {
            return;
        }
        let (dx, dy) = (x - self.bounds.x, y - self.bounds.y);
        self.translate(dx, dy);
    }

    /// Translates the ring so vertex `index` lands on `point`.
    ///
    /// An out-of-range index leaves the polygon unchanged.
    pub fn set_position(&mut self, point: Point, index: usize) {
        if let Some(&v) = self.vertices.get(index) {
            self.translate(point.x - v.x, point.y - v.y);
        }
    }

    // ----- Placement -----

    /// Current placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Replaces the placement without touching the vertices.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Builder form of [`set_placement`](Self::set_placement).
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// View of the ring at its placement.
    pub fn placed_ring(&self) -> OffsetRing<'_> {
        OffsetRing::new(
            &self.vertices,
            Point::new(self.placement.dx, self.placement.dy),
        )
    }

    /// Vertices with the placement applied.
    pub fn placed_vertices(&self) -> Vec<Point> {
        let ring = self.placed_ring();
        (0..ring.len()).map(|i| ring.at(i)).collect()
    }

    /// Bounds with the placement applied.
    pub fn placed_bounds(&self) -> Rect {
        self.bounds.translated(self.placement.dx, self.placement.dy)
    }

    /// Copy with the placement folded into the vertices.
    ///
    /// The strip id is kept; the offset becomes zero.
    pub fn to_placed(&self) -> Polygon {
        let placement = Placement {
            strip_id: self.placement.strip_id,
            ..Placement::default()
        };
        Polygon::new(self.placed_vertices()).with_placement(placement)
    }

    // ----- Shape predicates -----

    /// Returns true if every turn has the same sign.
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let v = &self.vertices;
        let first = z_cross_product(v[0], v[1], v[2]) > 0.0;
        (0..n).all(|i| (z_cross_product(v[i], v[(i + 1) % n], v[(i + 2) % n]) > 0.0) == first)
    }

    /// Returns true if the ring is an axis-aligned rectangle within
    /// `tolerance`: every vertex sits on a bounds edge in both axes and the
    /// ring fills its bounds.
    pub fn is_rectangle(&self, tolerance: f64) -> bool {
        let bb = self.bounds;
        if !bb.is_valid() {
            return false;
        }
        let on_frame = self.vertices.iter().all(|p| {
            (fuzzy_equal_with(p.x, bb.x, tolerance) || fuzzy_equal_with(p.x, bb.right(), tolerance))
                && (fuzzy_equal_with(p.y, bb.y, tolerance)
                    || fuzzy_equal_with(p.y, bb.top(), tolerance))
        });
        on_frame
            && fuzzy_equal_with(
                self.abs_area(),
                bb.area(),
                tolerance * (bb.width + bb.height).max(1.0),
            )
    }

    /// Containment of `point` in the stored ring.
    pub fn contain_point(&self, point: Point) -> PointInPolygon {
        self.ring().contain_point(point)
    }

    /// Returns true if the boundaries of the stored rings properly cross.
    pub fn intersect(&self, other: &Polygon) -> bool {
        self.ring().intersects(&other.ring())
    }
}

fn compute_bounds(vertices: &[Point]) -> Rect {
    if vertices.len() < 3 {
        return Rect::INVALID;
    }
    let first = vertices[0];
    let (mut xmin, mut xmax, mut ymin, mut ymax) = (first.x, first.x, first.y, first.y);
    for v in &vertices[1..] {
        xmin = xmin.min(v.x);
        xmax = xmax.max(v.x);
        ymin = ymin.min(v.y);
        ymax = ymax.max(v.y);
    }
    Rect::new(xmin, ymin, xmax - xmin, ymax - ymin)
}

/// `½ Σ (x_prev + x_i)(y_prev − y_i)`: counter-clockwise rings in y-up
/// coordinates come out negative.
fn compute_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    if n == 0 {
        return 0.0;
    }
    let mut area = 0.0;
    let mut j = n - 1;
    for i in 0..n {
        area += (vertices[j].x + vertices[i].x) * (vertices[j].y - vertices[i].y);
        j = i;
    }
    0.5 * area
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::rectangle(1.0, 1.0)
    }

    fn l_shape() -> Polygon {
        Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ])
    }

    #[test]
    fn test_area_sign_convention() {
        let square = unit_square();
        assert_relative_eq!(square.area(), -1.0);
        assert!(square.is_anticlockwise());

        let mut cw = unit_square();
        cw.reverse();
        assert_relative_eq!(cw.area(), 1.0);
        assert!(!cw.is_anticlockwise());

        cw.set_anticlockwise();
        assert!(cw.is_anticlockwise());
    }

    #[test]
    fn test_from_coords_drops_closing_vertex() {
        let p = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(p.len(), 3);
        assert_relative_eq!(p.abs_area(), 0.5);
    }

    #[test]
    fn test_try_from_coords() {
        assert!(Polygon::try_from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]).is_ok());
        assert!(Polygon::try_from_coords(&[(0.0, 0.0), (1.0, 0.0)]).is_err());
        assert!(Polygon::try_from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).is_err());
        assert!(Polygon::try_from_coords(&[(0.0, 0.0), (f64::NAN, 0.0), (2.0, 1.0)]).is_err());
    }

    #[test]
    fn test_bounds_and_degenerate() {
        let p = l_shape();
        assert_eq!(p.bounds(), Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_relative_eq!(p.abs_area(), 3.0);

        let degenerate = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(!degenerate.bounds().is_valid());
        assert!(!degenerate.is_valid());
    }

    #[test]
    fn test_translate_and_set_location() {
        let mut p = l_shape();
        p.translate(3.0, -1.0);
        assert_eq!(p.bounds(), Rect::new(3.0, -1.0, 2.0, 2.0));

        p.set_location(10.0, 20.0);
        assert_relative_eq!(p.x(), 10.0);
        assert_relative_eq!(p.y(), 20.0);
        assert_relative_eq!(p.abs_area(), 3.0);
    }

    #[test]
    fn test_set_position() {
        let mut p = unit_square();
        p.set_position(Point::new(5.0, 5.0), 2);
        assert_eq!(p.vertices()[2], Point::new(5.0, 5.0));
        assert_eq!(p.vertices()[0], Point::new(4.0, 4.0));

        let before = p.clone();
        p.set_position(Point::new(0.0, 0.0), 99);
        assert_eq!(p, before);
    }

    #[test]
    fn test_rotate_preserves_area() {
        let mut p = l_shape();
        p.rotate(90.0);
        assert_relative_eq!(p.abs_area(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(p.width(), 2.0, epsilon = 1e-9);
        assert_eq!(p.vertices()[1], Point::new(0.0, 2.0));
    }

    #[test]
    fn test_is_convex() {
        assert!(unit_square().is_convex());
        assert!(!l_shape().is_convex());
    }

    #[test]
    fn test_is_rectangle() {
        assert!(Polygon::rectangle(4.0, 2.0).is_rectangle(1e-3));
        assert!(!l_shape().is_rectangle(1e-3));
        let triangle = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(!triangle.is_rectangle(1e-3));
    }

    #[test]
    fn test_contain_point() {
        let p = l_shape();
        assert_eq!(p.contain_point(Point::new(0.5, 0.5)), PointInPolygon::Inside);
        assert_eq!(p.contain_point(Point::new(1.5, 1.5)), PointInPolygon::Outside);
        assert_eq!(p.contain_point(Point::new(1.0, 1.0)), PointInPolygon::Invalid);
        assert_eq!(p.contain_point(Point::new(1.0, 0.0)), PointInPolygon::Invalid);

        let degenerate = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert_eq!(
            degenerate.contain_point(Point::new(0.5, 0.5)),
            PointInPolygon::Invalid
        );
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = unit_square();
        let mut b = unit_square();
        b.translate(0.5, 0.5);
        assert!(a.intersect(&b));
        assert!(b.intersect(&a));
    }

    #[test]
    fn test_intersect_touching_is_not_crossing() {
        let a = unit_square();
        let mut edge = unit_square();
        edge.translate(1.0, 0.0);
        assert!(!a.intersect(&edge));

        let mut corner = unit_square();
        corner.translate(1.0, 1.0);
        assert!(!a.intersect(&corner));

        let mut half = unit_square();
        half.translate(1.0, 0.5);
        assert!(!a.intersect(&half));
    }

    #[test]
    fn test_intersect_vertex_poking_through_edge() {
        let a = Polygon::rectangle(2.0, 2.0);
        let wedge = Polygon::from_coords(&[(1.0, 1.0), (3.0, 0.5), (3.0, 1.5)]);
        assert!(a.intersect(&wedge));
    }

    #[test]
    fn test_placement_is_read_time() {
        let p = unit_square().with_placement(Placement::new(3.0, 4.0).with_strip(1));
        assert_eq!(p.vertices()[0], Point::new(0.0, 0.0));
        assert_eq!(p.placed_vertices()[0], Point::new(3.0, 4.0));
        assert_eq!(p.placed_bounds(), Rect::new(3.0, 4.0, 1.0, 1.0));

        let placed = p.to_placed();
        assert_eq!(placed.vertices()[2], Point::new(4.0, 5.0));
        assert_eq!(placed.placement().strip_id, Some(1));
        assert_eq!(placed.placement().dx, 0.0);
    }

    #[test]
    fn test_placed_rings_intersect() {
        let a = unit_square();
        let b = unit_square().with_placement(Placement::new(0.5, 0.5));
        let c = unit_square().with_placement(Placement::new(1.0, 0.0));
        assert!(a.placed_ring().intersects(&b.placed_ring()));
        assert!(!a.placed_ring().intersects(&c.placed_ring()));
    }

    #[test]
    fn test_rect_fits_within() {
        assert!(Rect::new(0.0, 0.0, 2.0, 1.0).fits_within(2.0, 1.0));
        assert!(Rect::new(-1e-12, 0.0, 2.0, 1.0).fits_within(2.0, 1.0));
        assert!(!Rect::new(0.5, 0.0, 2.0, 1.0).fits_within(2.0, 1.0));
        assert!(!Rect::INVALID.fits_within(2.0, 1.0));
    }
}
