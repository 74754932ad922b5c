//! Outline offsetting and the minimum-bounds rotation applied before packing.

use crate::point::{fuzzy_equal, line_intersect, Point};
use crate::polygon::Polygon;
use geo::{ConvexHull, Coord, LineString, Polygon as GeoPolygon};

/// A mitred corner further than this many offset distances from its vertex
/// is bevelled instead.
const MITER_LIMIT: f64 = 4.0;

impl Polygon {
    /// Outline moved `distance` along each edge's outward normal; negative
    /// distances shrink.
    ///
    /// Corners are mitred by intersecting neighbouring offset edges, and
    /// bevelled when the mitre would spike past [`MITER_LIMIT`]. The
    /// placement is kept. Degenerate rings are returned unchanged.
    pub fn offset(&self, distance: f64) -> Polygon {
        if !self.is_valid() || fuzzy_equal(distance, 0.0) {
            return self.clone();
        }

        let mut ring: Vec<Point> = Vec::with_capacity(self.len());
        for &p in self.vertices() {
            if ring.last() != Some(&p) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        let n = ring.len();
        if n < 3 {
            return self.clone();
        }

        // outward is to the right of travel on an anticlockwise ring
        let side = if self.is_anticlockwise() { distance } else { -distance };
        let shift = |p: Point, q: Point| {
            let e = q - p;
            Point::new(e.y, -e.x)
                .normalized()
                .map_or(Point::default(), |u| u * side)
        };

        let mut out = Vec::with_capacity(n + 4);
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let s1 = shift(prev, cur);
            let s2 = shift(cur, next);

            match line_intersect(prev + s1, cur + s1, cur + s2, next + s2, true) {
                Some(m) if (m - cur).length() <= MITER_LIMIT * distance.abs() => out.push(m),
                Some(_) => {
                    out.push(cur + s1);
                    out.push(cur + s2);
                }
                // straight corner
                None => out.push(cur + s1),
            }
        }

        Polygon::new(out).with_placement(self.placement())
    }

    /// Rotates the polygon about the origin to the convex-hull edge angle
    /// that gives the smallest bounding box.
    ///
    /// Between boxes of equal area the lower one wins. Returns the rotation
    /// applied in degrees; 0 when no hull edge beats the current orientation.
    pub fn rotate_to_min_bounds(&mut self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }

        let coords: Vec<Coord<f64>> = self
            .vertices()
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        let hull = GeoPolygon::new(LineString::from(coords), vec![]).convex_hull();
        let points: Vec<Coord<f64>> = hull.exterior().coords().copied().collect();

        let mut best_angle = 0.0;
        let mut best = (self.width(), self.height());
        for line in hull.exterior().lines() {
            if line.dx() == 0.0 && line.dy() == 0.0 {
                continue;
            }
            let angle = -line.dy().atan2(line.dx());
            let size = rotated_bounds(&points, angle);
            if smaller(size, best) {
                best = size;
                best_angle = angle;
            }
        }

        if best_angle == 0.0 {
            return 0.0;
        }
        let degrees = best_angle.to_degrees();
        self.rotate(degrees);
        log::debug!("rotated item by {:.2} degrees to minimum bounds", degrees);
        degrees
    }
}

/// Compares `(width, height)` boxes by area, then by height.
fn smaller(a: (f64, f64), b: (f64, f64)) -> bool {
    let (area_a, area_b) = (a.0 * a.1, b.0 * b.1);
    if fuzzy_equal(area_a, area_b) {
        a.1 < b.1 && !fuzzy_equal(a.1, b.1)
    } else {
        area_a < area_b
    }
}

/// Width and height of the bounds of `points` rotated by `angle` radians.
fn rotated_bounds(points: &[Coord<f64>], angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    let mut xmin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    let mut ymin = f64::INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    for c in points {
        let x = c.x * cos - c.y * sin;
        let y = c.x * sin + c.y * cos;
        xmin = xmin.min(x);
        xmax = xmax.max(x);
        ymin = ymin.min(y);
        ymax = ymax.max(y);
    }
    (xmax - xmin, ymax - ymin)
}
