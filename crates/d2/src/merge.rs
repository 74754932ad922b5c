//! Outer-boundary merge of two touching polygons.
//!
//! The packer keeps one merged footprint per strip and grows it with every
//! placed item, so the next item only has to orbit a single ring.

use crate::point::{on_segment, z_cross_product, Point};
use crate::polygon::Polygon;
use std::collections::VecDeque;

/// Weight kept by a repeated vertex when it is pulled toward its predecessor.
const NUDGE_KEEP: f64 = 0.95;

impl Polygon {
    /// Merges two touching, non-overlapping polygons of the same winding into
    /// the ring enclosing both.
    ///
    /// The walk starts from the globally lowest vertex, follows the ring that
    /// owns it forward and backward until it touches the other ring, and
    /// splices the other ring's outer run in between. Returns `None` when the
    /// polygons do not touch or either ring is degenerate.
    pub fn united(&self, other: &Polygon) -> Option<Polygon> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }

        let (a, b, start) = anchor(self.vertices(), other.vertices());
        let n = a.len();
        let m = b.len();
        let next_b = |j: usize| if j + 1 == m { 0 } else { j + 1 };

        let mut merged: VecDeque<Point> = VecDeque::with_capacity(n + m);
        let mut intercept1 = None;
        let mut intercept2 = None;

        // forward from the anchor
        let mut current = start;
        for _ in 0..=n {
            let next = (current + 1) % n;
            let va = a[current];
            if let Some(touch) = first_touch(va, a[next], b) {
                merged.push_back(va);
                match touch {
                    Touch::Vertex(_) => {}
                    Touch::OnOwnEdge(j) => merged.push_back(b[j]),
                    Touch::OnOtherEdge(j) => merged.push_back(b[next_b(j)]),
                }
                intercept1 = Some(touch.index());
                break;
            }
            merged.push_back(va);
            current = next;
        }

        // backward from the vertex before the anchor
        let mut current = (start + n - 1) % n;
        for _ in 0..=n {
            let next = (current + n - 1) % n;
            let va = a[current];
            if let Some(touch) = first_touch(va, a[next], b) {
                merged.push_front(va);
                if let Touch::OnOwnEdge(j) = touch {
                    merged.push_front(b[j]);
                }
                intercept2 = Some(touch.index());
                break;
            }
            merged.push_front(va);
            current = next;
        }

        let (intercept1, intercept2) = (intercept1?, intercept2?);

        // the outer run of B lies between the two touch points
        let mut current = next_b(intercept1);
        for _ in 0..m {
            merged.push_back(b[current]);
            if current == intercept2 {
                break;
            }
            current = next_b(current);
        }

        let mut ring: Vec<Point> = merged.into();
        drop_adjacent_duplicates(&mut ring);
        separate_repeated_vertices(&mut ring);

        Some(Polygon::new(ring))
    }
}

/// How the walk along A first meets B.
#[derive(Debug, Clone, Copy)]
enum Touch {
    /// A's vertex coincides with `b[j]`.
    Vertex(usize),
    /// `b[j]` lies on A's edge leaving the current vertex.
    OnOwnEdge(usize),
    /// A's vertex lies on B's edge `b[j] -> b[j + 1]`.
    OnOtherEdge(usize),
}

impl Touch {
    fn index(self) -> usize {
        match self {
            Touch::Vertex(j) | Touch::OnOwnEdge(j) | Touch::OnOtherEdge(j) => j,
        }
    }
}

/// Contact between A's vertex `va` (walking toward `va_next`) and ring `b`.
///
/// When several B vertices lie on the edge, the one nearest `va` is the
/// first met.
fn first_touch(va: Point, va_next: Point, b: &[Point]) -> Option<Touch> {
    let m = b.len();
    if let Some(j) = b.iter().position(|&p| p == va) {
        return Some(Touch::Vertex(j));
    }

    let on_edge = (0..m)
        .filter(|&j| on_segment(va, va_next, b[j]))
        .min_by(|&i, &j| {
            let di = (b[i] - va).length_squared();
            let dj = (b[j] - va).length_squared();
            di.total_cmp(&dj)
        });
    if let Some(j) = on_edge {
        return Some(Touch::OnOwnEdge(j));
    }

    (0..m)
        .find(|&j| on_segment(b[j], b[(j + 1) % m], va))
        .map(Touch::OnOtherEdge)
}

/// Orders the rings so the first one owns the lowest vertex.
fn anchor<'a>(a: &'a [Point], b: &'a [Point]) -> (&'a [Point], &'a [Point], usize) {
    let mut min_y = a[0].y;
    let mut start = (false, 0);
    for (i, p) in a.iter().enumerate() {
        if p.y < min_y {
            min_y = p.y;
            start = (false, i);
        }
    }
    for (i, p) in b.iter().enumerate() {
        if p.y < min_y {
            min_y = p.y;
            start = (true, i);
        }
    }
    match start {
        (true, i) => (b, a, i),
        (false, i) => (a, b, i),
    }
}

fn drop_adjacent_duplicates(ring: &mut Vec<Point>) {
    let mut i = 0;
    while i < ring.len() && ring.len() > 1 {
        let next = if i + 1 == ring.len() { 0 } else { i + 1 };
        if ring[i] == ring[next] {
            ring.remove(i);
        } else {
            i += 1;
        }
    }
}

/// A vertex visited twice pinches the ring; pull the reflex copies slightly
/// toward their predecessors so later orbits see two distinct points.
fn separate_repeated_vertices(ring: &mut [Point]) {
    let n = ring.len();
    if n < 3 {
        return;
    }
    let prev = |i: usize| if i == 0 { n - 1 } else { i - 1 };
    let next = |i: usize| if i + 1 == n { 0 } else { i + 1 };

    for i in 0..n {
        for j in (i + 1..n).rev() {
            if ring[i] != ring[j] {
                continue;
            }
            let anticlockwise = signed_area(ring) < 0.0;
            let turn_i = z_cross_product(ring[prev(i)], ring[i], ring[next(i)]) < 0.0;
            let turn_j = z_cross_product(ring[prev(j)], ring[j], ring[next(j)]) < 0.0;
            if anticlockwise == turn_i {
                ring[i] = ring[prev(i)].lerp(ring[i], NUDGE_KEEP);
            }
            if anticlockwise == turn_j {
                ring[j] = ring[prev(j)].lerp(ring[j], NUDGE_KEEP);
            }
        }
    }
}

fn signed_area(ring: &[Point]) -> f64 {
    Polygon::new(ring.to_vec()).area()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Rect;
    use approx::assert_relative_eq;

    fn square_at(x: f64, y: f64) -> Polygon {
        let mut p = Polygon::rectangle(1.0, 1.0);
        p.translate(x, y);
        p
    }

    #[test]
    fn test_united_side_by_side() {
        let merged = square_at(0.0, 0.0).united(&square_at(1.0, 0.0)).unwrap();
        assert_relative_eq!(merged.abs_area(), 2.0, epsilon = 1e-9);
        assert_eq!(merged.bounds().width, 2.0);
        assert!(merged.is_anticlockwise());
    }

    #[test]
    fn test_united_anchor_in_other() {
        let merged = square_at(0.0, 1.0).united(&square_at(0.0, 0.0)).unwrap();
        assert_relative_eq!(merged.abs_area(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(merged.height(), 2.0);
    }

    #[test]
    fn test_united_fills_notch() {
        let l_shape = Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let merged = l_shape.united(&square_at(1.0, 1.0)).unwrap();
        assert_relative_eq!(merged.abs_area(), 4.0, epsilon = 1e-9);
        // the seam leaves colinear vertices, so check the box instead
        assert_eq!(merged.bounds(), Rect::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn test_united_partial_edge_contact() {
        let wide = Polygon::rectangle(3.0, 1.0);
        let merged = wide.united(&square_at(1.0, 1.0)).unwrap();
        assert_relative_eq!(merged.abs_area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_united_disjoint() {
        assert!(square_at(0.0, 0.0).united(&square_at(3.0, 0.0)).is_none());
    }

    #[test]
    fn test_united_degenerate() {
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(square_at(0.0, 0.0).united(&line).is_none());
    }

    #[test]
    fn test_drop_adjacent_duplicates_wraps() {
        let mut ring = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        drop_adjacent_duplicates(&mut ring);
        assert_eq!(ring.len(), 3);
    }
}
