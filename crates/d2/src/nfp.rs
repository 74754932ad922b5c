//! No-Fit Polygon computation by orbiting.
//!
//! The movable polygon B slides around the static polygon A while keeping
//! contact; the path traced by B's first vertex is an NFP loop. Placing B's
//! first vertex anywhere on a loop makes B touch A without overlapping it.
//!
//! - **Outside**: B starts with its highest vertex on A's lowest vertex.
//! - **Inside**: the start is found by [`search_start_point`]; when A is an
//!   axis-aligned rectangle the loop is computed in closed form.

use crate::kernel::{polygon_projection_distance, polygon_slide_distance};
use crate::point::{fuzzy_equal, on_segment, Point};
use crate::polygon::{OffsetRing, PointInPolygon, Polygon};
use std::borrow::Cow;
use std::collections::HashSet;

/// Relative tolerance used to detect a rectangular container.
const RECTANGLE_TOL: f64 = 1e-3;

/// Below this cross product of unit vectors, two directions are parallel.
const PARALLEL_TOL: f64 = 1e-4;

/// NFP computation result.
#[derive(Debug, Clone, Default)]
pub struct Nfp {
    /// Closed loops, each an open ring of reference positions.
    pub loops: Vec<Polygon>,
}

impl Nfp {
    /// Creates a new empty NFP.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an NFP with a single loop.
    pub fn from_loop(ring: Polygon) -> Self {
        Self { loops: vec![ring] }
    }

    /// Returns true if no loop was found.
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Number of loops.
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    /// The first loop: the outer NFP, or the first inner one.
    pub fn first(&self) -> Option<&Polygon> {
        self.loops.first()
    }

    /// Consumes the NFP and returns its first loop.
    pub fn into_first(self) -> Option<Polygon> {
        self.loops.into_iter().next()
    }
}

// ============================================================================
// Visited vertices
// ============================================================================

/// Which of the two polygons a vertex index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The polygon that stays put (A).
    Static,
    /// The polygon being slid around (B).
    Movable,
}

/// Vertices already used as contacts or start candidates during one NFP
/// computation.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    marks: HashSet<(Role, usize)>,
}

impl VisitedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a vertex. Returns true if it was not marked before.
    pub fn mark(&mut self, role: Role, index: usize) -> bool {
        self.marks.insert((role, index))
    }

    /// Returns true if the vertex has been marked.
    pub fn is_marked(&self, role: Role, index: usize) -> bool {
        self.marks.contains(&(role, index))
    }
}

// ============================================================================
// Public entry points
// ============================================================================

/// Computes the NFP of `b` orbiting `a`.
///
/// Placements are ignored and either winding is accepted: the orbit runs on
/// anticlockwise copies, and loops are reported as positions of `b`'s own
/// first vertex. With `search_edges` unset only the first loop is computed
/// (the outer NFP, or the first inner one). Degenerate inputs and loops that
/// fail to close give no loop rather than an error.
pub fn no_fit_polygon(a: &Polygon, b: &Polygon, inside: bool, search_edges: bool) -> Nfp {
    if !a.is_valid() || !b.is_valid() {
        return Nfp::new();
    }

    if inside && a.is_rectangle(RECTANGLE_TOL) {
        return no_fit_polygon_rectangle(a, b);
    }

    let a_ccw = anticlockwise(a);
    let b_ccw = anticlockwise(b);
    let mut nfp = orbit_loops(&a_ccw, &b_ccw, inside, search_edges);

    // reversing B moves its first vertex
    let shift = b.vertices()[0] - b_ccw.vertices()[0];
    if shift != Point::default() {
        for ring in &mut nfp.loops {
            ring.translate(shift.x, shift.y);
        }
    }
    nfp
}

fn anticlockwise(p: &Polygon) -> Cow<'_, Polygon> {
    if p.is_anticlockwise() {
        Cow::Borrowed(p)
    } else {
        let mut p = p.clone();
        p.set_anticlockwise();
        Cow::Owned(p)
    }
}

/// Orbit loops of two anticlockwise rings.
fn orbit_loops(a: &Polygon, b: &Polygon, inside: bool, search_edges: bool) -> Nfp {
    let mut visited = VisitedSet::new();
    let mut loops: Vec<Polygon> = Vec::new();

    let mut start = if inside {
        search_start_point(a, b, true, &loops, &mut visited)
    } else {
        Some(outside_start(a, b))
    };

    while let Some(offset) = start {
        match orbit(a, b, offset, &mut visited) {
            Some(ring) => loops.push(ring),
            None => log::debug!(
                "NFP loop from ({:.3}, {:.3}) did not close",
                offset.x,
                offset.y
            ),
        }

        if !search_edges {
            break;
        }
        start = search_start_point(a, b, inside, &loops, &mut visited);
    }

    Nfp { loops }
}

/// Closed-form inner NFP of `b` inside the rectangle `a`.
///
/// The loop is `a`'s bounds shrunk by `b`'s bounds, expressed as positions
/// of `b`'s first vertex. Empty when `b` is wider or taller than `a`.
pub fn no_fit_polygon_rectangle(a: &Polygon, b: &Polygon) -> Nfp {
    if !a.is_valid() || !b.is_valid() {
        return Nfp::new();
    }

    let ra = a.bounds();
    let rb = b.bounds();
    if rb.width > ra.width || rb.height > ra.height {
        return Nfp::new();
    }

    let b0 = b.vertices()[0];
    let left = ra.x - rb.x + b0.x;
    let right = ra.right() - rb.right() + b0.x;
    let bottom = ra.y - rb.y + b0.y;
    let top = ra.top() - rb.top() + b0.y;

    Nfp::from_loop(Polygon::new(vec![
        Point::new(left, bottom),
        Point::new(right, bottom),
        Point::new(right, top),
        Point::new(left, top),
    ]))
}

/// Returns true if `p` coincides with a vertex of any loop.
pub fn in_nfp(p: Point, loops: &[Polygon]) -> bool {
    loops.iter().any(|l| l.vertices().contains(&p))
}

/// Finds an offset for `b` that touches `a` without overlap, with `b` on the
/// requested side, and whose reference position is not already on one of
/// `existing`.
///
/// Vertices of `a` already in `visited` are skipped; every vertex tried is
/// marked. `None` means there is no further start point.
pub fn search_start_point(
    a: &Polygon,
    b: &Polygon,
    inside: bool,
    existing: &[Polygon],
    visited: &mut VisitedSet,
) -> Option<Point> {
    if !a.is_valid() || !b.is_valid() {
        return None;
    }

    let a_ring = a.ring();
    let b_points = b.vertices();

    for i in 0..a_ring.len() {
        if !visited.mark(Role::Static, i) {
            continue;
        }
        let anchor = a_ring.at(i);
        let edge = a_ring.at(a_ring.next(i)) - anchor;

        for &bj in b_points {
            let offset = anchor - bj;
            let b_ring = OffsetRing::new(b_points, offset);

            // every vertex of B on A's boundary: the shapes coincide
            let b_inside = side_of(&a_ring, &b_ring)?;
            if is_start(&a_ring, &b_ring, b_inside, inside, existing) {
                return Some(offset);
            }

            // slide B along the current edge of A and retry
            let d1 = polygon_projection_distance(&a_ring, &b_ring, edge);
            let d2 = polygon_projection_distance(&b_ring, &a_ring, -edge);
            let d = match (d1, d2) {
                (Some(x), Some(y)) => Some(x.min(y)),
                (x, None) => x,
                (None, y) => y,
            };
            let Some(d) = d.filter(|&d| d > 0.0 && !fuzzy_equal(d, 0.0)) else {
                continue;
            };

            let mut step = edge;
            let len2 = edge.length_squared();
            if d * d < len2 && !fuzzy_equal(d * d, len2) {
                step = edge * (d / len2.sqrt());
            }

            let offset = offset + step;
            let b_ring = b_ring.with_offset(offset);
            let b_inside = side_of(&a_ring, &b_ring).unwrap_or(b_inside);
            if is_start(&a_ring, &b_ring, b_inside, inside, existing) {
                return Some(offset);
            }
        }
    }

    None
}

// ============================================================================
// Orbiting
// ============================================================================

/// Offset putting B's highest vertex on A's lowest vertex.
fn outside_start(a: &Polygon, b: &Polygon) -> Point {
    let lowest = a
        .vertices()
        .iter()
        .copied()
        .fold(a.vertices()[0], |m, p| if p.y < m.y { p } else { m });
    let highest = b
        .vertices()
        .iter()
        .copied()
        .fold(b.vertices()[0], |m, p| if p.y > m.y { p } else { m });
    lowest - highest
}

/// Side of A that B is on, decided by the first vertex of B off A's
/// boundary. `None` when every vertex lies on the boundary.
fn side_of(a: &OffsetRing<'_>, b: &OffsetRing<'_>) -> Option<PointInPolygon> {
    (0..b.len())
        .map(|k| a.contain_point(b.at(k)))
        .find(|&side| side != PointInPolygon::Invalid)
}

fn is_start(
    a: &OffsetRing<'_>,
    b: &OffsetRing<'_>,
    b_inside: PointInPolygon,
    inside: bool,
    existing: &[Polygon],
) -> bool {
    (b_inside == PointInPolygon::Inside) == inside
        && !a.intersects(b)
        && midpoints_clear(a, b, inside)
        && !in_nfp(b.at(0), existing)
}

/// No edge midpoint of A strictly inside B, and no edge midpoint of B
/// strictly on the wrong side of A. Catches overlaps whose boundary
/// crossings all fall on shared vertices, which `intersects` does not see.
fn midpoints_clear(a: &OffsetRing<'_>, b: &OffsetRing<'_>, inside: bool) -> bool {
    let wrong_side = if inside {
        PointInPolygon::Outside
    } else {
        PointInPolygon::Inside
    };
    let midpoint = |r: &OffsetRing<'_>, k: usize| r.at(k).lerp(r.at(r.next(k)), 0.5);

    (0..a.len()).all(|i| b.contain_point(midpoint(a, i)) != PointInPolygon::Inside)
        && (0..b.len()).all(|j| a.contain_point(midpoint(b, j)) != wrong_side)
}

/// A touching pair between A and B at B's current offset.
#[derive(Debug, Clone, Copy)]
enum Contact {
    /// `a[a] == b[b]`.
    Vertices { a: usize, b: usize },
    /// `b[b]` lies inside A's edge ending at `a[a_end]`.
    MovableOnEdge { a_end: usize, b: usize },
    /// `a[a]` lies inside B's edge ending at `b[b_end]`.
    StaticOnEdge { a: usize, b_end: usize },
}

/// A candidate move of B, with the vertices whose edge produced it.
#[derive(Debug, Clone, Copy)]
struct Translation {
    delta: Point,
    from: (Role, usize),
    to: (Role, usize),
}

impl Translation {
    fn new(delta: Point, from: (Role, usize), to: (Role, usize)) -> Self {
        Self { delta, from, to }
    }

    /// Parallel to and pointing against `previous`.
    fn reverses(&self, previous: Point) -> bool {
        if self.delta.dot(previous) >= 0.0 {
            return false;
        }
        match (self.delta.normalized(), previous.normalized()) {
            (Some(u), Some(p)) => u.cross(p).abs() < PARALLEL_TOL,
            _ => false,
        }
    }
}

fn find_contacts(a: &OffsetRing<'_>, b: &OffsetRing<'_>) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for i in 0..a.len() {
        let next_i = a.next(i);
        let ai = a.at(i);
        for j in 0..b.len() {
            let next_j = b.next(j);
            let bj = b.at(j);
            if ai == bj {
                contacts.push(Contact::Vertices { a: i, b: j });
            } else if on_segment(ai, a.at(next_i), bj) {
                contacts.push(Contact::MovableOnEdge { a_end: next_i, b: j });
            } else if on_segment(bj, b.at(next_j), ai) {
                contacts.push(Contact::StaticOnEdge { a: i, b_end: next_j });
            }
        }
    }
    contacts
}

/// Translations suggested by the edges meeting at each contact. B's own
/// edges are inverted since B moves, not A.
fn translations(
    a: &OffsetRing<'_>,
    b: &OffsetRing<'_>,
    contacts: &[Contact],
    visited: &mut VisitedSet,
) -> Vec<Translation> {
    use Role::{Movable, Static};

    let mut out = Vec::with_capacity(contacts.len() * 4);
    for contact in contacts {
        match *contact {
            Contact::Vertices { a: i, b: j } => {
                visited.mark(Static, i);
                let (pa, na) = (a.prev(i), a.next(i));
                let (pb, nb) = (b.prev(j), b.next(j));
                out.push(Translation::new(a.at(pa) - a.at(i), (Static, i), (Static, pa)));
                out.push(Translation::new(a.at(na) - a.at(i), (Static, i), (Static, na)));
                out.push(Translation::new(b.at(j) - b.at(pb), (Movable, pb), (Movable, j)));
                out.push(Translation::new(b.at(j) - b.at(nb), (Movable, nb), (Movable, j)));
            }
            Contact::MovableOnEdge { a_end, b: j } => {
                visited.mark(Static, a_end);
                let pa = a.prev(a_end);
                out.push(Translation::new(a.at(a_end) - b.at(j), (Static, pa), (Static, a_end)));
                out.push(Translation::new(a.at(pa) - b.at(j), (Static, a_end), (Static, pa)));
            }
            Contact::StaticOnEdge { a: i, b_end } => {
                visited.mark(Static, i);
                let pb = b.prev(b_end);
                out.push(Translation::new(a.at(i) - b.at(b_end), (Movable, pb), (Movable, b_end)));
                out.push(Translation::new(a.at(i) - b.at(pb), (Movable, b_end), (Movable, pb)));
            }
        }
    }
    out
}

/// Slides B around A from `start` until its reference point returns to a
/// position already on the loop.
///
/// Returns `None` when B gets stuck or the step bound runs out.
fn orbit(a: &Polygon, b: &Polygon, start: Point, visited: &mut VisitedSet) -> Option<Polygon> {
    let a_ring = a.ring();
    let b_points = b.vertices();
    let max_steps = 10 * (a.len() + b.len());

    let mut offset = start;
    let origin = b_points[0] + start;
    let mut reference = origin;
    let mut ring = vec![origin];
    let mut previous: Option<Point> = None;

    for _ in 0..max_steps {
        let b_ring = OffsetRing::new(b_points, offset);
        let contacts = find_contacts(&a_ring, &b_ring);
        let candidates = translations(&a_ring, &b_ring, &contacts, visited);

        let mut best: Option<(Translation, f64)> = None;
        for t in candidates {
            if t.delta.x == 0.0 && t.delta.y == 0.0 {
                continue;
            }
            if previous.is_some_and(|p| t.reverses(p)) {
                continue;
            }

            let len2 = t.delta.length_squared();
            let d = match polygon_slide_distance(&a_ring, &b_ring, t.delta, true) {
                Some(d) if d * d <= len2 => d,
                _ => len2.sqrt(),
            };
            if d > best.map_or(0.0, |(_, max)| max) {
                best = Some((t, d));
            }
        }

        let (t, max_d) = best.filter(|&(_, d)| !fuzzy_equal(d, 0.0))?;
        visited.mark(t.from.0, t.from.1);
        visited.mark(t.to.0, t.to.1);
        previous = Some(t.delta);

        let len2 = t.delta.length_squared();
        let step = if max_d * max_d < len2 && !fuzzy_equal(max_d * max_d, len2) {
            t.delta * (max_d / len2.sqrt())
        } else {
            t.delta
        };

        reference += step;
        // touching horizontal starts may close on an earlier point instead
        if reference == origin || ring[..ring.len() - 1].contains(&reference) {
            return Some(Polygon::new(ring));
        }

        ring.push(reference);
        offset += step;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Rect;
    use approx::assert_relative_eq;
    use stripnest_core::Placement;

    fn placed(b: &Polygon, reference: Point) -> Polygon {
        let offset = reference - b.vertices()[0];
        b.clone().with_placement(Placement::new(offset.x, offset.y))
    }

    fn same_bounds(r: Rect, expected: Rect) -> bool {
        (r.x - expected.x).abs() < 1e-9
            && (r.y - expected.y).abs() < 1e-9
            && (r.width - expected.width).abs() < 1e-9
            && (r.height - expected.height).abs() < 1e-9
    }

    fn clockwise(coords: &[(f64, f64)]) -> Polygon {
        let mut p = Polygon::from_coords(coords);
        p.reverse();
        assert!(!p.is_anticlockwise());
        p
    }

    fn assert_touches_everywhere(a: &Polygon, b: &Polygon, ring: &Polygon) {
        for &v in ring.vertices() {
            let moved = placed(b, v);
            assert!(
                !a.placed_ring().intersects(&moved.placed_ring()),
                "overlap at ({}, {})",
                v.x,
                v.y
            );
        }
    }

    #[test]
    fn test_outside_nfp_of_squares() {
        let a = Polygon::rectangle(1.0, 1.0);
        let b = Polygon::rectangle(1.0, 1.0);
        let nfp = no_fit_polygon(&a, &b, false, false);

        assert_eq!(nfp.len(), 1);
        let ring = nfp.first().unwrap();
        assert_eq!(ring.len(), 8);
        assert_relative_eq!(ring.abs_area(), 4.0, epsilon = 1e-9);
        assert_eq!(ring.bounds().x, -1.0);
        assert_eq!(ring.bounds().y, -1.0);
        assert_touches_everywhere(&a, &b, ring);
    }

    #[test]
    fn test_outside_nfp_of_rectangle_and_square() {
        let a = Polygon::rectangle(2.0, 1.0);
        let b = Polygon::rectangle(1.0, 1.0);
        let nfp = no_fit_polygon(&a, &b, false, false);

        assert_eq!(nfp.len(), 1);
        let ring = nfp.first().unwrap();
        assert_relative_eq!(ring.abs_area(), 6.0, epsilon = 1e-9);
        assert_eq!(ring.bounds(), Rect::new(-1.0, -1.0, 3.0, 2.0));
        assert_eq!(ring.vertices()[0], Point::new(-1.0, -1.0));
        assert!(ring.vertices().contains(&Point::new(2.0, 0.0)));
        assert_touches_everywhere(&a, &b, ring);
    }

    #[test]
    fn test_outside_nfp_accepts_clockwise_input() {
        let square = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
        let unit = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let b = clockwise(&unit);
        // clockwise B keeps (0, 1) as its first vertex
        assert_eq!(b.vertices()[0], Point::new(0.0, 1.0));

        for a in [clockwise(&square), Polygon::from_coords(&square)] {
            let nfp = no_fit_polygon(&a, &b, false, false);
            assert_eq!(nfp.len(), 1);
            let ring = nfp.first().unwrap();
            assert_relative_eq!(ring.abs_area(), 9.0, epsilon = 1e-9);
            assert!(same_bounds(ring.bounds(), Rect::new(-1.0, 0.0, 3.0, 3.0)));
            assert_touches_everywhere(&a, &b, ring);
        }
    }

    #[test]
    fn test_outside_nfp_of_triangles() {
        let t = Polygon::from_coords(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
        let square = Polygon::rectangle(1.0, 1.0);

        // convex pairs: one loop, the area of A ⊕ (-B)
        for (a, b, area) in [(&t, &t, 12.0), (&t, &square, 7.0), (&square, &t, 7.0)] {
            let nfp = no_fit_polygon(a, b, false, false);
            assert_eq!(nfp.len(), 1);
            let ring = nfp.first().unwrap();
            assert_relative_eq!(ring.abs_area(), area, epsilon = 1e-6);
            assert_touches_everywhere(a, b, ring);
        }
    }

    #[test]
    fn test_inside_nfp_of_l_shape() {
        let container = Polygon::from_coords(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]);
        let item = Polygon::rectangle(1.0, 1.0);
        let nfp = no_fit_polygon(&container, &item, true, false);

        assert_eq!(nfp.len(), 1);
        let ring = nfp.first().unwrap();
        assert_eq!(ring.len(), 6);
        assert_relative_eq!(ring.abs_area(), 5.0, epsilon = 1e-9);
        assert!(same_bounds(ring.bounds(), Rect::new(0.0, 0.0, 3.0, 3.0)));
        assert!(ring.vertices().contains(&Point::new(1.0, 1.0)));
        assert_touches_everywhere(&container, &item, ring);
        for &v in ring.vertices() {
            let moved = placed(&item, v);
            assert!(moved.placed_bounds().fits_within(4.0, 4.0));
            assert_ne!(
                container.contain_point(moved.placed_vertices()[0].lerp(moved.placed_vertices()[2], 0.5)),
                PointInPolygon::Outside
            );
        }
    }

    #[test]
    fn test_inside_nfp_of_triangle() {
        let container = Polygon::from_coords(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let item = Polygon::rectangle(1.0, 1.0);
        let nfp = no_fit_polygon(&container, &item, true, false);

        assert_eq!(nfp.len(), 1);
        let ring = nfp.first().unwrap();
        assert_eq!(ring.len(), 3);
        assert_relative_eq!(ring.abs_area(), 32.0, epsilon = 1e-9);
        assert!(same_bounds(ring.bounds(), Rect::new(0.0, 0.0, 8.0, 8.0)));
        assert_touches_everywhere(&container, &item, ring);
    }

    #[test]
    fn test_search_edges_finds_cavity_loop() {
        // 5x5 block with a 3x3 cavity, open through a neck one unit wide
        let a = Polygon::from_coords(&[
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 5.0),
            (3.0, 5.0),
            (3.0, 4.0),
            (4.0, 4.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (2.0, 4.0),
            (2.0, 5.0),
            (0.0, 5.0),
        ]);
        let b = Polygon::rectangle(2.0, 2.0);

        assert_eq!(no_fit_polygon(&a, &b, false, false).len(), 1);

        let nfp = no_fit_polygon(&a, &b, false, true);
        assert!(nfp.len() >= 2);
        let outer = nfp.first().unwrap();
        assert!(same_bounds(outer.bounds(), Rect::new(-2.0, -2.0, 7.0, 7.0)));
        assert_touches_everywhere(&a, &b, outer);

        let cavity = nfp
            .loops
            .iter()
            .find(|l| same_bounds(l.bounds(), Rect::new(1.0, 1.0, 1.0, 1.0)))
            .expect("cavity loop");
        assert_relative_eq!(cavity.abs_area(), 1.0, epsilon = 1e-9);
        assert_touches_everywhere(&a, &b, cavity);
    }

    #[test]
    fn test_start_rejects_overlap_through_shared_vertices() {
        let a = Polygon::from_coords(&[
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 5.0),
            (3.0, 5.0),
            (3.0, 4.0),
            (4.0, 4.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (2.0, 4.0),
            (2.0, 5.0),
            (0.0, 5.0),
        ]);
        // covers the wall block [3, 5] x [4, 5]; every crossing is at a vertex
        let b = Polygon::rectangle(2.0, 2.0);
        let offset = Point::new(3.0, 4.0);
        let (a_ring, b_ring) = (a.ring(), OffsetRing::new(b.vertices(), offset));

        assert!(!midpoints_clear(&a_ring, &b_ring, false));
        assert!(!is_start(&a_ring, &b_ring, PointInPolygon::Outside, false, &[]));

        let clear = OffsetRing::new(b.vertices(), Point::new(1.0, 2.0));
        assert!(midpoints_clear(&a_ring, &clear, false));
    }

    #[test]
    fn test_search_edges_on_convex_finds_one_loop() {
        let a = Polygon::rectangle(1.0, 1.0);
        let b = Polygon::rectangle(1.0, 1.0);
        assert_eq!(no_fit_polygon(&a, &b, false, true).len(), 1);
    }

    #[test]
    fn test_degenerate_input_gives_empty_nfp() {
        let a = Polygon::rectangle(1.0, 1.0);
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(no_fit_polygon(&a, &line, false, false).is_empty());
        assert!(no_fit_polygon(&line, &a, true, false).is_empty());
        assert!(no_fit_polygon_rectangle(&line, &a).is_empty());
    }

    #[test]
    fn test_rectangle_nfp() {
        let container = Polygon::rectangle(4.0, 3.0);
        let item = Polygon::rectangle(1.0, 1.0);
        let nfp = no_fit_polygon_rectangle(&container, &item);

        let ring = nfp.first().unwrap();
        assert_eq!(ring.vertices()[0], Point::new(0.0, 0.0));
        assert_eq!(ring.vertices()[2], Point::new(3.0, 2.0));
        assert_relative_eq!(ring.abs_area(), 6.0);

        // inside on a rectangle takes the closed form
        let orbit = no_fit_polygon(&container, &item, true, false);
        assert_eq!(orbit.first().unwrap().vertices(), ring.vertices());
    }

    #[test]
    fn test_rectangle_nfp_relative_to_first_vertex() {
        let mut container = Polygon::rectangle(4.0, 3.0);
        container.translate(10.0, 10.0);
        let item = Polygon::from_coords(&[(1.0, 1.0), (0.0, 1.0), (0.0, 0.0), (1.0, 0.0)]);
        let ring = no_fit_polygon_rectangle(&container, &item).into_first().unwrap();

        // item's first vertex is its top-right corner
        assert_eq!(ring.vertices()[0], Point::new(11.0, 11.0));
        assert_eq!(ring.vertices()[2], Point::new(14.0, 13.0));
    }

    #[test]
    fn test_rectangle_nfp_item_too_large() {
        let container = Polygon::rectangle(4.0, 3.0);
        assert!(no_fit_polygon_rectangle(&container, &Polygon::rectangle(5.0, 1.0)).is_empty());
        assert!(no_fit_polygon_rectangle(&container, &Polygon::rectangle(1.0, 4.0)).is_empty());
    }

    #[test]
    fn test_search_start_point_inside_corner() {
        let container = Polygon::rectangle(4.0, 4.0);
        let item = Polygon::rectangle(1.0, 1.0);
        let mut visited = VisitedSet::new();

        let start = search_start_point(&container, &item, true, &[], &mut visited);
        assert_eq!(start, Some(Point::new(0.0, 0.0)));
        assert!(visited.is_marked(Role::Static, 0));
    }

    #[test]
    fn test_search_start_point_skips_existing_loops() {
        let container = Polygon::rectangle(4.0, 4.0);
        let item = Polygon::rectangle(1.0, 1.0);
        let existing = vec![Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 3.0),
        ])];

        let mut visited = VisitedSet::new();
        let start = search_start_point(&container, &item, true, &existing, &mut visited);
        // the three corners on the loop are passed over for the fourth
        assert_eq!(start, Some(Point::new(3.0, 3.0)));
        assert!(!in_nfp(item.vertices()[0] + Point::new(3.0, 3.0), &existing));
    }

    #[test]
    fn test_search_start_point_identical_shapes() {
        let a = Polygon::rectangle(1.0, 1.0);
        let mut visited = VisitedSet::new();
        assert!(search_start_point(&a, &a, false, &[], &mut visited).is_none());
    }

    #[test]
    fn test_visited_vertices_are_skipped() {
        let container = Polygon::rectangle(4.0, 4.0);
        let item = Polygon::rectangle(1.0, 1.0);
        let mut visited = VisitedSet::new();
        for i in 0..container.len() {
            visited.mark(Role::Static, i);
        }
        assert!(search_start_point(&container, &item, true, &[], &mut visited).is_none());
    }

    #[test]
    fn test_in_nfp() {
        let loops = vec![Polygon::rectangle(2.0, 2.0)];
        assert!(in_nfp(Point::new(2.0, 2.0), &loops));
        assert!(!in_nfp(Point::new(1.0, 1.0), &loops));
        assert!(!in_nfp(Point::new(0.0, 0.0), &[]));
    }

    #[test]
    fn test_translation_reverses() {
        let t = Translation::new(Point::new(-2.0, 0.0), (Role::Static, 0), (Role::Static, 1));
        assert!(t.reverses(Point::new(1.0, 0.0)));
        assert!(!t.reverses(Point::new(-1.0, 0.0)));
        assert!(!t.reverses(Point::new(0.0, 1.0)));
    }
}
