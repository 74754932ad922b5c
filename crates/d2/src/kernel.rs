//! Distance kernel used by the orbiter.
//!
//! All functions answer "how far can something move along a direction
//! before it hits something else". `None` means the moving part never
//! collides; it is never a coordinate or a sentinel distance.

use crate::point::{fuzzy_equal, Point, FLOAT_TOL};
use crate::polygon::OffsetRing;

/// Signed distance from `p` to segment `s1 s2` measured along `normal`.
///
/// Unless `infinite` is set, a point whose projection falls outside the
/// segment (or exactly on one of its ends) does not collide.
pub fn point_distance(p: Point, s1: Point, s2: Point, normal: Point, infinite: bool) -> Option<f64> {
    let normal = normal.normalized()?;
    let dir = Point::new(normal.y, -normal.x);

    let pdot = p.dot(dir);
    let s1dot = s1.dot(dir);
    let s2dot = s2.dot(dir);

    let pdotnorm = p.dot(normal);
    let s1dotnorm = s1.dot(normal);
    let s2dotnorm = s2.dot(normal);

    if !infinite {
        let below = |a: f64, b: f64| a < b || fuzzy_equal(a, b);
        let above = |a: f64, b: f64| a > b || fuzzy_equal(a, b);
        if (below(pdot, s1dot) && below(pdot, s2dot)) || (above(pdot, s1dot) && above(pdot, s2dot))
        {
            return None;
        }

        let colinear = fuzzy_equal(pdot, s1dot) && fuzzy_equal(pdot, s2dot);
        if colinear && pdotnorm > s1dotnorm && pdotnorm > s2dotnorm {
            return Some((pdotnorm - s1dotnorm).min(pdotnorm - s2dotnorm));
        }
        if colinear && pdotnorm < s1dotnorm && pdotnorm < s2dotnorm {
            return Some(-(s1dotnorm - pdotnorm).min(s2dotnorm - pdotnorm));
        }
    }

    let d = -(pdotnorm - s1dotnorm + (s1dotnorm - s2dotnorm) * (s1dot - pdot) / (s1dot - s2dot));
    d.is_finite().then_some(d)
}

/// How far the moving segment `ef` can travel along the unit vector
/// `direction` before it hits the static segment `ab`.
///
/// Colinear overlapping segments return `Some(0.0)` when `ef` is pushed into
/// `ab`'s outward side, `None` when they slide along or apart.
pub fn segment_distance(a: Point, b: Point, e: Point, f: Point, direction: Point) -> Option<f64> {
    let normal = Point::new(direction.y, -direction.x);
    let reverse = -direction;

    let dot_a = a.dot(normal);
    let dot_b = b.dot(normal);
    let dot_e = e.dot(normal);
    let dot_f = f.dot(normal);

    let cross_a = a.dot(direction);
    let cross_b = b.dot(direction);
    let cross_e = e.dot(direction);
    let cross_f = f.dot(direction);

    let ab_min = dot_a.min(dot_b);
    let ab_max = dot_a.max(dot_b);
    let ef_min = dot_e.min(dot_f);
    let ef_max = dot_e.max(dot_f);

    // merely touch at one point
    if fuzzy_equal(ab_max, ef_min) || fuzzy_equal(ab_min, ef_max) {
        return None;
    }
    // miss each other
    if ab_max < ef_min || ab_min > ef_max {
        return None;
    }

    let overlap = if (ab_max > ef_max && ab_min < ef_min) || (ef_max > ab_max && ef_min < ab_min) {
        1.0
    } else {
        let min_max = ab_max.min(ef_max);
        let max_min = ab_min.max(ef_min);
        let max_max = ab_max.max(ef_max);
        let min_min = ab_min.min(ef_min);
        (min_max - max_min) / (max_max - min_min)
    };

    let cross_abe = (e.y - a.y) * (b.x - a.x) - (e.x - a.x) * (b.y - a.y);
    let cross_abf = (f.y - a.y) * (b.x - a.x) - (f.x - a.x) * (b.y - a.y);

    if fuzzy_equal(cross_abe, 0.0) && fuzzy_equal(cross_abf, 0.0) {
        return colinear_distance(a, b, e, f, direction);
    }

    let mut best: Option<f64> = None;
    let mut push = |d: f64| {
        best = Some(best.map_or(d, |m: f64| m.min(d)));
    };

    // probe `p` of the moving segment against the static one, and reject a
    // zero distance when the other end `q` is already moving away
    let probe = |p: Point, q: Point, s1: Point, s2: Point, towards: Point| -> Option<f64> {
        let d = point_distance(p, s1, s2, towards, false)?;
        if fuzzy_equal(d, 0.0) {
            match point_distance(q, s1, s2, towards, true) {
                Some(dq) if dq < 0.0 || fuzzy_equal(dq * overlap, 0.0) => return None,
                _ => {}
            }
        }
        Some(d)
    };

    if fuzzy_equal(dot_a, dot_e) {
        push(cross_a - cross_e);
    } else if fuzzy_equal(dot_a, dot_f) {
        push(cross_a - cross_f);
    } else if dot_a > ef_min && dot_a < ef_max {
        if let Some(d) = probe(a, b, e, f, reverse) {
            push(d);
        }
    }

    if fuzzy_equal(dot_b, dot_e) {
        push(cross_b - cross_e);
    } else if fuzzy_equal(dot_b, dot_f) {
        push(cross_b - cross_f);
    } else if dot_b > ef_min && dot_b < ef_max {
        if let Some(d) = probe(b, a, e, f, reverse) {
            push(d);
        }
    }

    if dot_e > ab_min && dot_e < ab_max {
        if let Some(d) = probe(e, f, a, b, direction) {
            push(d);
        }
    }

    if dot_f > ab_min && dot_f < ab_max {
        if let Some(d) = probe(f, e, a, b, direction) {
            push(d);
        }
    }

    best
}

/// Colinear, overlapping segments: blocked only when their normals oppose
/// each other and `direction` runs against `ab`'s normal.
fn colinear_distance(a: Point, b: Point, e: Point, f: Point, direction: Point) -> Option<f64> {
    let ab_norm = Point::new(b.y - a.y, a.x - b.x).normalized()?;
    let ef_norm = Point::new(f.y - e.y, e.x - f.x).normalized()?;

    let opposed = ab_norm.cross(ef_norm).abs() < FLOAT_TOL && ab_norm.dot(ef_norm) < 0.0;
    if !opposed {
        return None;
    }

    let normdot = ab_norm.dot(direction);
    if fuzzy_equal(normdot, 0.0) {
        // sliding along each other
        return None;
    }
    (normdot < 0.0).then_some(0.0)
}

/// How far `b` can move along `direction` before touching `a`.
///
/// With `ignore_negative`, edge pairs that are already past each other
/// (negative distance) are skipped.
pub fn polygon_slide_distance(
    a: &OffsetRing<'_>,
    b: &OffsetRing<'_>,
    direction: Point,
    ignore_negative: bool,
) -> Option<f64> {
    let dir = direction.normalized()?;
    let mut distance: Option<f64> = None;

    for i in 0..b.len() {
        let b1 = b.at(i);
        let b2 = b.at(b.next(i));
        if b1 == b2 {
            continue;
        }
        for j in 0..a.len() {
            let a1 = a.at(j);
            let a2 = a.at(a.next(j));
            if a1 == a2 {
                continue;
            }

            let Some(d) = segment_distance(a1, a2, b1, b2, dir) else {
                continue;
            };
            if distance.map_or(true, |current| d < current)
                && (!ignore_negative || d > 0.0 || fuzzy_equal(d, 0.0))
            {
                distance = Some(d);
            }
        }
    }

    distance
}

/// Largest, over B's vertices, of the shortest projection of that vertex
/// onto A's edges along `direction`.
///
/// Edges parallel to `direction` are skipped.
pub fn polygon_projection_distance(
    a: &OffsetRing<'_>,
    b: &OffsetRing<'_>,
    direction: Point,
) -> Option<f64> {
    let mut distance: Option<f64> = None;

    for i in 0..b.len() {
        let p = b.at(i);
        let mut min_projection: Option<f64> = None;

        for j in 0..a.len() {
            let s1 = a.at(j);
            let s2 = a.at(a.next(j));
            if ((s2.y - s1.y) * direction.x - (s2.x - s1.x) * direction.y).abs() < FLOAT_TOL {
                continue;
            }

            if let Some(d) = point_distance(p, s1, s2, direction, false) {
                if min_projection.map_or(true, |m| d < m) {
                    min_projection = Some(d);
                }
            }
        }

        if let Some(m) = min_projection {
            if distance.map_or(true, |d| m > d) {
                distance = Some(m);
            }
        }
    }

    distance
}
