//! Narrow-phase intersection tests: SAT with an exact concave guard.
//!
//! Three shape-pair combinations are supported: circle-circle,
//! circle-polygon, and polygon-polygon. The polygon-polygon path accepts
//! SAT's cheap minimum-overlap axis as the push-out vector but confirms the
//! overlap with exact point-containment and edge-crossing tests, because
//! SAT alone is only sound for convex inputs.

use glam::Vec2;

use super::contact::Mtv;
use super::shape::WorldShape;

/// Axes shorter than this are treated as degenerate and skipped.
pub const AXIS_EPSILON: f32 = 1e-5;
/// Segment pairs whose cross-product denominator falls below this are
/// treated as parallel and skipped.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Fallback separation axis for fully coincident shapes.
const FALLBACK_AXIS: Vec2 = Vec2::X;

/// Circle-circle overlap test. Tangency is classified as non-overlapping.
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> Option<Mtv> {
    let diff = center_b - center_a;
    let dist_sq = diff.length_squared();
    let radius_sum = radius_a + radius_b;
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    let axis = if dist > AXIS_EPSILON {
        diff / dist
    } else {
        FALLBACK_AXIS
    };

    Some(Mtv {
        axis,
        depth: radius_sum - dist,
    })
}

/// Project a vertex list onto an axis, returning the (min, max) interval.
fn project_polygon(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    let (mut min, mut max) = (f32::INFINITY, f32::NEG_INFINITY);
    for v in vertices {
        let q = axis.dot(*v);
        min = min.min(q);
        max = max.max(q);
    }
    (min, max)
}

/// Average of a polygon's vertices, used to orient the MTV axis.
fn polygon_center(vertices: &[Vec2]) -> Vec2 {
    let mut sum = Vec2::ZERO;
    for v in vertices {
        sum += *v;
    }
    sum / vertices.len() as f32
}

/// Track the minimum overlap across candidate axes. Returns false when the
/// axis separates the intervals (strict: touching intervals separate).
fn accumulate_axis(
    axis: Vec2,
    interval_a: (f32, f32),
    interval_b: (f32, f32),
    min_overlap: &mut f32,
    min_axis: &mut Vec2,
) -> bool {
    let overlap = interval_a.1.min(interval_b.1) - interval_a.0.max(interval_b.0);
    if overlap <= 0.0 {
        return false;
    }
    if overlap < *min_overlap {
        *min_overlap = overlap;
        *min_axis = axis;
    }
    true
}

/// Circle-polygon overlap test via SAT.
///
/// Candidate axes are every polygon edge normal plus the axis from the
/// circle center to its nearest polygon vertex, which covers circles near
/// a convex corner that sit outside all edge-normal coverage. The returned
/// axis points from the circle (A) toward the polygon (B).
pub fn circle_polygon(center: Vec2, radius: f32, polygon: &[Vec2]) -> Option<Mtv> {
    if polygon.len() < 3 {
        return None;
    }

    let mut min_overlap = f32::INFINITY;
    let mut min_axis = Vec2::ZERO;

    for i in 0..polygon.len() {
        let edge = polygon[(i + 1) % polygon.len()] - polygon[i];
        let len = edge.length();
        if len < AXIS_EPSILON {
            continue;
        }
        let axis = Vec2::new(-edge.y, edge.x) / len;

        let poly_interval = project_polygon(polygon, axis);
        let center_proj = axis.dot(center);
        let circle_interval = (center_proj - radius, center_proj + radius);
        if !accumulate_axis(
            axis,
            circle_interval,
            poly_interval,
            &mut min_overlap,
            &mut min_axis,
        ) {
            return None;
        }
    }

    // Corner axis: circle center toward its nearest vertex.
    let mut nearest = polygon[0];
    let mut nearest_dist_sq = f32::INFINITY;
    for v in polygon {
        let d = (*v - center).length_squared();
        if d < nearest_dist_sq {
            nearest_dist_sq = d;
            nearest = *v;
        }
    }
    if nearest_dist_sq > AXIS_EPSILON * AXIS_EPSILON {
        let axis = (nearest - center) / nearest_dist_sq.sqrt();
        let poly_interval = project_polygon(polygon, axis);
        let center_proj = axis.dot(center);
        let circle_interval = (center_proj - radius, center_proj + radius);
        if !accumulate_axis(
            axis,
            circle_interval,
            poly_interval,
            &mut min_overlap,
            &mut min_axis,
        ) {
            return None;
        }
    }

    if !min_axis.is_finite() || min_axis == Vec2::ZERO {
        return None;
    }

    // Point the axis from the circle toward the polygon.
    let axis = if min_axis.dot(polygon_center(polygon) - center) < 0.0 {
        -min_axis
    } else {
        min_axis
    };

    Some(Mtv {
        axis,
        depth: min_overlap,
    })
}

/// Polygon-polygon overlap test: convex SAT for the MTV candidate, exact
/// containment/edge-crossing tests as the authoritative boolean decision.
///
/// The pair is overlapping only when SAT finds no separating axis AND at
/// least one exact test confirms geometric intersection, which rejects
/// SAT's false positives for non-convex footprints (for example a circle's
/// proxy polygon sitting in the notch of an L-shaped obstacle).
pub fn polygon_polygon(polygon_a: &[Vec2], polygon_b: &[Vec2]) -> Option<Mtv> {
    if polygon_a.len() < 3 || polygon_b.len() < 3 {
        return None;
    }

    let mut min_overlap = f32::INFINITY;
    let mut min_axis = Vec2::ZERO;

    for polygon in [polygon_a, polygon_b] {
        for i in 0..polygon.len() {
            let edge = polygon[(i + 1) % polygon.len()] - polygon[i];
            let len = edge.length();
            if len < AXIS_EPSILON {
                continue;
            }
            let axis = Vec2::new(-edge.y, edge.x) / len;

            let interval_a = project_polygon(polygon_a, axis);
            let interval_b = project_polygon(polygon_b, axis);
            if !accumulate_axis(axis, interval_a, interval_b, &mut min_overlap, &mut min_axis) {
                return None;
            }
        }
    }

    if min_axis == Vec2::ZERO {
        return None;
    }

    // Concave guard: SAT said overlap, demand exact evidence.
    let contained = any_vertex_inside(polygon_a, polygon_b)
        || any_vertex_inside(polygon_b, polygon_a);
    let crossing = contained || polygons_edges_cross(polygon_a, polygon_b);
    if !crossing {
        return None;
    }

    // Point the axis from A toward B.
    let axis = if min_axis.dot(polygon_center(polygon_b) - polygon_center(polygon_a)) < 0.0 {
        -min_axis
    } else {
        min_axis
    };

    Some(Mtv {
        axis,
        depth: min_overlap,
    })
}

/// Even-odd ray-crossing containment test. Points exactly on the boundary
/// are classified arbitrarily, which the epsilon-padded callers tolerate.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let t = (point.y - pi.y) / (pj.y - pi.y);
            if point.x < pi.x + t * (pj.x - pi.x) {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Proper intersection test for two line segments (endpoints excluded).
///
/// Parametric cross-product form; near-parallel pairs are skipped under
/// [`PARALLEL_EPSILON`] rather than risking an unstable division.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let dir_a = a2 - a1;
    let dir_b = b2 - b1;
    let denom = dir_a.perp_dot(dir_b);
    if denom.abs() < PARALLEL_EPSILON {
        return false;
    }

    let offset = b1 - a1;
    let t = offset.perp_dot(dir_b) / denom;
    let u = offset.perp_dot(dir_a) / denom;
    t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0
}

/// Detect overlap between two world-space shapes, dispatching to the
/// specialized test for the pair. The MTV axis points from `a` toward `b`.
pub fn detect_collision(a: &WorldShape, b: &WorldShape) -> Option<Mtv> {
    match (a, b) {
        (
            WorldShape::Circle {
                center: ca,
                radius: ra,
            },
            WorldShape::Circle {
                center: cb,
                radius: rb,
            },
        ) => circle_circle(*ca, *ra, *cb, *rb),
        (WorldShape::Circle { center, radius }, WorldShape::Polygon { vertices }) => {
            circle_polygon(*center, *radius, vertices)
        }
        (WorldShape::Polygon { vertices }, WorldShape::Circle { center, radius }) => {
            circle_polygon(*center, *radius, vertices).map(|mtv| mtv.flipped())
        }
        (WorldShape::Polygon { vertices: va }, WorldShape::Polygon { vertices: vb }) => {
            polygon_polygon(va, vb)
        }
    }
}

/// Whether any vertex of `inner` lies inside `outer`. Each vertex is
/// nudged slightly toward `inner`'s center first: a vertex sitting exactly
/// on `outer`'s boundary (coincident or shared edges) would otherwise be
/// classified arbitrarily by the even-odd test.
fn any_vertex_inside(inner: &[Vec2], outer: &[Vec2]) -> bool {
    let center = polygon_center(inner);
    inner
        .iter()
        .any(|v| point_in_polygon(*v + (center - *v) * 1e-3, outer))
}

/// Whether any edge of one polygon properly crosses any edge of the other.
fn polygons_edges_cross(polygon_a: &[Vec2], polygon_b: &[Vec2]) -> bool {
    for i in 0..polygon_a.len() {
        let a1 = polygon_a[i];
        let a2 = polygon_a[(i + 1) % polygon_a.len()];
        for j in 0..polygon_b.len() {
            let b1 = polygon_b[j];
            let b2 = polygon_b[(j + 1) % polygon_b.len()];
            if segments_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}
