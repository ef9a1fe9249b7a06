//! Pure 2D geometry helpers used by hit-testing and the wire router.

use kurbo::{Point, Rect, Vec2};

/// Tolerance used to treat cross products as zero.
const COLLINEAR_EPSILON: f64 = 1e-10;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Check whether two points are within `eps` of each other on both axes.
pub fn approx_eq(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// Project a point onto the segment a-b, clamped to the segment.
pub fn project_onto_segment(point: Point, a: Point, b: Point) -> Point {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return a;
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Distance from a point to a line segment (a-b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    distance(point, project_onto_segment(point, a, b))
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// Returns infinity for fewer than two points.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

fn cross(o: Point, p: Point, q: Point) -> f64 {
    let a: Vec2 = p - o;
    let b: Vec2 = q - o;
    a.cross(b)
}

fn within_box(p: Point, q: Point, r: Point) -> bool {
    r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
}

/// Test if two line segments (a-b) and (c-d) intersect, touching included.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    // Collinear cases: an endpoint lies on the other segment
    (d1.abs() < COLLINEAR_EPSILON && within_box(c, d, a))
        || (d2.abs() < COLLINEAR_EPSILON && within_box(c, d, b))
        || (d3.abs() < COLLINEAR_EPSILON && within_box(a, b, c))
        || (d4.abs() < COLLINEAR_EPSILON && within_box(a, b, d))
}

/// Intersection point of segments (a-b) and (c-d).
///
/// Parallel and collinear segments return `None`.
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() < COLLINEAR_EPSILON {
        return None;
    }
    let qp = c - a;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a + r * t)
    } else {
        None
    }
}

/// Even-odd point-in-polygon test. The polygon is implicitly closed.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounds of a point list.
pub fn polyline_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(rest.iter().fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)))
}

/// Test if any segment of a polyline intersects or lies inside a rectangle.
pub fn polyline_intersects_rect(points: &[Point], rect: Rect) -> bool {
    if points.iter().any(|p| rect.contains(*p)) {
        return true;
    }
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    points.windows(2).any(|w| {
        (0..4).any(|i| segments_intersect(w[0], w[1], corners[i], corners[(i + 1) % 4]))
    })
}
