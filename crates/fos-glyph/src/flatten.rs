//! Curve flattening
//!
//! TrueType contours are quadratic B-splines: on-curve points are anchors,
//! off-curve points are controls. Two consecutive controls imply an
//! on-curve point at their midpoint. Once those implied points are made
//! explicit, every control sits between two anchors and each
//! anchor-control-anchor triple is one quadratic Bezier.

use crate::outline::{Contour, GlyphOutline, Point};

/// Default number of line segments per quadratic curve
pub const DEFAULT_SUBDIVISIONS: u32 = 10;

/// Upper bound on line segments per quadratic curve
pub const MAX_SUBDIVISIONS: u32 = 1024;

/// Limit a subdivision count to `1..=MAX_SUBDIVISIONS`
pub fn clamp_subdivisions(subdivisions: u32) -> u32 {
    subdivisions.clamp(1, MAX_SUBDIVISIONS)
}

/// Directed line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether both endpoints share a y coordinate
    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }
}

/// Insert implied on-curve midpoints between consecutive off-curve points,
/// including the wrap-around pair last -> first.
pub fn canonicalize(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    let mut out = Vec::with_capacity(n * 2);
    for (i, &current) in points.iter().enumerate() {
        out.push(current);
        let next = points[(i + 1) % n];
        if !current.on_curve && !next.on_curve {
            out.push(current.midpoint(next));
        }
    }
    out
}

#[inline]
fn quad_point(start: Point, control: Point, end: Point, t: f32) -> Point {
    let a = start.lerp(control, t);
    let b = control.lerp(end, t);
    a.lerp(b, t)
}

/// Sample a quadratic Bezier at `subdivisions` uniform steps
///
/// Returns `subdivisions + 1` points after clamping to
/// `1..=MAX_SUBDIVISIONS`. The first is `start` and the last is exactly `end`.
pub fn flatten_quadratic(start: Point, control: Point, end: Point, subdivisions: u32) -> Vec<Point> {
    let steps = clamp_subdivisions(subdivisions);
    let mut out = Vec::with_capacity(steps as usize + 1);
    out.push(Point::on(start.x, start.y));
    for step in 1..steps {
        out.push(quad_point(start, control, end, step as f32 / steps as f32));
    }
    out.push(Point::on(end.x, end.y));
    out
}

/// Flatten one contour into a closed polyline, appending to `out`
pub fn flatten_contour(contour: &Contour, subdivisions: u32, out: &mut Vec<Segment>) {
    let points = canonicalize(&contour.points);
    let n = points.len();
    let Some(first) = points.iter().position(|p| p.on_curve) else {
        return;
    };

    let mut i = 0;
    while i < n {
        let current = points[(first + i) % n];
        let next = points[(first + i + 1) % n];
        if next.on_curve {
            out.push(Segment::new(current, next));
            i += 1;
        } else {
            let end = points[(first + i + 2) % n];
            let samples = flatten_quadratic(current, next, end, subdivisions);
            out.extend(samples.windows(2).map(|w| Segment::new(w[0], w[1])));
            i += 2;
        }
    }
}

/// Flatten every contour of a glyph, in contour order
pub fn flatten_outline(outline: &GlyphOutline, subdivisions: u32) -> Vec<Segment> {
    let capacity = outline.point_count() * clamp_subdivisions(subdivisions) as usize;
    let mut segments = Vec::with_capacity(capacity);
    for contour in &outline.contours {
        flatten_contour(contour, subdivisions, &mut segments);
    }
    segments
}
