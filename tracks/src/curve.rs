//! Bezier curve primitive backing every track segment.
//!
//! Curves of any degree are supported; a segment built from two endpoints and
//! no control points is a straight line, one control point gives a quadratic,
//! two a cubic. Curves are immutable values: splitting produces new curves.

#[cfg(test)]
#[path = "curve_test.rs"]
mod curve_test;

use serde::Serialize;

use crate::consts::{
    ARC_LENGTH_SUBDIVISIONS, INTERSECTION_MERGE_T, MAX_INTERSECTION_DEPTH, PROJECTION_LUT_STEPS, VECTOR_EPSILON,
};
use crate::point::Point;
use crate::spatial::Aabb;

/// Error returned when a curve cannot be built from its control points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// A curve needs a start and an end point at minimum.
    #[error("a curve needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    /// A control point coordinate is NaN or infinite.
    #[error("curve control points must be finite")]
    NonFinite,
    /// Every control point coincides, so the curve has no direction.
    #[error("curve control points all coincide")]
    Degenerate,
}

/// Closest point on a curve to some query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveProjection {
    pub point: Point,
    pub t: f64,
    pub distance: f64,
}

/// A pair of parameters at which two curves cross.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveIntersection {
    pub self_t: f64,
    pub other_t: f64,
}

// Five-point Gauss-Legendre abscissae and weights on [-1, 1].
const GAUSS_NODES: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683_1,
    0.0,
    0.538_469_310_105_683_1,
    0.906_179_845_938_664,
];
const GAUSS_WEIGHTS: [f64; 5] = [
    0.236_926_885_056_189_1,
    0.478_628_670_499_366_5,
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
];

/// Samples per unit parameter when bracketing derivative roots for bounds.
const EXTREMA_SAMPLES: usize = 64;

/// A Bezier curve defined by its control polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BezierCurve {
    points: Vec<Point>,
}

impl BezierCurve {
    /// Build a curve from its full control polygon (start, controls, end).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] if fewer than two points are given, a coordinate
    /// is not finite, or all points coincide.
    pub fn new(points: Vec<Point>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints(points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(CurveError::NonFinite);
        }
        let first = points[0];
        if points.iter().all(|p| p.distance(first) < VECTOR_EPSILON) {
            return Err(CurveError::Degenerate);
        }
        Ok(Self { points })
    }

    /// Build a curve running from `start` to `end` shaped by `control_points`.
    ///
    /// # Errors
    ///
    /// See [`BezierCurve::new`].
    pub fn through(start: Point, control_points: &[Point], end: Point) -> Result<Self, CurveError> {
        let mut points = Vec::with_capacity(control_points.len() + 2);
        points.push(start);
        points.extend_from_slice(control_points);
        points.push(end);
        Self::new(points)
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Point on the curve at parameter `t`.
    #[must_use]
    pub fn get(&self, t: f64) -> Point {
        de_casteljau(&self.points, t)
    }

    /// First derivative at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Point {
        let hodograph = hodograph(&self.points);
        de_casteljau(&hodograph, t)
    }

    /// Second derivative at `t`. Zero for straight lines.
    #[must_use]
    pub fn second_derivative(&self, t: f64) -> Point {
        let first = hodograph(&self.points);
        if first.len() < 2 {
            return Point::default();
        }
        de_casteljau(&hodograph(&first), t)
    }

    /// Signed curvature at `t`; positive when the curve turns counter-clockwise.
    #[must_use]
    pub fn curvature(&self, t: f64) -> f64 {
        let d = self.derivative(t);
        let dd = self.second_derivative(t);
        let speed = d.length();
        if speed < VECTOR_EPSILON {
            return 0.0;
        }
        d.cross(dd) / (speed * speed * speed)
    }

    /// Unit tangent at `t`.
    ///
    /// Where the derivative vanishes (a control point sitting on an endpoint)
    /// the direction of a nearby chord is used instead.
    #[must_use]
    pub fn unit_tangent(&self, t: f64) -> Point {
        if let Some(unit) = self.derivative(t).unit() {
            return unit;
        }
        let step = 1e-3;
        let chord = if t < 0.5 {
            self.get((t + step).min(1.0)) - self.get(t)
        } else {
            self.get(t) - self.get((t - step).max(0.0))
        };
        chord
            .unit()
            .or_else(|| (self.end() - self.start()).unit())
            .unwrap_or(Point::new(1.0, 0.0))
    }

    /// Split at `t` into the control polygons of the two halves.
    #[must_use]
    pub fn split(&self, t: f64) -> (Vec<Point>, Vec<Point>) {
        let mut left = Vec::with_capacity(self.points.len());
        let mut right = Vec::with_capacity(self.points.len());
        let mut level = self.points.clone();
        while !level.is_empty() {
            left.push(level[0]);
            right.push(level[level.len() - 1]);
            level = level.windows(2).map(|w| w[0].lerp(w[1], t)).collect();
        }
        right.reverse();
        (left, right)
    }

    /// Exact axis-aligned bounds of the curve (not of its control polygon).
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let mut bounds = Aabb::from_point(self.start());
        bounds.include(self.end());

        let hodograph = hodograph(&self.points);
        let xs: Vec<f64> = hodograph.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = hodograph.iter().map(|p| p.y).collect();
        for t in derivative_roots(&xs).into_iter().chain(derivative_roots(&ys)) {
            bounds.include(self.get(t));
        }
        bounds
    }

    /// Arc length, integrated numerically.
    #[must_use]
    pub fn length(&self) -> f64 {
        let hodograph = hodograph(&self.points);
        #[allow(clippy::cast_precision_loss)]
        let width = 1.0 / ARC_LENGTH_SUBDIVISIONS as f64;
        (0..ARC_LENGTH_SUBDIVISIONS)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let a = i as f64 * width;
                let half = width / 2.0;
                let mid = a + half;
                GAUSS_NODES
                    .iter()
                    .zip(GAUSS_WEIGHTS)
                    .map(|(x, w)| w * de_casteljau(&hodograph, mid + half * x).length())
                    .sum::<f64>()
                    * half
            })
            .sum()
    }

    /// `steps + 1` evenly spaced parameter samples of the curve.
    #[must_use]
    pub fn lut(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / steps as f64;
                self.get(t)
            })
            .collect()
    }

    /// Closest point on the curve to `point`.
    ///
    /// A coarse lookup table picks the nearest sample, then the bracket around
    /// it is scanned at progressively finer steps.
    #[must_use]
    pub fn project(&self, point: Point) -> CurveProjection {
        #[allow(clippy::cast_precision_loss)]
        let steps = PROJECTION_LUT_STEPS as f64;
        let mut best_t = 0.0;
        let mut best_distance = f64::INFINITY;
        for (i, sample) in self.lut(PROJECTION_LUT_STEPS).into_iter().enumerate() {
            let d = sample.distance(point);
            if d < best_distance {
                best_distance = d;
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / steps;
                best_t = t;
            }
        }

        let mut radius = 1.0 / steps;
        for _ in 0..3 {
            let lo = (best_t - radius).max(0.0);
            let hi = (best_t + radius).min(1.0);
            let step = radius / 10.0;
            let mut t = lo;
            while t <= hi {
                let d = self.get(t).distance(point);
                if d < best_distance {
                    best_distance = d;
                    best_t = t;
                }
                t += step;
            }
            radius = step;
        }

        CurveProjection { point: self.get(best_t), t: best_t, distance: best_distance }
    }

    /// Parameter pairs where this curve crosses `other`.
    ///
    /// Both curves are halved recursively while their control hulls overlap;
    /// once both pieces are smaller than `threshold` the piece midpoints are
    /// reported. Nearby hits are merged.
    #[must_use]
    pub fn intersections(&self, other: &BezierCurve, threshold: f64) -> Vec<CurveIntersection> {
        let a = Piece::whole(&self.points);
        let b = Piece::whole(&other.points);
        let mut hits = Vec::new();
        intersect_pieces(&a, &b, threshold, 0, &mut hits);

        hits.sort_by(|l, r| l.self_t.total_cmp(&r.self_t).then(l.other_t.total_cmp(&r.other_t)));
        let mut merged: Vec<CurveIntersection> = Vec::with_capacity(hits.len());
        for hit in hits {
            let duplicate = merged.iter().any(|m| {
                (m.self_t - hit.self_t).abs() < INTERSECTION_MERGE_T
                    && (m.other_t - hit.other_t).abs() < INTERSECTION_MERGE_T
            });
            if !duplicate {
                merged.push(hit);
            }
        }
        merged
    }

    /// Polyline running alongside the curve at a signed perpendicular `distance`.
    ///
    /// Positive distances lie to the left of the direction of travel.
    #[must_use]
    pub fn offset_polyline(&self, distance: f64, samples: usize) -> Vec<Point> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / samples as f64;
                self.get(t) + self.unit_tangent(t).perpendicular() * distance
            })
            .collect()
    }
}

fn de_casteljau(points: &[Point], t: f64) -> Point {
    let mut level = points.to_vec();
    while level.len() > 1 {
        for i in 0..level.len() - 1 {
            level[i] = level[i].lerp(level[i + 1], t);
        }
        level.pop();
    }
    level.first().copied().unwrap_or_default()
}

/// Control points of the derivative curve.
fn hodograph(points: &[Point]) -> Vec<Point> {
    #[allow(clippy::cast_precision_loss)]
    let n = (points.len() - 1) as f64;
    points.windows(2).map(|w| (w[1] - w[0]) * n).collect()
}

/// Roots in (0, 1) of a one-dimensional Bezier given by `coefficients`.
fn derivative_roots(coefficients: &[f64]) -> Vec<f64> {
    if coefficients.len() < 2 {
        return Vec::new();
    }
    let eval = |t: f64| {
        let mut level = coefficients.to_vec();
        while level.len() > 1 {
            for i in 0..level.len() - 1 {
                level[i] += (level[i + 1] - level[i]) * t;
            }
            level.pop();
        }
        level[0]
    };

    let mut roots = Vec::new();
    #[allow(clippy::cast_precision_loss)]
    let samples = EXTREMA_SAMPLES as f64;
    let mut prev_t = 0.0;
    let mut prev_v = eval(prev_t);
    for i in 1..=EXTREMA_SAMPLES {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / samples;
        let v = eval(t);
        if v == 0.0 {
            if prev_v != 0.0 {
                roots.push(t);
            }
        } else if prev_v.signum() != v.signum() && prev_v != 0.0 {
            let (mut lo, mut hi, mut lo_v) = (prev_t, t, prev_v);
            for _ in 0..50 {
                let mid = (lo + hi) / 2.0;
                let mid_v = eval(mid);
                if mid_v.signum() == lo_v.signum() {
                    lo = mid;
                    lo_v = mid_v;
                } else {
                    hi = mid;
                }
            }
            roots.push((lo + hi) / 2.0);
        }
        prev_t = t;
        prev_v = v;
    }
    roots
}

/// A sub-curve tracked with the parameter range it covers on the original.
struct Piece {
    points: Vec<Point>,
    t0: f64,
    t1: f64,
    hull: Aabb,
}

impl Piece {
    fn whole(points: &[Point]) -> Self {
        Self::new(points.to_vec(), 0.0, 1.0)
    }

    fn new(points: Vec<Point>, t0: f64, t1: f64) -> Self {
        let mut hull = Aabb::from_point(points[0]);
        for p in &points[1..] {
            hull.include(*p);
        }
        Self { points, t0, t1, hull }
    }

    fn halve(&self) -> (Piece, Piece) {
        let mid = (self.t0 + self.t1) / 2.0;
        let mut level = self.points.clone();
        let mut left = Vec::with_capacity(level.len());
        let mut right = Vec::with_capacity(level.len());
        while !level.is_empty() {
            left.push(level[0]);
            right.push(level[level.len() - 1]);
            level = level.windows(2).map(|w| w[0].lerp(w[1], 0.5)).collect();
        }
        right.reverse();
        (Piece::new(left, self.t0, mid), Piece::new(right, mid, self.t1))
    }

    fn size(&self) -> f64 {
        (self.hull.width() + self.hull.height()) / 2.0
    }
}

fn intersect_pieces(a: &Piece, b: &Piece, threshold: f64, depth: u32, out: &mut Vec<CurveIntersection>) {
    if !a.hull.intersects(&b.hull) {
        return;
    }
    if depth >= MAX_INTERSECTION_DEPTH || (a.size() < threshold && b.size() < threshold) {
        out.push(CurveIntersection { self_t: (a.t0 + a.t1) / 2.0, other_t: (b.t0 + b.t1) / 2.0 });
        return;
    }
    let (a1, a2) = a.halve();
    let (b1, b2) = b.halve();
    for pa in [&a1, &a2] {
        for pb in [&b1, &b2] {
            intersect_pieces(pa, pb, threshold, depth + 1, out);
        }
    }
}
