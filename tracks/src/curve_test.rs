#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> BezierCurve {
    BezierCurve::through(Point::new(x0, y0), &[], Point::new(x1, y1)).unwrap()
}

fn arch() -> BezierCurve {
    BezierCurve::new(vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(100.0, 0.0),
    ])
    .unwrap()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn rejects_single_point() {
    let err = BezierCurve::new(vec![Point::new(1.0, 1.0)]).unwrap_err();
    assert_eq!(err, CurveError::TooFewPoints(1));
}

#[test]
fn rejects_coincident_points() {
    let p = Point::new(3.0, 3.0);
    let err = BezierCurve::through(p, &[p], p).unwrap_err();
    assert_eq!(err, CurveError::Degenerate);
}

#[test]
fn rejects_non_finite_points() {
    let err = BezierCurve::through(Point::new(0.0, 0.0), &[], Point::new(f64::NAN, 1.0)).unwrap_err();
    assert_eq!(err, CurveError::NonFinite);
}

#[test]
fn through_places_controls_between_endpoints() {
    let c = BezierCurve::through(Point::new(0.0, 0.0), &[Point::new(5.0, 5.0)], Point::new(10.0, 0.0)).unwrap();
    assert_eq!(c.degree(), 2);
    assert_eq!(c.start(), Point::new(0.0, 0.0));
    assert_eq!(c.end(), Point::new(10.0, 0.0));
}

// =============================================================
// Evaluation
// =============================================================

#[test]
fn get_hits_endpoints() {
    let c = arch();
    assert!(point_approx_eq(c.get(0.0), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(c.get(1.0), Point::new(100.0, 0.0)));
}

#[test]
fn get_midpoint_of_line() {
    assert!(point_approx_eq(line(0.0, 0.0, 100.0, 0.0).get(0.5), Point::new(50.0, 0.0)));
}

#[test]
fn cubic_midpoint() {
    // (0 + 3*0 + 3*100 + 100) / 8 = 50, (0 + 3*100 + 3*100 + 0) / 8 = 75
    assert!(point_approx_eq(arch().get(0.5), Point::new(50.0, 75.0)));
}

#[test]
fn derivative_of_line_is_constant() {
    let c = line(0.0, 0.0, 100.0, 50.0);
    assert!(point_approx_eq(c.derivative(0.0), Point::new(100.0, 50.0)));
    assert!(point_approx_eq(c.derivative(0.7), Point::new(100.0, 50.0)));
}

#[test]
fn derivative_at_cubic_ends() {
    let c = arch();
    assert!(point_approx_eq(c.derivative(0.0), Point::new(0.0, 300.0)));
    assert!(point_approx_eq(c.derivative(1.0), Point::new(0.0, -300.0)));
}

#[test]
fn curvature_of_line_is_zero() {
    assert_eq!(line(0.0, 0.0, 10.0, 10.0).curvature(0.3), 0.0);
}

#[test]
fn curvature_sign_follows_turn() {
    // The arch turns clockwise (left to right over the top).
    assert!(arch().curvature(0.5) < 0.0);
    let mirrored = BezierCurve::new(vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, -100.0),
        Point::new(100.0, -100.0),
        Point::new(100.0, 0.0),
    ])
    .unwrap();
    assert!(mirrored.curvature(0.5) > 0.0);
}

#[test]
fn curvature_of_quadratic_apex() {
    // y = x^2 style parabola; curvature at apex is 2a for y = a x^2.
    let c = BezierCurve::through(Point::new(-1.0, 1.0), &[Point::new(0.0, -1.0)], Point::new(1.0, 1.0)).unwrap();
    assert!(approx_eq(c.curvature(0.5), 2.0));
}

#[test]
fn unit_tangent_is_normalized() {
    let t = arch().unit_tangent(0.0);
    assert!(point_approx_eq(t, Point::new(0.0, 1.0)));
}

#[test]
fn unit_tangent_falls_back_when_derivative_vanishes() {
    let c = BezierCurve::through(Point::new(0.0, 0.0), &[Point::new(0.0, 0.0)], Point::new(10.0, 0.0)).unwrap();
    assert!(point_approx_eq(c.unit_tangent(0.0), Point::new(1.0, 0.0)));
}

// =============================================================
// Split
// =============================================================

#[test]
fn split_halves_meet_at_split_point() {
    let c = arch();
    let (left, right) = c.split(0.3);
    let left = BezierCurve::new(left).unwrap();
    let right = BezierCurve::new(right).unwrap();
    assert!(point_approx_eq(left.end(), c.get(0.3)));
    assert!(point_approx_eq(right.start(), c.get(0.3)));
    assert!(point_approx_eq(left.start(), c.start()));
    assert!(point_approx_eq(right.end(), c.end()));
}

#[test]
fn split_halves_trace_original() {
    let c = arch();
    let (left, right) = c.split(0.5);
    let left = BezierCurve::new(left).unwrap();
    let right = BezierCurve::new(right).unwrap();
    assert!(point_approx_eq(left.get(0.5), c.get(0.25)));
    assert!(point_approx_eq(right.get(0.5), c.get(0.75)));
}

#[test]
fn split_preserves_degree() {
    let (left, right) = arch().split(0.5);
    assert_eq!(left.len(), 4);
    assert_eq!(right.len(), 4);
}

// =============================================================
// Bounds, length, lut
// =============================================================

#[test]
fn aabb_of_line() {
    let b = line(10.0, 20.0, -5.0, 0.0).aabb();
    assert_eq!(b.min, Point::new(-5.0, 0.0));
    assert_eq!(b.max, Point::new(10.0, 20.0));
}

#[test]
fn aabb_is_tighter_than_control_hull() {
    let b = arch().aabb();
    assert!(approx_eq(b.max.y, 75.0));
    assert!(approx_eq(b.min.x, 0.0));
    assert!(approx_eq(b.max.x, 100.0));
}

#[test]
fn length_of_line() {
    assert!((line(0.0, 0.0, 30.0, 40.0).length() - 50.0).abs() < 1e-9);
}

#[test]
fn length_of_quarter_circle_approximation() {
    // Standard cubic approximation of a unit quarter circle, scaled by 100.
    let k = 0.552_284_749_8 * 100.0;
    let c = BezierCurve::new(vec![
        Point::new(100.0, 0.0),
        Point::new(100.0, k),
        Point::new(k, 100.0),
        Point::new(0.0, 100.0),
    ])
    .unwrap();
    let expected = std::f64::consts::FRAC_PI_2 * 100.0;
    assert!((c.length() - expected).abs() < 0.1);
}

#[test]
fn lut_has_steps_plus_one_points() {
    let lut = line(0.0, 0.0, 10.0, 0.0).lut(10);
    assert_eq!(lut.len(), 11);
    assert!(point_approx_eq(lut[5], Point::new(5.0, 0.0)));
}

// =============================================================
// Projection
// =============================================================

#[test]
fn project_onto_line_midpoint() {
    let p = line(0.0, 0.0, 100.0, 0.0).project(Point::new(50.0, 3.0));
    assert!((p.t - 0.5).abs() < 1e-4);
    assert!((p.distance - 3.0).abs() < 1e-6);
}

#[test]
fn project_clamps_to_endpoints() {
    let p = line(0.0, 0.0, 100.0, 0.0).project(Point::new(-20.0, 0.0));
    assert_eq!(p.t, 0.0);
    assert!(approx_eq(p.distance, 20.0));
}

#[test]
fn project_onto_curve_apex() {
    let p = arch().project(Point::new(50.0, 90.0));
    assert!((p.t - 0.5).abs() < 1e-3);
    assert!((p.distance - 15.0).abs() < 1e-3);
}

// =============================================================
// Intersections
// =============================================================

#[test]
fn crossing_lines_intersect_once() {
    let a = line(0.0, 0.0, 100.0, 100.0);
    let b = line(0.0, 100.0, 100.0, 0.0);
    let hits = a.intersections(&b, 0.5);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].self_t - 0.5).abs() < 0.01);
    assert!((hits[0].other_t - 0.5).abs() < 0.01);
}

#[test]
fn parallel_lines_do_not_intersect() {
    let a = line(0.0, 0.0, 100.0, 0.0);
    let b = line(0.0, 10.0, 100.0, 10.0);
    assert!(a.intersections(&b, 0.5).is_empty());
}

#[test]
fn arch_crosses_horizontal_line_twice() {
    let a = arch();
    let b = line(-10.0, 50.0, 110.0, 50.0);
    let hits = a.intersections(&b, 0.5);
    assert_eq!(hits.len(), 2);
    for hit in hits {
        assert!((a.get(hit.self_t).y - 50.0).abs() < 1.0);
    }
}

#[test]
fn touching_ends_report_a_hit_near_the_joint() {
    let a = line(0.0, 0.0, 100.0, 0.0);
    let b = line(100.0, 0.0, 100.0, 100.0);
    let hits = a.intersections(&b, 0.5);
    assert_eq!(hits.len(), 1);
    assert!(hits[0].self_t > 0.99);
    assert!(hits[0].other_t < 0.01);
}

// =============================================================
// Offsets
// =============================================================

#[test]
fn offset_polyline_runs_parallel_to_line() {
    let c = line(0.0, 0.0, 100.0, 0.0);
    let left = c.offset_polyline(5.0, 4);
    let right = c.offset_polyline(-5.0, 4);
    assert_eq!(left.len(), 5);
    assert!(left.iter().all(|p| approx_eq(p.y, 5.0)));
    assert!(right.iter().all(|p| approx_eq(p.y, -5.0)));
    assert!(approx_eq(left[4].x, 100.0));
}
