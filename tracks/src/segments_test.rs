#![allow(clippy::float_cmp)]

use super::*;

fn line(a: (f64, f64), b: (f64, f64)) -> BezierCurve {
    BezierCurve::through(Point::new(a.0, a.1), &[], Point::new(b.0, b.1)).unwrap()
}

fn new_segment(curve: BezierCurve, t0: usize, t1: usize) -> NewSegment {
    NewSegment {
        curve,
        t0_joint: JointId(t0),
        t1_joint: JointId(t1),
        elevation: SegmentElevation::default(),
        gauge: 10.0,
    }
}

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

// =============================================================
// create / destroy
// =============================================================

#[test]
fn create_indexes_segment() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.indexed_len(), 1);

    let seg = mgr.get_track_segment_with_joints(id).unwrap();
    assert_eq!(seg.t0_joint, JointId(0));
    assert_eq!(seg.t1_joint, JointId(1));
    assert!(seg.collision.is_empty());
    assert_eq!(seg.bounds, seg.curve.aabb());
}

#[test]
fn destroy_removes_index_entry() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let removed = mgr.destroy_curve(id).unwrap();
    assert_eq!(removed.t1_joint, JointId(1));
    assert!(mgr.is_empty());
    assert_eq!(mgr.indexed_len(), 0);
    assert!(mgr.get_track_segment_with_joints(id).is_none());
}

#[test]
fn destroy_twice_reports_missing_segment() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    mgr.destroy_curve(id).unwrap();
    assert_eq!(mgr.destroy_curve(id), Err(TrackError::SegmentNotFound(id)));
}

#[test]
fn destroy_one_of_two_identical_boxes_keeps_other() {
    let mut mgr = TrackCurveManager::default();
    let a = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let b = mgr.create_curve_with_joints(new_segment(line((100.0, 0.0), (0.0, 0.0)), 2, 3)).unwrap();
    mgr.destroy_curve(a).unwrap();
    assert_eq!(mgr.indexed_len(), 1);
    assert_eq!(mgr.segments_in(Aabb::around(Point::new(50.0, 0.0), 1.0)), vec![b]);
}

#[test]
fn capped_store_refuses_extra_segment() {
    let mut mgr = TrackCurveManager::new(1, Some(1), 0.5);
    mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (10.0, 0.0)), 0, 1)).unwrap();
    let err = mgr.create_curve_with_joints(new_segment(line((0.0, 5.0), (10.0, 5.0)), 2, 3)).unwrap_err();
    assert_eq!(err, SlotError::CapacityExceeded { max: 1 });
    assert_eq!(mgr.indexed_len(), 1);
}

// =============================================================
// collisions
// =============================================================

#[test]
fn later_segment_records_crossing() {
    let mut mgr = TrackCurveManager::default();
    let a = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let b = mgr.create_curve_with_joints(new_segment(line((50.0, -50.0), (50.0, 50.0)), 2, 3)).unwrap();

    let seg_b = mgr.get_track_segment_with_joints(b).unwrap();
    assert_eq!(seg_b.collision.len(), 1);
    let hit = &seg_b.collision[0];
    assert_eq!(hit.another_curve.segment, a);
    assert!(approx(hit.self_t, 0.5, 0.02));
    assert!(approx(hit.another_curve.t_val, 0.5, 0.02));

    // Snapshot semantics: the earlier segment is not updated.
    assert!(mgr.get_track_segment_with_joints(a).unwrap().collision.is_empty());
}

#[test]
fn crossing_keeps_curve_after_handle_reuse() {
    let mut mgr = TrackCurveManager::default();
    let a = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let b = mgr.create_curve_with_joints(new_segment(line((50.0, -50.0), (50.0, 50.0)), 2, 3)).unwrap();

    mgr.destroy_curve(a).unwrap();
    let c = mgr.create_curve_with_joints(new_segment(line((500.0, 500.0), (600.0, 600.0)), 4, 5)).unwrap();
    assert_eq!(c, a);

    let hit = &mgr.get_track_segment_with_joints(b).unwrap().collision[0];
    assert_eq!(hit.another_curve.curve.start(), Point::new(0.0, 0.0));
    assert_eq!(hit.another_curve.curve.end(), Point::new(100.0, 0.0));
    let crossing = hit.another_curve.curve.get(hit.another_curve.t_val);
    assert!(approx(crossing.x, 50.0, 1.0));
    assert!(approx(crossing.y, 0.0, 1e-9));
}

#[test]
fn shared_endpoint_records_a_touch() {
    let mut mgr = TrackCurveManager::default();
    let a = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let b = mgr.create_curve_with_joints(new_segment(line((100.0, 0.0), (100.0, 100.0)), 1, 2)).unwrap();

    let seg_b = mgr.get_track_segment_with_joints(b).unwrap();
    assert!(!seg_b.collision.is_empty());
    assert!(seg_b.collision.iter().all(|hit| hit.another_curve.segment == a));
    assert!(seg_b.collision.iter().all(|hit| hit.self_t < 0.1 && hit.another_curve.t_val > 0.9));
}

#[test]
fn excluded_segment_is_not_a_collision() {
    let mut mgr = TrackCurveManager::default();
    let a = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let b = mgr.create_curve_excluding(new_segment(line((50.0, -50.0), (50.0, 50.0)), 2, 3), Some(a)).unwrap();
    assert!(mgr.get_track_segment_with_joints(b).unwrap().collision.is_empty());
}

#[test]
fn disjoint_boxes_do_not_collide() {
    let mut mgr = TrackCurveManager::default();
    mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (10.0, 0.0)), 0, 1)).unwrap();
    let b = mgr.create_curve_with_joints(new_segment(line((0.0, 100.0), (10.0, 100.0)), 2, 3)).unwrap();
    assert!(mgr.get_track_segment_with_joints(b).unwrap().collision.is_empty());
}

// =============================================================
// offsets
// =============================================================

#[test]
fn offsets_sit_half_a_gauge_either_side() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let offsets = &mgr.get_track_segment_with_joints(id).unwrap().offsets;

    // 100 units at one sample per 5 units.
    assert_eq!(offsets.positive.len(), 21);
    assert_eq!(offsets.negative.len(), 21);
    assert!(offsets.positive.iter().all(|p| approx(p.y, 5.0, 1e-9)));
    assert!(offsets.negative.iter().all(|p| approx(p.y, -5.0, 1e-9)));
}

#[test]
fn short_segment_uses_minimum_samples() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (3.0, 0.0)), 0, 1)).unwrap();
    assert_eq!(mgr.get_track_segment_with_joints(id).unwrap().offsets.positive.len(), OFFSET_MIN_SAMPLES + 1);
}

// =============================================================
// projection
// =============================================================

#[test]
fn project_on_curve_finds_close_point() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();

    let info = mgr.project_on_curve(Point::new(30.0, 0.05), 10.0, 0.1).unwrap();
    assert_eq!(info.segment, id);
    assert!(approx(info.at_t, 0.3, 1e-3));
    assert!(approx(info.projection_point.x, 30.0, 0.1));
    assert!(approx(info.tangent.x, 1.0, 1e-9));
    assert_eq!(info.curvature, 0.0);
}

#[test]
fn project_on_curve_misses_outside_search_box() {
    let mut mgr = TrackCurveManager::default();
    mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    assert!(mgr.project_on_curve(Point::new(30.0, 3.0), 10.0, 0.1).is_none());
}

#[test]
fn project_on_curve_prefers_closest_segment() {
    let mut mgr = TrackCurveManager::default();
    mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let near = mgr.create_curve_with_joints(new_segment(line((0.0, 4.0), (100.0, 4.0)), 2, 3)).unwrap();
    let info = mgr.project_on_curve(Point::new(50.0, 3.0), 10.0, 5.0).unwrap();
    assert_eq!(info.segment, near);
}

#[test]
fn edge_hit_pushes_point_outward_on_left() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let info = mgr.on_track_segment_edge(Point::new(50.0, 8.0), 30.0, 10.0).unwrap();
    assert_eq!(info.segment, id);
    assert!(approx(info.projection_point.x, 50.0, 0.1));
    assert!(approx(info.projection_point.y, 10.0, 1e-6));
}

#[test]
fn edge_hit_pushes_point_outward_on_right() {
    let mut mgr = TrackCurveManager::default();
    mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let info = mgr.on_track_segment_edge(Point::new(50.0, -8.0), 30.0, 10.0).unwrap();
    assert!(approx(info.projection_point.y, -10.0, 1e-6));
}

#[test]
fn edge_ignores_points_between_rails() {
    let mut mgr = TrackCurveManager::default();
    mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    assert!(mgr.on_track_segment_edge(Point::new(50.0, 2.0), 30.0, 10.0).is_none());
}

// =============================================================
// aggregates
// =============================================================

#[test]
fn full_length_sums_live_segments() {
    let mut mgr = TrackCurveManager::default();
    mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (100.0, 0.0)), 0, 1)).unwrap();
    let b = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (0.0, 50.0)), 0, 2)).unwrap();
    assert!(approx(mgr.full_length(), 150.0, 1e-6));
    mgr.destroy_curve(b).unwrap();
    assert!(approx(mgr.full_length(), 100.0, 1e-6));
}

#[test]
fn segment_elevation_levels() {
    let elevation = SegmentElevation::new(Elevation::Sub1, Elevation::Above2);
    assert_eq!(elevation.min_level(), -1);
    assert_eq!(elevation.max_level(), 2);
    assert_eq!(elevation.average_level(), 0.5);
}

#[test]
fn other_joint_and_t_at_joint() {
    let mut mgr = TrackCurveManager::default();
    let id = mgr.create_curve_with_joints(new_segment(line((0.0, 0.0), (10.0, 0.0)), 4, 7)).unwrap();
    let seg = mgr.get_track_segment_with_joints(id).unwrap();
    assert_eq!(seg.other_joint(JointId(4)), Some(JointId(7)));
    assert_eq!(seg.other_joint(JointId(9)), None);
    assert_eq!(seg.t_at_joint(JointId(7)), Some(1.0));
}

#[test]
fn segment_id_displays_with_prefix() {
    assert_eq!(SegmentId(12).to_string(), "S12");
}
