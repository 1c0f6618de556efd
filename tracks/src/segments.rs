//! Segment store: curves between joints, their collisions and the spatial index.
//!
//! Every live segment owns one entry in the bounding-box index, keyed by the
//! curve's box at creation time. Creation computes collisions against all
//! segments whose boxes overlap; destruction removes exactly the one index
//! entry that creation added.

#[cfg(test)]
#[path = "segments_test.rs"]
mod segments_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::consts::{
    INITIAL_SLOT_CAPACITY, INTERSECTION_THRESHOLD, OFFSET_MAX_SAMPLES, OFFSET_MIN_SAMPLES, OFFSET_SAMPLE_SPACING,
};
use crate::curve::BezierCurve;
use crate::error::TrackError;
use crate::joint::{Elevation, JointId};
use crate::point::Point;
use crate::projection::ProjectionInfo;
use crate::slots::{EntitySlots, SlotError};
use crate::spatial::{Aabb, SpatialIndex};

/// Stable handle of a live segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub usize);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Elevations of a segment's two ends, copied from its joints at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentElevation {
    pub from: Elevation,
    pub to: Elevation,
}

impl SegmentElevation {
    #[must_use]
    pub fn new(from: Elevation, to: Elevation) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn min_level(self) -> i8 {
        self.from.level().min(self.to.level())
    }

    #[must_use]
    pub fn max_level(self) -> i8 {
        self.from.level().max(self.to.level())
    }

    #[must_use]
    pub fn average_level(self) -> f64 {
        f64::from(i16::from(self.from.level()) + i16::from(self.to.level())) / 2.0
    }
}

/// The other side of a recorded crossing.
///
/// `curve` is a copy taken when the crossing was found. `segment` may since
/// have been removed, and its handle reused by an unrelated segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollidingCurve {
    pub segment: SegmentId,
    pub curve: BezierCurve,
    /// Parameter on `curve`.
    pub t_val: f64,
}

/// A crossing with another segment that existed when this one was created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collision {
    /// Parameter on this segment's curve.
    pub self_t: f64,
    pub another_curve: CollidingCurve,
}

/// Rail outlines at half a gauge on either side of the centre line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Offsets {
    /// Left of the direction of travel.
    pub positive: Vec<Point>,
    pub negative: Vec<Point>,
}

/// A curve between two joints.
///
/// Collisions are a snapshot taken at creation; segments created later do
/// not append to an existing segment's list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSegment {
    pub curve: BezierCurve,
    pub t0_joint: JointId,
    pub t1_joint: JointId,
    pub elevation: SegmentElevation,
    pub gauge: f64,
    pub bounds: Aabb,
    /// Includes the touch at a shared joint, reported near `t = 0` or `t = 1`
    /// on both curves, so a segment grown from a joint records its neighbours.
    pub collision: Vec<Collision>,
    pub offsets: Offsets,
}

impl TrackSegment {
    /// The endpoint opposite `joint`, if `joint` is one of this segment's ends.
    #[must_use]
    pub fn other_joint(&self, joint: JointId) -> Option<JointId> {
        if joint == self.t0_joint {
            Some(self.t1_joint)
        } else if joint == self.t1_joint {
            Some(self.t0_joint)
        } else {
            None
        }
    }

    /// Curve parameter at which this segment touches `joint`.
    #[must_use]
    pub fn t_at_joint(&self, joint: JointId) -> Option<f64> {
        if joint == self.t0_joint {
            Some(0.0)
        } else if joint == self.t1_joint {
            Some(1.0)
        } else {
            None
        }
    }

    fn projection_info(&self, id: SegmentId, at_t: f64, projection_point: Point) -> ProjectionInfo {
        ProjectionInfo {
            segment: id,
            t0_joint: self.t0_joint,
            t1_joint: self.t1_joint,
            at_t,
            projection_point,
            tangent: self.curve.unit_tangent(at_t),
            curvature: self.curve.curvature(at_t),
        }
    }
}

/// Parameters for building a new segment.
#[derive(Debug, Clone)]
pub struct NewSegment {
    pub curve: BezierCurve,
    pub t0_joint: JointId,
    pub t1_joint: JointId,
    pub elevation: SegmentElevation,
    pub gauge: f64,
}

/// Store of live segments plus the index over their bounds.
#[derive(Debug)]
pub struct TrackCurveManager {
    segments: EntitySlots<TrackSegment>,
    index: SpatialIndex<SegmentId>,
    intersection_threshold: f64,
}

impl TrackCurveManager {
    #[must_use]
    pub fn new(initial_capacity: usize, max_segments: Option<usize>, intersection_threshold: f64) -> Self {
        Self {
            segments: EntitySlots::with_limit(initial_capacity, max_segments),
            index: SpatialIndex::new(),
            intersection_threshold,
        }
    }

    /// Store a segment, record its collisions and index its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::CapacityExceeded`] when the segment cap is reached.
    pub fn create_curve_with_joints(&mut self, new: NewSegment) -> Result<SegmentId, SlotError> {
        self.create_curve_excluding(new, None)
    }

    /// As [`Self::create_curve_with_joints`], but ignores `exclude` when
    /// collecting collisions. Used while a segment is being replaced by its
    /// two halves.
    pub(crate) fn create_curve_excluding(
        &mut self,
        new: NewSegment,
        exclude: Option<SegmentId>,
    ) -> Result<SegmentId, SlotError> {
        let NewSegment { curve, t0_joint, t1_joint, elevation, gauge } = new;
        let bounds = curve.aabb();
        let collision = self.collisions_for(&curve, bounds, exclude);
        let offsets = offsets_for(&curve, gauge);

        let collisions = collision.len();
        let segment = TrackSegment { curve, t0_joint, t1_joint, elevation, gauge, bounds, collision, offsets };
        let id = SegmentId(self.segments.create(segment)?);
        self.index.insert(bounds, id);
        debug!(segment = %id, %t0_joint, %t1_joint, collisions, "segment created");
        Ok(id)
    }

    fn collisions_for(&self, curve: &BezierCurve, bounds: Aabb, exclude: Option<SegmentId>) -> Vec<Collision> {
        let mut candidates = self.index.search(bounds);
        candidates.sort_unstable();
        candidates.dedup();

        let mut collision = Vec::new();
        for other_id in candidates {
            if Some(other_id) == exclude {
                continue;
            }
            let Some(other) = self.segments.get(other_id.0) else {
                continue;
            };
            for hit in curve.intersections(&other.curve, self.intersection_threshold) {
                collision.push(Collision {
                    self_t: hit.self_t,
                    another_curve: CollidingCurve { segment: other_id, curve: other.curve.clone(), t_val: hit.other_t },
                });
            }
        }
        collision
    }

    /// Remove a segment and its index entry.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::SegmentNotFound`] if `id` is not live, and
    /// [`TrackError::IndexOutOfSync`] if the index has no entry for it. In the
    /// latter case the segment is left in place.
    pub fn destroy_curve(&mut self, id: SegmentId) -> Result<TrackSegment, TrackError> {
        let Some(segment) = self.segments.get(id.0) else {
            return Err(TrackError::SegmentNotFound(id));
        };
        let removed = self.index.remove(segment.bounds, &id);
        debug_assert!(removed, "segment {id} missing from spatial index");
        if !removed {
            error!(segment = %id, "segment missing from spatial index");
            return Err(TrackError::IndexOutOfSync(id));
        }
        let segment = self.segments.destroy(id.0)?;
        debug!(segment = %id, "segment destroyed");
        Ok(segment)
    }

    #[must_use]
    pub fn get_track_segment_with_joints(&self, id: SegmentId) -> Option<&TrackSegment> {
        self.segments.get(id.0)
    }

    /// Every live segment with its handle, in ascending handle order.
    #[must_use]
    pub fn get_track_segments_with_joints(&self) -> Vec<(SegmentId, &TrackSegment)> {
        self.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &TrackSegment)> {
        self.segments.living_with_index().map(|(index, segment)| (SegmentId(index), segment))
    }

    /// Segments whose bounds overlap `bounds`, in ascending handle order.
    #[must_use]
    pub fn segments_in(&self, bounds: Aabb) -> Vec<SegmentId> {
        let mut found = self.index.search(bounds);
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Closest point on any segment within `max_distance` of `point`.
    ///
    /// Only segments whose bounds meet the square of `half_extent` around
    /// `point` are considered.
    #[must_use]
    pub fn project_on_curve(&self, point: Point, max_distance: f64, half_extent: f64) -> Option<ProjectionInfo> {
        let mut best: Option<(f64, ProjectionInfo)> = None;
        for id in self.segments_in(Aabb::around(point, half_extent)) {
            let Some(segment) = self.segments.get(id.0) else {
                continue;
            };
            let projection = segment.curve.project(point);
            if projection.distance > max_distance {
                continue;
            }
            if best.as_ref().is_none_or(|(distance, _)| projection.distance < *distance) {
                best = Some((projection.distance, segment.projection_info(id, projection.t, projection.point)));
            }
        }
        best.map(|(_, info)| info)
    }

    /// Closest segment for which `point` lies outside the rails but within
    /// `max_distance` of the centre line.
    ///
    /// The returned projection point sits one full gauge from the centre line
    /// on the side of `point`.
    #[must_use]
    pub fn on_track_segment_edge(&self, point: Point, max_distance: f64, half_extent: f64) -> Option<ProjectionInfo> {
        let mut best: Option<(f64, ProjectionInfo)> = None;
        for id in self.segments_in(Aabb::around(point, half_extent)) {
            let Some(segment) = self.segments.get(id.0) else {
                continue;
            };
            let projection = segment.curve.project(point);
            if projection.distance < segment.gauge / 2.0 || projection.distance > max_distance {
                continue;
            }
            if best.as_ref().is_some_and(|(distance, _)| projection.distance >= *distance) {
                continue;
            }
            let tangent = segment.curve.unit_tangent(projection.t);
            let normal = if tangent.cross(point - projection.point) > 0.0 {
                tangent.perpendicular()
            } else {
                -tangent.perpendicular()
            };
            let outward = projection.point + normal * segment.gauge;
            best = Some((projection.distance, segment.projection_info(id, projection.t, outward)));
        }
        best.map(|(_, info)| info)
    }

    /// Sum of the arc lengths of every live segment.
    #[must_use]
    pub fn full_length(&self) -> f64 {
        self.segments.living().map(|segment| segment.curve.length()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Entries currently held by the spatial index.
    #[must_use]
    pub fn indexed_len(&self) -> usize {
        self.index.len()
    }
}

impl Default for TrackCurveManager {
    fn default() -> Self {
        Self::new(INITIAL_SLOT_CAPACITY, None, INTERSECTION_THRESHOLD)
    }
}

fn offsets_for(curve: &BezierCurve, gauge: f64) -> Offsets {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let wanted = (curve.length() / OFFSET_SAMPLE_SPACING).round() as usize;
    let samples = wanted.clamp(OFFSET_MIN_SAMPLES, OFFSET_MAX_SAMPLES);
    let half = gauge / 2.0;
    Offsets { positive: curve.offset_polyline(half, samples), negative: curve.offset_polyline(-half, samples) }
}
