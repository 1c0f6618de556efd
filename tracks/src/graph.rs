//! The track graph: joints linked by curved segments.
//!
//! Every mutating operation either leaves these invariants holding or returns
//! an error with the graph as it was (pieces built before a late failure are
//! rolled back):
//!
//! - every neighbour of a joint sits in exactly one of its two direction buckets
//! - links are symmetric and realised by the same segment on both sides
//! - a joint with no connections does not exist
//!
//! The graph owns both stores. Callers get read-only views; all mutation goes
//! through the methods here.

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;

use tracing::{debug, error, warn};

use crate::config::TrackGraphConfig;
use crate::consts::MAX_EXTEND_ANGLE_DEG;
use crate::curve::BezierCurve;
use crate::error::TrackError;
use crate::joint::{Bucket, Connection, Elevation, JointId, TrackJoint, TrackJointManager};
use crate::point::{Point, direction_aligned_to_tangent, normalize_angle_deg, same_direction};
use crate::projection::{JointHit, ProjectionInfo, ProjectionResult};
use crate::segments::{NewSegment, SegmentElevation, SegmentId, TrackCurveManager, TrackSegment};

#[derive(Debug)]
pub struct TrackGraph {
    joints: TrackJointManager,
    curves: TrackCurveManager,
    config: TrackGraphConfig,
}

impl Default for TrackGraph {
    fn default() -> Self {
        Self::new(TrackGraphConfig::default())
    }
}

impl TrackGraph {
    /// Empty graph using `config`. The config is taken as given; call
    /// [`TrackGraphConfig::validate`] first if it came from user input.
    #[must_use]
    pub fn new(config: TrackGraphConfig) -> Self {
        Self {
            joints: TrackJointManager::new(config.initial_capacity, config.max_entities),
            curves: TrackCurveManager::new(
                config.initial_capacity,
                config.max_entities,
                config.intersection_threshold,
            ),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TrackGraphConfig {
        &self.config
    }

    #[must_use]
    pub fn joints(&self) -> &TrackJointManager {
        &self.joints
    }

    #[must_use]
    pub fn curves(&self) -> &TrackCurveManager {
        &self.curves
    }

    // --- Construction ---

    /// Lay a free-standing segment with two new ground-level joints.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Curve`] for an unusable control polygon and
    /// [`TrackError::Slot`] when a configured entity cap is reached.
    pub fn create_new_track_segment(
        &mut self,
        start: Point,
        end: Point,
        control_points: &[Point],
    ) -> Result<SegmentId, TrackError> {
        self.create_new_track_segment_with_elevation(start, end, control_points, Elevation::Ground, Elevation::Ground)
    }

    /// Lay a free-standing segment whose two new joints sit at the given elevations.
    ///
    /// The start joint files the end joint under its tangent bucket, the end
    /// joint files the start under its reverse bucket.
    ///
    /// # Errors
    ///
    /// See [`Self::create_new_track_segment`].
    pub fn create_new_track_segment_with_elevation(
        &mut self,
        start: Point,
        end: Point,
        control_points: &[Point],
        start_elevation: Elevation,
        end_elevation: Elevation,
    ) -> Result<SegmentId, TrackError> {
        let curve = BezierCurve::through(start, control_points, end)
            .inspect_err(|e| warn!(error = %e, "rejected track segment curve"))?;

        let t0 = self.joints.create_joint(start, curve.unit_tangent(0.0), start_elevation)?;
        let t1 = match self.joints.create_joint(end, curve.unit_tangent(1.0), end_elevation) {
            Ok(id) => id,
            Err(e) => {
                self.discard_joint(t0);
                return Err(e.into());
            }
        };
        let segment = match self.add_segment(curve, t0, t1, self.config.default_gauge, None) {
            Ok(id) => id,
            Err(e) => {
                self.discard_joint(t1);
                self.discard_joint(t0);
                return Err(e);
            }
        };

        self.link(t0, Bucket::Tangent, t1, Bucket::ReverseTangent, segment);
        debug!(%segment, %t0, %t1, "track segment created");
        Ok(segment)
    }

    /// Lay a segment from an existing joint to a new joint at `end`.
    ///
    /// The start joint files the new joint under the bucket whose direction
    /// agrees (by cosine sign) with the curve's initial derivative.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] if `start` is not live, plus the
    /// curve and capacity errors of [`Self::create_new_track_segment`].
    pub fn branch_to_new_joint(
        &mut self,
        start: JointId,
        end: Point,
        control_points: &[Point],
    ) -> Result<SegmentId, TrackError> {
        self.grow_from(start, end, control_points)
            .inspect_err(|e| warn!(joint = %start, error = %e, "branch refused"))
    }

    /// Continue track out of a joint's open side.
    ///
    /// The joint must have an empty direction bucket, and `end` must lie
    /// strictly within 90° of that open direction.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NoEmptyDirection`] when both buckets are occupied,
    /// [`TrackError::InvalidExtendDirection`] when `end` is behind the open
    /// side, plus everything [`Self::branch_to_new_joint`] returns.
    pub fn extend_track_from_joint(
        &mut self,
        start: JointId,
        end: Point,
        control_points: &[Point],
    ) -> Result<SegmentId, TrackError> {
        self.check_extension(start, end)
            .and_then(|()| self.grow_from(start, end, control_points))
            .inspect_err(|e| warn!(joint = %start, error = %e, "extension refused"))
    }

    fn check_extension(&self, start: JointId, end: Point) -> Result<(), TrackError> {
        let joint = self.joint(start)?;
        let open = empty_direction(joint).ok_or(TrackError::NoEmptyDirection(start))?;
        let angle_deg = normalize_angle_deg(open.angle_to(end - joint.position()).to_degrees());
        if angle_deg.abs() < MAX_EXTEND_ANGLE_DEG {
            Ok(())
        } else {
            Err(TrackError::InvalidExtendDirection { joint: start, angle_deg })
        }
    }

    fn grow_from(&mut self, start: JointId, end: Point, control_points: &[Point]) -> Result<SegmentId, TrackError> {
        let joint = self.joint(start)?;
        let (origin, tangent, elevation) = (joint.position(), joint.tangent(), joint.elevation());

        let curve = BezierCurve::through(origin, control_points, end)?;
        let start_bucket =
            if same_direction(curve.derivative(0.0), tangent) { Bucket::Tangent } else { Bucket::ReverseTangent };

        let new_joint = self.joints.create_joint(end, curve.unit_tangent(1.0), elevation)?;
        let segment = match self.add_segment(curve, start, new_joint, self.config.default_gauge, None) {
            Ok(id) => id,
            Err(e) => {
                self.discard_joint(new_joint);
                return Err(e);
            }
        };

        self.link(start, start_bucket, new_joint, Bucket::ReverseTangent, segment);
        debug!(%segment, from = %start, to = %new_joint, ?start_bucket, "track grown from joint");
        Ok(segment)
    }

    /// Link two existing joints with a new segment.
    ///
    /// Each endpoint classifies the other with the half-plane test, so a curve
    /// leaving exactly perpendicular to a joint's tangent lands in its reverse
    /// bucket.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::SelfConnection`] for `a == b`,
    /// [`TrackError::AlreadyConnected`] if the joints are adjacent, and
    /// [`TrackError::JointNotFound`] for a dead handle.
    pub fn connect_joints(&mut self, a: JointId, b: JointId, control_points: &[Point]) -> Result<SegmentId, TrackError> {
        self.join(a, b, control_points).inspect_err(|e| warn!(%a, %b, error = %e, "connection refused"))
    }

    fn join(&mut self, a: JointId, b: JointId, control_points: &[Point]) -> Result<SegmentId, TrackError> {
        if a == b {
            return Err(TrackError::SelfConnection(a));
        }
        let joint_a = self.joint(a)?;
        let joint_b = self.joint(b)?;
        if joint_a.segment_to(b).is_some() {
            return Err(TrackError::AlreadyConnected(a, b));
        }

        let curve = BezierCurve::through(joint_a.position(), control_points, joint_b.position())?;
        let a_bucket = if direction_aligned_to_tangent(curve.derivative(0.0), joint_a.tangent()) {
            Bucket::Tangent
        } else {
            Bucket::ReverseTangent
        };
        let b_bucket = if direction_aligned_to_tangent(-curve.derivative(1.0), joint_b.tangent()) {
            Bucket::Tangent
        } else {
            Bucket::ReverseTangent
        };

        let segment = self.add_segment(curve, a, b, self.config.default_gauge, None)?;
        self.link(a, a_bucket, b, b_bucket, segment);
        debug!(%segment, %a, %b, "joints connected");
        Ok(segment)
    }

    // --- Splitting ---

    /// Split the segment linking `start` and `end` at `at_t`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotConnected`] if the joints are not adjacent,
    /// plus everything [`Self::insert_joint_into_track_segment_using_track_number`]
    /// returns.
    pub fn insert_joint_into_track_segment(
        &mut self,
        start: JointId,
        end: JointId,
        at_t: f64,
    ) -> Result<JointId, TrackError> {
        let segment = self
            .joint(start)
            .and_then(|joint| joint.segment_to(end).ok_or(TrackError::NotConnected(start, end)))
            .inspect_err(|e| warn!(%start, %end, error = %e, "joint insertion refused"))?;
        self.insert_joint_into_track_segment_using_track_number(segment, at_t)
    }

    /// Split `segment` at `at_t`, replacing it with two segments meeting at a
    /// new joint, and return that joint.
    ///
    /// The new joint's tangent follows the curve at the split point, so the
    /// original `t0` end lands in its reverse bucket and the `t1` end in its
    /// tangent bucket. It takes the elevation of the nearer original endpoint.
    /// The original endpoints file the new joint in the bucket that held the
    /// far end before the split.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::InvalidSplitParameter`] unless `0 < at_t < 1`,
    /// [`TrackError::SegmentNotFound`] for a dead handle, and
    /// [`TrackError::Slot`] if the cap leaves no room for the pieces. On error
    /// the graph is unchanged.
    pub fn insert_joint_into_track_segment_using_track_number(
        &mut self,
        segment: SegmentId,
        at_t: f64,
    ) -> Result<JointId, TrackError> {
        self.split_segment(segment, at_t)
            .inspect_err(|e| warn!(%segment, at_t, error = %e, "joint insertion refused"))
    }

    fn split_segment(&mut self, segment: SegmentId, at_t: f64) -> Result<JointId, TrackError> {
        if !(at_t > 0.0 && at_t < 1.0) {
            return Err(TrackError::InvalidSplitParameter(at_t));
        }
        let original = self.segment(segment)?;
        let (t0, t1, gauge) = (original.t0_joint, original.t1_joint, original.gauge);
        let curve = original.curve.clone();
        let t0_joint = self.joint(t0)?;
        let t1_joint = self.joint(t1)?;

        // The ends keep the side the old link sat on.
        let t0_bucket = t0_joint.direction().bucket_of(t1).unwrap_or_else(|| {
            if same_direction(curve.derivative(0.0), t0_joint.tangent()) { Bucket::Tangent } else { Bucket::ReverseTangent }
        });
        let t1_bucket = t1_joint.direction().bucket_of(t0).unwrap_or_else(|| {
            if same_direction(-curve.derivative(1.0), t1_joint.tangent()) { Bucket::Tangent } else { Bucket::ReverseTangent }
        });
        let elevation = if at_t < 0.5 { t0_joint.elevation() } else { t1_joint.elevation() };

        let (left_points, right_points) = curve.split(at_t);
        let left = BezierCurve::new(left_points)?;
        let right = BezierCurve::new(right_points)?;

        let joint = self.joints.create_joint(curve.get(at_t), left.unit_tangent(1.0), elevation)?;
        let left_id = match self.add_segment(left, t0, joint, gauge, Some(segment)) {
            Ok(id) => id,
            Err(e) => {
                self.discard_joint(joint);
                return Err(e);
            }
        };
        let right_id = match self.add_segment(right, joint, t1, gauge, Some(segment)) {
            Ok(id) => id,
            Err(e) => {
                self.discard_segment(left_id);
                self.discard_joint(joint);
                return Err(e);
            }
        };
        if let Err(e) = self.curves.destroy_curve(segment) {
            self.discard_segment(right_id);
            self.discard_segment(left_id);
            self.discard_joint(joint);
            return Err(e);
        }

        if let Some(end) = self.joints.get_joint_mut(t0) {
            end.disconnect(t1);
        }
        if let Some(end) = self.joints.get_joint_mut(t1) {
            end.disconnect(t0);
        }
        self.link(t0, t0_bucket, joint, Bucket::ReverseTangent, left_id);
        self.link(joint, Bucket::Tangent, t1, t1_bucket, right_id);

        debug!(%segment, %joint, left = %left_id, right = %right_id, at_t, "joint inserted into segment");
        Ok(joint)
    }

    // --- Removal ---

    /// Remove a segment, destroying any endpoint joint left with no links.
    ///
    /// Refused when an endpoint would be left with a single neighbour in one
    /// bucket while its other bucket still holds more than one.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::SegmentNotFound`] for a dead handle and
    /// [`TrackError::RemovalWouldStrandJunction`] when refused.
    pub fn remove_track_segment(&mut self, segment: SegmentId) -> Result<TrackSegment, TrackError> {
        self.remove(segment).inspect_err(|e| warn!(%segment, error = %e, "segment removal refused"))
    }

    fn remove(&mut self, segment: SegmentId) -> Result<TrackSegment, TrackError> {
        let record = self.segment(segment)?;
        let (t0, t1) = (record.t0_joint, record.t1_joint);
        self.check_removal(segment, t0, t1)?;
        self.check_removal(segment, t1, t0)?;

        let removed = self.curves.destroy_curve(segment)?;
        for (joint, far) in [(t0, t1), (t1, t0)] {
            let Some(end) = self.joints.get_joint_mut(joint) else {
                continue;
            };
            end.disconnect(far);
            if end.degree() == 0 {
                self.discard_joint(joint);
            }
        }
        debug!(%segment, %t0, %t1, "segment removed");
        Ok(removed)
    }

    fn check_removal(&self, segment: SegmentId, joint: JointId, far: JointId) -> Result<(), TrackError> {
        let direction = self.joint(joint)?.direction();
        let Some(bucket) = direction.bucket_of(far) else {
            return Ok(());
        };
        let remaining = direction.bucket(bucket).len().saturating_sub(1);
        if remaining == 1 && direction.bucket(bucket.opposite()).len() > 1 {
            return Err(TrackError::RemovalWouldStrandJunction { segment, joint });
        }
        Ok(())
    }

    /// Move a joint to another layer. Segment elevation records keep the
    /// values they were created with.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn set_joint_elevation(&mut self, id: JointId, elevation: Elevation) -> Result<(), TrackError> {
        let Some(joint) = self.joints.get_joint_mut(id) else {
            warn!(joint = %id, "elevation change on missing joint");
            return Err(TrackError::JointNotFound(id));
        };
        joint.set_elevation(elevation);
        debug!(joint = %id, ?elevation, "joint elevation set");
        Ok(())
    }

    // --- Queries ---

    #[must_use]
    pub fn get_joint(&self, id: JointId) -> Option<&TrackJoint> {
        self.joints.get_joint(id)
    }

    #[must_use]
    pub fn get_track_segment(&self, id: SegmentId) -> Option<&TrackSegment> {
        self.curves.get_track_segment_with_joints(id)
    }

    /// Every live joint, in ascending handle order.
    #[must_use]
    pub fn get_joints(&self) -> Vec<(JointId, &TrackJoint)> {
        self.joints.get_joints()
    }

    /// Every live segment, in ascending handle order.
    #[must_use]
    pub fn track_segments(&self) -> Vec<(SegmentId, &TrackSegment)> {
        self.curves.get_track_segments_with_joints()
    }

    #[must_use]
    pub fn track_segment_count(&self) -> usize {
        self.curves.len()
    }

    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn joint_is_ending_track(&self, id: JointId) -> Result<bool, TrackError> {
        Ok(self.joint(id)?.is_ending_track())
    }

    /// The only link of a dead-end joint, or `None` if the joint is not a dead end.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn get_dead_end_joint_sole_connection(&self, id: JointId) -> Result<Option<Connection>, TrackError> {
        let joint = self.joint(id)?;
        if !joint.is_ending_track() {
            return Ok(None);
        }
        Ok(joint.connections().first().copied())
    }

    /// The far joint of a dead end's only segment.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn get_the_other_end_of_ending_track(&self, id: JointId) -> Result<Option<JointId>, TrackError> {
        let Some(connection) = self.get_dead_end_joint_sole_connection(id)? else {
            return Ok(None);
        };
        Ok(self.curves.get_track_segment_with_joints(connection.segment).and_then(|segment| segment.other_joint(id)))
    }

    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn get_tangent_at_joint(&self, id: JointId) -> Result<Point, TrackError> {
        Ok(self.joint(id)?.tangent())
    }

    /// Curvature of the joint's first segment at the end touching the joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle and
    /// [`TrackError::OrphanJoint`] if the joint has no segment.
    pub fn get_curvature_at_joint(&self, id: JointId) -> Result<f64, TrackError> {
        let joint = self.joint(id)?;
        self.curvature_at(id, joint).ok_or(TrackError::OrphanJoint(id))
    }

    fn curvature_at(&self, id: JointId, joint: &TrackJoint) -> Option<f64> {
        let first = joint.connections().first()?;
        let segment = self.curves.get_track_segment_with_joints(first.segment)?;
        Some(segment.curve.curvature(segment.t_at_joint(id)?))
    }

    /// Whether nothing is linked on the joint's tangent side.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn tangent_is_pointing_in_empty_direction(&self, id: JointId) -> Result<bool, TrackError> {
        Ok(self.joint(id)?.direction().tangent.is_empty())
    }

    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn get_joint_position(&self, id: JointId) -> Result<Point, TrackError> {
        Ok(self.joint(id)?.position())
    }

    /// # Errors
    ///
    /// Returns [`TrackError::JointNotFound`] for a dead handle.
    pub fn joint_degree(&self, id: JointId) -> Result<usize, TrackError> {
        Ok(self.joint(id)?.degree())
    }

    /// Segment directly linking `a` and `b`, if any.
    #[must_use]
    pub fn segment_between(&self, a: JointId, b: JointId) -> Option<SegmentId> {
        self.joints.get_joint(a)?.segment_to(b)
    }

    /// Total arc length of the network.
    #[must_use]
    pub fn get_full_length(&self) -> f64 {
        self.curves.full_length()
    }

    // --- Projection ---

    /// Snap `point` to the graph: a joint first, then a curve, then a curve edge.
    #[must_use]
    pub fn project(&self, point: Point) -> ProjectionResult {
        if let Some(hit) = self.point_on_joint(point) {
            return ProjectionResult::Joint(hit);
        }
        if let Some(info) = self.project_point_on_track(point) {
            return ProjectionResult::Curve(info);
        }
        if let Some(info) = self.on_track_segment_edge(point) {
            return ProjectionResult::Edge(info);
        }
        ProjectionResult::Miss
    }

    /// Nearest joint within the joint hit radius.
    #[must_use]
    pub fn point_on_joint(&self, point: Point) -> Option<JointHit> {
        let mut best: Option<(f64, JointId, &TrackJoint)> = None;
        for (id, joint) in self.joints.iter() {
            let distance = joint.position().distance(point);
            if distance > self.config.joint_hit_radius {
                continue;
            }
            if best.is_none_or(|(d, _, _)| distance < d) {
                best = Some((distance, id, joint));
            }
        }
        let (_, id, joint) = best?;
        Some(JointHit {
            joint: id,
            position: joint.position(),
            tangent: joint.tangent(),
            curvature: self.curvature_at(id, joint).unwrap_or_default(),
        })
    }

    /// Nearest on-curve projection within the curve hit distance.
    #[must_use]
    pub fn project_point_on_track(&self, point: Point) -> Option<ProjectionInfo> {
        self.curves.project_on_curve(point, self.config.curve_hit_distance, self.config.curve_search_half_extent)
    }

    /// Nearest point beside a segment's rails within the edge hit distance.
    #[must_use]
    pub fn on_track_segment_edge(&self, point: Point) -> Option<ProjectionInfo> {
        self.curves.on_track_segment_edge(point, self.config.edge_hit_distance, self.config.edge_search_half_extent)
    }

    // --- Draw order ---

    /// Segments ordered by the lower of their two end elevations, ascending.
    #[must_use]
    pub fn get_sorted_track_segments(&self) -> Vec<(SegmentId, &TrackSegment)> {
        let mut segments = self.track_segments();
        segments.sort_by_key(|(_, segment)| segment.elevation.min_level());
        segments
    }

    /// Segments ordered by the higher of their two end elevations, ascending.
    #[must_use]
    pub fn get_sorted_track_segments_by_max_elevation(&self) -> Vec<(SegmentId, &TrackSegment)> {
        let mut segments = self.track_segments();
        segments.sort_by_key(|(_, segment)| segment.elevation.max_level());
        segments
    }

    /// Segments ordered by the mean of their two end elevations, ascending.
    #[must_use]
    pub fn get_sorted_track_segments_by_average_elevation(&self) -> Vec<(SegmentId, &TrackSegment)> {
        let mut segments = self.track_segments();
        segments.sort_by(|(_, a), (_, b)| a.elevation.average_level().total_cmp(&b.elevation.average_level()));
        segments
    }

    // --- Internals ---

    fn joint(&self, id: JointId) -> Result<&TrackJoint, TrackError> {
        self.joints.get_joint(id).ok_or(TrackError::JointNotFound(id))
    }

    fn segment(&self, id: SegmentId) -> Result<&TrackSegment, TrackError> {
        self.curves.get_track_segment_with_joints(id).ok_or(TrackError::SegmentNotFound(id))
    }

    fn add_segment(
        &mut self,
        curve: BezierCurve,
        t0: JointId,
        t1: JointId,
        gauge: f64,
        exclude: Option<SegmentId>,
    ) -> Result<SegmentId, TrackError> {
        let elevation = SegmentElevation::new(self.joint(t0)?.elevation(), self.joint(t1)?.elevation());
        let new = NewSegment { curve, t0_joint: t0, t1_joint: t1, elevation, gauge };
        Ok(self.curves.create_curve_excluding(new, exclude)?)
    }

    /// Record the symmetric link between `a` and `b`. Both joints are live.
    fn link(&mut self, a: JointId, a_bucket: Bucket, b: JointId, b_bucket: Bucket, segment: SegmentId) {
        if let Some(joint) = self.joints.get_joint_mut(a) {
            joint.connect(b, segment, a_bucket);
        }
        if let Some(joint) = self.joints.get_joint_mut(b) {
            joint.connect(a, segment, b_bucket);
        }
    }

    fn discard_joint(&mut self, id: JointId) {
        if let Err(e) = self.joints.destroy_joint(id) {
            error!(joint = %id, error = %e, "failed to discard joint");
        }
    }

    fn discard_segment(&mut self, id: SegmentId) {
        if let Err(e) = self.curves.destroy_curve(id) {
            error!(segment = %id, error = %e, "failed to discard segment");
        }
    }
}

/// The joint's open side: its tangent if nothing is linked that way, else the
/// reversed tangent if that side is free.
fn empty_direction(joint: &TrackJoint) -> Option<Point> {
    let direction = joint.direction();
    if direction.tangent.is_empty() {
        Some(joint.tangent())
    } else if direction.reverse_tangent.is_empty() {
        Some(-joint.tangent())
    } else {
        None
    }
}
