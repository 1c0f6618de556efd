//! Result types for projecting a world point onto the track graph.
//!
//! A projection resolves to at most one hit, tried in strict precedence:
//! joint, then curve interior, then curve edge.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use serde::Serialize;

use crate::joint::JointId;
use crate::point::Point;
use crate::segments::SegmentId;

/// Which part of the track was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Joint,
    Curve,
    Edge,
}

/// A point snapped onto (or beside) a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionInfo {
    pub segment: SegmentId,
    pub t0_joint: JointId,
    pub t1_joint: JointId,
    /// Curve parameter of the projection.
    pub at_t: f64,
    /// For curve hits the closest curve point; for edge hits that point pushed
    /// outward by the segment gauge.
    pub projection_point: Point,
    /// Unit tangent of the curve at `at_t`.
    pub tangent: Point,
    pub curvature: f64,
}

/// A point snapped onto a joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointHit {
    pub joint: JointId,
    pub position: Point,
    pub tangent: Point,
    /// Curvature of the joint's first segment at the joint's end.
    pub curvature: f64,
}

/// Outcome of [`crate::graph::TrackGraph::project`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "hit_type", rename_all = "snake_case")]
pub enum ProjectionResult {
    Miss,
    Joint(JointHit),
    Curve(ProjectionInfo),
    Edge(ProjectionInfo),
}

impl ProjectionResult {
    #[must_use]
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    #[must_use]
    pub fn kind(&self) -> Option<HitKind> {
        match self {
            Self::Miss => None,
            Self::Joint(_) => Some(HitKind::Joint),
            Self::Curve(_) => Some(HitKind::Curve),
            Self::Edge(_) => Some(HitKind::Edge),
        }
    }

    /// Where the query point snapped to, if anywhere.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Miss => None,
            Self::Joint(hit) => Some(hit.position),
            Self::Curve(info) | Self::Edge(info) => Some(info.projection_point),
        }
    }
}
