//! Layout files: a list of graph edits replayed in order against a fresh graph.
//!
//! Joint and segment handles in a layout refer to the handles the graph hands
//! out while replaying, so a layout is only meaningful from an empty graph.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracks::config::{ConfigError, TrackGraphConfig};
use tracks::error::TrackError;
use tracks::graph::TrackGraph;
use tracks::joint::{Elevation, JointId, TrackJoint};
use tracks::point::Point;
use tracks::projection::ProjectionResult;
use tracks::segments::{SegmentElevation, SegmentId, TrackSegment};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Layout {
    /// Overrides the environment-derived config when present.
    #[serde(default)]
    pub config: Option<TrackGraphConfig>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    CreateSegment {
        start: Point,
        end: Point,
        #[serde(default)]
        controls: Vec<Point>,
        #[serde(default)]
        start_elevation: Elevation,
        #[serde(default)]
        end_elevation: Elevation,
    },
    Branch {
        from: JointId,
        end: Point,
        #[serde(default)]
        controls: Vec<Point>,
    },
    Extend {
        from: JointId,
        end: Point,
        #[serde(default)]
        controls: Vec<Point>,
    },
    Connect {
        a: JointId,
        b: JointId,
        #[serde(default)]
        controls: Vec<Point>,
    },
    InsertJoint {
        start: JointId,
        end: JointId,
        at_t: f64,
    },
    SplitSegment {
        segment: SegmentId,
        at_t: f64,
    },
    RemoveSegment {
        segment: SegmentId,
    },
    SetElevation {
        joint: JointId,
        elevation: Elevation,
    },
    Project {
        point: Point,
    },
}

impl Operation {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateSegment { .. } => "create_segment",
            Self::Branch { .. } => "branch",
            Self::Extend { .. } => "extend",
            Self::Connect { .. } => "connect",
            Self::InsertJoint { .. } => "insert_joint",
            Self::SplitSegment { .. } => "split_segment",
            Self::RemoveSegment { .. } => "remove_segment",
            Self::SetElevation { .. } => "set_elevation",
            Self::Project { .. } => "project",
        }
    }
}

/// What one operation did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    SegmentCreated { segment: SegmentId },
    JointInserted { joint: JointId },
    SegmentRemoved { segment: SegmentId },
    ElevationSet { joint: JointId },
    Projected { result: ProjectionResult },
    Refused { code: &'static str, message: String },
}

impl From<TrackError> for Outcome {
    fn from(err: TrackError) -> Self {
        Self::Refused { code: err.error_code(), message: err.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub index: usize,
    pub op: &'static str,
    pub outcome: Outcome,
}

/// Apply one operation, folding any error into [`Outcome::Refused`].
pub fn apply(graph: &mut TrackGraph, operation: &Operation) -> Outcome {
    let result = match operation {
        Operation::CreateSegment { start, end, controls, start_elevation, end_elevation } => graph
            .create_new_track_segment_with_elevation(*start, *end, controls, *start_elevation, *end_elevation)
            .map(|segment| Outcome::SegmentCreated { segment }),
        Operation::Branch { from, end, controls } => {
            graph.branch_to_new_joint(*from, *end, controls).map(|segment| Outcome::SegmentCreated { segment })
        }
        Operation::Extend { from, end, controls } => {
            graph.extend_track_from_joint(*from, *end, controls).map(|segment| Outcome::SegmentCreated { segment })
        }
        Operation::Connect { a, b, controls } => {
            graph.connect_joints(*a, *b, controls).map(|segment| Outcome::SegmentCreated { segment })
        }
        Operation::InsertJoint { start, end, at_t } => {
            graph.insert_joint_into_track_segment(*start, *end, *at_t).map(|joint| Outcome::JointInserted { joint })
        }
        Operation::SplitSegment { segment, at_t } => graph
            .insert_joint_into_track_segment_using_track_number(*segment, *at_t)
            .map(|joint| Outcome::JointInserted { joint }),
        Operation::RemoveSegment { segment } => {
            graph.remove_track_segment(*segment).map(|_| Outcome::SegmentRemoved { segment: *segment })
        }
        Operation::SetElevation { joint, elevation } => {
            graph.set_joint_elevation(*joint, *elevation).map(|()| Outcome::ElevationSet { joint: *joint })
        }
        Operation::Project { point } => Ok(Outcome::Projected { result: graph.project(*point) }),
    };
    result.unwrap_or_else(Outcome::from)
}

/// Build a graph for `layout` and replay every operation.
///
/// # Errors
///
/// Returns [`ConfigError`] if the effective config is invalid.
pub fn replay(layout: &Layout, fallback: TrackGraphConfig) -> Result<(TrackGraph, Vec<Step>), ConfigError> {
    let config = layout.config.clone().unwrap_or(fallback);
    config.validate()?;

    let mut graph = TrackGraph::new(config);
    let mut steps = Vec::with_capacity(layout.operations.len());
    for (index, operation) in layout.operations.iter().enumerate() {
        let outcome = apply(&mut graph, operation);
        if let Outcome::Refused { code, message } = &outcome {
            warn!(index, op = operation.name(), code, %message, "layout operation refused");
        }
        steps.push(Step { index, op: operation.name(), outcome });
    }
    info!(
        operations = steps.len(),
        joints = graph.joint_count(),
        segments = graph.track_segment_count(),
        "layout replayed"
    );
    Ok((graph, steps))
}

#[derive(Debug, Serialize)]
pub struct JointView<'a> {
    pub id: JointId,
    #[serde(flatten)]
    pub joint: &'a TrackJoint,
}

#[derive(Debug, Serialize)]
pub struct SegmentView<'a> {
    pub id: SegmentId,
    pub t0_joint: JointId,
    pub t1_joint: JointId,
    pub points: &'a [Point],
    pub elevation: SegmentElevation,
    pub gauge: f64,
    pub length: f64,
    pub collisions: usize,
}

impl<'a> SegmentView<'a> {
    fn new(id: SegmentId, segment: &'a TrackSegment) -> Self {
        Self {
            id,
            t0_joint: segment.t0_joint,
            t1_joint: segment.t1_joint,
            points: segment.curve.points(),
            elevation: segment.elevation,
            gauge: segment.gauge,
            length: segment.curve.length(),
            collisions: segment.collision.len(),
        }
    }
}

/// Final state of a replay, ready for JSON output.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub steps: &'a [Step],
    pub joints: Vec<JointView<'a>>,
    /// Draw order: lowest elevation first.
    pub segments: Vec<SegmentView<'a>>,
    pub full_length: f64,
}

impl<'a> Report<'a> {
    #[must_use]
    pub fn new(graph: &'a TrackGraph, steps: &'a [Step]) -> Self {
        Self {
            steps,
            joints: graph.get_joints().into_iter().map(|(id, joint)| JointView { id, joint }).collect(),
            segments: graph
                .get_sorted_track_segments()
                .into_iter()
                .map(|(id, segment)| SegmentView::new(id, segment))
                .collect(),
            full_length: graph.get_full_length(),
        }
    }
}
