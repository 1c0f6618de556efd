//! Error type shared by the segment store and the track graph.

use crate::curve::CurveError;
use crate::joint::JointId;
use crate::segments::SegmentId;
use crate::slots::SlotError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("joint not found: {0}")]
    JointNotFound(JointId),
    #[error("segment not found: {0}")]
    SegmentNotFound(SegmentId),
    #[error("joints {0} and {1} are not connected")]
    NotConnected(JointId, JointId),
    #[error("joints {0} and {1} are already connected")]
    AlreadyConnected(JointId, JointId),
    #[error("cannot connect joint {0} to itself")]
    SelfConnection(JointId),
    #[error("joint {0} has track in both directions")]
    NoEmptyDirection(JointId),
    #[error("extension from joint {joint} turns {angle_deg:.1} degrees away from its open direction")]
    InvalidExtendDirection { joint: JointId, angle_deg: f64 },
    #[error("split parameter must lie strictly between 0 and 1, got {0}")]
    InvalidSplitParameter(f64),
    #[error("removing segment {segment} would leave joint {joint} as a one-sided junction")]
    RemovalWouldStrandJunction { segment: SegmentId, joint: JointId },
    #[error("spatial index has no entry for segment {0}")]
    IndexOutOfSync(SegmentId),
    #[error("joint {0} has no connections")]
    OrphanJoint(JointId),
    #[error(transparent)]
    Slot(#[from] SlotError),
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl TrackError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::JointNotFound(_) => "E_JOINT_NOT_FOUND",
            Self::SegmentNotFound(_) => "E_SEGMENT_NOT_FOUND",
            Self::NotConnected(..) => "E_NOT_CONNECTED",
            Self::AlreadyConnected(..) => "E_ALREADY_CONNECTED",
            Self::SelfConnection(_) => "E_SELF_CONNECTION",
            Self::NoEmptyDirection(_) => "E_NO_EMPTY_DIRECTION",
            Self::InvalidExtendDirection { .. } => "E_INVALID_EXTEND_DIRECTION",
            Self::InvalidSplitParameter(_) => "E_INVALID_SPLIT_PARAMETER",
            Self::RemovalWouldStrandJunction { .. } => "E_REMOVAL_REFUSED",
            Self::IndexOutOfSync(_) => "E_INDEX_OUT_OF_SYNC",
            Self::OrphanJoint(_) => "E_ORPHAN_JOINT",
            Self::Slot(SlotError::CapacityExceeded { .. }) => "E_CAPACITY_EXCEEDED",
            Self::Slot(_) => "E_SLOT",
            Self::Curve(_) => "E_INVALID_CURVE",
        }
    }

    /// Whether the error reports an operation refused to protect graph invariants.
    #[must_use]
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::AlreadyConnected(..)
                | Self::SelfConnection(_)
                | Self::NoEmptyDirection(_)
                | Self::InvalidExtendDirection { .. }
                | Self::RemovalWouldStrandJunction { .. }
        )
    }
}
