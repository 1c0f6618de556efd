//! Joint model: graph nodes, their directional buckets, and the joint store.
//!
//! A joint sits where track segments meet. Besides its position it carries a
//! canonical tangent; every neighbour is filed into exactly one of two
//! buckets depending on whether travelling to it goes with or against that
//! tangent. The graph reads these buckets to decide dead ends, extension
//! directions and removal safety.
//!
//! Joints are handed out read-only. Only the graph mutates them, through the
//! crate-private methods below, so the bucket invariants cannot be bypassed.

#[cfg(test)]
#[path = "joint_test.rs"]
mod joint_test;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::segments::SegmentId;
use crate::slots::{EntitySlots, SlotError};

/// Stable handle of a live joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointId(pub usize);

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "J{}", self.0)
    }
}

/// Layer a joint sits on, from three levels below ground to three above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i8)]
pub enum Elevation {
    Sub3 = -3,
    Sub2 = -2,
    Sub1 = -1,
    #[default]
    Ground = 0,
    Above1 = 1,
    Above2 = 2,
    Above3 = 3,
}

impl Elevation {
    /// Numeric layer, `-3..=3`.
    #[must_use]
    pub fn level(self) -> i8 {
        self as i8
    }

    /// Elevation for a numeric layer, if it is in range.
    #[must_use]
    pub fn from_level(level: i8) -> Option<Self> {
        match level {
            -3 => Some(Self::Sub3),
            -2 => Some(Self::Sub2),
            -1 => Some(Self::Sub1),
            0 => Some(Self::Ground),
            1 => Some(Self::Above1),
            2 => Some(Self::Above2),
            3 => Some(Self::Above3),
            _ => None,
        }
    }
}

/// Which side of a joint's tangent a neighbour lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Reached by moving with the joint's tangent.
    Tangent,
    /// Reached by moving against the joint's tangent.
    ReverseTangent,
}

impl Bucket {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Tangent => Self::ReverseTangent,
            Self::ReverseTangent => Self::Tangent,
        }
    }
}

/// A neighbour joint and the segment realising the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub joint: JointId,
    pub segment: SegmentId,
}

/// Neighbours of a joint split by travel direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JointDirection {
    pub tangent: BTreeSet<JointId>,
    pub reverse_tangent: BTreeSet<JointId>,
}

impl JointDirection {
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &BTreeSet<JointId> {
        match bucket {
            Bucket::Tangent => &self.tangent,
            Bucket::ReverseTangent => &self.reverse_tangent,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut BTreeSet<JointId> {
        match bucket {
            Bucket::Tangent => &mut self.tangent,
            Bucket::ReverseTangent => &mut self.reverse_tangent,
        }
    }

    /// The bucket holding `neighbor`, if any.
    #[must_use]
    pub fn bucket_of(&self, neighbor: JointId) -> Option<Bucket> {
        if self.tangent.contains(&neighbor) {
            Some(Bucket::Tangent)
        } else if self.reverse_tangent.contains(&neighbor) {
            Some(Bucket::ReverseTangent)
        } else {
            None
        }
    }

    /// Total members across both buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tangent.len() + self.reverse_tangent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackJoint {
    position: Point,
    tangent: Point,
    // Insertion ordered; the first entry is the joint's primary segment.
    connections: Vec<Connection>,
    direction: JointDirection,
    elevation: Elevation,
}

impl TrackJoint {
    #[must_use]
    pub fn new(position: Point, tangent: Point, elevation: Elevation) -> Self {
        Self { position, tangent, connections: Vec::new(), direction: JointDirection::default(), elevation }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Canonical unit forward direction.
    #[must_use]
    pub fn tangent(&self) -> Point {
        self.tangent
    }

    #[must_use]
    pub fn elevation(&self) -> Elevation {
        self.elevation
    }

    /// Links to neighbouring joints in the order they were made.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[must_use]
    pub fn direction(&self) -> &JointDirection {
        &self.direction
    }

    /// Segment linking this joint to `neighbor`, if they are adjacent.
    #[must_use]
    pub fn segment_to(&self, neighbor: JointId) -> Option<SegmentId> {
        self.connections.iter().find(|c| c.joint == neighbor).map(|c| c.segment)
    }

    /// Number of directly linked joints.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    /// Exactly one neighbour, filed in exactly one bucket.
    #[must_use]
    pub fn is_ending_track(&self) -> bool {
        self.connections.len() == 1 && self.direction.len() == 1
    }

    /// Link to `neighbor` through `segment`, filing it under `bucket`.
    ///
    /// An existing link to the same neighbour is replaced and moves to the end
    /// of the connection order.
    pub(crate) fn connect(&mut self, neighbor: JointId, segment: SegmentId, bucket: Bucket) {
        self.disconnect(neighbor);
        self.connections.push(Connection { joint: neighbor, segment });
        self.direction.bucket_mut(bucket).insert(neighbor);
    }

    /// Drop the link to `neighbor` from the connections and both buckets.
    pub(crate) fn disconnect(&mut self, neighbor: JointId) -> Option<SegmentId> {
        self.direction.tangent.remove(&neighbor);
        self.direction.reverse_tangent.remove(&neighbor);
        let index = self.connections.iter().position(|c| c.joint == neighbor)?;
        Some(self.connections.remove(index).segment)
    }

    pub(crate) fn set_elevation(&mut self, elevation: Elevation) {
        self.elevation = elevation;
    }
}

/// Store of live joints addressed by [`JointId`].
#[derive(Debug, Clone)]
pub struct TrackJointManager {
    slots: EntitySlots<TrackJoint>,
}

impl TrackJointManager {
    #[must_use]
    pub fn new(initial_capacity: usize, max_joints: Option<usize>) -> Self {
        Self { slots: EntitySlots::with_limit(initial_capacity, max_joints) }
    }

    /// Store a new unconnected joint.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::CapacityExceeded`] when the joint cap is reached.
    pub fn create_joint(&mut self, position: Point, tangent: Point, elevation: Elevation) -> Result<JointId, SlotError> {
        self.slots.create(TrackJoint::new(position, tangent, elevation)).map(JointId)
    }

    #[must_use]
    pub fn get_joint(&self, id: JointId) -> Option<&TrackJoint> {
        self.slots.get(id.0)
    }

    pub(crate) fn get_joint_mut(&mut self, id: JointId) -> Option<&mut TrackJoint> {
        self.slots.get_mut(id.0)
    }

    /// Remove a joint, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError`] if `id` is out of range or already destroyed.
    pub fn destroy_joint(&mut self, id: JointId) -> Result<TrackJoint, SlotError> {
        self.slots.destroy(id.0)
    }

    /// Every live joint with its handle, in ascending handle order.
    #[must_use]
    pub fn get_joints(&self) -> Vec<(JointId, &TrackJoint)> {
        self.slots.living_with_index().map(|(index, joint)| (JointId(index), joint)).collect()
    }

    /// Iterate live joints without collecting.
    pub fn iter(&self) -> impl Iterator<Item = (JointId, &TrackJoint)> {
        self.slots.living_with_index().map(|(index, joint)| (JointId(index), joint))
    }

    /// Number of live joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for TrackJointManager {
    fn default() -> Self {
        Self::new(crate::consts::INITIAL_SLOT_CAPACITY, None)
    }
}
