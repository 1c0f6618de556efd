//! Shared numeric constants for the tracks crate.

// ── Math ────────────────────────────────────────────────────────

/// Vectors shorter than this have no usable direction.
pub const VECTOR_EPSILON: f64 = 1e-9;

// ── Curves ──────────────────────────────────────────────────────

/// Samples in the coarse lookup table used to seed point projection.
pub const PROJECTION_LUT_STEPS: usize = 100;

/// Subintervals for composite Gauss-Legendre arc length integration.
pub const ARC_LENGTH_SUBDIVISIONS: usize = 8;

/// Recursion cap for curve-curve intersection subdivision.
pub const MAX_INTERSECTION_DEPTH: u32 = 32;

/// Parameter pairs closer than this are reported as one intersection.
pub const INTERSECTION_MERGE_T: f64 = 0.01;

/// World-space spacing between samples of a segment's offset outline.
pub const OFFSET_SAMPLE_SPACING: f64 = 5.0;

/// Bounds on the number of offset outline samples per segment.
pub const OFFSET_MIN_SAMPLES: usize = 8;
pub const OFFSET_MAX_SAMPLES: usize = 200;

// ── Graph defaults ──────────────────────────────────────────────

/// Track width assigned to new segments.
pub const DEFAULT_GAUGE: f64 = 10.0;

/// Radius within which a query point snaps to a joint.
pub const JOINT_HIT_RADIUS: f64 = 5.0;

/// Maximum distance for an on-curve projection hit.
pub const CURVE_HIT_DISTANCE: f64 = 10.0;

/// Half-size of the box used to pre-filter on-curve projection candidates.
pub const CURVE_SEARCH_HALF_EXTENT: f64 = 0.1;

/// Maximum distance for an edge projection hit.
pub const EDGE_HIT_DISTANCE: f64 = 30.0;

/// Half-size of the box used to pre-filter edge projection candidates.
pub const EDGE_SEARCH_HALF_EXTENT: f64 = 10.0;

/// Size below which intersecting sub-curves are treated as a single hit.
pub const INTERSECTION_THRESHOLD: f64 = 0.5;

/// Slots allocated by a fresh entity manager.
pub const INITIAL_SLOT_CAPACITY: usize = 16;

/// Maximum angle between an empty joint direction and an extension target.
pub const MAX_EXTEND_ANGLE_DEG: f64 = 90.0;
