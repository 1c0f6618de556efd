//! Curve-based track graph for laying out rail-like paths.
//!
//! Track is built from joints (graph nodes with a position, a canonical
//! tangent and an elevation layer) linked by Bezier segments. The graph
//! supports incremental construction by branching, extending, connecting and
//! splitting, refuses edits that would break its directional bookkeeping, and
//! answers proximity queries through a bounding-box index over the segments.
//! Rendering and input handling live elsewhere; consumers read joints,
//! segments and projection results from [`graph::TrackGraph`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`graph`] | [`graph::TrackGraph`]: mutation, queries, projection, draw order |
//! | [`joint`] | Joints, direction buckets, elevation, the joint store |
//! | [`segments`] | Segments, collision records, the segment store |
//! | [`curve`] | Bezier primitive: evaluation, split, bounds, projection, intersection |
//! | [`spatial`] | R-tree backed bounding-box index |
//! | [`slots`] | Free-list slot allocator behind both stores |
//! | [`projection`] | Joint / curve / edge hit results |
//! | [`point`] | 2D vector math and the two direction predicates |
//! | [`config`] | Tunables with defaults and `TRACKS_*` env overrides |
//! | [`error`] | [`error::TrackError`] and its stable codes |
//! | [`consts`] | Shared numeric constants (hit radii, sample counts, etc.) |

pub mod config;
pub mod consts;
pub mod curve;
pub mod error;
pub mod graph;
pub mod joint;
pub mod point;
pub mod projection;
pub mod segments;
pub mod slots;
pub mod spatial;
