//! Bounding-box index for sublinear proximity queries over track segments.
//!
//! Entries are `(Aabb, payload)` pairs stored in an R-tree (via `rstar`). The
//! same payload may be stored under several boxes; removal needs the exact
//! box the entry was inserted with.

#[cfg(test)]
#[path = "spatial_test.rs"]
mod spatial_test;

use rstar::{AABB, RTree, RTreeObject};
use serde::Serialize;

use crate::point::Point;

/// Axis-aligned bounding box in world space. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    /// Box spanning two opposite corners given in any order.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Zero-area box at a single point.
    #[must_use]
    pub fn from_point(p: Point) -> Self {
        Self { min: p, max: p }
    }

    /// Square box centred on `center` reaching `half_extent` in every direction.
    #[must_use]
    pub fn around(center: Point, half_extent: f64) -> Self {
        let delta = Point::new(half_extent, half_extent);
        Self { min: center - delta, max: center + delta }
    }

    /// Grow the box to cover `p`.
    pub fn include(&mut self, p: Point) {
        self.min = Point::new(self.min.x.min(p.x), self.min.y.min(p.y));
        self.max = Point::new(self.max.x.max(p.x), self.max.y.max(p.y));
    }

    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x && self.min.y <= other.max.y && other.min.y <= self.max.y
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    fn envelope(&self) -> AABB<[f64; 2]> {
        AABB::from_corners([self.min.x, self.min.y], [self.max.x, self.max.y])
    }
}

#[derive(Debug, Clone)]
struct IndexEntry<T> {
    bounds: Aabb,
    payload: T,
}

impl<T: PartialEq> PartialEq for IndexEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds && self.payload == other.payload
    }
}

impl<T> RTreeObject for IndexEntry<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bounds.envelope()
    }
}

/// R-tree mapping bounding boxes to payloads.
pub struct SpatialIndex<T> {
    tree: RTree<IndexEntry<T>>,
}

impl<T> std::fmt::Debug for SpatialIndex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").field("len", &self.tree.size()).finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq> SpatialIndex<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Store `payload` under `bounds`. Duplicates are kept.
    pub fn insert(&mut self, bounds: Aabb, payload: T) {
        self.tree.insert(IndexEntry { bounds, payload });
    }

    /// Remove the entry with exactly this box and payload.
    ///
    /// Returns `false` (and changes nothing) when no such entry exists.
    pub fn remove(&mut self, bounds: Aabb, payload: &T) -> bool {
        let probe = IndexEntry { bounds, payload: payload.clone() };
        self.tree.remove(&probe).is_some()
    }

    /// Every payload whose box intersects `bounds`, in unspecified order.
    #[must_use]
    pub fn search(&self, bounds: Aabb) -> Vec<T> {
        self.tree
            .locate_in_envelope_intersecting(&bounds.envelope())
            .map(|entry| entry.payload.clone())
            .collect()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl<T: Clone + PartialEq> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
