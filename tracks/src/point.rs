//! 2D vector math shared by the curve primitive and the track graph.
//!
//! `Point` doubles as a position and a direction vector. The two direction
//! predicates at the bottom of this module look alike but disagree on
//! perpendicular and zero-length inputs; the graph relies on each at
//! different call sites, so they are kept separate.

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::VECTOR_EPSILON;

/// A point (or direction vector) in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    #[must_use]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    #[must_use]
    pub fn unit(self) -> Option<Point> {
        let len = self.length();
        if len < VECTOR_EPSILON || !len.is_finite() {
            return None;
        }
        Some(Point::new(self.x / len, self.y / len))
    }

    /// The vector rotated a quarter turn counter-clockwise.
    #[must_use]
    pub fn perpendicular(self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Signed angle in radians rotating `self` onto `other`, in `(-π, π]`.
    #[must_use]
    pub fn angle_to(self, other: Point) -> f64 {
        self.cross(other).atan2(self.dot(other))
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn normalize_angle_deg(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Sign-of-cosine test: `true` when the angle between `a` and `b` is at most 90°.
///
/// Perpendicular vectors and zero vectors count as the same direction.
#[must_use]
pub fn same_direction(a: Point, b: Point) -> bool {
    a.dot(b) >= 0.0
}

/// Half-plane test: `true` only when `direction` lies within ±90° of `tangent`
/// and not within ±90° of the reversed tangent.
///
/// Both ranges are closed, so a direction exactly perpendicular to the tangent
/// falls in both and is reported as not aligned. A zero-length direction has
/// no angle and is never aligned.
#[must_use]
pub fn direction_aligned_to_tangent(direction: Point, tangent: Point) -> bool {
    if direction.unit().is_none() || tangent.unit().is_none() {
        return false;
    }
    // cos >= 0 is the closed ±90° range, evaluated without going through atan2.
    let within_forward = tangent.dot(direction) >= 0.0;
    let within_backward = (-tangent).dot(direction) >= 0.0;
    within_forward && !within_backward
}
