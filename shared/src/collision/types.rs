/*!
Core collision types and math aliases shared by the collision submodules.

This module contains no algorithms. It defines the data exchanged between:
- broad (triangle AABBs and candidate pruning)
- narrow_phase (sphere/capsule vs triangle penetration)
- world (the built index and its queries)
- the locomotion controller, which consumes `CollisionResult`
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Point3 = na::Point3<f32>;

/// Three world-space vertices. The face normal follows the right-hand rule `(b - a) x (c - a)`.
pub type TriangleVerts = [Vec3; 3];

/// The moving shape submitted to a query, already placed in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QueryShape {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Segment `start..end` swept by a sphere of `radius`.
    Capsule {
        start: Vec3,
        end: Vec3,
        radius: f32,
    },
}

impl QueryShape {
    #[inline]
    pub fn radius(&self) -> f32 {
        match *self {
            QueryShape::Sphere { radius, .. } | QueryShape::Capsule { radius, .. } => radius,
        }
    }
}

/// Outcome of a single penetration query.
///
/// Produced per query and consumed immediately to correct position and velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResult {
    /// Unit push-out direction, pointing from the surface toward the shape.
    pub normal: Vec3,
    /// Distance to move along `normal` to end the overlap (> 0).
    pub depth: f32,
    /// Index of the triangle that produced this contact, in build order.
    pub triangle: usize,
}

impl CollisionResult {
    /// Translation that resolves the penetration.
    #[inline]
    pub fn push_out(&self) -> Vec3 {
        self.normal * self.depth
    }
}
