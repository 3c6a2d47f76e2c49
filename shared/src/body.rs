//! Minimal moving shape: position and velocity, no rotation, no mass, no collision knowledge.

use crate::collision::{QueryShape, Vec3};

/// Collision shape of the avatar, in body-local terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyShape {
    /// Sphere centred on the body position.
    Sphere { radius: f32 },
    /// Capsule whose segment runs from the body position to `position + tip`.
    Capsule { radius: f32, tip: Vec3 },
}

impl BodyShape {
    #[inline]
    pub fn radius(&self) -> f32 {
        match *self {
            BodyShape::Sphere { radius } | BodyShape::Capsule { radius, .. } => radius,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicBody {
    pub shape: BodyShape,
    /// Sphere centre, or the capsule segment's start point.
    pub position: Vec3,
    pub velocity: Vec3,
}

impl KinematicBody {
    /// A body at rest at `position`.
    pub fn new(shape: BodyShape, position: Vec3) -> Self {
        Self {
            shape,
            position,
            velocity: Vec3::zeros(),
        }
    }

    /// Shift the position without touching velocity.
    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Semi-implicit Euler: `velocity += acceleration * dt`, then `position += velocity * dt`.
    #[inline]
    pub fn integrate(&mut self, dt: f32, acceleration: Vec3) {
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Place the body at `position` and stop it.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::zeros();
    }

    /// Capsule segment endpoints; both equal the centre for a sphere.
    pub fn segment(&self) -> (Vec3, Vec3) {
        match self.shape {
            BodyShape::Sphere { .. } => (self.position, self.position),
            BodyShape::Capsule { tip, .. } => (self.position, self.position + tip),
        }
    }

    /// The body placed in world space, ready for a collision query.
    pub fn query_shape(&self) -> QueryShape {
        match self.shape {
            BodyShape::Sphere { radius } => QueryShape::Sphere {
                center: self.position,
                radius,
            },
            BodyShape::Capsule { radius, tip } => QueryShape::Capsule {
                start: self.position,
                end: self.position + tip,
                radius,
            },
        }
    }
}
