use serde::{Deserialize, Serialize};

use super::types::{CollisionResult, Vec3};

/// How the controller decides that the body is standing on something.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GroundDetection {
    /// On floor when this step's contact normal is steep enough (`normal.y > threshold`).
    ContactNormal,
    /// On floor when vertical speed is (almost) zero after contact response.
    /// Mirrors rigid-body scripts that gate jumping on `velocity.y ~= 0`.
    RestingVelocity { tolerance: f32 },
}

/// Is `normal` close enough to world-up to support the body?
#[inline]
pub fn is_floor_normal(normal: &Vec3, threshold: f32) -> bool {
    normal.y > threshold
}

/// Cancel the part of `velocity` that drives into a contact.
///
/// - Floor contacts only lose the into-surface component, so a landing body stops falling.
/// - Other contacts lose the whole normal component, producing a slide rather than a bounce.
///
/// Returns whether the contact counts as floor.
pub fn apply_contact_velocity(
    velocity: &mut Vec3,
    contact: &CollisionResult,
    floor_threshold: f32,
) -> bool {
    let n = contact.normal;
    let along = n.dot(velocity);

    if is_floor_normal(&n, floor_threshold) {
        if along < 0.0 {
            *velocity -= n * along;
        }
        true
    } else {
        *velocity -= n * along;
        false
    }
}

/// Grounded state across consecutive steps.
///
/// `current` is this step's classification; `previous` is the one before it. A body resting on a
/// surface can alternate between "touching" and "not quite touching" from step to step, so
/// support is reported when either holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroundState {
    pub current: bool,
    pub previous: bool,
}

impl GroundState {
    /// Shift the window and record this step's classification.
    #[inline]
    pub fn advance(&mut self, on_floor: bool) {
        self.previous = self.current;
        self.current = on_floor;
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        self.current || self.previous
    }

    /// Forget support entirely (used by jumps and respawns).
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(normal: Vec3) -> CollisionResult {
        CollisionResult {
            normal: normal.normalize(),
            depth: 0.1,
            triangle: 0,
        }
    }

    #[test]
    fn landing_cancels_only_downward_velocity() {
        let mut v = Vec3::new(2.0, -9.0, -1.0);
        assert!(apply_contact_velocity(&mut v, &contact(Vec3::y()), 0.7));
        assert_eq!(v, Vec3::new(2.0, 0.0, -1.0));

        // Moving away from the floor is left alone.
        let mut v = Vec3::new(0.0, 3.0, 0.0);
        assert!(apply_contact_velocity(&mut v, &contact(Vec3::y()), 0.7));
        assert_eq!(v, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn steep_contact_slides_and_keeps_tangent() {
        // 60 degree slope: normal.y = 0.5, below the threshold.
        let n = Vec3::new(3.0f32.sqrt() * 0.5, 0.5, 0.0);
        let c = contact(n);
        let v0 = Vec3::new(-2.0, -1.0, 3.0);

        let mut v = v0;
        assert!(!apply_contact_velocity(&mut v, &c, 0.7));

        assert!(v.dot(&c.normal).abs() < 1.0e-5);
        let tangential = v0 - c.normal * v0.dot(&c.normal);
        assert!((v - tangential).norm() < 1.0e-5);
        assert!(v.norm() > 0.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn ground_window_covers_previous_step() {
        let mut g = GroundState::default();
        assert!(!g.is_supported());

        g.advance(true);
        assert!(g.is_supported());
        g.advance(false);
        assert!(g.is_supported());
        g.advance(false);
        assert!(!g.is_supported());
    }
}
