use nalgebra::{UnitQuaternion, Vector2, Vector3};

use crate::YAW_EPS;

/// Drop the vertical component: world (x, y, z) -> planar (x, z).
#[inline]
pub fn to_planar(v: &Vector3<f32>) -> Vector2<f32> {
    Vector2::new(v.x, v.z)
}

/// Yaw (radians about +Y) that faces the planar direction `xz`, if it is long enough.
///
/// Convention: yaw 0 faces -Z, matching `UnitQuaternion::from_axis_angle(+Y, yaw) * -Z`.
pub fn yaw_from_xz(xz: Vector2<f32>) -> Option<f32> {
    if xz.norm_squared() > YAW_EPS {
        return Some((-xz[0]).atan2(-xz[1]));
    }

    None
}

/// Yaw-only rotation facing the planar part of `direction`, or `None` if it has no planar extent.
pub fn facing_from_direction(direction: &Vector3<f32>) -> Option<UnitQuaternion<f32>> {
    yaw_from_xz(to_planar(direction))
        .map(|yaw| UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw))
}

/// Flatten `v` onto the ground plane and normalize it.
///
/// Returns `None` for a (near) vertical or zero vector, so callers can keep their previous
/// direction instead of propagating NaN.
pub fn flat_direction(v: &Vector3<f32>) -> Option<Vector3<f32>> {
    let flat = Vector3::new(v.x, 0.0, v.z);
    let len_sq = flat.norm_squared();
    if len_sq.is_finite() && len_sq > YAW_EPS {
        Some(flat / len_sq.sqrt())
    } else {
        None
    }
}
