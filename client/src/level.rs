//! Procedural test arena used by the headless binary: a floor, a walkable ramp, and a wall.

use std::f32::consts::FRAC_PI_2;

use nalgebra::UnitQuaternion;
use walker_shared::{MeshNode, Vec3};

/// Ramp tilt. Its floor normal has `y = cos(RAMP_ANGLE)`, well above the floor threshold.
pub const RAMP_ANGLE: f32 = 0.26;

/// Unit quad in the XZ plane, facing +Y.
fn unit_quad() -> MeshNode {
    MeshNode::new(
        vec![
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ],
        Some(vec![0, 1, 2, 0, 2, 3]),
    )
}

/// 40 x 40 m ground at y = 0.
pub fn floor() -> MeshNode {
    unit_quad().with_pose(
        Vec3::new(20.0, 1.0, 20.0),
        UnitQuaternion::identity(),
        Vec3::zeros(),
    )
}

/// 4 x 8 m ramp west of spawn, rising toward -Z.
pub fn ramp() -> MeshNode {
    let half_length: f32 = 4.0;
    unit_quad().with_pose(
        Vec3::new(2.0, 1.0, half_length),
        UnitQuaternion::from_axis_angle(&Vec3::x_axis(), RAMP_ANGLE),
        Vec3::new(-6.0, half_length * RAMP_ANGLE.sin(), -6.0),
    )
}

/// 4 m tall, 20 m long wall in the plane x = 8, facing -X.
pub fn wall() -> MeshNode {
    unit_quad().with_pose(
        Vec3::new(2.0, 1.0, 10.0),
        UnitQuaternion::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2),
        Vec3::new(8.0, 2.0, 0.0),
    )
}

pub fn arena() -> Vec<MeshNode> {
    vec![floor(), ramp(), wall()]
}
