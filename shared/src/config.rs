/*!
Locomotion configuration and presets.

One controller covers every avatar variant; a [`LocomotionConfig`] selects steering, shape,
damping and ground rules. The four presets reproduce the rigid-body, capsule, and two sphere
setups. Configs can be loaded from RON, where any omitted field keeps its default.

Notes
- Distances are in meters, time in seconds.
- Vectors are plain `[f32; 3]` arrays so the file format stays independent of the math crate.
*/

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    body::BodyShape,
    collision::{GroundDetection, Vec3},
    constants::{
        AIR_DAMPING_SCALE, AIR_SPEED, DAMPING_RATE, FLOOR_NORMAL_THRESHOLD, GRAVITY_MPS2,
        GROUND_SPEED, JUMP_SPEED, MAX_FRAME_DELTA, OUT_OF_BOUNDS_Y, SPAWN_POINT,
        SUBSTEPS_PER_FRAME,
    },
    error::ConfigError,
};

/// Where "forward" comes from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SteeringMode {
    /// Camera view direction flattened onto the ground plane.
    CameraRelative,
    /// World axes: forward is -Z, right is +X.
    FixedAxis,
}

/// Which way the avatar's facing yaw follows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FacingMode {
    /// Planar velocity.
    Travel,
    /// Flattened camera direction.
    Camera,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeConfig {
    Sphere { radius: f32 },
    /// `tip` is the segment end relative to the segment start (the body position).
    Capsule { radius: f32, tip: [f32; 3] },
}

impl ShapeConfig {
    pub fn to_body_shape(&self) -> BodyShape {
        match *self {
            ShapeConfig::Sphere { radius } => BodyShape::Sphere { radius },
            ShapeConfig::Capsule { radius, tip } => BodyShape::Capsule {
                radius,
                tip: Vec3::from(tip),
            },
        }
    }

    fn radius(&self) -> f32 {
        match *self {
            ShapeConfig::Sphere { radius } | ShapeConfig::Capsule { radius, .. } => radius,
        }
    }
}

/// Velocity damping applied once per step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DampingModel {
    /// `velocity += velocity * (exp(-rate * dt) - 1)`; `rate` is scaled by `air_scale` while airborne.
    Exponential { rate: f32, air_scale: f32 },
    /// `velocity -= velocity * fraction` on the planar (x, z) axes only, independent of `dt`.
    /// Vertical motion is left to gravity and contacts.
    PerStep { fraction: f32 },
}

impl DampingModel {
    /// Multiplier `f` such that the step applies `velocity += velocity * f`.
    pub fn factor(&self, dt: f32, grounded: bool) -> f32 {
        match *self {
            DampingModel::Exponential { rate, air_scale } => {
                let factor = (-rate * dt).exp() - 1.0;
                if grounded { factor } else { factor * air_scale }
            }
            DampingModel::PerStep { fraction } => -fraction,
        }
    }

    /// Damp `velocity` in place for one step.
    pub fn apply(&self, velocity: &mut Vec3, dt: f32, grounded: bool) {
        let factor = self.factor(dt, grounded);
        match self {
            DampingModel::Exponential { .. } => *velocity += *velocity * factor,
            DampingModel::PerStep { .. } => {
                velocity.x += velocity.x * factor;
                velocity.z += velocity.z * factor;
            }
        }
    }
}

/// Frame clamp and substep count used by the frame driver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimestepConfig {
    /// Longest frame delta simulated; longer stalls are cut to this (seconds).
    pub max_frame_delta: f32,
    /// Equal substeps per rendered frame (>= 1).
    pub substeps: u32,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: MAX_FRAME_DELTA,
            substeps: SUBSTEPS_PER_FRAME,
        }
    }
}

impl TimestepConfig {
    /// Clamp a frame delta and split it into `(substep_dt, substeps)`.
    ///
    /// Negative or non-finite deltas simulate nothing.
    pub fn split(&self, frame_delta: f32) -> (f32, u32) {
        if !frame_delta.is_finite() || frame_delta <= 0.0 {
            return (0.0, 0);
        }
        let steps = self.substeps.max(1);
        let clamped = frame_delta.min(self.max_frame_delta);
        (clamped / steps as f32, steps)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub steering: SteeringMode,
    pub facing: FacingMode,
    pub shape: ShapeConfig,

    /// Gravity magnitude (m/s^2, positive).
    pub gravity: f32,
    /// Keep applying gravity while grounded (rigid-body behavior).
    pub gravity_when_grounded: bool,

    /// Steering acceleration per held direction on the floor (m/s^2).
    pub ground_speed: f32,
    /// Steering acceleration per held direction while airborne (m/s^2).
    pub air_speed: f32,

    pub damping: DampingModel,

    /// Vertical speed set by a jump (m/s).
    pub jump_speed: f32,

    /// Contacts with `normal.y` above this count as floor.
    pub floor_normal_threshold: f32,
    pub ground_detection: GroundDetection,

    /// Respawn point (meters).
    pub spawn: [f32; 3],
    /// Falling below this height respawns the body (meters).
    pub out_of_bounds_y: f32,

    pub timestep: TimestepConfig,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self::sphere_camera_relative()
    }
}

impl LocomotionConfig {
    /// Capsule avatar, camera-relative steering, five substeps.
    pub fn capsule() -> Self {
        Self {
            shape: ShapeConfig::Capsule {
                radius: 0.35,
                tip: [0.0, 0.65, 0.0],
            },
            facing: FacingMode::Camera,
            ..Self::sphere_camera_relative()
        }
    }

    /// Sphere avatar steered relative to the camera.
    pub fn sphere_camera_relative() -> Self {
        Self {
            steering: SteeringMode::CameraRelative,
            facing: FacingMode::Travel,
            shape: ShapeConfig::Sphere { radius: 0.35 },
            gravity: GRAVITY_MPS2,
            gravity_when_grounded: false,
            ground_speed: GROUND_SPEED,
            air_speed: AIR_SPEED,
            damping: DampingModel::Exponential {
                rate: DAMPING_RATE,
                air_scale: AIR_DAMPING_SCALE,
            },
            jump_speed: JUMP_SPEED,
            floor_normal_threshold: FLOOR_NORMAL_THRESHOLD,
            ground_detection: GroundDetection::ContactNormal,
            spawn: SPAWN_POINT,
            out_of_bounds_y: OUT_OF_BOUNDS_Y,
            timestep: TimestepConfig::default(),
        }
    }

    /// Sphere avatar steered along fixed world axes.
    pub fn sphere_fixed_axis() -> Self {
        Self {
            steering: SteeringMode::FixedAxis,
            ..Self::sphere_camera_relative()
        }
    }

    /// Rigid-body sphere: constant gravity, per-step damping, jump only at rest.
    pub fn rigid_body() -> Self {
        Self {
            steering: SteeringMode::CameraRelative,
            facing: FacingMode::Travel,
            shape: ShapeConfig::Sphere { radius: 0.5 },
            gravity: 9.8,
            gravity_when_grounded: true,
            ground_speed: 20.0,
            air_speed: 20.0,
            damping: DampingModel::PerStep { fraction: 0.1 },
            jump_speed: 5.0,
            floor_normal_threshold: FLOOR_NORMAL_THRESHOLD,
            ground_detection: GroundDetection::RestingVelocity { tolerance: 0.005 },
            spawn: SPAWN_POINT,
            out_of_bounds_y: OUT_OF_BOUNDS_Y,
            timestep: TimestepConfig {
                max_frame_delta: 0.1,
                substeps: 1,
            },
        }
    }

    /// Parse a RON document; omitted fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    #[inline]
    pub fn spawn_point(&self) -> Vec3 {
        Vec3::from(self.spawn)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.shape.radius();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::Invalid("shape radius must be positive"));
        }
        if let ShapeConfig::Capsule { tip, .. } = self.shape {
            if tip.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::Invalid("capsule tip must be finite"));
            }
        }
        if self.timestep.substeps == 0 {
            return Err(ConfigError::Invalid("substeps must be at least 1"));
        }
        if !self.timestep.max_frame_delta.is_finite() || self.timestep.max_frame_delta <= 0.0 {
            return Err(ConfigError::Invalid("max_frame_delta must be positive"));
        }
        if !(-1.0..=1.0).contains(&self.floor_normal_threshold) {
            return Err(ConfigError::Invalid(
                "floor_normal_threshold must be within [-1, 1]",
            ));
        }
        match self.damping {
            DampingModel::Exponential { rate, air_scale } => {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(ConfigError::Invalid(
                        "damping rate must be finite and non-negative",
                    ));
                }
                if !(0.0..=1.0).contains(&air_scale) {
                    return Err(ConfigError::Invalid("air damping scale must be within [0, 1]"));
                }
            }
            DampingModel::PerStep { fraction } => {
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(ConfigError::Invalid(
                        "per-step damping fraction must be within [0, 1]",
                    ));
                }
            }
        }
        if let GroundDetection::RestingVelocity { tolerance } = self.ground_detection {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::Invalid(
                    "resting velocity tolerance must be finite and non-negative",
                ));
            }
        }
        let scalars = [
            self.gravity,
            self.ground_speed,
            self.air_speed,
            self.jump_speed,
            self.out_of_bounds_y,
        ];
        if scalars.iter().any(|v| !v.is_finite()) || self.spawn.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("constants must be finite"));
        }
        Ok(())
    }
}

/// Named starting points for [`LocomotionConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    RigidBody,
    Capsule,
    Sphere,
    SphereFixedAxis,
}

impl Preset {
    pub fn config(self) -> LocomotionConfig {
        match self {
            Preset::RigidBody => LocomotionConfig::rigid_body(),
            Preset::Capsule => LocomotionConfig::capsule(),
            Preset::Sphere => LocomotionConfig::sphere_camera_relative(),
            Preset::SphereFixedAxis => LocomotionConfig::sphere_fixed_axis(),
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rigid-body" => Ok(Preset::RigidBody),
            "capsule" => Ok(Preset::Capsule),
            "sphere" => Ok(Preset::Sphere),
            "sphere-fixed-axis" => Ok(Preset::SphereFixedAxis),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}
