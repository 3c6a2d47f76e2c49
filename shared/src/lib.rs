pub mod bitmask_flags;
pub mod body;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod intent;
pub mod level;
pub mod movement;
pub mod utils;

pub use body::{BodyShape, KinematicBody};
pub use collision::{
    CollisionResult, CollisionWorld, DegeneratePolicy, GroundDetection, QueryShape,
    TriangleVerts, Vec3,
};
pub use config::{
    DampingModel, FacingMode, LocomotionConfig, Preset, ShapeConfig, SteeringMode,
    TimestepConfig,
};
pub use constants::{
    FLOOR_NORMAL_THRESHOLD, GRAVITY_MPS2, MAX_FRAME_DELTA, OUT_OF_BOUNDS_Y, SPAWN_POINT,
    SUBSTEPS_PER_FRAME, YAW_EPS,
};
pub use error::{ConfigError, GeometryError};
pub use intent::{InputState, Intent};
pub use level::{MeshNode, triangles_from_nodes};
pub use movement::{BodyState, LocomotionController};
pub use utils::{facing_from_direction, flat_direction, to_planar, yaw_from_xz};
