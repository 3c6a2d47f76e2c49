/// Air-control multiplier for steering acceleration while airborne, relative to ground speed.
///
/// Convention:
/// - 1.0 = full ground control in air
/// - 0.0 = no air control
///
/// The default ground/air speeds below encode this ratio directly (25 vs 8).
pub const AIR_CONTROL_MULTIPLIER: f32 = 0.32;

/// Steering acceleration applied per held direction while on the floor (m/s^2).
pub const GROUND_SPEED: f32 = 25.0;

/// Steering acceleration applied per held direction while airborne (m/s^2).
pub const AIR_SPEED: f32 = GROUND_SPEED * AIR_CONTROL_MULTIPLIER;

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 30.0;

/// Vertical launch speed applied by a jump (m/s).
pub const JUMP_SPEED: f32 = 15.0;

/// Exponential damping rate `k` in `exp(-k * dt) - 1`.
pub const DAMPING_RATE: f32 = 4.0;

/// Fraction of the damping rate applied while airborne.
pub const AIR_DAMPING_SCALE: f32 = 0.1;

/// Minimum contact normal Y for a contact to count as floor support.
/// 0.7 is roughly a 45 degree slope.
pub const FLOOR_NORMAL_THRESHOLD: f32 = 0.7;

/// Falling below this height teleports the body back to its spawn point (meters).
pub const OUT_OF_BOUNDS_Y: f32 = -100.0;

/// Default spawn point (meters).
pub const SPAWN_POINT: [f32; 3] = [0.0, 5.0, 0.0];

/// Upper bound on a single rendered frame's simulated time (seconds).
pub const MAX_FRAME_DELTA: f32 = 0.05;

/// Number of equal substeps one rendered frame is divided into.
pub const SUBSTEPS_PER_FRAME: u32 = 5;

/// Minimum planar motion required to update yaw (m/s).
pub const YAW_EPS: f32 = 1.0e-6;
