use log::{debug, warn};

use crate::{
    body::{BodyShape, KinematicBody},
    collision::{
        CollisionResult, CollisionWorld, GroundDetection, GroundState, Quat, Vec3,
        apply_contact_velocity,
    },
    config::{FacingMode, LocomotionConfig, SteeringMode},
    intent::{InputState, Intent},
    utils::{facing_from_direction, flat_direction},
};

/// Output of a single `step()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Floor support in this or the previous step.
    pub on_floor: bool,
    /// Yaw-only facing; unchanged when there was nothing to face.
    pub facing: Quat,
    /// The contact consumed this step, if any.
    pub contact: Option<CollisionResult>,
    /// The body fell out of the world and was put back at spawn.
    pub respawned: bool,
}

/// Per-substep locomotion: steering, damping, gravity, integration, collision response,
/// jumping, and out-of-bounds recovery.
///
/// The controller owns only the state that spans steps (ground window, last steering
/// direction, facing). Body, collision world, and input are passed in, so a step has no side
/// effects beyond the body and the consumed jump press.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    config: LocomotionConfig,
    shape: BodyShape,
    ground: GroundState,
    forward: Vec3,
    facing: Quat,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        let shape = config.shape.to_body_shape();
        Self {
            config,
            shape,
            ground: GroundState::default(),
            forward: -Vec3::z(),
            facing: Quat::identity(),
        }
    }

    #[inline]
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// A fresh body at the configured spawn point.
    pub fn spawn_body(&self) -> KinematicBody {
        KinematicBody::new(self.shape, self.config.spawn_point())
    }

    #[inline]
    pub fn is_on_floor(&self) -> bool {
        self.ground.is_supported()
    }

    #[inline]
    pub fn facing(&self) -> Quat {
        self.facing
    }

    /// Forward and side (right) vectors on the ground plane.
    ///
    /// Camera-relative steering flattens `view_dir`; a vertical or zero view keeps the last
    /// usable forward instead of producing NaN.
    pub fn steering_axes(&mut self, view_dir: &Vec3) -> (Vec3, Vec3) {
        match self.config.steering {
            SteeringMode::CameraRelative => {
                if let Some(forward) = flat_direction(view_dir) {
                    self.forward = forward;
                }
            }
            SteeringMode::FixedAxis => self.forward = -Vec3::z(),
        }

        let side = self.forward.cross(&Vec3::y());
        (self.forward, side)
    }

    /// Advance `body` by `dt` seconds.
    ///
    /// Order
    /// 1. Steering axes from the camera (or fixed axes).
    /// 2. Each held direction adds `axis * speed * dt` (ground or air speed). Directions stack.
    /// 3. Damping (ground or air rate).
    /// 4-5. Integrate with gravity while airborne (or always, if configured).
    /// 6. Deepest-contact query at the new position.
    /// 7. Contact response: floor classification, velocity cancel, push-out.
    /// 8. Jump on a fresh press, if supported this or the previous step.
    /// 9. Out-of-bounds respawn.
    pub fn step(
        &mut self,
        body: &mut KinematicBody,
        world: &CollisionWorld,
        input: &mut InputState,
        view_dir: &Vec3,
        dt: f32,
    ) -> BodyState {
        if !dt.is_finite() || dt <= 0.0 {
            return self.snapshot(body, None, false);
        }

        let (forward, side) = self.steering_axes(view_dir);
        let cfg = &self.config;
        // A resting body only touches the floor every other step, so speed and damping use the
        // two-step support window. Gravity keys off the last step alone so the body re-seats.
        let supported = self.ground.is_supported();
        let grounded = self.ground.current;

        let speed = if supported { cfg.ground_speed } else { cfg.air_speed };
        let speed_delta = speed * dt;

        let mut wish = Vec3::zeros();
        if input.is_held(Intent::Forward) {
            wish += forward;
        }
        if input.is_held(Intent::Backward) {
            wish -= forward;
        }
        if input.is_held(Intent::Right) {
            wish += side;
        }
        if input.is_held(Intent::Left) {
            wish -= side;
        }
        body.velocity += wish * speed_delta;

        cfg.damping.apply(&mut body.velocity, dt, supported);

        let gravity = if !grounded || cfg.gravity_when_grounded {
            Vec3::new(0.0, -cfg.gravity, 0.0)
        } else {
            Vec3::zeros()
        };
        body.integrate(dt, gravity);

        let contact = world.query(&body.query_shape());
        let mut floor_contact = false;
        if let Some(hit) = contact {
            floor_contact = match cfg.ground_detection {
                GroundDetection::ContactNormal => {
                    apply_contact_velocity(&mut body.velocity, &hit, cfg.floor_normal_threshold)
                }
                GroundDetection::RestingVelocity { .. } => {
                    // Rigid contact: stop motion into any surface.
                    let along = hit.normal.dot(&body.velocity);
                    if along < 0.0 {
                        body.velocity -= hit.normal * along;
                    }
                    false
                }
            };
            body.translate(hit.push_out());
        }

        let on_floor = match cfg.ground_detection {
            GroundDetection::ContactNormal => floor_contact,
            GroundDetection::RestingVelocity { tolerance } => body.velocity.y.abs() < tolerance,
        };
        self.ground.advance(on_floor);

        if input.take_jump() {
            if self.ground.is_supported() {
                body.velocity.y = self.config.jump_speed;
                self.ground.clear();
                debug!("jump at {:?}", body.position);
            } else {
                debug!("jump ignored: airborne");
            }
        }

        let mut respawned = false;
        if body.position.y < self.config.out_of_bounds_y {
            warn!(
                "body fell out of bounds at {:?}; respawning at {:?}",
                body.position, self.config.spawn
            );
            body.teleport(self.config.spawn_point());
            self.ground.clear();
            respawned = true;
        }

        let facing = match self.config.facing {
            FacingMode::Travel => facing_from_direction(&body.velocity),
            FacingMode::Camera => facing_from_direction(&self.forward),
        };
        if let Some(facing) = facing {
            self.facing = facing;
        }

        self.snapshot(body, contact, respawned)
    }

    fn snapshot(
        &self,
        body: &KinematicBody,
        contact: Option<CollisionResult>,
        respawned: bool,
    ) -> BodyState {
        BodyState {
            position: body.position,
            velocity: body.velocity,
            on_floor: self.ground.is_supported(),
            facing: self.facing,
            contact,
            respawned,
        }
    }
}
