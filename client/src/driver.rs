/*!
Per-frame driver.

Owns everything a running avatar needs (controller, body, input, collision world, camera) and
turns one elapsed frame time into a clamped number of equal substeps, then hands the result to a
[`Renderer`].

Notes
- The level may arrive late. Until [`FrameDriver::load_level`] is called the body falls through
  an empty world; the out-of-bounds rule eventually resets it.
- Steering samples the camera once per substep. The camera follows the body once all substeps are
  done, so every substep of a frame sees the same view unless the camera is moved in between.
*/

use log::{debug, info};
use walker_shared::{
    CollisionWorld, DegeneratePolicy, GeometryError, InputState, KinematicBody,
    LocomotionConfig, LocomotionController, MeshNode, Vec3, collision::Quat,
    triangles_from_nodes,
};

use crate::{camera::FollowCamera, clock::FrameClock, input::KeyBindings};

/// What a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing: Quat,
    /// Capsule segment endpoints for drawing; both equal `position` for a sphere.
    pub segment: (Vec3, Vec3),
    pub on_floor: bool,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Number of substeps simulated this frame.
    pub substeps: u32,
    /// A respawn happened in one of this frame's substeps.
    pub respawned: bool,
}

/// Presentation seam. Called once per frame, after all substeps.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameOutput);
}

/// Discards every frame.
impl Renderer for () {
    fn draw(&mut self, _frame: &FrameOutput) {}
}

pub struct FrameDriver {
    controller: LocomotionController,
    body: KinematicBody,
    input: InputState,
    world: CollisionWorld,
    camera: FollowCamera,
    bindings: KeyBindings,
    frames: u64,
}

impl FrameDriver {
    pub fn new(config: LocomotionConfig) -> Self {
        let controller = LocomotionController::new(config);
        let body = controller.spawn_body();
        let camera = FollowCamera::looking_at(body.position);
        Self {
            controller,
            body,
            input: InputState::default(),
            world: CollisionWorld::empty(),
            camera,
            bindings: KeyBindings::default(),
            frames: 0,
        }
    }

    /// Swap in a new collision world. Takes effect from the next substep.
    pub fn load_level(&mut self, world: CollisionWorld) {
        info!("level loaded: {} triangles", world.len());
        self.world = world;
    }

    /// Bake mesh nodes and load them. On error the current world is kept.
    pub fn load_level_nodes(
        &mut self,
        nodes: &[MeshNode],
        policy: DegeneratePolicy,
    ) -> Result<(), GeometryError> {
        let triangles = triangles_from_nodes(nodes)?;
        let world = CollisionWorld::build(&triangles, policy)?;
        self.load_level(world);
        Ok(())
    }

    pub fn key_down(&mut self, code: &str) -> bool {
        self.bindings.key_down(&mut self.input, code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.bindings.key_up(&mut self.input, code)
    }

    /// Release all keys (e.g. on focus loss).
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    #[inline]
    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    #[inline]
    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    #[inline]
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulate one rendered frame of `elapsed` seconds and draw it.
    pub fn frame<R: Renderer + ?Sized>(&mut self, elapsed: f32, renderer: &mut R) -> FrameOutput {
        let (dt, substeps) = self.controller.config().timestep.split(elapsed);

        let mut respawned = false;
        for _ in 0..substeps {
            let view_dir = self.camera.forward();
            let state = self.controller.step(
                &mut self.body,
                &self.world,
                &mut self.input,
                &view_dir,
                dt,
            );
            respawned |= state.respawned;
        }

        self.camera.follow(self.body.position, dt * substeps as f32);
        self.frames += 1;

        if respawned {
            debug!("frame {}: respawned", self.frames);
        }

        let output = FrameOutput {
            position: self.body.position,
            velocity: self.body.velocity,
            facing: self.controller.facing(),
            segment: self.body.segment(),
            on_floor: self.controller.is_on_floor(),
            camera_position: self.camera.position,
            camera_target: self.camera.target,
            substeps,
            respawned,
        };
        renderer.draw(&output);
        output
    }

    /// Run `frames` frames, pulling elapsed time from `clock`.
    pub fn run<C: FrameClock + ?Sized, R: Renderer + ?Sized>(
        &mut self,
        clock: &mut C,
        renderer: &mut R,
        frames: usize,
    ) -> Option<FrameOutput> {
        let mut last = None;
        for _ in 0..frames {
            let elapsed = clock.delta();
            last = Some(self.frame(elapsed, renderer));
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use walker_shared::{Intent, TriangleVerts};

    use super::*;
    use crate::clock::FixedClock;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<FrameOutput>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &FrameOutput) {
            self.frames.push(*frame);
        }
    }

    fn floor_world() -> CollisionWorld {
        let tri: TriangleVerts = [
            Vec3::new(-100.0, 0.0, -100.0),
            Vec3::new(-100.0, 0.0, 100.0),
            Vec3::new(100.0, 0.0, 0.0),
        ];
        CollisionWorld::build(&[tri], DegeneratePolicy::Reject).unwrap()
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut driver = FrameDriver::new(LocomotionConfig::sphere_camera_relative());
        let y0 = driver.body().position.y;

        let out = driver.frame(1.0, &mut ());
        assert_eq!(out.substeps, 5);

        // 0.05 s of free fall from rest, not a full second.
        let g = driver.controller().config().gravity;
        let max_drop = 0.5 * g * 0.05 * 0.05 * 1.5;
        assert!(y0 - out.position.y < max_drop, "{:?}", out.position);
    }

    #[test]
    fn zero_or_negative_elapsed_simulates_nothing() {
        let mut driver = FrameDriver::new(LocomotionConfig::sphere_camera_relative());
        let before = *driver.body();
        assert_eq!(driver.frame(0.0, &mut ()).substeps, 0);
        assert_eq!(driver.frame(-0.5, &mut ()).substeps, 0);
        assert_eq!(*driver.body(), before);
    }

    #[test]
    fn renderer_sees_every_frame_and_camera_follows() {
        let mut driver = FrameDriver::new(LocomotionConfig::sphere_camera_relative());
        driver.load_level(floor_world());

        let mut recorder = Recorder::default();
        let mut clock = FixedClock::from_hz(60.0);
        let last = driver.run(&mut clock, &mut recorder, 120).unwrap();

        assert_eq!(recorder.frames.len(), 120);
        assert_eq!(driver.frames(), 120);
        assert!(last.on_floor);
        assert_eq!(last.camera_target, last.position);
        assert_eq!(last.segment, (last.position, last.position));
    }

    #[test]
    fn capsule_frames_carry_the_segment() {
        let mut driver = FrameDriver::new(LocomotionConfig::capsule());
        driver.load_level(floor_world());
        let mut clock = FixedClock::from_hz(60.0);
        let out = driver.run(&mut clock, &mut (), 90).unwrap();

        let (start, end) = out.segment;
        assert_eq!(start, out.position);
        assert!(end.y > start.y);
        assert!((end.x - start.x).abs() < 1.0e-6 && (end.z - start.z).abs() < 1.0e-6);
    }

    #[test]
    fn released_keys_stop_steering() {
        let mut driver = FrameDriver::new(LocomotionConfig::sphere_camera_relative());
        driver.load_level(floor_world());
        let mut clock = FixedClock::from_hz(60.0);
        driver.run(&mut clock, &mut (), 60);

        driver.bindings_mut().bind("ArrowUp", Intent::Forward);
        assert!(driver.key_down("ArrowUp"));
        assert!(driver.key_down("KeyD"));
        driver.run(&mut clock, &mut (), 30);
        driver.release_all();

        // Ground damping alone brings the body to rest.
        let out = driver.run(&mut clock, &mut (), 120).unwrap();
        assert!(out.velocity.norm() < 1.0e-2, "{:?}", out.velocity);
    }

    #[test]
    fn late_level_load_catches_a_falling_body() {
        let mut driver = FrameDriver::new(LocomotionConfig::sphere_camera_relative());
        let mut clock = FixedClock::from_hz(60.0);

        driver.run(&mut clock, &mut (), 10);
        assert!(!driver.controller().is_on_floor());

        driver.load_level(floor_world());
        let last = driver.run(&mut clock, &mut (), 120).unwrap();
        assert!(last.on_floor);
        assert!((last.position.y - 0.35).abs() < 1.0e-2);
    }

    #[test]
    fn camera_relative_walk_follows_the_view() {
        let mut driver = FrameDriver::new(LocomotionConfig::sphere_camera_relative());
        driver.load_level(floor_world());
        let mut clock = FixedClock::from_hz(60.0);
        driver.run(&mut clock, &mut (), 60);

        // Look down +X instead of -Z, then walk "forward".
        driver.camera_mut().orbit(-std::f32::consts::FRAC_PI_2);
        let start = driver.body().position;
        assert!(driver.key_down("KeyW"));
        driver.run(&mut clock, &mut (), 60);

        let moved = driver.body().position - start;
        assert!(moved.x > 1.0, "{moved:?}");
        assert!(moved.z.abs() < 0.1, "{moved:?}");
    }

    #[test]
    fn jump_key_launches_from_floor() {
        let mut driver = FrameDriver::new(LocomotionConfig::capsule());
        driver.load_level(floor_world());
        let mut clock = FixedClock::from_hz(60.0);
        driver.run(&mut clock, &mut (), 90);

        assert!(driver.key_down("Space"));
        let out = driver.frame(clock.delta(), &mut ());
        assert!(out.velocity.y > 0.0);
        assert!(!out.on_floor);
        driver.key_up("Space");
    }

    #[test]
    fn bad_level_keeps_previous_world() {
        let mut driver = FrameDriver::new(LocomotionConfig::sphere_camera_relative());
        driver.load_level(floor_world());
        let broken = MeshNode::new(vec![Vec3::zeros()], None);
        assert!(
            driver
                .load_level_nodes(&[broken], DegeneratePolicy::Reject)
                .is_err()
        );
        assert_eq!(driver.world().len(), 1);
    }
}
