use walker_shared::{
    CollisionWorld, DegeneratePolicy, InputState, Intent, KinematicBody, LocomotionConfig,
    LocomotionController, MeshNode, TriangleVerts, Vec3, collision::Quat, triangles_from_nodes,
};

const DT: f32 = 0.01;

fn floor_tri() -> TriangleVerts {
    [
        Vec3::new(-500.0, 0.0, -500.0),
        Vec3::new(-500.0, 0.0, 500.0),
        Vec3::new(500.0, 0.0, 0.0),
    ]
}

/// Vertical wall in the plane x = 1.
fn wall_tri() -> TriangleVerts {
    [
        Vec3::new(1.0, -50.0, -50.0),
        Vec3::new(1.0, -50.0, 50.0),
        Vec3::new(1.0, 50.0, 0.0),
    ]
}

fn world(tris: &[TriangleVerts]) -> CollisionWorld {
    CollisionWorld::build(tris, DegeneratePolicy::Reject).unwrap()
}

fn run(
    controller: &mut LocomotionController,
    body: &mut KinematicBody,
    world: &CollisionWorld,
    input: &mut InputState,
    steps: usize,
) {
    for _ in 0..steps {
        controller.step(body, world, input, &-Vec3::z(), DT);
    }
}

#[test]
fn capsule_settles_on_floor() {
    let world = world(&[floor_tri()]);
    let mut controller = LocomotionController::new(LocomotionConfig::capsule());
    let mut body = controller.spawn_body();
    assert_eq!(body.position, Vec3::new(0.0, 5.0, 0.0));

    let mut input = InputState::default();
    run(&mut controller, &mut body, &world, &mut input, 500);

    assert!((body.position.y - 0.35).abs() < 1.0e-2, "{:?}", body.position);
    assert!(body.velocity.y.abs() < 1.0e-2, "{:?}", body.velocity);
    assert!(controller.is_on_floor());
}

#[test]
fn sphere_lands_then_jumps_once() {
    let world = world(&[floor_tri()]);
    let mut controller = LocomotionController::new(LocomotionConfig::sphere_camera_relative());
    let mut body = controller.spawn_body();
    let mut input = InputState::default();

    let mut landed_at = None;
    for i in 0..400 {
        let state = controller.step(&mut body, &world, &mut input, &-Vec3::z(), DT);
        if state.on_floor && landed_at.is_none() {
            landed_at = Some(i);
        }
    }
    assert!(landed_at.is_some());
    assert!((body.position.y - 0.35).abs() < 1.0e-2);

    input.press(Intent::Jump);
    let state = controller.step(&mut body, &world, &mut input, &-Vec3::z(), DT);
    assert_eq!(state.velocity.y, controller.config().jump_speed);

    // Still rising: a second press in the air changes nothing.
    input.release(Intent::Jump);
    run(&mut controller, &mut body, &world, &mut input, 5);
    input.press(Intent::Jump);
    let before = body.velocity.y;
    let state = controller.step(&mut body, &world, &mut input, &-Vec3::z(), DT);
    assert!(state.velocity.y < before);
    assert!(state.position.y > 0.5);
}

#[test]
fn wall_blocks_and_tangent_motion_survives() {
    let world = world(&[floor_tri(), wall_tri()]);
    let mut controller = LocomotionController::new(LocomotionConfig::sphere_camera_relative());
    let mut body = controller.spawn_body();
    body.position = Vec3::new(0.0, 0.35, 0.0);

    let mut input = InputState::default();
    input.press(Intent::Right);
    input.press(Intent::Forward);
    run(&mut controller, &mut body, &world, &mut input, 300);

    assert!(body.position.x < 1.0 - 0.35 + 1.0e-2, "{:?}", body.position);
    assert!(body.position.y > 0.3);
    // Forward (-Z) motion keeps going along the wall.
    assert!(body.position.z < -5.0, "{:?}", body.position);
}

#[test]
fn falling_off_the_world_respawns() {
    let world = world(&[floor_tri()]);
    let mut controller = LocomotionController::new(LocomotionConfig::sphere_fixed_axis());
    let mut body = controller.spawn_body();
    body.position = Vec3::new(1000.0, -99.9, 0.0);
    body.velocity = Vec3::new(0.0, -20.0, 0.0);

    let mut input = InputState::default();
    let state = controller.step(&mut body, &world, &mut input, &-Vec3::z(), DT);
    assert!(state.respawned);
    assert_eq!(body.position, Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(body.velocity, Vec3::zeros());
}

#[test]
fn rigid_body_preset_rests_and_jumps_only_when_still() {
    let world = world(&[floor_tri()]);
    let mut controller = LocomotionController::new(LocomotionConfig::rigid_body());
    let mut body = controller.spawn_body();
    let mut input = InputState::default();

    run(&mut controller, &mut body, &world, &mut input, 1000);
    assert!((body.position.y - 0.5).abs() < 1.0e-2, "{:?}", body.position);
    assert!(controller.is_on_floor());

    input.press(Intent::Jump);
    let state = controller.step(&mut body, &world, &mut input, &-Vec3::z(), DT);
    assert_eq!(state.velocity.y, 5.0);
}

#[test]
fn mesh_nodes_feed_the_collision_world() {
    let ground = MeshNode::new(
        vec![
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ],
        Some(vec![0, 1, 2, 0, 2, 3]),
    )
    .with_pose(
        Vec3::new(50.0, 1.0, 50.0),
        Quat::identity(),
        Vec3::new(0.0, -2.0, 0.0),
    );

    let tris = triangles_from_nodes(&[ground]).unwrap();
    let world = world(&tris);

    let mut controller = LocomotionController::new(LocomotionConfig::sphere_camera_relative());
    let mut body = controller.spawn_body();
    let mut input = InputState::default();
    run(&mut controller, &mut body, &world, &mut input, 500);

    assert!((body.position.y - (-2.0 + 0.35)).abs() < 1.0e-2, "{:?}", body.position);
}

#[test]
fn walking_on_flat_floor_settles_at_ground_speed() {
    let world = world(&[floor_tri()]);
    let mut controller = LocomotionController::new(LocomotionConfig::sphere_camera_relative());
    let mut body = controller.spawn_body();
    body.position = Vec3::new(0.0, 0.35, 0.0);

    let mut input = InputState::default();
    input.press(Intent::Forward);
    run(&mut controller, &mut body, &world, &mut input, 1000);

    // Fixed point of `v = (v + s) * (1 + f)` with ground speed and ground damping only.
    let cfg = controller.config();
    let s = cfg.ground_speed * DT;
    let f = cfg.damping.factor(DT, true);
    let after_damping = s * (1.0 + f) / -f;
    let before_damping = s / -f;

    let planar = Vec3::new(body.velocity.x, 0.0, body.velocity.z).norm();
    assert!(
        planar > after_damping * 0.99 && planar < before_damping * 1.01,
        "planar speed {planar}, expected {after_damping}..{before_damping}"
    );
    assert!(controller.is_on_floor());
    assert!((body.position.y - 0.35).abs() < 1.0e-2);
}

#[test]
fn rigid_body_falls_and_jumps_ballistically() {
    let world = world(&[floor_tri()]);
    let mut controller = LocomotionController::new(LocomotionConfig::rigid_body());
    let mut body = controller.spawn_body();
    let mut input = InputState::default();
    let g = controller.config().gravity;

    // Free fall of 4.5 m: about 0.96 s, reaching about 9.4 m/s.
    let mut fastest = 0.0f32;
    let mut landed_at = None;
    for i in 0..300 {
        let state = controller.step(&mut body, &world, &mut input, &-Vec3::z(), DT);
        fastest = fastest.max(-state.velocity.y);
        if state.contact.is_some() && landed_at.is_none() {
            landed_at = Some(i);
        }
    }
    let landed_at = landed_at.unwrap() as f32 * DT;
    let fall_time = (2.0 * 4.5 / g).sqrt();
    assert!((landed_at - fall_time).abs() < 0.05, "landed after {landed_at} s");
    assert!(fastest > 0.95 * g * fall_time, "fastest fall {fastest} m/s");

    input.press(Intent::Jump);
    let start = controller
        .step(&mut body, &world, &mut input, &-Vec3::z(), DT)
        .position
        .y;
    let mut apex = start;
    for _ in 0..150 {
        let state = controller.step(&mut body, &world, &mut input, &-Vec3::z(), DT);
        apex = apex.max(state.position.y);
    }

    let jump = controller.config().jump_speed;
    let ballistic = jump * jump / (2.0 * g);
    assert!((apex - start - ballistic).abs() < 0.08, "apex {}", apex - start);
}
