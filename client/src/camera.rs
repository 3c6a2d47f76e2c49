use nalgebra::UnitQuaternion;
use walker_shared::Vec3;

/// Offset from the avatar to a freshly placed camera.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 5.0);

/// Orbit-style follow camera: the target tracks the avatar and the eye keeps its offset from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Eye position relative to the target.
    pub offset: Vec3,
    /// Exponential catch-up rate for the eye (1/s). `None` snaps every frame.
    pub decay_rate: Option<f32>,
}

impl FollowCamera {
    /// Camera looking at `target` from `target + CAMERA_OFFSET`.
    pub fn looking_at(target: Vec3) -> Self {
        Self {
            position: target + CAMERA_OFFSET,
            target,
            offset: CAMERA_OFFSET,
            decay_rate: None,
        }
    }

    /// Swing the eye around the target by `yaw` radians about +Y.
    pub fn orbit(&mut self, yaw: f32) {
        let rotation = UnitQuaternion::from_axis_angle(&Vec3::y_axis(), yaw);
        self.offset = rotation * self.offset;
        self.position = self.target + rotation * (self.position - self.target);
    }

    /// Move the target onto `avatar`, carrying the eye along.
    pub fn follow(&mut self, avatar: Vec3, dt: f32) {
        let desired = avatar + self.offset;
        self.target = avatar;

        self.position = match self.decay_rate {
            Some(rate) if dt > 0.0 => {
                // Frame-rate independent smoothing: t = 1 - e^(-rate * dt).
                let t = 1.0 - (-rate * dt).exp();
                self.position.lerp(&desired, t)
            }
            Some(_) => self.position,
            None => desired,
        };
    }

    /// Unnormalized view direction, as handed to camera-relative steering.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.target - self.position
    }
}
