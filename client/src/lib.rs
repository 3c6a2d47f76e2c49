pub mod camera;
pub mod clock;
pub mod driver;
pub mod input;
pub mod level;

pub use camera::{CAMERA_OFFSET, FollowCamera};
pub use clock::{FixedClock, FrameClock, SystemClock};
pub use driver::{FrameDriver, FrameOutput, Renderer};
pub use input::KeyBindings;
