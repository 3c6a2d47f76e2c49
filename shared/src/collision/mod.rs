/*!
Collision root module.

Static level collision for the locomotion controller: a BVH over the level's
triangle soup (via the parry3d kernel re-exported by rapier3d) answering
"how deep does this sphere/capsule penetrate the surface, and which way out?".

- types:        shared data types (Vec3, QueryShape, CollisionResult)
- settings:     tolerance constants
- broad:        per-triangle AABBs and BVH candidate queries
- narrow_phase: sphere/capsule vs triangle penetration
- world:        the built index and its deepest-contact queries
- ground:       floor classification and contact velocity response
*/

pub mod broad;
pub mod ground;
pub mod narrow_phase;
pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use ground::{GroundDetection, GroundState, apply_contact_velocity, is_floor_normal};
pub use types::{CollisionResult, Point3, Quat, QueryShape, TriangleVerts, Vec3};
pub use world::{CollisionWorld, DegeneratePolicy};
