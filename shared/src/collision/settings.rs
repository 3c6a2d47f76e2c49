/*!
Collision tolerances.

Distances are in meters. Favor practical world-space tolerances over machine
epsilon for robust behavior.
*/

/// Practical small distance for comparisons (meters).
/// Use for dot-product guards, zero-length checks, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Penetrations at or below this depth are not reported (meters).
/// A shape resting exactly on a surface therefore reports no contact.
pub const CONTACT_EPS: f32 = 1.0e-5;

/// Triangles with a smaller area are considered degenerate (square meters).
pub const DEGENERATE_AREA_EPS: f32 = 1.0e-10;

/// Tolerance for deciding that a plane projection lies inside a triangle (meters).
pub const INSIDE_EPS: f32 = 1.0e-5;

/// Padding applied to query AABBs before BVH traversal (meters).
pub const QUERY_AABB_MARGIN: f32 = 1.0e-4;
