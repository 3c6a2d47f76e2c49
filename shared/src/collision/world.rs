use log::{debug, warn};

use super::{
    broad::{TriangleAccel, query_shape_aabb},
    narrow_phase::{self, Penetration},
    settings::DEGENERATE_AREA_EPS,
    types::{CollisionResult, QueryShape, TriangleVerts, Vec3},
};
use crate::error::GeometryError;

/// What to do with zero-area triangles found while building.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Fail the build with [`GeometryError::Degenerate`].
    #[default]
    Reject,
    /// Drop them (with a warning) and index the rest.
    Skip,
}

/// Immutable collision surface: the level's triangles plus a BVH over them.
///
/// Built once, then queried read-only every substep. The empty world (before level geometry
/// has arrived) answers every query with `None`.
pub struct CollisionWorld {
    triangles: Vec<TriangleVerts>,
    normals: Vec<Vec3>,
    accel: TriangleAccel,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::empty()
    }
}

impl CollisionWorld {
    /// A world with no geometry.
    pub fn empty() -> Self {
        Self {
            triangles: Vec::new(),
            normals: Vec::new(),
            accel: TriangleAccel::empty(),
        }
    }

    /// Validate a triangle soup and build the index over it.
    ///
    /// Errors
    /// - `NonFinite` for any NaN/infinite vertex (regardless of policy).
    /// - `Degenerate` for a zero-area triangle under `DegeneratePolicy::Reject`.
    /// - `Empty` if nothing is left to index.
    pub fn build(
        triangles: &[TriangleVerts],
        policy: DegeneratePolicy,
    ) -> Result<Self, GeometryError> {
        let mut kept = Vec::with_capacity(triangles.len());
        let mut normals = Vec::with_capacity(triangles.len());
        let mut skipped = 0usize;

        for (index, tri) in triangles.iter().enumerate() {
            if tri.iter().any(|v| !v.iter().all(|c| c.is_finite())) {
                return Err(GeometryError::NonFinite { index });
            }

            let area = 0.5 * (tri[1] - tri[0]).cross(&(tri[2] - tri[0])).norm();
            let normal = if area > DEGENERATE_AREA_EPS {
                narrow_phase::face_normal(tri)
            } else {
                None
            };

            match (normal, policy) {
                (Some(n), _) => {
                    kept.push(*tri);
                    normals.push(n);
                }
                (None, DegeneratePolicy::Reject) => {
                    return Err(GeometryError::Degenerate { index, area });
                }
                (None, DegeneratePolicy::Skip) => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("skipped {skipped} degenerate triangle(s) while building collision world");
        }
        if kept.is_empty() {
            return Err(GeometryError::Empty);
        }

        let accel = TriangleAccel::build(&kept);
        debug!("collision world built: {} triangles", kept.len());

        Ok(Self {
            triangles: kept,
            normals,
            accel,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of indexed triangles (after skipping degenerates).
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn query_sphere(&self, center: Vec3, radius: f32) -> Option<CollisionResult> {
        self.query(&QueryShape::Sphere { center, radius })
    }

    pub fn query_capsule(&self, start: Vec3, end: Vec3, radius: f32) -> Option<CollisionResult> {
        self.query(&QueryShape::Capsule { start, end, radius })
    }

    /// Deepest contact between `shape` and the surface.
    ///
    /// Prunes with the BVH, tests each candidate triangle, and keeps the single result with the
    /// largest penetration depth. Ties keep the first candidate in traversal order.
    pub fn query(&self, shape: &QueryShape) -> Option<CollisionResult> {
        let radius = shape.radius();
        if self.accel.is_empty() || radius.is_nan() || radius <= 0.0 {
            return None;
        }

        let bounds = query_shape_aabb(shape);
        let mut best: Option<CollisionResult> = None;

        for idx in self.accel.query_candidates(&bounds) {
            let tri = &self.triangles[idx];
            let normal = &self.normals[idx];

            let hit: Option<Penetration> = match *shape {
                QueryShape::Sphere { center, radius } => {
                    narrow_phase::sphere_triangle(&center, radius, tri, normal)
                }
                QueryShape::Capsule { start, end, radius } => {
                    narrow_phase::capsule_triangle(&start, &end, radius, tri, normal)
                }
            };

            if let Some(p) = hit {
                if best.map_or(true, |b| p.depth > b.depth) {
                    best = Some(CollisionResult {
                        normal: p.normal,
                        depth: p.depth,
                        triangle: idx,
                    });
                }
            }
        }

        best
    }
}
