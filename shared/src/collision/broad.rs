use nalgebra as na;
use rapier3d::parry::{
    bounding_volume::Aabb,
    partitioning::{Bvh, BvhBuildStrategy},
};

use super::{
    settings::QUERY_AABB_MARGIN,
    types::{QueryShape, TriangleVerts, Vec3},
};

/// Broad-phase accelerator over the immutable level triangles.
///
/// Notes:
/// - One AABB leaf per triangle; leaf `i` is triangle `i` in build order.
/// - `bvh` is `None` when there are no triangles, so the empty world never touches the tree.
pub struct TriangleAccel {
    bvh: Option<Bvh>,
    leaf_count: usize,
}

impl TriangleAccel {
    /// An accelerator with no leaves. Every candidate query yields nothing.
    pub fn empty() -> Self {
        Self {
            bvh: None,
            leaf_count: 0,
        }
    }

    /// Build a binned BVH over per-triangle AABBs.
    pub fn build(triangles: &[TriangleVerts]) -> Self {
        if triangles.is_empty() {
            return Self::empty();
        }

        let aabbs: Vec<Aabb> = triangles.iter().map(triangle_aabb).collect();

        Self {
            bvh: Some(Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs)),
            leaf_count: aabbs.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Indices of triangles whose AABB overlaps `bounds`, in tree traversal order.
    pub fn query_candidates(&self, bounds: &Aabb) -> Vec<usize> {
        match &self.bvh {
            Some(bvh) => bvh
                .intersect_aabb(bounds)
                .map(|leaf| leaf as usize)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// World-space AABB of a triangle.
pub fn triangle_aabb(tri: &TriangleVerts) -> Aabb {
    let [a, b, c] = tri;
    let mins = na::Point3::new(
        a.x.min(b.x).min(c.x),
        a.y.min(b.y).min(c.y),
        a.z.min(b.z).min(c.z),
    );
    let maxs = na::Point3::new(
        a.x.max(b.x).max(c.x),
        a.y.max(b.y).max(c.y),
        a.z.max(b.z).max(c.z),
    );
    Aabb { mins, maxs }
}

/// World-space AABB of a query shape, padded by a small margin so that
/// shapes grazing a leaf boundary are not pruned.
pub fn query_shape_aabb(shape: &QueryShape) -> Aabb {
    let aabb = match *shape {
        QueryShape::Sphere { center, radius } => {
            let r = Vec3::repeat(radius);
            Aabb {
                mins: na::Point3::from(center - r),
                maxs: na::Point3::from(center + r),
            }
        }
        QueryShape::Capsule { start, end, radius } => {
            let r = Vec3::repeat(radius);
            Aabb {
                mins: na::Point3::from(start.inf(&end) - r),
                maxs: na::Point3::from(start.sup(&end) + r),
            }
        }
    };
    aabb_inflate(&aabb, QUERY_AABB_MARGIN)
}

/// Inflate an AABB by `margin` on all sides.
fn aabb_inflate(a: &Aabb, margin: f32) -> Aabb {
    if margin <= 0.0 {
        return *a;
    }
    let delta = Vec3::repeat(margin);
    Aabb {
        mins: a.mins - delta,
        maxs: a.maxs + delta,
    }
}

/// Test two AABBs for intersection.
#[cfg(test)]
fn aabb_intersects(a: &Aabb, b: &Aabb) -> bool {
    !(a.maxs.x < b.mins.x
        || a.mins.x > b.maxs.x
        || a.maxs.y < b.mins.y
        || a.mins.y > b.maxs.y
        || a.maxs.z < b.mins.z
        || a.mins.z > b.maxs.z)
}
