//! Level geometry ingestion.
//!
//! A level arrives as a list of mesh nodes: local vertex positions, an optional index buffer,
//! and a scale/rotation/translation pose. Each node is baked into world-space triangles
//! (scale, then rotate, then translate) so the collision world never sees node transforms.

use log::debug;

use crate::{
    collision::{Quat, TriangleVerts, Vec3},
    error::GeometryError,
};

/// One renderable mesh of a loaded level, reduced to what collision needs.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshNode {
    /// Local-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`; `None` means every 3 positions form a triangle.
    pub indices: Option<Vec<u32>>,
    pub scale: Vec3,
    pub rotation: Quat,
    pub translation: Vec3,
}

impl MeshNode {
    /// A node with an identity pose.
    pub fn new(positions: Vec<Vec3>, indices: Option<Vec<u32>>) -> Self {
        Self {
            positions,
            indices,
            scale: Vec3::repeat(1.0),
            rotation: Quat::identity(),
            translation: Vec3::zeros(),
        }
    }

    pub fn with_pose(mut self, scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        self.scale = scale;
        self.rotation = rotation;
        self.translation = translation;
        self
    }

    /// Local -> world for a single vertex.
    #[inline]
    pub fn transform_point(&self, local: &Vec3) -> Vec3 {
        self.rotation * local.component_mul(&self.scale) + self.translation
    }

    /// World-space triangles of this node, appended to `out`.
    ///
    /// `node` is only used to label errors.
    pub fn append_triangles(
        &self,
        node: usize,
        out: &mut Vec<TriangleVerts>,
    ) -> Result<(), GeometryError> {
        let world: Vec<Vec3> = self
            .positions
            .iter()
            .map(|p| self.transform_point(p))
            .collect();

        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(GeometryError::IncompleteTriangle {
                        node,
                        len: indices.len(),
                    });
                }
                let vertex = |index: u32| {
                    world
                        .get(index as usize)
                        .copied()
                        .ok_or(GeometryError::IndexOutOfRange {
                            node,
                            index,
                            vertex_count: world.len(),
                        })
                };
                for tri in indices.chunks_exact(3) {
                    out.push([vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?]);
                }
            }
            None => {
                if world.len() % 3 != 0 {
                    return Err(GeometryError::IncompleteTriangle {
                        node,
                        len: world.len(),
                    });
                }
                out.extend(world.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]]));
            }
        }

        Ok(())
    }
}

/// Flatten every node of a level into one world-space triangle soup.
pub fn triangles_from_nodes(nodes: &[MeshNode]) -> Result<Vec<TriangleVerts>, GeometryError> {
    let mut triangles = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        node.append_triangles(i, &mut triangles)?;
    }
    debug!(
        "extracted {} triangles from {} mesh nodes",
        triangles.len(),
        nodes.len()
    );
    Ok(triangles)
}
