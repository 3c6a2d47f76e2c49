use thiserror::Error;

/// Malformed level geometry. Raised while building the collision world or extracting
/// triangles from mesh nodes, never during a step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// No usable triangles were supplied (or all were skipped as degenerate).
    #[error("level geometry contains no usable triangles")]
    Empty,

    /// A vertex has a NaN or infinite coordinate.
    #[error("triangle {index} has a non-finite vertex")]
    NonFinite { index: usize },

    /// Triangle area is below the degeneracy epsilon.
    #[error("triangle {index} is degenerate (area {area:e})")]
    Degenerate { index: usize, area: f32 },

    /// An index buffer entry points past the end of the vertex buffer.
    #[error("mesh node {node}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        node: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Non-indexed geometry whose vertex count is not a multiple of 3,
    /// or an index buffer whose length is not a multiple of 3.
    #[error("mesh node {node}: {len} entries do not form whole triangles")]
    IncompleteTriangle { node: usize, len: usize },
}

/// Configuration could not be parsed or is out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(&'static str),

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}
