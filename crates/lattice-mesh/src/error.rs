//! Error types for the portable mesh model

use thiserror::Error;

/// Errors raised while decoding portable mesh data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A face run's cardinality prefix does not fit the remaining stream.
    #[error("malformed face data at offset {offset}: cardinality {cardinality} with {remaining} values remaining")]
    MalformedFaceData {
        offset: usize,
        cardinality: i32,
        remaining: usize,
    },

    /// A face index does not address any vertex of the mesh.
    #[error("face index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: i32, vertex_count: usize },
}
