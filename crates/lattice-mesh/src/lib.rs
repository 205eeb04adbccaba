//! Lattice Mesh - The portable interchange mesh model
//!
//! Flat, engine-agnostic mesh and material records plus the
//! cardinality-prefixed face codec they share:
//! - [`PortableMesh`] with its parallel attribute buffers
//! - [`RenderMaterial`] surface records
//! - [`faces`] encoding, decoding, and fan triangulation

pub mod element;
pub mod error;
pub mod faces;
pub mod material;
pub mod mesh;

pub use element::SourceElement;
pub use error::MeshError;
pub use faces::Polygon;
pub use material::RenderMaterial;
pub use mesh::{AlignedBuffers, PortableMesh};
