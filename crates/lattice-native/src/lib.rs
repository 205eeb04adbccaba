//! Lattice Native - Native engine mesh and material model
//!
//! The engine-side half of conversion:
//! - [`NativeMesh`] with shared vertex buffers and per-submesh index ranges
//! - [`NativeMaterial`] surface instances bound to shaders
//! - Host collaborator traits for shader lookup and asset persistence

pub mod host;
pub mod material;
pub mod mesh;

pub use host::{
    AssetSink, BuiltinShaders, ShaderHandle, ShaderRegistry, STANDARD_SHADER, SUPPORTED_SHADERS,
    TRANSPARENT_SHADER,
};
pub use material::NativeMaterial;
pub use mesh::{IndexFormat, NativeMesh, Submesh, Topology};
