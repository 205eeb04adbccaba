//! Host engine collaborator contracts.
//!
//! The conversion core never touches live engine objects. These are the
//! seams a host plugs into: shader lookup for materials and an optional
//! sink that persists finished assets.

use crate::material::NativeMaterial;
use crate::mesh::NativeMesh;

/// The standard opaque surface shader
pub const STANDARD_SHADER: &str = "Standard";

/// The transparent-capable shader used when a material's opacity is below 1
pub const TRANSPARENT_SHADER: &str = "Transparent/Diffuse";

/// Shaders the export mapper converts without a compatibility warning
pub const SUPPORTED_SHADERS: [&str; 2] = ["Legacy Shaders/Transparent/Diffuse", "Standard"];

/// Opaque reference to a renderable surface shader
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderHandle {
    name: String,
}

impl ShaderHandle {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Resolves a shader identifier to a handle the host can render with
pub trait ShaderRegistry {
    fn find(&self, name: &str) -> ShaderHandle;
}

/// Registry that resolves every name to itself.
///
/// Lets the conversion core run headless, with no engine attached, which is
/// also how the test suite drives it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinShaders;

impl ShaderRegistry for BuiltinShaders {
    fn find(&self, name: &str) -> ShaderHandle {
        ShaderHandle::named(name)
    }
}

/// Sink that durably stores finished assets, for editor-style hosts.
///
/// Import hands over each assembled mesh and each newly mapped material
/// together with a file-system safe asset name.
pub trait AssetSink {
    fn persist_mesh(&mut self, mesh: &NativeMesh, name: &str);
    fn persist_material(&mut self, material: &NativeMaterial, name: &str);
}
