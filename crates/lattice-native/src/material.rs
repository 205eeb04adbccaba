//! Native engine material model

use lattice_core::Color;

use crate::host::ShaderHandle;

/// A native surface material instance with the properties conversion reads
/// and writes.
///
/// `metallic` and `glossiness` are `None` when the underlying shader has no
/// such property. Emission only takes effect while `emission_enabled` is
/// set, mirroring how engines gate the emission keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeMaterial {
    pub name: String,
    pub shader: ShaderHandle,
    pub color: Color,
    pub metallic: Option<f32>,
    pub glossiness: Option<f32>,
    pub emission: Color,
    pub emission_enabled: bool,
}

impl NativeMaterial {
    /// A fresh opaque material on the given shader
    pub fn new(name: impl Into<String>, shader: ShaderHandle) -> Self {
        Self {
            name: name.into(),
            shader,
            color: Color::WHITE,
            metallic: None,
            glossiness: None,
            emission: Color::BLACK,
            emission_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_material_defaults() {
        let material = NativeMaterial::new("paint", ShaderHandle::named("Standard"));
        assert_eq!(material.color, Color::WHITE);
        assert_eq!(material.metallic, None);
        assert!(!material.emission_enabled);
    }
}
