//! Portable render material record

use lattice_core::PackedColor;
use serde::{Deserialize, Serialize};

/// Engine-agnostic surface description attached to a portable mesh.
///
/// Scalar channels are normalized to `[0, 1]`; colors stay packed ARGB so
/// they survive a round trip bit for bit. `emissive` equal to opaque black
/// means the surface does not emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderMaterial {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub diffuse: PackedColor,
    pub opacity: f64,
    pub metalness: f64,
    pub roughness: f64,
    pub emissive: PackedColor,
}

impl Default for RenderMaterial {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            diffuse: PackedColor::OPAQUE_WHITE,
            opacity: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            emissive: PackedColor::OPAQUE_BLACK,
        }
    }
}

impl RenderMaterial {
    /// True when the record describes a partially transparent surface
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// True when the record carries a non-black emissive color
    pub fn is_emissive(&self) -> bool {
        self.emissive != PackedColor::OPAQUE_BLACK
    }
}
