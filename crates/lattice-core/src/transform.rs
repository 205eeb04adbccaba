//! Placement of a native mesh in its scene

use glam::{DAffine3, DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// World placement of a scene node: position, rotation, and scale.
///
/// Export applies this to vertices so portable meshes carry world-space
/// geometry regardless of how the source scene was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Affine form, cheaper to apply per vertex than the full matrix
    pub fn affine(&self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Map a local-space point into world space
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.affine().transform_point3(point)
    }
}
