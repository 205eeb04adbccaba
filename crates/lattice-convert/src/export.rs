//! Export pipeline: native meshes to portable form.
//!
//! Every face-list submesh becomes its own portable mesh carrying the
//! submesh's vertex window, world-space positions, and the material of its
//! slot. Faces are rewritten from native clockwise to portable
//! counter-clockwise winding.

use glam::DVec3;
use lattice_core::{Aabb, PackedColor, Transform, Units};
use lattice_mesh::PortableMesh;
use lattice_native::{NativeMaterial, NativeMesh};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::material::material_to_portable;
use crate::space;

/// Export-side settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Unit tag stamped on produced meshes. Native coordinates are assumed
    /// to already be sized in this unit; export never rescales.
    pub units: Units,
}

/// Converts native meshes into portable interchange meshes
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    pub options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Convert every supported submesh of `mesh` into a portable mesh.
    ///
    /// `materials` pairs with submeshes by position and may be shorter; the
    /// world `transform` is baked into the exported positions. Submeshes
    /// with non-face topologies are skipped with a warning.
    pub fn mesh_to_portable(
        &self,
        mesh: &NativeMesh,
        transform: &Transform,
        materials: &[NativeMaterial],
    ) -> Vec<PortableMesh> {
        let mut converted = Vec::with_capacity(mesh.submesh_count());
        for submesh in 0..mesh.submesh_count() {
            let Some(mut portable) = self.submesh_to_portable(mesh, transform, submesh) else {
                continue;
            };
            if let Some(material) = materials.get(submesh) {
                portable.material = Some(material_to_portable(material));
            }
            converted.push(portable);
        }
        converted
    }

    /// Convert one submesh, or `None` when it cannot be represented
    pub fn submesh_to_portable(
        &self,
        mesh: &NativeMesh,
        transform: &Transform,
        submesh: usize,
    ) -> Option<PortableMesh> {
        let descriptor = *mesh.submeshes.get(submesh)?;
        let Some(face_size) = descriptor.topology.face_size() else {
            warn!(
                "Unsupported topology {:?} on submesh {} of '{}', submesh skipped",
                descriptor.topology, submesh, mesh.name
            );
            return None;
        };
        let indices = mesh.submesh_indices(submesh);
        if indices.len() % face_size != 0 {
            warn!(
                "Submesh {} of '{}' has {} indices, not a multiple of {}, submesh skipped",
                submesh,
                mesh.name,
                indices.len(),
                face_size
            );
            return None;
        }
        let window = descriptor.first_vertex..descriptor.first_vertex + descriptor.vertex_count;
        let Some(window_vertices) = mesh.vertices.get(window.clone()) else {
            warn!(
                "Submesh {} of '{}' references vertices outside the buffer, submesh skipped",
                submesh, mesh.name
            );
            return None;
        };

        // Faces are walked back to front with each face's corners reversed,
        // which turns native clockwise winding into portable counter-clockwise
        let mut faces = Vec::with_capacity(indices.len() + indices.len() / face_size);
        for face in indices.rchunks(face_size) {
            faces.push(face_size as i32);
            for &index in face.iter().rev() {
                let Some(rebased) = (index as usize).checked_sub(descriptor.first_vertex) else {
                    warn!(
                        "Submesh {} of '{}' has indices below its vertex window, submesh skipped",
                        submesh, mesh.name
                    );
                    return None;
                };
                faces.push(rebased as i32);
            }
        }

        let affine = transform.affine();
        let mut vertices = Vec::with_capacity(window_vertices.len() * 3);
        for &vertex in window_vertices {
            let point = space::swap_yz(affine.transform_point3(vertex));
            vertices.extend_from_slice(&[point.x, point.y, point.z]);
        }

        // Attribute buffers must cover the whole mesh or they are dropped
        let colors: Vec<PackedColor> = if mesh.colors.len() == mesh.vertices.len() {
            mesh.colors[window.clone()]
                .iter()
                .map(|&color| PackedColor::from(color))
                .collect()
        } else {
            if !mesh.colors.is_empty() {
                warn!(
                    "'{}' has {} vertex colors for {} vertices, colors dropped",
                    mesh.name,
                    mesh.colors.len(),
                    mesh.vertices.len()
                );
            }
            Vec::new()
        };

        let texture_coordinates: Vec<f64> = if mesh.uvs.len() == mesh.vertices.len() {
            mesh.uvs[window]
                .iter()
                .flat_map(|uv| [uv.x, uv.y])
                .collect()
        } else {
            if !mesh.uvs.is_empty() {
                warn!(
                    "'{}' has {} texture coordinates for {} vertices, texture coordinates dropped",
                    mesh.name,
                    mesh.uvs.len(),
                    mesh.vertices.len()
                );
            }
            Vec::new()
        };

        let bbox = (!vertices.is_empty()).then(|| {
            Aabb::from_points(
                vertices
                    .chunks_exact(3)
                    .map(|triple| DVec3::new(triple[0], triple[1], triple[2])),
            )
        });

        Some(PortableMesh {
            id: Uuid::new_v4().simple().to_string(),
            name: (!mesh.name.is_empty()).then(|| format!("{}[{}]", mesh.name, submesh)),
            units: self.options.units,
            vertices,
            faces,
            colors,
            texture_coordinates,
            bbox,
            material: None,
        })
    }
}
