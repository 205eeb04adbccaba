//! Import pipeline: portable meshes to native objects.
//!
//! A batch of portable meshes belonging to one source element becomes a
//! single native mesh with one submesh (and one material slot) per
//! contributing mesh. Meshes that cannot be converted are skipped with a
//! warning; only an empty result makes the whole conversion return nothing.

use std::sync::Arc;

use glam::{DVec2, DVec3};
use lattice_core::{Aabb, Color, Units};
use lattice_mesh::{faces, MeshError, PortableMesh, SourceElement};
use lattice_native::{AssetSink, IndexFormat, NativeMaterial, NativeMesh, ShaderRegistry, Topology};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::AssetCache;
use crate::space;

/// Import-side settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Unit the native engine works in; portable vertices are rescaled into
    /// it on the way in
    pub units: Units,
    /// Shift assembled vertices so their bounds center sits at the origin,
    /// reporting the removed center as the object's position
    pub recenter: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            units: Units::Meters,
            recenter: true,
        }
    }
}

/// A converted native object: shared geometry, per-submesh materials, and
/// the world position the geometry was recentered around
#[derive(Debug, Clone)]
pub struct ConvertedObject {
    pub mesh: Arc<NativeMesh>,
    /// One material per submesh, in submesh order
    pub materials: Vec<Arc<NativeMaterial>>,
    pub position: DVec3,
}

/// Parallel attribute buffers accumulated while a batch is appended
#[derive(Debug, Default)]
struct MeshBuffers {
    positions: Vec<DVec3>,
    uvs: Vec<DVec2>,
    colors: Vec<Color>,
    submesh_triangles: Vec<Vec<u32>>,
}

/// Converts portable meshes into native objects.
///
/// Holds the collaborators for one batch of imports: the identity cache the
/// caller owns, the host's shader registry, and an optional persistence
/// sink that receives every newly created asset.
pub struct Importer<'a, S: ShaderRegistry> {
    pub(crate) cache: &'a mut AssetCache,
    pub(crate) shaders: &'a S,
    pub(crate) sink: Option<&'a mut dyn AssetSink>,
    pub options: ImportOptions,
}

impl<'a, S: ShaderRegistry> Importer<'a, S> {
    pub fn new(cache: &'a mut AssetCache, shaders: &'a S) -> Self {
        Self {
            cache,
            shaders,
            sink: None,
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a sink that persists finished meshes and materials
    pub fn with_sink(mut self, sink: &'a mut dyn AssetSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Convert a batch of portable meshes into one native object.
    ///
    /// Geometry is cached under the element id: a second call with the same
    /// element reuses the stored mesh and only recomputes materials and
    /// placement. Returns `None` when the batch is empty or nothing in it
    /// contributes geometry.
    pub fn meshes_to_native(
        &mut self,
        element: &SourceElement,
        meshes: &[PortableMesh],
    ) -> Option<ConvertedObject> {
        if meshes.is_empty() {
            debug!("Skipping element '{}', no meshes provided", element.id);
            return None;
        }

        let (buffers, materials) = self.convert_batch(meshes);
        if buffers.positions.is_empty() || buffers.submesh_triangles.is_empty() {
            debug!("Skipping element '{}', no submesh contributed geometry", element.id);
            return None;
        }

        if let Some(existing) = self.cache.mesh(&element.id) {
            // Reuse the stored geometry; only the placement is recomputed
            let position = if self.options.recenter {
                Aabb::from_points(buffers.positions.iter().copied()).center()
            } else {
                DVec3::ZERO
            };
            return Some(ConvertedObject {
                mesh: existing,
                materials,
                position,
            });
        }

        let (mesh, position) = self.assemble(element, buffers);
        let mesh = Arc::new(mesh);
        self.cache.insert_mesh(element.id.clone(), mesh.clone());
        Some(ConvertedObject {
            mesh,
            materials,
            position,
        })
    }

    /// Convert a single portable mesh, treating it as its own element
    pub fn mesh_to_native(&mut self, mesh: &PortableMesh) -> Option<ConvertedObject> {
        if mesh.is_empty() {
            debug!("Skipping mesh '{}', mesh data was empty", mesh.id);
            return None;
        }
        self.meshes_to_native(&SourceElement::from(mesh), std::slice::from_ref(mesh))
    }

    /// One pass over the batch, building geometry buffers and the parallel
    /// material list (one entry per mesh that contributed a submesh)
    fn convert_batch(&mut self, meshes: &[PortableMesh]) -> (MeshBuffers, Vec<Arc<NativeMaterial>>) {
        let mut buffers = MeshBuffers::default();
        let mut materials = Vec::with_capacity(meshes.len());
        for mesh in meshes {
            if mesh.is_empty() {
                debug!("Skipping mesh '{}', mesh data was empty", mesh.id);
                continue;
            }
            match self.append_submesh(mesh, &mut buffers) {
                Ok(triangles) => {
                    buffers.submesh_triangles.push(triangles);
                    materials.push(self.material_to_native(mesh.material.as_ref()));
                }
                Err(error) => warn!("Skipping mesh '{}': {}", mesh.id, error),
            }
        }
        // A trailing run of colorless submeshes leaves the buffer short; pad
        // it back to one color per vertex when any submesh contributed
        if !buffers.colors.is_empty() && buffers.colors.len() < buffers.positions.len() {
            buffers.colors.resize(buffers.positions.len(), Color::WHITE);
        }
        (buffers, materials)
    }

    /// Append one portable mesh's attributes, returning its native triangle
    /// list. Nothing is committed when the face stream is malformed or
    /// references missing vertices.
    fn append_submesh(
        &self,
        mesh: &PortableMesh,
        buffers: &mut MeshBuffers,
    ) -> Result<Vec<u32>, MeshError> {
        let aligned = mesh.aligned_with_texture_coordinates();
        let vertex_count = aligned.vertex_count();

        let triangle_runs = faces::triangulated(&aligned.faces)?;
        for run in triangle_runs.chunks_exact(4) {
            for &index in &run[1..] {
                if index < 0 || index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
            }
        }

        let MeshBuffers {
            positions,
            uvs,
            colors,
            ..
        } = buffers;
        let offset = positions.len();
        let scale = Units::conversion_factor(mesh.units, self.options.units);
        positions.extend(space::points_from_flat(&aligned.vertices, scale));

        // Texture coordinates: aligned pairs, else a bbox projection of the
        // vertices appended just now, else zeros
        let has_valid_uvs = vertex_count > 0 && mesh.texture_coordinate_count() == vertex_count;
        if !mesh.texture_coordinates.is_empty() && !has_valid_uvs {
            warn!(
                "Mesh '{}' has {} texture coordinates for {} vertices, texture coordinates ignored",
                mesh.id,
                mesh.texture_coordinate_count(),
                vertex_count
            );
        }
        if has_valid_uvs {
            uvs.extend(
                mesh.texture_coordinates
                    .chunks_exact(2)
                    .map(|pair| DVec2::new(pair[0], pair[1])),
            );
        } else if let Some(bbox) = mesh.bbox {
            let size = bbox.size();
            uvs.extend(
                positions[offset..]
                    .iter()
                    .map(|point| DVec2::new(point.x / size.x, point.y / size.y)),
            );
        } else {
            uvs.extend(std::iter::repeat(DVec2::ZERO).take(vertex_count));
        }

        // Vertex colors are all or nothing for a submesh
        if vertex_count > 0 && aligned.colors.len() == vertex_count {
            if colors.len() < offset {
                // Earlier colorless submeshes get neutral white
                colors.resize(offset, Color::WHITE);
            }
            colors.extend(aligned.colors.iter().map(|&packed| Color::from(packed)));
        } else if !aligned.colors.is_empty() {
            warn!(
                "Mesh '{}' has an invalid number of vertex colors. Expected 0 or {}, got {}",
                mesh.id,
                vertex_count,
                aligned.colors.len()
            );
        }

        // Restore native winding while offsetting into the shared buffer
        let mut triangles = Vec::with_capacity(triangle_runs.len() / 4 * 3);
        for run in triangle_runs.chunks_exact(4) {
            triangles.push(offset as u32 + run[1] as u32);
            triangles.push(offset as u32 + run[3] as u32);
            triangles.push(offset as u32 + run[2] as u32);
        }
        Ok(triangles)
    }

    /// Build the native mesh from accumulated buffers and recompute its
    /// derived attributes
    fn assemble(&mut self, element: &SourceElement, buffers: MeshBuffers) -> (NativeMesh, DVec3) {
        let MeshBuffers {
            positions,
            uvs,
            colors,
            submesh_triangles,
        } = buffers;

        let (positions, center) = if self.options.recenter {
            recenter(&positions)
        } else {
            (positions, DVec3::ZERO)
        };

        let mut mesh = NativeMesh::new(asset_name(element));
        mesh.set_vertices(positions);
        mesh.set_uvs(uvs);
        mesh.set_colors(colors);
        if mesh.vertex_count() >= u16::MAX as usize {
            mesh.index_format = IndexFormat::U32;
        }
        for triangles in submesh_triangles {
            mesh.push_submesh(Topology::Triangles, triangles);
        }

        mesh.recalculate_bounds();
        mesh.recalculate_normals();
        mesh.recalculate_tangents();

        if let Some(sink) = self.sink.as_deref_mut() {
            sink.persist_mesh(&mesh, &mesh.name);
        }
        (mesh, center)
    }
}

/// Shift vertices so their bounds center sits at the origin.
///
/// Returns the shifted buffer and the removed center, which becomes the
/// converted object's position.
pub fn recenter(positions: &[DVec3]) -> (Vec<DVec3>, DVec3) {
    if positions.is_empty() {
        return (Vec::new(), DVec3::ZERO);
    }
    let center = Aabb::from_points(positions.iter().copied()).center();
    (positions.iter().map(|&point| point - center).collect(), center)
}

/// Strip characters that cannot appear in asset file names
pub(crate) fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|&c| {
            !c.is_control() && !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
        })
        .collect()
}

/// Suggested asset name for an element: `"{name} - {id}"`, or the bare id
/// when the element carries no usable name
fn asset_name(element: &SourceElement) -> String {
    match element.name.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            format!("{} - {}", sanitize_file_name(name), element.id)
        }
        _ => element.id.clone(),
    }
}
