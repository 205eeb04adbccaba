//! The flat, engine-agnostic mesh record

use std::borrow::Cow;

use glam::{DVec2, DVec3};
use lattice_core::{Aabb, PackedColor, Units};
use serde::{Deserialize, Serialize};

use crate::faces;
use crate::material::RenderMaterial;

/// A portable mesh: one submesh worth of geometry in interchange form.
///
/// Vertex positions are consecutive `x, y, z` triples in right-handed Z-up
/// space, sized in `units`. The face list uses the cardinality-prefix
/// encoding from [`crate::faces`]. Colors and texture coordinates are
/// optional; when present they run parallel to the vertices, one entry (or
/// one `u, v` pair) per vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortableMesh {
    /// Stable identity, used as the geometry cache key on import
    #[serde(default)]
    pub id: String,
    /// Display name carried from the source element, if it had one
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub vertices: Vec<f64>,
    #[serde(default)]
    pub faces: Vec<i32>,
    /// Per-vertex packed ARGB colors, empty or exactly one per vertex
    #[serde(default)]
    pub colors: Vec<PackedColor>,
    /// Flat `u, v` pairs, empty or exactly one pair per vertex
    #[serde(default, rename = "textureCoordinates")]
    pub texture_coordinates: Vec<f64>,
    /// Axis-aligned bounds, the UV generation fallback on import
    #[serde(default)]
    pub bbox: Option<Aabb>,
    /// Render material reference, if the source submesh had one
    #[serde(default, rename = "renderMaterial")]
    pub material: Option<RenderMaterial>,
}

impl PortableMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn texture_coordinate_count(&self) -> usize {
        self.texture_coordinates.len() / 2
    }

    /// The vertex at `index`, or `None` when it is out of range
    pub fn point(&self, index: usize) -> Option<DVec3> {
        let triple = self.vertices.get(index * 3..index * 3 + 3)?;
        Some(DVec3::new(triple[0], triple[1], triple[2]))
    }

    /// The `u, v` pair at `index`, or `None` when it is out of range
    pub fn texture_coordinate(&self, index: usize) -> Option<DVec2> {
        let pair = self.texture_coordinates.get(index * 2..index * 2 + 2)?;
        Some(DVec2::new(pair[0], pair[1]))
    }

    /// A mesh with no vertices or no faces converts to nothing
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Re-align vertices with texture coordinates by index.
    ///
    /// Some producers write one texture coordinate per face corner instead of
    /// one per vertex. When the counts disagree, the geometry is rebuilt so
    /// every face corner becomes its own vertex (colors copied along by
    /// original index) and the per-corner coordinates line up again. Meshes
    /// that are already aligned, or that carry no texture coordinates, come
    /// back as borrowed buffers unchanged. So does a mesh whose face list
    /// references missing vertices; the import index check rejects it later.
    pub fn aligned_with_texture_coordinates(&self) -> AlignedBuffers<'_> {
        let vertex_count = self.vertex_count();
        if self.texture_coordinates.is_empty() || self.texture_coordinate_count() == vertex_count
        {
            return AlignedBuffers::borrowed(self);
        }

        let corner_count = self.texture_coordinate_count();
        let carry_colors = self.colors.len() == vertex_count;
        let mut vertices = Vec::with_capacity(corner_count * 3);
        let mut colors = Vec::with_capacity(if carry_colors { corner_count } else { 0 });
        let mut rebuilt = Vec::with_capacity(self.faces.len());

        let mut offset = 0;
        while offset < self.faces.len() {
            let cardinality = faces::expand_cardinality(self.faces[offset]);
            let remaining = self.faces.len() - offset - 1;
            if cardinality < 3 || cardinality as usize > remaining {
                // Drop the malformed tail, keep the runs already rebuilt
                break;
            }
            let count = cardinality as usize;
            rebuilt.push(cardinality);
            for slot in 1..=count {
                let original = self.faces[offset + slot];
                let Some(point) = usize::try_from(original).ok().and_then(|i| self.point(i))
                else {
                    return AlignedBuffers::borrowed(self);
                };
                rebuilt.push((vertices.len() / 3) as i32);
                vertices.extend_from_slice(&[point.x, point.y, point.z]);
                if carry_colors {
                    colors.push(self.colors[original as usize]);
                }
            }
            offset += count + 1;
        }

        AlignedBuffers {
            vertices: Cow::Owned(vertices),
            faces: Cow::Owned(rebuilt),
            colors: Cow::Owned(colors),
        }
    }
}

/// Vertex, face, and color buffers of a mesh after texture coordinate
/// alignment. Borrowed from the mesh when no rebuild was needed.
#[derive(Debug)]
pub struct AlignedBuffers<'a> {
    pub vertices: Cow<'a, [f64]>,
    pub faces: Cow<'a, [i32]>,
    pub colors: Cow<'a, [PackedColor]>,
}

impl<'a> AlignedBuffers<'a> {
    fn borrowed(mesh: &'a PortableMesh) -> Self {
        Self {
            vertices: Cow::Borrowed(&mesh.vertices),
            faces: Cow::Borrowed(&mesh.faces),
            colors: Cow::Borrowed(&mesh.colors),
        }
    }

    /// Number of vertices described by the (possibly rebuilt) buffers
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> PortableMesh {
        PortableMesh {
            id: "quad".into(),
            vertices: vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0,
            ],
            faces: vec![3, 0, 1, 2, 3, 0, 2, 3],
            ..Default::default()
        }
    }

    #[test]
    fn test_accessors() {
        let mesh = quad_mesh();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.point(2), Some(DVec3::new(1.0, 1.0, 0.0)));
        assert_eq!(mesh.point(4), None);
        assert_eq!(mesh.texture_coordinate(0), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(PortableMesh::default().is_empty());
        assert!(!quad_mesh().is_empty());
        let mut no_faces = quad_mesh();
        no_faces.faces.clear();
        assert!(no_faces.is_empty());
    }

    #[test]
    fn test_aligned_mesh_is_borrowed() {
        let mut mesh = quad_mesh();
        mesh.texture_coordinates = vec![0.0; 8];
        let aligned = mesh.aligned_with_texture_coordinates();
        assert!(matches!(aligned.vertices, Cow::Borrowed(_)));
        assert_eq!(aligned.vertex_count(), 4);
    }

    #[test]
    fn test_alignment_explodes_shared_vertices() {
        let mut mesh = quad_mesh();
        mesh.colors = vec![
            PackedColor(1),
            PackedColor(2),
            PackedColor(3),
            PackedColor(4),
        ];
        // One coordinate per face corner: 6 corners across the two triangles
        mesh.texture_coordinates = vec![0.0; 12];

        let aligned = mesh.aligned_with_texture_coordinates();
        assert_eq!(aligned.vertex_count(), 6);
        assert_eq!(aligned.faces.as_ref(), &[3, 0, 1, 2, 3, 3, 4, 5]);
        // Corner order was 0, 1, 2, 0, 2, 3
        assert_eq!(
            aligned.colors.as_ref(),
            &[
                PackedColor(1),
                PackedColor(2),
                PackedColor(3),
                PackedColor(1),
                PackedColor(3),
                PackedColor(4),
            ]
        );
        // The rebuilt corner vertices repeat the originals
        assert_eq!(aligned.vertices[9..12], [0.0, 0.0, 0.0]);
        assert_eq!(mesh.texture_coordinate_count(), aligned.vertex_count());
    }

    #[test]
    fn test_alignment_drops_mismatched_colors() {
        let mut mesh = quad_mesh();
        mesh.colors = vec![PackedColor(1), PackedColor(2)];
        mesh.texture_coordinates = vec![0.0; 12];
        let aligned = mesh.aligned_with_texture_coordinates();
        assert_eq!(aligned.vertex_count(), 6);
        assert!(aligned.colors.is_empty());
    }

    #[test]
    fn test_alignment_leaves_bad_indices_to_the_caller() {
        let mut mesh = quad_mesh();
        mesh.faces = vec![3, 0, 1, 9];
        mesh.texture_coordinates = vec![0.0; 6];
        let aligned = mesh.aligned_with_texture_coordinates();
        assert!(matches!(aligned.faces, Cow::Borrowed(_)));
        assert_eq!(aligned.faces.as_ref(), &[3, 0, 1, 9]);
    }

    #[test]
    fn test_serde_field_names() {
        let mut mesh = quad_mesh();
        mesh.texture_coordinates = vec![0.0; 8];
        mesh.colors = vec![PackedColor::OPAQUE_BLACK; 4];
        let json = serde_json::to_string(&mesh).unwrap();
        assert!(json.contains("\"textureCoordinates\""));
        assert!(json.contains("-16777216"));
        let back: PortableMesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
