//! Native engine mesh model.
//!
//! Mirrors what a host engine exposes: one shared vertex buffer, per-submesh
//! index ranges each rendered with its own material slot, and derived
//! attributes (bounds, normals, tangents) recomputed after assembly.
//! Native space is left-handed Y-up with clockwise front faces.

use glam::{DVec2, DVec3, DVec4};
use lattice_core::{Aabb, Color};

/// Primitive layout of a submesh's index list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Quads,
    Lines,
    LineStrip,
    Points,
}

impl Topology {
    /// Indices per face, for the face-list topologies
    pub fn face_size(self) -> Option<usize> {
        match self {
            Topology::Triangles => Some(3),
            Topology::Quads => Some(4),
            _ => None,
        }
    }
}

/// Width of the index buffer elements.
///
/// `U16` caps a mesh at 65535 vertices; assembly switches to `U32` when the
/// vertex count reaches that limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexFormat {
    #[default]
    U16,
    U32,
}

/// A contiguous index range sharing one material slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    pub topology: Topology,
    /// First element of this submesh in the shared index buffer
    pub index_start: usize,
    pub index_count: usize,
    /// Lowest vertex this submesh references
    pub first_vertex: usize,
    /// Width of the referenced vertex window starting at `first_vertex`
    pub vertex_count: usize,
}

/// A native mesh: shared vertex attributes plus per-submesh index ranges
#[derive(Debug, Clone, Default)]
pub struct NativeMesh {
    pub name: String,
    pub vertices: Vec<DVec3>,
    pub uvs: Vec<DVec2>,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
    pub submeshes: Vec<Submesh>,
    pub index_format: IndexFormat,
    /// Derived, see [`NativeMesh::recalculate_bounds`]
    pub bounds: Aabb,
    /// Derived, one per vertex, see [`NativeMesh::recalculate_normals`]
    pub normals: Vec<DVec3>,
    /// Derived, `xyz` tangent with bitangent handedness in `w`, see
    /// [`NativeMesh::recalculate_tangents`]
    pub tangents: Vec<DVec4>,
}

impl NativeMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn set_vertices(&mut self, vertices: Vec<DVec3>) {
        self.vertices = vertices;
    }

    pub fn set_uvs(&mut self, uvs: Vec<DVec2>) {
        self.uvs = uvs;
    }

    pub fn set_colors(&mut self, colors: Vec<Color>) {
        self.colors = colors;
    }

    /// Append a submesh's index list and record its descriptor.
    ///
    /// `indices` are absolute into the shared vertex buffer; the referenced
    /// vertex window is derived from the smallest and largest index used.
    pub fn push_submesh(&mut self, topology: Topology, indices: Vec<u32>) {
        let first = indices.iter().copied().min().unwrap_or(0) as usize;
        let last = indices.iter().copied().max().unwrap_or(0) as usize;
        let submesh = Submesh {
            topology,
            index_start: self.indices.len(),
            index_count: indices.len(),
            first_vertex: first,
            vertex_count: if indices.is_empty() { 0 } else { last - first + 1 },
        };
        self.indices.extend_from_slice(&indices);
        self.submeshes.push(submesh);
    }

    /// Absolute indices of one submesh, empty when out of range
    pub fn submesh_indices(&self, submesh: usize) -> &[u32] {
        let Some(range) = self
            .submeshes
            .get(submesh)
            .map(|s| s.index_start..s.index_start + s.index_count)
        else {
            return &[];
        };
        self.indices.get(range).unwrap_or(&[])
    }

    /// Every triangle of every face-list submesh, quads as their fan pairs
    fn triangle_indices(&self) -> Vec<[usize; 3]> {
        let mut triangles = Vec::new();
        for (submesh, descriptor) in self.submeshes.iter().enumerate() {
            let Some(face_size) = descriptor.topology.face_size() else {
                continue;
            };
            for face in self.submesh_indices(submesh).chunks_exact(face_size) {
                for k in 1..face_size - 1 {
                    triangles.push([face[0] as usize, face[k] as usize, face[k + 1] as usize]);
                }
            }
        }
        triangles
    }

    /// Recompute the axis-aligned bounds from the current vertices
    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(self.vertices.iter().copied());
    }

    /// Recompute per-vertex normals by accumulating triangle cross products.
    ///
    /// Each vertex gets the area-weighted average of its adjacent face
    /// normals, so larger faces pull shared vertices harder.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];
        for [i0, i1, i2] in self.triangle_indices() {
            let (Some(&v0), Some(&v1), Some(&v2)) = (
                self.vertices.get(i0),
                self.vertices.get(i1),
                self.vertices.get(i2),
            ) else {
                continue;
            };
            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }
        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Recompute per-vertex tangents from the UV gradient of each triangle.
    ///
    /// Tangents are orthogonalized against the current normals, so call
    /// [`NativeMesh::recalculate_normals`] first. The `w` component records
    /// bitangent handedness as 1 or -1. Without a full set of UVs every
    /// tangent falls back to `+X`.
    pub fn recalculate_tangents(&mut self) {
        let count = self.vertices.len();
        if self.uvs.len() != count || self.normals.len() != count {
            self.tangents = vec![DVec4::new(1.0, 0.0, 0.0, 1.0); count];
            return;
        }
        let mut tangents = vec![DVec3::ZERO; count];
        let mut bitangents = vec![DVec3::ZERO; count];
        for [i0, i1, i2] in self.triangle_indices() {
            let (Some(&v0), Some(&v1), Some(&v2)) = (
                self.vertices.get(i0),
                self.vertices.get(i1),
                self.vertices.get(i2),
            ) else {
                continue;
            };
            let edge1 = v1 - v0;
            let edge2 = v2 - v0;
            let duv1 = self.uvs[i1] - self.uvs[i0];
            let duv2 = self.uvs[i2] - self.uvs[i0];
            let determinant = duv1.x * duv2.y - duv2.x * duv1.y;
            if determinant.abs() < 1e-12 {
                // Degenerate UV mapping, nothing to contribute
                continue;
            }
            let r = 1.0 / determinant;
            let tangent = (edge1 * duv2.y - edge2 * duv1.y) * r;
            let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * r;
            for index in [i0, i1, i2] {
                tangents[index] += tangent;
                bitangents[index] += bitangent;
            }
        }
        self.tangents = (0..count)
            .map(|i| {
                let normal = self.normals[i];
                let tangent =
                    (tangents[i] - normal * normal.dot(tangents[i])).normalize_or_zero();
                if tangent == DVec3::ZERO {
                    return DVec4::new(1.0, 0.0, 0.0, 1.0);
                }
                let handedness = if normal.cross(tangent).dot(bitangents[i]) < 0.0 {
                    -1.0
                } else {
                    1.0
                };
                tangent.extend(handedness)
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_quad() -> NativeMesh {
        let mut mesh = NativeMesh::new("quad");
        mesh.set_vertices(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 1.0),
        ]);
        mesh.set_uvs(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]);
        mesh.push_submesh(Topology::Triangles, vec![0, 1, 2, 0, 2, 3]);
        mesh
    }

    #[test]
    fn test_push_submesh_descriptor() {
        let mut mesh = NativeMesh::new("two");
        mesh.push_submesh(Topology::Triangles, vec![0, 1, 2]);
        mesh.push_submesh(Topology::Quads, vec![3, 4, 5, 6]);

        let second = mesh.submeshes[1];
        assert_eq!(second.index_start, 3);
        assert_eq!(second.index_count, 4);
        assert_eq!(second.first_vertex, 3);
        assert_eq!(second.vertex_count, 4);
        assert_eq!(mesh.submesh_indices(1), &[3, 4, 5, 6]);
        assert_eq!(mesh.submesh_indices(2), &[] as &[u32]);
    }

    #[test]
    fn test_face_sizes() {
        assert_eq!(Topology::Triangles.face_size(), Some(3));
        assert_eq!(Topology::Quads.face_size(), Some(4));
        assert_eq!(Topology::Lines.face_size(), None);
    }

    #[test]
    fn test_recalculate_bounds() {
        let mut mesh = flat_quad();
        mesh.recalculate_bounds();
        assert_eq!(mesh.bounds.min, DVec3::ZERO);
        assert_eq!(mesh.bounds.max, DVec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_recalculate_normals_flat_quad() {
        let mut mesh = flat_quad();
        mesh.recalculate_normals();
        assert_eq!(mesh.normals.len(), 4);
        for normal in &mesh.normals {
            // All four normals agree on a planar quad
            assert!((normal.y.abs() - 1.0).abs() < 1e-9);
            assert!(normal.x.abs() < 1e-9);
            assert!(normal.z.abs() < 1e-9);
        }
    }

    #[test]
    fn test_recalculate_tangents_orthogonal_to_normals() {
        let mut mesh = flat_quad();
        mesh.recalculate_normals();
        mesh.recalculate_tangents();
        assert_eq!(mesh.tangents.len(), 4);
        for (tangent, normal) in mesh.tangents.iter().zip(&mesh.normals) {
            assert!(tangent.truncate().dot(*normal).abs() < 1e-9);
            assert!((tangent.truncate().length() - 1.0).abs() < 1e-9);
            assert!(tangent.w == 1.0 || tangent.w == -1.0);
        }
    }

    #[test]
    fn test_tangents_without_uvs_fall_back() {
        let mut mesh = flat_quad();
        mesh.uvs.clear();
        mesh.recalculate_normals();
        mesh.recalculate_tangents();
        assert_eq!(mesh.tangents, vec![DVec4::new(1.0, 0.0, 0.0, 1.0); 4]);
    }

    #[test]
    fn test_quad_submesh_triangulates_for_normals() {
        let mut mesh = NativeMesh::new("quad-topology");
        mesh.set_vertices(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 1.0),
        ]);
        mesh.push_submesh(Topology::Quads, vec![0, 1, 2, 3]);
        mesh.recalculate_normals();
        assert!(mesh.normals.iter().all(|n| n.length() > 0.9));
    }
}
