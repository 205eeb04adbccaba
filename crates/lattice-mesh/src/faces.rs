//! Cardinality-prefixed face list codec.
//!
//! A face stream is a flat `i32` sequence: each polygon is written as its
//! vertex count followed by that many vertex indices, runs packed back to
//! back. Legacy producers abbreviated the prefix, writing `0` for a triangle
//! and `1` for a quad; any prefix below 3 is expanded by adding 3.

use crate::error::MeshError;

/// One decoded polygon, as indices into the owning mesh's vertex list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub indices: Vec<i32>,
}

impl Polygon {
    pub fn new(indices: Vec<i32>) -> Self {
        Self { indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }

    /// Fan-triangulate from the first vertex.
    ///
    /// An n-gon `[v0, v1, ..., vn-1]` yields the n-2 triangles
    /// `[v0, v1, v2], [v0, v2, v3], ...`; triangles pass through unchanged.
    /// Assumes the polygon is planar and convex.
    pub fn triangulate(&self) -> Vec<[i32; 3]> {
        let mut triangles = Vec::with_capacity(self.indices.len().saturating_sub(2));
        for k in 1..self.indices.len().saturating_sub(1) {
            triangles.push([self.indices[0], self.indices[k], self.indices[k + 1]]);
        }
        triangles
    }
}

/// Expand a legacy abbreviated cardinality prefix
pub(crate) fn expand_cardinality(prefix: i32) -> i32 {
    if prefix < 3 {
        prefix + 3
    } else {
        prefix
    }
}

/// Decode a face stream into polygons.
///
/// Decoding is strict: a cardinality that is still below 3 after legacy
/// expansion, or that points past the end of the stream, fails the whole
/// call with [`MeshError::MalformedFaceData`].
pub fn decode(faces: &[i32]) -> Result<Vec<Polygon>, MeshError> {
    let mut polygons = Vec::new();
    let mut offset = 0;
    while offset < faces.len() {
        let cardinality = expand_cardinality(faces[offset]);
        let remaining = faces.len() - offset - 1;
        if cardinality < 3 || cardinality as usize > remaining {
            return Err(MeshError::MalformedFaceData {
                offset,
                cardinality,
                remaining,
            });
        }
        let count = cardinality as usize;
        polygons.push(Polygon::new(faces[offset + 1..=offset + count].to_vec()));
        offset += count + 1;
    }
    Ok(polygons)
}

/// Encode polygons into a face stream, writing true cardinalities
pub fn encode<'a>(polygons: impl IntoIterator<Item = &'a Polygon>) -> Vec<i32> {
    let mut faces = Vec::new();
    for polygon in polygons {
        faces.push(polygon.vertex_count() as i32);
        faces.extend_from_slice(&polygon.indices);
    }
    faces
}

/// Rewrite a face stream so every run is a triangle, `[3, a, b, c]`.
///
/// The fixed four-value run layout is what the import pipeline walks when it
/// restores native winding.
pub fn triangulated(faces: &[i32]) -> Result<Vec<i32>, MeshError> {
    let polygons = decode(faces)?;
    let mut stream = Vec::with_capacity(faces.len());
    for polygon in &polygons {
        for [a, b, c] in polygon.triangulate() {
            stream.extend_from_slice(&[3, a, b, c]);
        }
    }
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_stream() {
        let faces = [3, 0, 1, 2, 4, 2, 3, 4, 5];
        let polygons = decode(&faces).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].indices, vec![0, 1, 2]);
        assert_eq!(polygons[1].indices, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_decode_legacy_prefixes() {
        // 0 abbreviates a triangle, 1 a quad
        let faces = [0, 0, 1, 2, 1, 2, 3, 4, 5];
        let polygons = decode(&faces).unwrap();
        assert_eq!(polygons[0].indices, vec![0, 1, 2]);
        assert_eq!(polygons[1].indices, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let polygons = vec![
            Polygon::new(vec![0, 1, 2]),
            Polygon::new(vec![1, 2, 3, 4]),
            Polygon::new(vec![0, 2, 4, 6, 8]),
        ];
        let faces = encode(&polygons);
        assert_eq!(faces[0], 3);
        assert_eq!(faces[4], 4);
        assert_eq!(decode(&faces).unwrap(), polygons);
    }

    #[test]
    fn test_decode_truncated_stream_fails() {
        let err = decode(&[4, 0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::MalformedFaceData {
                offset: 0,
                cardinality: 4,
                remaining: 3,
            }
        );
    }

    #[test]
    fn test_decode_reports_offset_of_bad_run() {
        let err = decode(&[3, 0, 1, 2, 9, 0, 1]).unwrap_err();
        assert!(matches!(err, MeshError::MalformedFaceData { offset: 4, .. }));
    }

    #[test]
    fn test_decode_negative_cardinality_fails() {
        assert!(decode(&[-4, 0, 1, 2]).is_err());
    }

    #[test]
    fn test_fan_triangulation_order() {
        let polygon = Polygon::new(vec![10, 11, 12, 13, 14]);
        assert_eq!(
            polygon.triangulate(),
            vec![[10, 11, 12], [10, 12, 13], [10, 13, 14]]
        );
    }

    #[test]
    fn test_triangle_count_is_vertices_minus_two() {
        for n in 3..12 {
            let polygon = Polygon::new((0..n).collect());
            assert_eq!(polygon.triangulate().len(), n as usize - 2);
        }
    }

    #[test]
    fn test_triangulated_stream_layout() {
        let stream = triangulated(&[4, 0, 1, 2, 3]).unwrap();
        assert_eq!(stream, vec![3, 0, 1, 2, 3, 0, 2, 3]);
    }
}
