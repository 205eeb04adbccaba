//! Coordinate convention bridging.
//!
//! Native space is left-handed Y-up with clockwise front faces; portable
//! space is right-handed Z-up with counter-clockwise front faces. Swapping
//! the Y and Z components maps between the two in either direction, and the
//! swap is its own inverse. Winding is handled separately by the pipelines.

use glam::DVec3;

/// Swap the Y and Z components of a point or direction
pub fn swap_yz(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y)
}

/// Decode flat portable `x, y, z` triples into native-space points,
/// applying the unit scale and the axis swap in one pass
pub fn points_from_flat(flat: &[f64], scale: f64) -> Vec<DVec3> {
    flat.chunks_exact(3)
        .map(|triple| DVec3::new(triple[0] * scale, triple[2] * scale, triple[1] * scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_is_involution() {
        let point = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(swap_yz(point), DVec3::new(1.0, 3.0, 2.0));
        assert_eq!(swap_yz(swap_yz(point)), point);
    }

    #[test]
    fn test_points_from_flat_scales_and_swaps() {
        let points = points_from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 10.0);
        assert_eq!(points, vec![
            DVec3::new(10.0, 30.0, 20.0),
            DVec3::new(40.0, 60.0, 50.0),
        ]);
    }

    #[test]
    fn test_points_from_flat_ignores_trailing_values() {
        let points = points_from_flat(&[1.0, 2.0, 3.0, 4.0], 1.0);
        assert_eq!(points.len(), 1);
    }
}
