//! Lattice Core - Shared geometry and value types
//!
//! This crate provides the foundational types used on both sides of mesh
//! conversion:
//! - Mathematical primitives (re-exported from glam)
//! - Float and packed ARGB color forms
//! - Axis-aligned bounds
//! - Linear unit tags with conversion factors
//! - Scene node transforms

pub mod bounds;
pub mod color;
pub mod transform;
pub mod units;

pub use bounds::Aabb;
pub use color::{Color, PackedColor};
pub use glam::{DAffine3, DMat4, DQuat, DVec2, DVec3, DVec4};
pub use transform::Transform;
pub use units::Units;
