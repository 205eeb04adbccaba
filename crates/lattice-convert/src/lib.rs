//! Lattice Convert - Conversion pipelines between mesh models
//!
//! The two pipelines and their shared collaborators:
//! - [`Exporter`] turns native meshes into portable interchange meshes, one
//!   per submesh
//! - [`Importer`] assembles batches of portable meshes into native objects
//! - [`material_to_portable`] and [`Importer::material_to_native`] map
//!   surface materials between the two models
//! - [`AssetCache`] keys converted objects by stable identity so repeated
//!   imports reuse them

pub mod cache;
pub mod export;
pub mod import;
pub mod material;
pub mod space;

pub use cache::{AssetCache, CachedAsset, SharedAssetCache};
pub use export::{ExportOptions, Exporter};
pub use import::{recenter, ConvertedObject, ImportOptions, Importer};
pub use material::material_to_portable;
