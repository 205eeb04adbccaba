//! Identity of the source element a mesh batch belongs to

use crate::mesh::PortableMesh;

/// Stable identity of a converted element: the cache key plus an optional
/// display name for the produced asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceElement {
    pub id: String,
    pub name: Option<String>,
}

impl SourceElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

impl From<&PortableMesh> for SourceElement {
    /// A standalone mesh acts as its own element
    fn from(mesh: &PortableMesh) -> Self {
        Self {
            id: mesh.id.clone(),
            name: mesh.name.clone(),
        }
    }
}
