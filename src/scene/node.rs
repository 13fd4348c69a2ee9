//! Scene nodes and the imported scene root.

use std::collections::HashMap;
use std::sync::Arc;

use super::material::Material;
use super::mesh::MeshData;
use super::transform::NodeTransform;

/// A single renderable unit produced by an import.
///
/// Nodes are owned by the [`SceneRoot`] they were imported into and are
/// dropped with it. The material reference is shared: every node using the
/// same source material name points at the same instance.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Identifier taken from the source node's name
    pub name: String,
    /// Mesh geometry, if the source node carried usable buffers
    pub mesh: Option<MeshData>,
    /// Shared material reference, if the source node had one attached
    pub material: Option<Arc<Material>>,
    /// Placement transforms, applied in list order
    pub transforms: Vec<NodeTransform>,
}

/// The result of one import: an ordered, flat collection of scene nodes.
///
/// Node order follows the source document's own child/sibling ordering. The
/// material cache built during the import travels with the root so callers
/// can enumerate every material the scene references.
#[derive(Debug, Clone, Default)]
pub struct SceneRoot {
    /// Imported nodes in source traversal order
    pub nodes: Vec<SceneNode>,
    /// Every material resolved during the import, keyed by name
    pub materials: HashMap<String, Arc<Material>>,
}

impl SceneRoot {
    /// Creates an empty scene root
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the import produced any nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes in the scene
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Gathers summary statistics over the imported scene
    pub fn stats(&self) -> SceneStats {
        let total_vertices = self
            .nodes
            .iter()
            .filter_map(|node| node.mesh.as_ref())
            .map(|mesh| mesh.vertex_count())
            .sum();

        let total_triangles = self
            .nodes
            .iter()
            .filter_map(|node| node.mesh.as_ref())
            .map(|mesh| mesh.triangle_count())
            .sum();

        SceneStats {
            node_count: self.nodes.len(),
            material_count: self.materials.len(),
            total_vertices,
            total_triangles,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStats {
    pub node_count: usize,
    pub material_count: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
}
