//! Materialization of the FBX node graph.
//!
//! The native binding exposes the document as a single mutable cursor, which
//! is awkward to reason about and impossible to test without the runtime.
//! This module walks that cursor exactly once, depth first, and snapshots
//! the graph into plain data: a preorder node table with explicit child
//! index lists, plus one property record per distinct material name. The
//! rest of the pipeline only ever sees the snapshot.

use std::collections::HashMap;

use log::{debug, trace};

use super::binding::FbxCursor;
use crate::import::error::ImportError;
use crate::import::ImportConfig;

/// Closed classification of a node attribute's type tag.
///
/// The native SDK reports attribute types as strings. They are classified
/// here, at the boundary, so nothing downstream compares strings again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeType {
    Mesh,
    Patch,
    Nurbs,
    NurbsSurface,
    /// Lights, cameras, skeletons, and anything else we do not convert
    Unsupported,
}

impl AttributeType {
    /// Classifies a raw type tag. Matching is exact: the SDK emits these
    /// four tags verbatim for every convertible surface type.
    pub(crate) fn classify(tag: &str) -> Self {
        match tag {
            "mesh" => AttributeType::Mesh,
            "patch" => AttributeType::Patch,
            "nurbs" => AttributeType::Nurbs,
            "nurbs surface" => AttributeType::NurbsSurface,
            _ => AttributeType::Unsupported,
        }
    }

    /// Whether the SDK can turn this attribute into a triangle mesh
    pub(crate) fn is_convertible(self) -> bool {
        !matches!(self, AttributeType::Unsupported)
    }
}

/// Raw mesh buffers read from one convertible attribute, post-triangulation.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawGeometry {
    pub vertices: Option<Vec<f32>>,
    pub tex_coords: Option<Vec<f32>>,
    pub faces: Option<Vec<i32>>,
    pub smoothing_groups: Option<Vec<i32>>,
}

/// One attribute of a snapshotted node.
#[derive(Debug, Clone)]
pub(crate) struct AttributeRecord {
    pub ty: AttributeType,
    /// Present exactly when the attribute type is convertible
    pub geometry: Option<RawGeometry>,
}

/// Material properties read once per distinct material name.
#[derive(Debug, Clone)]
pub(crate) struct MaterialRecord {
    pub name: String,
    pub diffuse: Option<[f64; 4]>,
    pub specular: Option<[f64; 4]>,
    /// Kept in source form; -1.0 is the absent sentinel
    pub specular_power: f64,
    pub diffuse_map: Option<String>,
    pub specular_map: Option<String>,
    pub bump_map: Option<String>,
    pub self_illumination_map: Option<String>,
}

/// One node of the snapshotted graph.
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub name: String,
    pub affine: Option<[f64; 16]>,
    pub geometric_translation: Option<[f64; 3]>,
    pub attributes: Vec<AttributeRecord>,
    /// Names of the materials this node's geometry should use, in
    /// attachment order. Empty when the node has no convertible attribute.
    pub material_names: Vec<String>,
    /// Indices of this node's children, in sibling order
    pub children: Vec<usize>,
}

/// The whole document graph as plain data, in depth-first preorder.
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentGraph {
    pub nodes: Vec<NodeRecord>,
    pub roots: Vec<usize>,
    pub materials: HashMap<String, MaterialRecord>,
}

impl DocumentGraph {
    /// Node indices in depth-first preorder, following sibling order.
    pub(crate) fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }
        order
    }
}

/// Walks the open cursor depth first and snapshots every node.
///
/// Descends to the first child after visiting a node, otherwise advances to
/// the next sibling, otherwise ascends until a sibling is found. The walk
/// ends when ascending fails at the root.
pub(crate) fn materialize<B: FbxCursor>(
    binding: &mut B,
    config: &ImportConfig,
) -> Result<DocumentGraph, ImportError> {
    let mut graph = DocumentGraph::default();
    // Ancestor indices of the node the cursor currently points at
    let mut ancestry: Vec<usize> = Vec::new();

    loop {
        let index = graph.nodes.len();
        let record = snapshot_node(binding, &mut graph.materials, config)?;
        debug!(
            "node [{}]: {} attribute(s), {} material name(s)",
            record.name,
            record.attributes.len(),
            record.material_names.len()
        );

        match ancestry.last() {
            Some(&parent) => graph.nodes[parent].children.push(index),
            None => graph.roots.push(index),
        }
        graph.nodes.push(record);

        if binding.next_child() {
            ancestry.push(index);
            continue;
        }
        if binding.next_sibling() {
            continue;
        }
        loop {
            if !binding.next_parent() {
                return Ok(graph);
            }
            ancestry.pop();
            if binding.next_sibling() {
                break;
            }
        }
    }
}

/// Snapshots the node under the cursor: name, transforms, attributes, and
/// (for nodes with convertible geometry) material property records.
fn snapshot_node<B: FbxCursor>(
    binding: &mut B,
    materials: &mut HashMap<String, MaterialRecord>,
    config: &ImportConfig,
) -> Result<NodeRecord, ImportError> {
    let name = binding.node_name();
    let affine = binding.global_affine();
    let geometric_translation = binding.geometric_translation();

    let mut attributes = Vec::new();
    for i in 0..binding.attribute_count() {
        let tag = binding.attribute_type(i);
        let ty = AttributeType::classify(&tag);
        if !ty.is_convertible() {
            trace!("node [{name}]: skipping attribute {i} of type [{tag}]");
            attributes.push(AttributeRecord { ty, geometry: None });
            continue;
        }

        if !binding.is_triangle_mesh(i) {
            trace!("node [{name}]: triangulating attribute {i} ([{tag}])");
            binding.triangulate(i);
        }

        let geometry = RawGeometry {
            vertices: binding.mesh_vertices(i)?,
            tex_coords: binding.mesh_tex_coords(i)?,
            faces: binding.mesh_faces(i)?,
            smoothing_groups: binding.mesh_face_smoothing_groups(i)?,
        };
        attributes.push(AttributeRecord {
            ty,
            geometry: Some(geometry),
        });
    }

    // Materials only matter for nodes that produce geometry.
    let mut material_names = Vec::new();
    if attributes.iter().any(|a| a.geometry.is_some()) {
        let count = binding.material_count();
        let take = if config.resolve_all_materials {
            count
        } else {
            count.min(1)
        };
        for j in 0..take {
            let material_name = binding.material_name(j);
            // Only read the properties if we didn't already.
            if !materials.contains_key(&material_name) {
                materials.insert(
                    material_name.clone(),
                    read_material(binding, j, &material_name),
                );
            }
            material_names.push(material_name);
        }
    }

    Ok(NodeRecord {
        name,
        affine,
        geometric_translation,
        attributes,
        material_names,
        children: Vec::new(),
    })
}

fn read_material<B: FbxCursor>(binding: &B, j: usize, name: &str) -> MaterialRecord {
    MaterialRecord {
        name: name.to_string(),
        diffuse: binding.material_diffuse_color(j),
        specular: binding.material_specular_color(j),
        specular_power: binding.material_specular_power(j),
        diffuse_map: binding.material_diffuse_map(j),
        specular_map: binding.material_specular_map(j),
        bump_map: binding.material_bump_map(j),
        self_illumination_map: binding.material_self_illumination_map(j),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::fbx::memory::{MemoryAttribute, MemoryCursor, MemoryMaterial, MemoryNode};
    use std::path::Path;

    fn open(cursor: &mut MemoryCursor) {
        assert!(cursor.open(Path::new("test.fbx")).unwrap());
    }

    #[test]
    fn test_classify_type_tags() {
        assert_eq!(AttributeType::classify("mesh"), AttributeType::Mesh);
        assert_eq!(AttributeType::classify("patch"), AttributeType::Patch);
        assert_eq!(AttributeType::classify("nurbs"), AttributeType::Nurbs);
        assert_eq!(
            AttributeType::classify("nurbs surface"),
            AttributeType::NurbsSurface
        );
        assert_eq!(AttributeType::classify("light"), AttributeType::Unsupported);
        // Matching is exact, not case folded
        assert_eq!(AttributeType::classify("Mesh"), AttributeType::Unsupported);
    }

    #[test]
    fn test_walk_order_is_depth_first() {
        let root = MemoryNode::new("root")
            .with_child(
                MemoryNode::new("a")
                    .with_child(MemoryNode::new("a1"))
                    .with_child(MemoryNode::new("a2")),
            )
            .with_child(MemoryNode::new("b"));
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        let graph = materialize(&mut cursor, &ImportConfig::default()).unwrap();
        let names: Vec<&str> = graph
            .preorder()
            .into_iter()
            .map(|i| graph.nodes[i].name.as_str())
            .collect();
        assert_eq!(names, ["root", "a", "a1", "a2", "b"]);
        // Preorder agrees with the order nodes were visited in
        let visited: Vec<&str> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, visited);
    }

    #[test]
    fn test_children_indices_follow_sibling_order() {
        let root = MemoryNode::new("root")
            .with_child(MemoryNode::new("first"))
            .with_child(MemoryNode::new("second"));
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        let graph = materialize(&mut cursor, &ImportConfig::default()).unwrap();
        assert_eq!(graph.roots, vec![0]);
        assert_eq!(graph.nodes[0].children, vec![1, 2]);
        assert_eq!(graph.nodes[1].name, "first");
        assert_eq!(graph.nodes[2].name, "second");
    }

    #[test]
    fn test_triangulate_called_once_for_non_triangle_attribute() {
        let root = MemoryNode::new("surface").with_attribute(
            MemoryAttribute::new("nurbs")
                .with_vertices(vec![0.0; 12])
                .with_faces(vec![0, 1, 2, 0, 2, 3]),
        );
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        materialize(&mut cursor, &ImportConfig::default()).unwrap();
        assert_eq!(cursor.stats().triangulate_calls, 1);
    }

    #[test]
    fn test_triangulate_skipped_for_triangle_mesh() {
        let root = MemoryNode::new("tri").with_attribute(
            MemoryAttribute::new("mesh")
                .triangulated()
                .with_vertices(vec![0.0; 9])
                .with_faces(vec![0, 1, 2]),
        );
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        materialize(&mut cursor, &ImportConfig::default()).unwrap();
        assert_eq!(cursor.stats().triangulate_calls, 0);
    }

    #[test]
    fn test_unsupported_attribute_reads_no_buffers() {
        let root = MemoryNode::new("lamp").with_attribute(MemoryAttribute::new("light"));
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        let graph = materialize(&mut cursor, &ImportConfig::default()).unwrap();
        assert_eq!(graph.nodes[0].attributes.len(), 1);
        assert!(graph.nodes[0].attributes[0].geometry.is_none());
        assert_eq!(cursor.stats().mesh_buffer_reads, 0);
    }

    #[test]
    fn test_material_properties_read_once_per_name() {
        let mesh = || {
            MemoryAttribute::new("mesh")
                .triangulated()
                .with_vertices(vec![0.0; 9])
                .with_faces(vec![0, 1, 2])
        };
        let red = || MemoryMaterial::new("Red").with_diffuse([1.0, 0.0, 0.0, 1.0]);
        let root = MemoryNode::new("root")
            .with_child(MemoryNode::new("left").with_attribute(mesh()).with_material(red()))
            .with_child(MemoryNode::new("right").with_attribute(mesh()).with_material(red()));
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        let graph = materialize(&mut cursor, &ImportConfig::default()).unwrap();
        assert_eq!(graph.materials.len(), 1);
        assert_eq!(cursor.stats().diffuse_color_reads, 1);
    }

    #[test]
    fn test_materials_ignored_without_convertible_attribute() {
        let root = MemoryNode::new("lamp")
            .with_attribute(MemoryAttribute::new("light"))
            .with_material(MemoryMaterial::new("Unused"));
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        let graph = materialize(&mut cursor, &ImportConfig::default()).unwrap();
        assert!(graph.materials.is_empty());
        assert!(graph.nodes[0].material_names.is_empty());
    }

    #[test]
    fn test_first_material_only_by_default() {
        let root = MemoryNode::new("mesh")
            .with_attribute(
                MemoryAttribute::new("mesh")
                    .triangulated()
                    .with_vertices(vec![0.0; 9])
                    .with_faces(vec![0, 1, 2]),
            )
            .with_material(MemoryMaterial::new("First"))
            .with_material(MemoryMaterial::new("Second"));
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        let graph = materialize(&mut cursor, &ImportConfig::default()).unwrap();
        assert_eq!(graph.nodes[0].material_names, vec!["First"]);
        assert!(!graph.materials.contains_key("Second"));
    }

    #[test]
    fn test_resolve_all_materials_snapshots_every_name() {
        let root = MemoryNode::new("mesh")
            .with_attribute(
                MemoryAttribute::new("mesh")
                    .triangulated()
                    .with_vertices(vec![0.0; 9])
                    .with_faces(vec![0, 1, 2]),
            )
            .with_material(MemoryMaterial::new("First"))
            .with_material(MemoryMaterial::new("Second"));
        let mut cursor = MemoryCursor::new(root);
        open(&mut cursor);

        let config = ImportConfig {
            resolve_all_materials: true,
            ..Default::default()
        };
        let graph = materialize(&mut cursor, &config).unwrap();
        assert_eq!(graph.nodes[0].material_names, vec!["First", "Second"]);
        assert!(graph.materials.contains_key("Second"));
    }
}
