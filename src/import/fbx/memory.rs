//! In-memory FBX document graphs.
//!
//! [`MemoryCursor`] implements [`FbxCursor`] over a hand-built node tree,
//! with the same mutate-in-place navigation the native runtime has. It
//! exists so the import pipeline can be exercised without the FBX SDK
//! installed: unit tests, demos, and downstream consumers that want a
//! deterministic document all use it.
//!
//! The cursor keeps counters of the binding calls it serves (see
//! [`CursorStats`]) and can inject the failure modes of a real native
//! binding: refusing to open a document, being unavailable altogether, and
//! running out of memory while materializing buffers.

use std::cell::RefCell;
use std::path::Path;

use super::binding::{BindingError, FbxCursor};

/// A mesh-like attribute on an in-memory node.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttribute {
    /// Raw type tag as the native SDK would report it, e.g. `"mesh"`
    pub type_tag: String,
    /// Whether the geometry is already triangulated
    pub triangulated: bool,
    pub vertices: Option<Vec<f32>>,
    pub tex_coords: Option<Vec<f32>>,
    pub faces: Option<Vec<i32>>,
    pub smoothing_groups: Option<Vec<i32>>,
}

impl MemoryAttribute {
    /// Creates an attribute with the given type tag and no buffers
    pub fn new(type_tag: &str) -> Self {
        Self {
            type_tag: type_tag.to_string(),
            ..Default::default()
        }
    }

    /// Marks the attribute as already being a triangle mesh
    pub fn triangulated(mut self) -> Self {
        self.triangulated = true;
        self
    }

    pub fn with_vertices(mut self, vertices: Vec<f32>) -> Self {
        self.vertices = Some(vertices);
        self
    }

    pub fn with_tex_coords(mut self, tex_coords: Vec<f32>) -> Self {
        self.tex_coords = Some(tex_coords);
        self
    }

    pub fn with_faces(mut self, faces: Vec<i32>) -> Self {
        self.faces = Some(faces);
        self
    }

    pub fn with_smoothing_groups(mut self, groups: Vec<i32>) -> Self {
        self.smoothing_groups = Some(groups);
        self
    }
}

/// A material attached to an in-memory node.
#[derive(Debug, Clone)]
pub struct MemoryMaterial {
    pub name: String,
    /// Diffuse color as (r, g, b, opacity)
    pub diffuse: Option<[f64; 4]>,
    /// Specular color as (r, g, b, opacity)
    pub specular: Option<[f64; 4]>,
    /// Specular power; -1.0 means undefined, matching the native sentinel
    pub specular_power: f64,
    pub diffuse_map: Option<String>,
    pub specular_map: Option<String>,
    pub bump_map: Option<String>,
    pub self_illumination_map: Option<String>,
}

impl MemoryMaterial {
    /// Creates a material with the given name and nothing defined
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            diffuse: None,
            specular: None,
            specular_power: -1.0,
            diffuse_map: None,
            specular_map: None,
            bump_map: None,
            self_illumination_map: None,
        }
    }

    pub fn with_diffuse(mut self, rgbo: [f64; 4]) -> Self {
        self.diffuse = Some(rgbo);
        self
    }

    pub fn with_specular(mut self, rgbo: [f64; 4]) -> Self {
        self.specular = Some(rgbo);
        self
    }

    pub fn with_specular_power(mut self, power: f64) -> Self {
        self.specular_power = power;
        self
    }

    pub fn with_diffuse_map(mut self, path: &str) -> Self {
        self.diffuse_map = Some(path.to_string());
        self
    }

    pub fn with_specular_map(mut self, path: &str) -> Self {
        self.specular_map = Some(path.to_string());
        self
    }

    pub fn with_bump_map(mut self, path: &str) -> Self {
        self.bump_map = Some(path.to_string());
        self
    }

    pub fn with_self_illumination_map(mut self, path: &str) -> Self {
        self.self_illumination_map = Some(path.to_string());
        self
    }
}

/// One node of an in-memory document graph.
#[derive(Debug, Clone)]
pub struct MemoryNode {
    pub name: String,
    /// Column-major affine transform, or `None` for identity
    pub affine: Option<[f64; 16]>,
    pub geometric_translation: Option<[f64; 3]>,
    pub attributes: Vec<MemoryAttribute>,
    pub materials: Vec<MemoryMaterial>,
    pub children: Vec<MemoryNode>,
}

impl MemoryNode {
    /// Creates a bare node with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            affine: None,
            geometric_translation: None,
            attributes: Vec::new(),
            materials: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_affine(mut self, affine: [f64; 16]) -> Self {
        self.affine = Some(affine);
        self
    }

    pub fn with_geometric_translation(mut self, translation: [f64; 3]) -> Self {
        self.geometric_translation = Some(translation);
        self
    }

    pub fn with_attribute(mut self, attribute: MemoryAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_material(mut self, material: MemoryMaterial) -> Self {
        self.materials.push(material);
        self
    }

    pub fn with_child(mut self, child: MemoryNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Counters of the binding calls a [`MemoryCursor`] has served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorStats {
    pub open_calls: usize,
    pub close_calls: usize,
    pub triangulate_calls: usize,
    /// Total mesh buffer getter invocations (vertices, UVs, faces, groups)
    pub mesh_buffer_reads: usize,
    /// Diffuse color getter invocations; one full property extraction
    /// performs exactly one of these, so this counts extraction passes
    pub diffuse_color_reads: usize,
}

/// An [`FbxCursor`] over an in-memory node tree.
pub struct MemoryCursor {
    root: MemoryNode,
    /// Child indices from the root down to the current node
    position: Vec<usize>,
    is_open: bool,
    refuse_open: bool,
    unavailable: Option<String>,
    fail_mesh_reads: bool,
    stats: RefCell<CursorStats>,
}

impl MemoryCursor {
    /// Creates a cursor over the given root node
    pub fn new(root: MemoryNode) -> Self {
        Self {
            root,
            position: Vec::new(),
            is_open: false,
            refuse_open: false,
            unavailable: None,
            fail_mesh_reads: false,
            stats: RefCell::new(CursorStats::default()),
        }
    }

    /// Makes `open` report failure, like an unreadable or corrupt file
    pub fn refusing_open(mut self) -> Self {
        self.refuse_open = true;
        self
    }

    /// Makes `open` fail as if the native runtime were missing
    pub fn unavailable(mut self, message: &str) -> Self {
        self.unavailable = Some(message.to_string());
        self
    }

    /// Makes every mesh buffer read fail with an out-of-memory error
    pub fn failing_mesh_reads(mut self) -> Self {
        self.fail_mesh_reads = true;
        self
    }

    /// Snapshot of the call counters
    pub fn stats(&self) -> CursorStats {
        *self.stats.borrow()
    }

    /// Whether every `open` has been paired with a `close`
    pub fn is_closed(&self) -> bool {
        !self.is_open
    }

    fn node(&self) -> &MemoryNode {
        let mut node = &self.root;
        for &index in &self.position {
            node = &node.children[index];
        }
        node
    }

    fn node_mut(&mut self) -> &mut MemoryNode {
        let mut node = &mut self.root;
        for &index in &self.position {
            node = &mut node.children[index];
        }
        node
    }

    fn parent(&self) -> Option<&MemoryNode> {
        if self.position.is_empty() {
            return None;
        }
        let mut node = &self.root;
        for &index in &self.position[..self.position.len() - 1] {
            node = &node.children[index];
        }
        Some(node)
    }

    fn count_mesh_read(&self) {
        self.stats.borrow_mut().mesh_buffer_reads += 1;
    }

    fn mesh_read<T: Clone>(
        &self,
        buffer: &'static str,
        value: &Option<Vec<T>>,
    ) -> Result<Option<Vec<T>>, BindingError> {
        self.count_mesh_read();
        if self.fail_mesh_reads {
            return Err(BindingError::OutOfMemory(buffer));
        }
        Ok(value.clone())
    }

    fn material(&self, j: usize) -> &MemoryMaterial {
        &self.node().materials[j]
    }
}

impl FbxCursor for MemoryCursor {
    fn open(&mut self, _path: &Path) -> Result<bool, BindingError> {
        if let Some(message) = &self.unavailable {
            return Err(BindingError::Unavailable(message.clone()));
        }
        self.stats.borrow_mut().open_calls += 1;
        if self.refuse_open {
            return Ok(false);
        }
        self.position.clear();
        self.is_open = true;
        Ok(true)
    }

    fn close(&mut self) {
        self.stats.borrow_mut().close_calls += 1;
        self.is_open = false;
    }

    fn next_child(&mut self) -> bool {
        if self.node().children.is_empty() {
            return false;
        }
        self.position.push(0);
        true
    }

    fn next_sibling(&mut self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };
        let index = *self.position.last().unwrap();
        if index + 1 >= parent.children.len() {
            return false;
        }
        *self.position.last_mut().unwrap() += 1;
        true
    }

    fn next_parent(&mut self) -> bool {
        self.position.pop().is_some()
    }

    fn node_name(&self) -> String {
        self.node().name.clone()
    }

    fn global_affine(&self) -> Option<[f64; 16]> {
        self.node().affine
    }

    fn geometric_translation(&self) -> Option<[f64; 3]> {
        self.node().geometric_translation
    }

    fn attribute_count(&self) -> usize {
        self.node().attributes.len()
    }

    fn attribute_type(&self, i: usize) -> String {
        self.node().attributes[i].type_tag.clone()
    }

    fn is_triangle_mesh(&self, i: usize) -> bool {
        self.node().attributes[i].triangulated
    }

    fn triangulate(&mut self, i: usize) {
        self.stats.borrow_mut().triangulate_calls += 1;
        self.node_mut().attributes[i].triangulated = true;
    }

    fn mesh_vertices(&self, i: usize) -> Result<Option<Vec<f32>>, BindingError> {
        self.mesh_read("vertex", &self.node().attributes[i].vertices)
    }

    fn mesh_tex_coords(&self, i: usize) -> Result<Option<Vec<f32>>, BindingError> {
        self.mesh_read("texture coordinate", &self.node().attributes[i].tex_coords)
    }

    fn mesh_faces(&self, i: usize) -> Result<Option<Vec<i32>>, BindingError> {
        self.mesh_read("face", &self.node().attributes[i].faces)
    }

    fn mesh_face_smoothing_groups(&self, i: usize) -> Result<Option<Vec<i32>>, BindingError> {
        self.mesh_read("smoothing group", &self.node().attributes[i].smoothing_groups)
    }

    fn material_count(&self) -> usize {
        self.node().materials.len()
    }

    fn material_name(&self, j: usize) -> String {
        self.material(j).name.clone()
    }

    fn material_diffuse_color(&self, j: usize) -> Option<[f64; 4]> {
        self.stats.borrow_mut().diffuse_color_reads += 1;
        self.material(j).diffuse
    }

    fn material_specular_color(&self, j: usize) -> Option<[f64; 4]> {
        self.material(j).specular
    }

    fn material_specular_power(&self, j: usize) -> f64 {
        self.material(j).specular_power
    }

    fn material_diffuse_map(&self, j: usize) -> Option<String> {
        self.material(j).diffuse_map.clone()
    }

    fn material_specular_map(&self, j: usize) -> Option<String> {
        self.material(j).specular_map.clone()
    }

    fn material_bump_map(&self, j: usize) -> Option<String> {
        self.material(j).bump_map.clone()
    }

    fn material_self_illumination_map(&self, j: usize) -> Option<String> {
        self.material(j).self_illumination_map.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(root: MemoryNode) -> MemoryCursor {
        let mut cursor = MemoryCursor::new(root);
        assert!(cursor.open(Path::new("test.fbx")).unwrap());
        cursor
    }

    #[test]
    fn test_navigation_walks_tree() {
        let root = MemoryNode::new("root")
            .with_child(MemoryNode::new("a").with_child(MemoryNode::new("a1")))
            .with_child(MemoryNode::new("b"));
        let mut cursor = opened(root);

        assert_eq!(cursor.node_name(), "root");
        assert!(cursor.next_child());
        assert_eq!(cursor.node_name(), "a");
        assert!(cursor.next_child());
        assert_eq!(cursor.node_name(), "a1");
        assert!(!cursor.next_child());
        assert!(!cursor.next_sibling());
        assert!(cursor.next_parent());
        assert!(cursor.next_sibling());
        assert_eq!(cursor.node_name(), "b");
        assert!(cursor.next_parent());
        assert!(!cursor.next_parent());
    }

    #[test]
    fn test_sibling_at_root_fails() {
        let mut cursor = opened(MemoryNode::new("root"));
        assert!(!cursor.next_sibling());
        assert!(!cursor.next_child());
    }

    #[test]
    fn test_triangulate_mutates_attribute() {
        let root = MemoryNode::new("n").with_attribute(MemoryAttribute::new("nurbs"));
        let mut cursor = opened(root);
        assert!(!cursor.is_triangle_mesh(0));
        cursor.triangulate(0);
        assert!(cursor.is_triangle_mesh(0));
        assert_eq!(cursor.stats().triangulate_calls, 1);
    }

    #[test]
    fn test_open_refusal_and_close_pairing() {
        let mut cursor = MemoryCursor::new(MemoryNode::new("root")).refusing_open();
        assert!(!cursor.open(Path::new("bad.fbx")).unwrap());
        cursor.close();
        assert!(cursor.is_closed());
        assert_eq!(cursor.stats().open_calls, 1);
        assert_eq!(cursor.stats().close_calls, 1);
    }

    #[test]
    fn test_unavailable_runtime_errors_on_open() {
        let mut cursor =
            MemoryCursor::new(MemoryNode::new("root")).unavailable("libjfbx.so not found");
        let err = cursor.open(Path::new("scene.fbx")).unwrap_err();
        assert!(matches!(err, BindingError::Unavailable(_)));
    }

    #[test]
    fn test_failing_mesh_reads_report_oom() {
        let root = MemoryNode::new("n")
            .with_attribute(MemoryAttribute::new("mesh").with_vertices(vec![0.0; 3]));
        let cursor = MemoryCursor::new(root).failing_mesh_reads();
        let err = cursor.mesh_vertices(0).unwrap_err();
        assert!(matches!(err, BindingError::OutOfMemory("vertex")));
    }
}
