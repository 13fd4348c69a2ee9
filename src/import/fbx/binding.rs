//! The seam between the importer and the native FBX runtime.
//!
//! The FBX SDK exposes the document as a stateful cursor: one implicit
//! "current node" that navigation calls mutate in place. [`FbxCursor`]
//! captures exactly that capability surface so the import pipeline can run
//! against the real native binding or against [`MemoryCursor`] in tests.
//!
//! The cursor is single-owner and single-threaded. There is no internal
//! locking, so a cursor must never be navigated from two threads at once;
//! the importer enforces this by taking the cursor by mutable reference for
//! the whole traversal.
//!
//! [`MemoryCursor`]: super::memory::MemoryCursor

use std::path::Path;

use thiserror::Error;

/// Failures originating in the native binding layer.
///
/// These are deliberately distinct from data-shape problems in the document
/// itself: a caller can tell "install the FBX runtime" apart from "this
/// file is broken".
#[derive(Debug, Error)]
pub enum BindingError {
    /// The native runtime could not be loaded at all
    #[error("fbx runtime is unavailable: {0}")]
    Unavailable(String),

    /// The binding ran out of memory while materializing a buffer
    #[error("out of memory while reading {0} data")]
    OutOfMemory(&'static str),
}

/// Cursor over an FBX document graph.
///
/// Navigation is mutate-in-place: `next_child`, `next_sibling`, and
/// `next_parent` move the current position and report whether the move
/// happened. All other calls read from or mutate the current node.
///
/// Buffer getters return `Ok(None)` when the document simply does not
/// define that buffer; `Err` is reserved for binding-level failures such as
/// memory exhaustion. Material colors arrive as (r, g, b, opacity) and the
/// specular power uses -1.0 as its absent sentinel, both following the
/// native SDK's conventions.
pub trait FbxCursor {
    /// Opens the document and positions the cursor at the graph root.
    ///
    /// Returns `Ok(false)` if the file could not be read (corrupt or
    /// missing); `Err` if the runtime itself is unusable.
    fn open(&mut self, path: &Path) -> Result<bool, BindingError>;

    /// Releases everything the binding allocated for the open document.
    ///
    /// Must be called once for every successful or failed `open`.
    fn close(&mut self);

    /// Moves to the first child of the current node, if it has one
    fn next_child(&mut self) -> bool;

    /// Moves to the next sibling of the current node, if it has one
    fn next_sibling(&mut self) -> bool;

    /// Moves to the parent of the current node, if it has one
    fn next_parent(&mut self) -> bool;

    /// Name of the current node
    fn node_name(&self) -> String;

    /// Global affine transform of the current node as 16 values,
    /// column-major (the four columns stacked end to end), or `None` if
    /// the node defines none
    fn global_affine(&self) -> Option<[f64; 16]>;

    /// Geometric translation offset of the current node, or `None`
    fn geometric_translation(&self) -> Option<[f64; 3]>;

    /// Number of attributes attached to the current node
    fn attribute_count(&self) -> usize;

    /// Type tag of the i'th attribute, e.g. `"mesh"` or `"nurbs surface"`
    fn attribute_type(&self, i: usize) -> String;

    /// Whether the i'th attribute is already a triangle mesh
    fn is_triangle_mesh(&self, i: usize) -> bool;

    /// Converts the i'th attribute to a triangle mesh in place.
    ///
    /// Mutates the underlying document representation; afterwards the
    /// buffer getters return triangulated data.
    fn triangulate(&mut self, i: usize);

    /// Vertex positions of the i'th attribute as (x, y, z) triples
    fn mesh_vertices(&self, i: usize) -> Result<Option<Vec<f32>>, BindingError>;

    /// Texture coordinates of the i'th attribute as (u, v) pairs
    fn mesh_tex_coords(&self, i: usize) -> Result<Option<Vec<f32>>, BindingError>;

    /// Face indices of the i'th attribute as flat triples
    fn mesh_faces(&self, i: usize) -> Result<Option<Vec<i32>>, BindingError>;

    /// Per-face smoothing groups of the i'th attribute, if defined
    fn mesh_face_smoothing_groups(&self, i: usize) -> Result<Option<Vec<i32>>, BindingError>;

    /// Number of materials attached to the current node
    fn material_count(&self) -> usize;

    /// Name of the j'th material on the current node
    fn material_name(&self, j: usize) -> String;

    /// Diffuse color of the j'th material as (r, g, b, opacity), if defined
    fn material_diffuse_color(&self, j: usize) -> Option<[f64; 4]>;

    /// Specular color of the j'th material as (r, g, b, opacity), if defined
    fn material_specular_color(&self, j: usize) -> Option<[f64; 4]>;

    /// Specular power of the j'th material; -1.0 means undefined
    fn material_specular_power(&self, j: usize) -> f64;

    /// Absolute path of the j'th material's diffuse texture map, if any
    fn material_diffuse_map(&self, j: usize) -> Option<String>;

    /// Absolute path of the j'th material's specular texture map, if any
    fn material_specular_map(&self, j: usize) -> Option<String>;

    /// Absolute path of the j'th material's bump map, if any
    fn material_bump_map(&self, j: usize) -> Option<String>;

    /// Absolute path of the j'th material's self-illumination map, if any
    fn material_self_illumination_map(&self, j: usize) -> Option<String>;
}
