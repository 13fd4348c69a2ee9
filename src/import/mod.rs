//! # Importer Facade
//!
//! The single public entry point for loading 3D documents. The facade
//! derives the format from the path's file extension, dispatches to the
//! matching pipeline, and guarantees the native binding is closed again on
//! every exit path.
//!
//! ## Usage
//!
//! ```
//! use cairn::import::fbx::memory::{MemoryAttribute, MemoryCursor, MemoryNode};
//! use cairn::Importer;
//!
//! let document = MemoryNode::new("tri").with_attribute(
//!     MemoryAttribute::new("mesh")
//!         .triangulated()
//!         .with_vertices(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
//!         .with_faces(vec![0, 1, 2]),
//! );
//! let mut importer = Importer::new(MemoryCursor::new(document));
//! let scene = importer.load("model.fbx").unwrap();
//! assert_eq!(scene.len(), 1);
//! ```
//!
//! A real application substitutes its native FBX cursor for the in-memory
//! one; the pipeline does not care which it gets.

pub mod error;
pub mod fbx;

use std::path::Path;

use crate::scene::SceneRoot;

// Re-export main types
pub use error::ImportError;
pub use fbx::binding::{BindingError, FbxCursor};

/// Tuning knobs for an import session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportConfig {
    /// Report a failed document open as [`ImportError::OpenFailed`] instead
    /// of silently producing an empty scene
    pub open_failure_is_error: bool,
    /// Resolve every material attached to a node into the session cache,
    /// not just the first. The node itself still attaches only its first
    /// material.
    pub resolve_all_materials: bool,
}

/// Loads 3D documents through a format-dispatching facade.
///
/// One importer owns one binding instance. `load` takes the importer
/// mutably for the whole traversal, which is what makes the underlying
/// single-threaded cursor safe to use; importing several files
/// concurrently requires one importer (and one binding) per file.
pub struct Importer<B: FbxCursor> {
    binding: B,
    config: ImportConfig,
}

impl<B: FbxCursor> Importer<B> {
    /// Creates an importer over the given binding with default settings
    pub fn new(binding: B) -> Self {
        Self {
            binding,
            config: ImportConfig::default(),
        }
    }

    /// Creates an importer with explicit settings
    pub fn with_config(binding: B, config: ImportConfig) -> Self {
        Self { binding, config }
    }

    /// File extensions this importer can load
    pub fn supported_extensions() -> &'static [&'static str] {
        &["fbx"]
    }

    /// Loads a 3D document into a scene.
    ///
    /// Accepts a filesystem path or a `file://` URL string. The format is
    /// chosen by the extension after the last `.`, matched
    /// case-insensitively.
    ///
    /// # Arguments
    /// * `location` - path or file URL of the document to load
    ///
    /// # Returns
    /// The imported scene, or an error if the extension is missing or
    /// unsupported, or the pipeline fails.
    pub fn load(&mut self, location: &str) -> Result<SceneRoot, ImportError> {
        let path = location.strip_prefix("file://").unwrap_or(location);

        let extension = match path.rfind('.') {
            None | Some(0) => {
                return Err(ImportError::MissingExtension {
                    path: path.to_string(),
                })
            }
            Some(dot) => path[dot + 1..].to_lowercase(),
        };

        match extension.as_str() {
            "fbx" => fbx::import(&mut self.binding, Path::new(path), &self.config),
            _ => Err(ImportError::UnsupportedFormat { extension }),
        }
    }
}
