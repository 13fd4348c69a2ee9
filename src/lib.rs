// src/lib.rs
//! # Cairn
//!
//! Renderer-agnostic FBX scene import.
//!
//! Cairn walks the node graph of an FBX document, converts every mesh-like
//! attribute into flat vertex/face/UV buffers, resolves materials (cached
//! per name for the import session), and composes each node's placement
//! transforms. The result is a plain-data [`SceneRoot`] that a rendering
//! or viewer layer can consume however it likes; nothing here depends on a
//! GPU API or a windowing system.
//!
//! The native FBX runtime is reached through the [`FbxCursor`] trait, so
//! the whole pipeline also runs against the bundled in-memory document
//! graphs (see [`import::fbx::memory`]) with no SDK installed.

pub mod import;
pub mod scene;

// Re-export main types for convenience
pub use import::{BindingError, FbxCursor, ImportConfig, ImportError, Importer};
pub use scene::{Material, MeshData, NodeTransform, SceneNode, SceneRoot, SceneStats, TextureRef};
