//! Error types raised by the importer.

use thiserror::Error;

use super::fbx::binding::BindingError;

/// Everything that can go wrong while loading a document.
///
/// A failed import never yields a partial scene: either the whole load
/// succeeds, or one of these is returned and no nodes are handed out.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The path has no file extension to dispatch on
    #[error("unknown 3d file format, path missing extension [{path}]")]
    MissingExtension { path: String },

    /// The path's extension names a format this importer does not handle
    #[error("unsupported 3d file format [{extension}]")]
    UnsupportedFormat { extension: String },

    /// The native runtime refused to open the document.
    ///
    /// Only raised when the importer is configured to treat open failures
    /// as errors (see [`ImportConfig`]); the default is an empty scene.
    ///
    /// [`ImportConfig`]: super::ImportConfig
    #[error("failed to open document [{path}]")]
    OpenFailed { path: String },

    /// A mesh buffer's length does not divide evenly into its tuple size
    #[error("{buffer} buffer length {length} is not a multiple of {stride}")]
    MalformedBuffer {
        buffer: &'static str,
        length: usize,
        stride: usize,
    },

    /// A texture map path could not form a usable image reference
    #[error("texture map path [{path}] cannot be used as an image reference")]
    InvalidTexturePath { path: String },

    /// The native binding itself failed
    #[error(transparent)]
    Binding(#[from] BindingError),
}
