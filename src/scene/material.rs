//! Material definitions shared between scene nodes.
//!
//! Materials are keyed by name and created once per distinct name during an
//! import. Every property is optional: a material that defines nothing is
//! still a valid material, and absent properties are left absent rather than
//! filled with zero colors.

use std::path::{Path, PathBuf};

/// A reference to a texture image on disk.
///
/// Wraps the texture file path reported by the source document. The image
/// itself is not decoded here; loading pixels is the rendering layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    path: PathBuf,
}

impl TextureRef {
    /// Builds a texture reference from a map path reported by the source.
    ///
    /// Returns `None` if the path cannot form a usable reference (an empty
    /// string names no file).
    pub fn from_map_path(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            path: PathBuf::from(raw),
        })
    }

    /// The referenced image file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The reference rendered as a `file://` URL string
    pub fn file_url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Surface description attached to scene nodes.
///
/// Colors are RGBA with the alpha component always 1.0; source opacity is
/// discarded because transparency is not supported downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Unique material name, the caching key for the import session
    pub name: String,
    /// Diffuse color (r, g, b, 1.0), if the source defines one
    pub diffuse_color: Option<[f32; 4]>,
    /// Specular color (r, g, b, 1.0), if the source defines one
    pub specular_color: Option<[f32; 4]>,
    /// Specular power (shininess), if the source defines one
    ///
    /// A defined power of 0.0 is still a defined power.
    pub specular_power: Option<f32>,
    /// First-layer diffuse texture map
    pub diffuse_map: Option<TextureRef>,
    /// First-layer specular texture map
    pub specular_map: Option<TextureRef>,
    /// First-layer bump map
    pub bump_map: Option<TextureRef>,
    /// First-layer self-illumination map
    pub self_illumination_map: Option<TextureRef>,
}

impl Material {
    /// Creates a material with the given name and no properties defined
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            diffuse_color: None,
            specular_color: None,
            specular_power: None,
            diffuse_map: None,
            specular_map: None,
            bump_map: None,
            self_illumination_map: None,
        }
    }

    /// Whether any texture map slot is populated
    pub fn has_texture_maps(&self) -> bool {
        self.diffuse_map.is_some()
            || self.specular_map.is_some()
            || self.bump_map.is_some()
            || self.self_illumination_map.is_some()
    }
}
