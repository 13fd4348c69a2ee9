//! Triangle mesh buffers in the flat layout delivered by the source document.

/// Geometry for a single scene node, ready for upload by a rendering layer.
///
/// All buffers are flat: positions are (x, y, z) triples, texture
/// coordinates are (u, v) pairs, and faces are index triples kept in the
/// source document's own index format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Vertex positions in the form (x1, y1, z1, x2, y2, z2, ...)
    pub points: Vec<f32>,
    /// Texture coordinates in the form (u1, v1, u2, v2, ...)
    ///
    /// Never empty: when the source defines no UVs this holds the single
    /// pair (0, 0) so consumers always have something to sample.
    pub tex_coords: Vec<f32>,
    /// Face indices as flat triples, passed through from the source
    pub faces: Vec<i32>,
    /// Per-face smoothing groups, or `None` when the source defines none
    ///
    /// `None` is distinct from an empty buffer: consumers that shade by
    /// smoothing group can tell "no smoothing information" apart from
    /// "smoothing information with zero entries".
    pub smoothing_groups: Option<Vec<i32>>,
}

impl MeshData {
    /// Number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.points.len() / 3
    }

    /// Number of faces, counting one index triple per triangle
    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 3
    }

    /// Whether this mesh carries any renderable geometry
    pub fn has_geometry(&self) -> bool {
        !self.points.is_empty() && !self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mesh = MeshData {
            points: vec![0.0; 12],
            tex_coords: vec![0.0, 0.0],
            faces: vec![0, 1, 2, 0, 2, 3],
            smoothing_groups: None,
        };
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.has_geometry());
    }

    #[test]
    fn test_default_is_empty() {
        let mesh = MeshData::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(!mesh.has_geometry());
    }
}
