//! Mesh assembly from raw attribute buffers.

use log::debug;

use super::graph::RawGeometry;
use crate::import::error::ImportError;
use crate::scene::MeshData;

const VERTEX_STRIDE: usize = 3;
const FACE_STRIDE: usize = 3;
const UV_STRIDE: usize = 2;

/// Builds renderable mesh data from one attribute's raw buffers.
///
/// Vertices and faces must both be present for the mesh to carry geometry;
/// if either is missing the result is `Ok(None)` and the node is emitted
/// without a mesh. Missing texture coordinates are replaced by a single
/// (0, 0) pair, while missing smoothing groups stay missing.
///
/// Buffer lengths that do not divide evenly into their tuple sizes mean the
/// document handed us garbage, and that fails the whole import.
pub(crate) fn build_mesh(geometry: &RawGeometry) -> Result<Option<MeshData>, ImportError> {
    let (Some(vertices), Some(faces)) = (&geometry.vertices, &geometry.faces) else {
        debug!("attribute lacks vertex or face data, emitting node without geometry");
        return Ok(None);
    };

    check_stride("vertex", vertices.len(), VERTEX_STRIDE)?;
    check_stride("face", faces.len(), FACE_STRIDE)?;

    let tex_coords = match &geometry.tex_coords {
        Some(tex_coords) => {
            check_stride("texture coordinate", tex_coords.len(), UV_STRIDE)?;
            tex_coords.clone()
        }
        // Substitute one (u, v) pair so consumers never see an empty UV buffer.
        None => vec![0.0, 0.0],
    };

    Ok(Some(MeshData {
        points: vertices.clone(),
        tex_coords,
        faces: faces.clone(),
        smoothing_groups: geometry.smoothing_groups.clone(),
    }))
}

fn check_stride(buffer: &'static str, length: usize, stride: usize) -> Result<(), ImportError> {
    if length % stride != 0 {
        return Err(ImportError::MalformedBuffer {
            buffer,
            length,
            stride,
        });
    }
    Ok(())
}
