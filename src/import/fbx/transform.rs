//! Placement composition from the node's transform data.

use cgmath::{Matrix4, Vector3};

use crate::scene::NodeTransform;

/// Composes a node's transform list from its global affine matrix and
/// geometric translation offset.
///
/// The SDK delivers the affine matrix as 16 values running down the
/// columns, which is also the order cgmath's column-major constructor
/// takes, so the values pass straight through. An absent matrix means
/// identity and contributes nothing. The geometric translation, when
/// present, is appended after the affine transform; it applies in the
/// node's local post-affine space, so the order is load-bearing.
pub(crate) fn compose_transforms(
    affine: Option<[f64; 16]>,
    geometric_translation: Option<[f64; 3]>,
) -> Vec<NodeTransform> {
    let mut transforms = Vec::new();

    if let Some(g) = affine {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            g[0], g[1], g[2], g[3],
            g[4], g[5], g[6], g[7],
            g[8], g[9], g[10], g[11],
            g[12], g[13], g[14], g[15],
        );
        transforms.push(NodeTransform::Affine(matrix));
    }

    if let Some(t) = geometric_translation {
        transforms.push(NodeTransform::Translate(Vector3::new(t[0], t[1], t[2])));
    }

    transforms
}
