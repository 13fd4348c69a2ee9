//! Node placement transforms.
//!
//! A scene node carries an ordered list of transforms. Order matters: the
//! source SDK applies the node's global affine transform first and its
//! geometric translation offset second, and the list preserves that order.

use cgmath::{Matrix4, Point3, Transform, Vector3};

/// One step of a node's placement.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeTransform {
    /// Full affine transform: rotation, scale, shear, and translation
    Affine(Matrix4<f64>),
    /// Pure translation offset
    Translate(Vector3<f64>),
}

impl NodeTransform {
    /// Applies this transform to a point
    pub fn transform_point(&self, point: Point3<f64>) -> Point3<f64> {
        match self {
            NodeTransform::Affine(matrix) => matrix.transform_point(point),
            NodeTransform::Translate(offset) => point + *offset,
        }
    }

    /// Flattens this transform to row-major 3x4 form.
    ///
    /// Each row holds the three linear coefficients followed by the
    /// translation component for that axis:
    ///
    /// ```text
    ///   [ mxx  mxy  mxz  tx ]
    ///   [ myx  myy  myz  ty ]
    ///   [ mzx  mzy  mzz  tz ]
    /// ```
    pub fn to_row_major_3x4(&self) -> [f64; 12] {
        match self {
            NodeTransform::Affine(m) => [
                m.x.x, m.y.x, m.z.x, m.w.x, //
                m.x.y, m.y.y, m.z.y, m.w.y, //
                m.x.z, m.y.z, m.z.z, m.w.z,
            ],
            NodeTransform::Translate(t) => [
                1.0, 0.0, 0.0, t.x, //
                0.0, 1.0, 0.0, t.y, //
                0.0, 0.0, 1.0, t.z,
            ],
        }
    }
}
