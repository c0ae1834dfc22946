//! Rigid transform construction and decomposition.

use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, UnitQuaternion, Vector3};

/// Homogeneous translation matrix.
#[must_use]
pub fn translation_matrix(translation: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(translation)
}

/// Homogeneous rotation matrix for a unit quaternion.
#[must_use]
pub fn rotation_matrix(rotation: &UnitQuaternion<f64>) -> Matrix4<f64> {
    rotation.to_homogeneous()
}

/// Place a frame in world space: `T(translation) * R(rotation)`.
///
/// # Example
///
/// ```
/// use guide_math::compose_rigid;
/// use nalgebra::{UnitQuaternion, Vector3, Vector4};
///
/// let m = compose_rigid(&Vector3::new(1.0, 2.0, 3.0), &UnitQuaternion::identity());
/// let p = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
/// assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
/// ```
#[must_use]
pub fn compose_rigid(translation: &Vector3<f64>, rotation: &UnitQuaternion<f64>) -> Matrix4<f64> {
    translation_matrix(translation) * rotation_matrix(rotation)
}

/// Split a rigid homogeneous matrix into translation and rotation.
///
/// The upper 3x3 block must be a proper rotation. Scale or shear is not
/// removed and yields a meaningless rotation; only small numerical drift is
/// absorbed by normalizing the result.
#[must_use]
pub fn decompose_rigid(matrix: &Matrix4<f64>) -> (Vector3<f64>, UnitQuaternion<f64>) {
    let translation = Vector3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
    let block: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    let rotation =
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(block));
    (translation, UnitQuaternion::new_normalize(rotation.into_inner()))
}

/// Rotate a vector with the double-cross-product identity.
///
/// `v' = v + 2 * (w * (u x v) + u x (u x v))` where `u` is the vector part.
#[must_use]
pub fn rotate_vector(q: &UnitQuaternion<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    let u = q.imag();
    let w = q.scalar();
    let cross1 = u.cross(v);
    let cross2 = u.cross(&cross1);
    v + 2.0 * (w * cross1 + cross2)
}

/// Rotation of `angle` radians about `axis`.
///
/// The axis is normalized; a zero-length axis gives the identity.
#[must_use]
pub fn axis_angle(axis: &Vector3<f64>, angle: f64) -> UnitQuaternion<f64> {
    Unit::try_new(*axis, f64::EPSILON).map_or_else(UnitQuaternion::identity, |axis| {
        UnitQuaternion::from_axis_angle(&axis, angle)
    })
}
