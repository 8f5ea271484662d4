//! Tangent-space bases of textured triangles, for normal mapping

use nalgebra::{Matrix2, Matrix3, Matrix3x2, RealField, Vector2, Vector3};

use crate::error::DegenerateInputError;
use crate::homogeneous::nan;

/// Closed-form 2x2 inverse; a zero determinant gives Inf/NaN entries
fn inverse2<T: RealField + Copy>(m: &Matrix2<T>) -> Matrix2<T> {
    let inv_det = T::one() / m.determinant();
    Matrix2::new(m[(1, 1)], -m[(0, 1)], -m[(1, 0)], m[(0, 0)]) * inv_det
}

fn uv_deltas<T: RealField + Copy>(
    uv0: &Vector2<T>,
    uv1: &Vector2<T>,
    uv2: &Vector2<T>,
) -> Matrix2<T> {
    Matrix2::from_columns(&[uv1 - uv0, uv2 - uv0])
}

/// Tangent (column 0) and bitangent (column 1) of a triangle.
///
/// Solves `[p1 - p0 | p2 - p0] = [T | B] * [uv1 - uv0 | uv2 - uv0]`. The
/// results are the object-space images of the texture u and v directions;
/// they are neither normalized nor orthogonalized.
pub fn tangent_bitangent<T: RealField + Copy>(
    p0: &Vector3<T>,
    p1: &Vector3<T>,
    p2: &Vector3<T>,
    uv0: &Vector2<T>,
    uv1: &Vector2<T>,
    uv2: &Vector2<T>,
) -> Matrix3x2<T> {
    let edges = Matrix3x2::from_columns(&[p1 - p0, p2 - p0]);
    edges * inverse2(&uv_deltas(uv0, uv1, uv2))
}

/// Same result as [`tangent_bitangent`], written out component by component
pub fn tangent_bitangent_by_hand<T: RealField + Copy>(
    p0: &Vector3<T>,
    p1: &Vector3<T>,
    p2: &Vector3<T>,
    uv0: &Vector2<T>,
    uv1: &Vector2<T>,
    uv2: &Vector2<T>,
) -> Matrix3x2<T> {
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;
    let delta_uv1 = uv1 - uv0;
    let delta_uv2 = uv2 - uv0;

    let f = T::one() / (delta_uv1.x * delta_uv2.y - delta_uv2.x * delta_uv1.y);

    let tangent = Vector3::new(
        f * (delta_uv2.y * edge1.x - delta_uv1.y * edge2.x),
        f * (delta_uv2.y * edge1.y - delta_uv1.y * edge2.y),
        f * (delta_uv2.y * edge1.z - delta_uv1.y * edge2.z),
    );
    let bitangent = Vector3::new(
        f * (-delta_uv2.x * edge1.x + delta_uv1.x * edge2.x),
        f * (-delta_uv2.x * edge1.y + delta_uv1.x * edge2.y),
        f * (-delta_uv2.x * edge1.z + delta_uv1.x * edge2.z),
    );

    Matrix3x2::from_columns(&[tangent, bitangent])
}

/// Full tangent/bitangent/normal basis.
///
/// `normal_p0` is the vertex normal in object space and `normal_q0` the
/// matching normal in texture space, usually (0, 0, 1) or a normal-map
/// sample. Texture coordinates are 3D here so that the normal has an axis
/// to live on. A singular texture-space matrix gives NaN.
pub fn tangent_bitangent_normal<T: RealField + Copy>(
    normal_p0: &Vector3<T>,
    p0: &Vector3<T>,
    p1: &Vector3<T>,
    p2: &Vector3<T>,
    normal_q0: &Vector3<T>,
    q0: &Vector3<T>,
    q1: &Vector3<T>,
    q2: &Vector3<T>,
) -> Matrix3<T> {
    let object = Matrix3::from_columns(&[p1 - p0, p2 - p0, *normal_p0]);
    let texture = Matrix3::from_columns(&[q1 - q0, q2 - q0, *normal_q0]);
    let inverse = texture
        .try_inverse()
        .unwrap_or_else(|| Matrix3::repeat(nan()));
    object * inverse
}

fn ensure_finite<'a, T: RealField + Copy>(
    mut components: impl Iterator<Item = &'a T>,
) -> Result<(), DegenerateInputError> {
    if components.all(|c| c.is_finite()) {
        Ok(())
    } else {
        log::debug!("tangent basis has non-finite components");
        Err(DegenerateInputError::NonFinite)
    }
}

/// [`tangent_bitangent`] rejecting zero-area texture triangles
pub fn try_tangent_bitangent<T: RealField + Copy>(
    p0: &Vector3<T>,
    p1: &Vector3<T>,
    p2: &Vector3<T>,
    uv0: &Vector2<T>,
    uv1: &Vector2<T>,
    uv2: &Vector2<T>,
) -> Result<Matrix3x2<T>, DegenerateInputError> {
    let det = uv_deltas(uv0, uv1, uv2).determinant();
    if det == T::zero() || !det.is_finite() {
        log::debug!("rejecting texture triangle with determinant {:?}", det);
        return Err(DegenerateInputError::SingularTextureSpace);
    }
    let basis = tangent_bitangent(p0, p1, p2, uv0, uv1, uv2);
    ensure_finite(basis.iter())?;
    Ok(basis)
}

/// [`tangent_bitangent_normal`] rejecting a singular texture-space matrix
pub fn try_tangent_bitangent_normal<T: RealField + Copy>(
    normal_p0: &Vector3<T>,
    p0: &Vector3<T>,
    p1: &Vector3<T>,
    p2: &Vector3<T>,
    normal_q0: &Vector3<T>,
    q0: &Vector3<T>,
    q1: &Vector3<T>,
    q2: &Vector3<T>,
) -> Result<Matrix3<T>, DegenerateInputError> {
    let det = Matrix3::from_columns(&[q1 - q0, q2 - q0, *normal_q0]).determinant();
    if det == T::zero() || !det.is_finite() {
        log::debug!("rejecting texture-space basis with determinant {:?}", det);
        return Err(DegenerateInputError::SingularTextureSpace);
    }
    let basis = tangent_bitangent_normal(normal_p0, p0, p1, p2, normal_q0, q0, q1, q2);
    ensure_finite(basis.iter())?;
    Ok(basis)
}
