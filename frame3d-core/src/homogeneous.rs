//! Homogeneous-coordinate glue between 3D points/directions and 4x4 matrices

use nalgebra::{Matrix3, Matrix4, RealField, Vector3, Vector4};

/// The 4x4 identity matrix
pub fn identity4<T: RealField + Copy>() -> Matrix4<T> {
    Matrix4::identity()
}

/// (1, 1, 1), the unit scale of a frame
pub fn ones3<T: RealField + Copy>() -> Vector3<T> {
    Vector3::repeat(T::one())
}

pub fn zeros3<T: RealField + Copy>() -> Vector3<T> {
    Vector3::zeros()
}

pub fn unit_x<T: RealField + Copy>() -> Vector3<T> {
    Vector3::x()
}

pub fn unit_y<T: RealField + Copy>() -> Vector3<T> {
    Vector3::y()
}

pub fn unit_z<T: RealField + Copy>() -> Vector3<T> {
    Vector3::z()
}

/// Quiet NaN for any float scalar, used to fill results of singular inversions
pub(crate) fn nan<T: RealField + Copy>() -> T {
    T::zero() / T::zero()
}

/// Lift a 3D point to homogeneous form (w = 1)
pub fn to_point4<T: RealField + Copy>(p: &Vector3<T>) -> Vector4<T> {
    Vector4::new(p.x, p.y, p.z, T::one())
}

/// Lift a 3D direction to homogeneous form (w = 0)
pub fn to_vector4<T: RealField + Copy>(v: &Vector3<T>) -> Vector4<T> {
    Vector4::new(v.x, v.y, v.z, T::zero())
}

/// Drop back to 3D, dividing by w unless w is (nearly) zero.
///
/// A w within `1000 * epsilon` of zero marks a direction, whose xyz part is
/// returned untouched.
pub fn from_homogeneous<T: RealField + Copy>(v: &Vector4<T>) -> Vector3<T> {
    let threshold = nalgebra::convert::<f64, T>(1000.0) * T::default_epsilon();
    if v.w.abs() > threshold {
        v.xyz() / v.w
    } else {
        v.xyz()
    }
}

/// Transform a point (w = 1) and keep xyz without a perspective divide
pub fn transform_point<T: RealField + Copy>(m: &Matrix4<T>, p: &Vector3<T>) -> Vector3<T> {
    (m * to_point4(p)).xyz()
}

/// Transform a direction (w = 0); translation has no effect
pub fn transform_vector<T: RealField + Copy>(m: &Matrix4<T>, v: &Vector3<T>) -> Vector3<T> {
    (m * to_vector4(v)).xyz()
}

/// Transform a homogeneous vector and apply the perspective divide
pub fn project_point<T: RealField + Copy>(m: &Matrix4<T>, v: &Vector4<T>) -> Vector3<T> {
    from_homogeneous(&(m * v))
}

/// Rotation of `radians` about `axis` (right-hand rule).
///
/// Built by moving into a basis whose first axis is the rotation axis,
/// rotating about x there, and moving back.
pub fn rotation_about_axis<T: RealField + Copy>(radians: T, axis: &Vector3<T>) -> Matrix3<T> {
    let (s, c) = radians.sin_cos();
    let about_x = Matrix3::new(
        T::one(), T::zero(), T::zero(),
        T::zero(), c, -s,
        T::zero(), s, c,
    );

    let x = axis.normalize();
    // Any helper not parallel to the axis works; pick the less aligned one.
    let helper = if x.x.abs() < nalgebra::convert::<f64, T>(0.9) {
        unit_x()
    } else {
        unit_y()
    };
    let z = x.cross(&helper).normalize();
    let y = z.cross(&x);

    let basis = Matrix3::from_columns(&[x, y, z]);
    basis * about_x * basis.transpose()
}
