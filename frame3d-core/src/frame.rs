//! Affine coordinate frames: origin, orientation and per-axis scale

use nalgebra::{Matrix3, Matrix4, RealField, Rotation3, Unit, Vector3};

use crate::homogeneous::{self, nan, ones3, to_vector4, transform_point, transform_vector, zeros3};

/// A right-handed local coordinate system embedded in a parent ("world") space.
///
/// A point `p` given in the frame's own ("model") coordinates sits at
/// `origin + orientation * (p ⊙ scale)` in world space. Mutating methods
/// return `&mut Self` so they chain:
///
/// ```
/// use frame3d_core::AffineFrame;
/// use nalgebra::Vector3;
///
/// let mut frame = AffineFrame::<f64>::new();
/// frame
///     .translate(&Vector3::new(0.0, 0.0, -5.0))
///     .rotate(0.5, &Vector3::y())
///     .scale_by(&Vector3::new(2.0, 2.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineFrame<T: RealField + Copy> {
    orientation: Matrix4<T>,
    scale: Vector3<T>,
    origin: Vector3<T>,
    orthonormal_basis: bool,
}

impl<T: RealField + Copy> AffineFrame<T> {
    /// The identity frame: world axes, unit scale, origin at zero
    pub fn new() -> Self {
        Self {
            orientation: homogeneous::identity4(),
            scale: ones3(),
            origin: zeros3(),
            orthonormal_basis: true,
        }
    }

    /// Frame built by [`make_from_origin_horizontal_vertical`](Self::make_from_origin_horizontal_vertical)
    pub fn from_origin_horizontal_vertical(
        origin: &Vector3<T>,
        horizontal: &Vector3<T>,
        vertical: &Vector3<T>,
    ) -> Self {
        let mut frame = Self::new();
        frame.make_from_origin_horizontal_vertical(origin, horizontal, vertical);
        frame
    }

    /// Frame built by [`make_from_axes`](Self::make_from_axes).
    ///
    /// Unlike the mutating form this also sets the orthonormal flag, and only
    /// when the resulting axes are unit length and mutually perpendicular.
    pub fn from_axes(
        origin: &Vector3<T>,
        x: &Vector3<T>,
        y: &Vector3<T>,
        z: &Vector3<T>,
        normalize: bool,
    ) -> Self {
        let mut frame = Self::new();
        frame.make_from_axes(origin, x, y, z, normalize);
        frame.orthonormal_basis = frame.has_orthonormal_axes();
        frame
    }

    /// Camera frame looking from `eye` toward `center`
    pub fn from_camera(eye: &Vector3<T>, center: &Vector3<T>, up: &Vector3<T>) -> Self {
        let mut frame = Self::new();
        frame.make_from_camera(eye, center, up);
        frame
    }

    pub fn reset(&mut self) -> &mut Self {
        self.orientation = homogeneous::identity4();
        self.scale = ones3();
        self.origin = zeros3();
        self
    }

    /// Move along the frame's own axes, measured in its own unit lengths
    pub fn translate(&mut self, offset: &Vector3<T>) -> &mut Self {
        self.origin += transform_vector(&self.orientation, &offset.component_mul(&self.scale));
        self
    }

    /// Move along the world axes
    pub fn translate_absolute(&mut self, offset_world: &Vector3<T>) -> &mut Self {
        self.origin += offset_world;
        self
    }

    /// Rotate about an axis given in the frame's own coordinates.
    ///
    /// The axis is a direction in model space, so it is scaled like any
    /// other model-space vector before being carried into world space.
    pub fn rotate(&mut self, radians: T, axis_local: &Vector3<T>) -> &mut Self {
        let axis_world = transform_vector(&self.orientation, &axis_local.component_mul(&self.scale));
        self.rotate_absolute(radians, &axis_world)
    }

    /// Rotate about an axis given in world coordinates
    pub fn rotate_absolute(&mut self, radians: T, axis_world: &Vector3<T>) -> &mut Self {
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis_world), radians);
        self.orientation = rotation.to_homogeneous() * self.orientation;
        self
    }

    /// Multiply the per-axis unit lengths
    pub fn scale_by(&mut self, factors: &Vector3<T>) -> &mut Self {
        self.scale.component_mul_assign(factors);
        self
    }

    /// Replace the per-axis unit lengths
    pub fn scale_absolute(&mut self, factors: &Vector3<T>) -> &mut Self {
        self.scale = *factors;
        self
    }

    pub fn set_origin(&mut self, origin: &Vector3<T>) -> &mut Self {
        self.origin = *origin;
        self
    }

    /// The upper 3x3 block is expected to be orthonormal unless the
    /// orthonormal flag is cleared; nothing is checked.
    pub fn set_orientation(&mut self, orientation: &Matrix4<T>) -> &mut Self {
        self.orientation = *orientation;
        self
    }

    /// Choose between transposition (`true`) and general inversion
    /// (`false`) when mapping world coordinates back into the frame.
    pub fn set_orthonormal_basis(&mut self, orthonormal: bool) -> &mut Self {
        self.orthonormal_basis = orthonormal;
        self
    }

    pub fn origin(&self) -> &Vector3<T> {
        &self.origin
    }

    pub fn orientation(&self) -> &Matrix4<T> {
        &self.orientation
    }

    pub fn scale(&self) -> &Vector3<T> {
        &self.scale
    }

    pub fn is_orthonormal_basis(&self) -> bool {
        self.orthonormal_basis
    }

    /// Basis vector `index` (0 = x, 1 = y, 2 = z) in world space, unscaled
    pub fn axis(&self, index: usize) -> Vector3<T> {
        self.orientation.fixed_view::<3, 1>(0, index).into_owned()
    }

    /// Inverse of the orientation matrix.
    ///
    /// A singular skewed basis yields a NaN matrix.
    pub fn inverse_orientation(&self) -> Matrix4<T> {
        if self.orthonormal_basis {
            self.orientation.transpose()
        } else {
            self.orientation
                .try_inverse()
                .unwrap_or_else(|| Matrix4::repeat(nan()))
        }
    }

    pub fn model_to_world(&self, model: &Vector3<T>) -> Vector3<T> {
        self.origin + transform_point(&self.orientation, &model.component_mul(&self.scale))
    }

    pub fn world_to_model(&self, world: &Vector3<T>) -> Vector3<T> {
        transform_point(&self.inverse_orientation(), &(world - self.origin)).component_div(&self.scale)
    }

    /// `Translation(origin) * orientation * Scale(scale)`
    pub fn model_to_world_matrix(&self) -> Matrix4<T> {
        let translation = Matrix4::new_translation(&self.origin);
        let scaling = Matrix4::new_nonuniform_scaling(&self.scale);
        translation * self.orientation * scaling
    }

    /// `Scale(1 / scale) * orientation⁻¹ * Translation(-origin)`
    pub fn world_to_model_matrix(&self) -> Matrix4<T> {
        let translation = Matrix4::new_translation(&-self.origin);
        let scaling = Matrix4::new_nonuniform_scaling(&ones3::<T>().component_div(&self.scale));
        scaling * self.inverse_orientation() * translation
    }

    /// Orthonormal basis from two hint directions.
    ///
    /// x follows `horizontal`, z is normal to the plane of both hints and y
    /// completes the right-handed set. Collinear hints give NaN axes.
    pub fn make_from_origin_horizontal_vertical(
        &mut self,
        origin: &Vector3<T>,
        horizontal: &Vector3<T>,
        vertical: &Vector3<T>,
    ) -> &mut Self {
        let z = horizontal.cross(vertical);
        let y = z.cross(horizontal);
        self.make_from_axes(origin, horizontal, &y, &z, true)
    }

    /// Same as [`make_from_origin_horizontal_vertical`](Self::make_from_origin_horizontal_vertical)
    /// with the hints given as positions the axes should pass through
    pub fn make_from_origin_horizontal_vertical_positions(
        &mut self,
        origin: &Vector3<T>,
        horizontal_pos: &Vector3<T>,
        vertical_pos: &Vector3<T>,
    ) -> &mut Self {
        let horizontal = horizontal_pos - origin;
        let vertical = vertical_pos - origin;
        self.make_from_origin_horizontal_vertical(origin, &horizontal, &vertical)
    }

    fn has_orthonormal_axes(&self) -> bool {
        let basis = self.orientation.fixed_view::<3, 3>(0, 0);
        let tolerance = nalgebra::convert::<f64, T>(1000.0) * T::default_epsilon();
        (basis.transpose() * basis - Matrix3::identity()).norm() <= tolerance
    }

    /// Assign the basis directly.
    ///
    /// Orthogonality is not enforced; for a skewed or non-unit basis call
    /// `set_orthonormal_basis(false)` so inversion stays correct.
    pub fn make_from_axes(
        &mut self,
        origin: &Vector3<T>,
        x: &Vector3<T>,
        y: &Vector3<T>,
        z: &Vector3<T>,
        normalize: bool,
    ) -> &mut Self {
        self.origin = *origin;
        for (index, axis) in [x, y, z].into_iter().enumerate() {
            let axis = if normalize { axis.normalize() } else { *axis };
            self.orientation.set_column(index, &to_vector4(&axis));
        }
        self
    }

    /// Camera frame at `eye` whose -z axis looks at `center`.
    ///
    /// `up` must not be parallel to the viewing direction.
    pub fn make_from_camera(
        &mut self,
        eye: &Vector3<T>,
        center: &Vector3<T>,
        up: &Vector3<T>,
    ) -> &mut Self {
        let z = eye - center;
        let x = up.cross(&z);
        let y = z.cross(&x);
        self.make_from_axes(eye, &x, &y, &z, true)
    }
}

impl<T: RealField + Copy> Default for AffineFrame<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn skewed_frame() -> AffineFrame<f64> {
        let mut frame = AffineFrame::new();
        frame
            .make_from_axes(
                &Vector3::new(1.0, -2.0, 3.0),
                &Vector3::new(2.0, 0.5, 0.0),
                &Vector3::new(0.3, 1.5, -0.2),
                &Vector3::new(0.1, 0.4, 3.0),
                false,
            )
            .set_orthonormal_basis(false)
            .scale_by(&Vector3::new(0.5, 2.0, 4.0));
        frame
    }

    #[test]
    fn test_default_is_identity() {
        let frame = AffineFrame::<f64>::default();
        assert_eq!(*frame.orientation(), Matrix4::identity());
        assert_eq!(*frame.scale(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(*frame.origin(), Vector3::zeros());
        assert!(frame.is_orthonormal_basis());
        assert_eq!(frame.model_to_world_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_rotate_quarter_turn_about_own_z() {
        let mut frame = AffineFrame::<f64>::new();
        frame.rotate(FRAC_PI_2, &Vector3::z());
        let world = frame.model_to_world(&Vector3::x());
        assert_relative_eq!(world, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_translate_uses_own_axes_and_scale() {
        let mut frame = AffineFrame::<f64>::new();
        frame
            .rotate(FRAC_PI_2, &Vector3::z())
            .scale_by(&Vector3::new(2.0, 3.0, 1.0))
            .translate(&Vector3::new(1.0, 0.0, 0.0));
        // local x now points along world y with length 2
        assert_relative_eq!(*frame.origin(), Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);

        frame.translate_absolute(&Vector3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(*frame.origin(), Vector3::new(1.0, 3.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_axis_is_scaled_before_mapping() {
        // With scale (1, 2, 1) the local axis (1, 1, 0) is the world
        // direction (1, 2, 0), not (1, 1, 0).
        let mut frame = AffineFrame::<f64>::new();
        frame
            .scale_by(&Vector3::new(1.0, 2.0, 1.0))
            .rotate(0.8, &Vector3::new(1.0, 1.0, 0.0));

        let mut expected = AffineFrame::<f64>::new();
        expected
            .scale_by(&Vector3::new(1.0, 2.0, 1.0))
            .rotate_absolute(0.8, &Vector3::new(1.0, 2.0, 0.0));

        assert_relative_eq!(*frame.orientation(), *expected.orientation(), epsilon = 1e-12);
    }

    #[test]
    fn test_scale_by_and_absolute() {
        let mut frame = AffineFrame::<f64>::new();
        frame.scale_by(&Vector3::new(2.0, 3.0, 4.0)).scale_by(&Vector3::new(0.5, 2.0, 1.0));
        assert_eq!(*frame.scale(), Vector3::new(1.0, 6.0, 4.0));
        frame.scale_absolute(&Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(*frame.scale(), Vector3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut frame = AffineFrame::<f64>::new();
        frame
            .translate(&Vector3::new(1.0, 2.0, 3.0))
            .rotate(1.0, &Vector3::x())
            .scale_by(&Vector3::new(2.0, 2.0, 2.0))
            .reset();
        assert_eq!(frame, AffineFrame::new());
    }

    #[test]
    fn test_round_trip_and_matrices() {
        let mut frame = AffineFrame::<f64>::new();
        frame
            .translate(&Vector3::new(3.0, -1.0, 7.0))
            .rotate(0.4, &Vector3::new(1.0, 2.0, 3.0))
            .rotate_absolute(-1.3, &Vector3::new(0.0, 1.0, -1.0))
            .scale_by(&Vector3::new(0.5, 4.0, -2.0));

        let p = Vector3::new(12.5, -3.25, 0.75);
        let world = frame.model_to_world(&p);
        assert_relative_eq!(frame.world_to_model(&world), p, epsilon = 1e-10);
        assert_relative_eq!(
            transform_point(&frame.model_to_world_matrix(), &p),
            world,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            transform_point(&frame.world_to_model_matrix(), &world),
            p,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            frame.model_to_world_matrix() * frame.world_to_model_matrix(),
            Matrix4::identity(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_skewed_basis_needs_general_inverse() {
        let frame = skewed_frame();
        let p = Vector3::new(-4.0, 0.25, 9.0);
        let world = frame.model_to_world(&p);
        assert_relative_eq!(frame.world_to_model(&world), p, epsilon = 1e-10);
        assert_relative_eq!(
            transform_point(&frame.world_to_model_matrix(), &world),
            p,
            epsilon = 1e-10
        );

        let mut transposed = frame;
        transposed.set_orthonormal_basis(true);
        assert!((transposed.world_to_model(&world) - p).norm() > 1e-3);
    }

    #[test]
    fn test_singular_skewed_basis_propagates_nan() {
        let mut frame = AffineFrame::<f64>::new();
        frame
            .make_from_axes(
                &Vector3::zeros(),
                &Vector3::x(),
                &Vector3::x(),
                &Vector3::z(),
                false,
            )
            .set_orthonormal_basis(false);
        assert!(frame.world_to_model(&Vector3::new(1.0, 1.0, 1.0)).x.is_nan());
    }

    #[test]
    fn test_clone_keeps_orthonormal_flag() {
        let frame = skewed_frame();
        let copy = frame.clone();
        assert!(!copy.is_orthonormal_basis());
        assert_eq!(copy, frame);
    }

    #[test]
    fn test_make_from_origin_horizontal_vertical() {
        let mut frame = AffineFrame::<f64>::new();
        frame.make_from_origin_horizontal_vertical(
            &Vector3::new(1.0, 1.0, 1.0),
            &Vector3::new(2.0, 0.0, 0.0),
            &Vector3::new(1.0, 5.0, 0.0),
        );
        assert_relative_eq!(frame.axis(0), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(frame.axis(1), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.axis(2), Vector3::z(), epsilon = 1e-12);
        assert_eq!(
            frame.orientation().row(3).into_owned(),
            nalgebra::RowVector4::new(0.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_horizontal_vertical_positions_match_directions() {
        let origin = Vector3::new(2.0, -1.0, 0.5);
        let h = Vector3::new(1.0, 1.0, 0.0);
        let v = Vector3::new(-0.5, 2.0, 1.0);

        let from_dirs = AffineFrame::from_origin_horizontal_vertical(&origin, &h, &v);
        let mut from_positions = AffineFrame::new();
        from_positions.make_from_origin_horizontal_vertical_positions(&origin, &(origin + h), &(origin + v));

        assert_relative_eq!(*from_positions.orientation(), *from_dirs.orientation(), epsilon = 1e-12);
        assert_eq!(*from_positions.origin(), origin);
        // right-handed and orthonormal
        assert_relative_eq!(from_dirs.axis(0).cross(&from_dirs.axis(1)), from_dirs.axis(2), epsilon = 1e-12);
    }

    #[test]
    fn test_from_axes_keeps_lengths_without_normalizing() {
        let frame = AffineFrame::from_axes(
            &Vector3::zeros(),
            &Vector3::new(3.0, 0.0, 0.0),
            &Vector3::new(0.0, 2.0, 1.0),
            &Vector3::new(0.0, 0.0, 5.0),
            false,
        );
        assert!(!frame.is_orthonormal_basis());
        assert_relative_eq!(frame.axis(0).norm(), 3.0);
        assert_relative_eq!(frame.axis(2).norm(), 5.0);
    }

    #[test]
    fn test_from_axes_flags_only_orthonormal_bases() {
        let rotated = AffineFrame::from_axes(
            &Vector3::zeros(),
            &Vector3::new(1.0, 1.0, 0.0),
            &Vector3::new(-1.0, 1.0, 0.0),
            &Vector3::z(),
            true,
        );
        assert!(rotated.is_orthonormal_basis());

        // unit length after normalizing, but x and y are 45 degrees apart
        let frame = AffineFrame::from_axes(
            &Vector3::zeros(),
            &Vector3::x(),
            &Vector3::new(1.0, 1.0, 0.0),
            &Vector3::z(),
            true,
        );
        assert!(!frame.is_orthonormal_basis());
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(frame.world_to_model(&frame.model_to_world(&p)), p, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_hints_give_nan() {
        let frame = AffineFrame::<f64>::from_origin_horizontal_vertical(
            &Vector3::zeros(),
            &Vector3::x(),
            &Vector3::new(2.0, 0.0, 0.0),
        );
        assert!(frame.axis(2).iter().all(|c| c.is_nan()));
    }

    #[test]
    fn test_up_parallel_to_view_gives_nan() {
        let frame = AffineFrame::<f64>::from_camera(
            &Vector3::new(0.0, 0.0, 5.0),
            &Vector3::zeros(),
            &Vector3::z(),
        );
        assert!(frame.axis(0).iter().all(|c| c.is_nan()));
    }

    #[test]
    fn test_camera_frame_looks_down_negative_z() {
        let eye = Vector3::new(0.0, 0.0, 5.0);
        let frame = AffineFrame::from_camera(&eye, &Vector3::zeros(), &Vector3::y());
        assert_relative_eq!(frame.axis(0), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(frame.axis(1), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.axis(2), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(frame.world_to_model(&Vector3::zeros()), Vector3::new(0.0, 0.0, -5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_f32_frame_matches_f64() {
        let mut frame32 = AffineFrame::<f32>::new();
        frame32
            .translate(&Vector3::new(1.0, 2.0, 3.0))
            .rotate(0.3, &Vector3::new(0.0, 1.0, 1.0))
            .scale_by(&Vector3::new(2.0, 0.5, 1.5));
        let mut frame64 = AffineFrame::<f64>::new();
        frame64
            .translate(&Vector3::new(1.0, 2.0, 3.0))
            .rotate(0.3, &Vector3::new(0.0, 1.0, 1.0))
            .scale_by(&Vector3::new(2.0, 0.5, 1.5));

        let p32 = frame32.model_to_world(&Vector3::new(1.0, -1.0, 2.0));
        let p64 = frame64.model_to_world(&Vector3::new(1.0, -1.0, 2.0));
        assert_relative_eq!(p32, p64.cast::<f32>(), epsilon = 1e-5);
    }
}
