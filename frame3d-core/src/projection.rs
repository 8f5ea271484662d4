//! Camera and projection matrices built from affine frames

use nalgebra::{Matrix4, Point3, RealField, Vector3};

use crate::frame::AffineFrame;
use crate::homogeneous::{from_homogeneous, to_point4};

fn two<T: RealField + Copy>() -> T {
    T::one() + T::one()
}

/// View matrix for a camera at `eye` looking at `center`.
///
/// Camera space has x to the right, y up and z toward the viewer, matching
/// the usual right-handed look-at.
pub fn look_at<T: RealField + Copy>(
    eye: &Vector3<T>,
    center: &Vector3<T>,
    up: &Vector3<T>,
) -> Matrix4<T> {
    AffineFrame::from_camera(eye, center, up).world_to_model_matrix()
}

/// Orthographic projection mapping the view box onto the [-1, 1] cube.
///
/// The box is described as a frame centred on it whose unit lengths are its
/// half extents; the z unit is `(near - far) / 2`, which flips z so the near
/// plane lands on -1.
pub fn ortho<T: RealField + Copy>(
    left: T,
    right: T,
    bottom: T,
    top: T,
    z_near: T,
    z_far: T,
) -> Matrix4<T> {
    let mut frame = AffineFrame::new();
    frame
        .translate(&Vector3::new(
            (left + right) / two(),
            (bottom + top) / two(),
            -(z_near + z_far) / two(),
        ))
        .scale_by(&Vector3::new(
            (right - left) / two(),
            (top - bottom) / two(),
            (z_near - z_far) / two(),
        ));
    frame.world_to_model_matrix()
}

/// Like [`ortho`] with near/far given as signed z coordinates
/// (negative in front of the camera).
pub fn ortho_neg_z<T: RealField + Copy>(
    left: T,
    right: T,
    bottom: T,
    top: T,
    z_near: T,
    z_far: T,
) -> Matrix4<T> {
    let mut frame = AffineFrame::new();
    frame
        .translate(&Vector3::new(
            (left + right) / two(),
            (bottom + top) / two(),
            (z_near + z_far) / two(),
        ))
        .scale_by(&Vector3::new(
            (right - left) / two(),
            (top - bottom) / two(),
            (z_far - z_near) / two(),
        ));
    frame.world_to_model_matrix()
}

/// Squash the perspective frustum into the axis-aligned box between the
/// near and far planes (after the homogeneous divide).
pub fn frustum_to_cuboid<T: RealField + Copy>(z_near: T, z_far: T) -> Matrix4<T> {
    let a = z_near + z_far;
    let b = -z_near * z_far;
    let (o, l) = (T::zero(), T::one());
    Matrix4::new(
        z_near, o, o, o,
        o, z_near, o, o,
        o, o, a, -b,
        o, o, -l, o,
    )
}

/// Perspective projection of the frustum with the given near-plane window
pub fn frustum<T: RealField + Copy>(
    left: T,
    right: T,
    bottom: T,
    top: T,
    z_near: T,
    z_far: T,
) -> Matrix4<T> {
    ortho(left, right, bottom, top, z_near, z_far) * frustum_to_cuboid(z_near, z_far)
}

/// Like [`frustum`] with signed z planes.
///
/// Describes the same projective map as `frustum(.., -z_near, -z_far)` with
/// the opposite homogeneous sign.
pub fn frustum_neg_z<T: RealField + Copy>(
    left: T,
    right: T,
    bottom: T,
    top: T,
    z_near: T,
    z_far: T,
) -> Matrix4<T> {
    let (o, l) = (T::zero(), T::one());
    let to_cuboid = Matrix4::new(
        z_near, o, o, o,
        o, z_near, o, o,
        o, o, z_near + z_far, -z_near * z_far,
        o, o, l, o,
    );
    ortho_neg_z(left, right, bottom, top, z_near, z_far) * to_cuboid
}

/// Symmetric perspective projection; `fov_y` is the full vertical angle in radians
pub fn perspective<T: RealField + Copy>(fov_y: T, aspect: T, z_near: T, z_far: T) -> Matrix4<T> {
    let height = z_near * (fov_y / two()).tan();
    let width = height * aspect;
    frustum(-width, width, -height, height, z_near, z_far)
}

pub fn perspective_neg_z<T: RealField + Copy>(
    fov_y: T,
    aspect: T,
    z_near: T,
    z_far: T,
) -> Matrix4<T> {
    let height = -z_near * (fov_y / two()).tan();
    let width = height * aspect;
    frustum_neg_z(-width, width, -height, height, z_near, z_far)
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
        }
    }
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera<T: RealField + Copy> {
    pub position: Point3<T>,
    pub target: Point3<T>,
    pub up: Vector3<T>,
    pub fov: T,
    pub aspect: T,
    pub near: T,
    pub far: T,
    pub mode: ProjectionMode,
}

impl<T: RealField + Copy> Camera<T> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(T::zero(), T::zero(), nalgebra::convert::<f64, T>(5.0)),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: T::frac_pi_4(), // 45 degrees
            aspect: nalgebra::convert::<f64, T>(width as f64 / height.max(1) as f64),
            near: nalgebra::convert::<f64, T>(0.1),
            far: nalgebra::convert::<f64, T>(100.0),
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<T> {
        look_at(&self.position.coords, &self.target.coords, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<T> {
        match self.mode {
            ProjectionMode::Perspective => perspective(self.fov, self.aspect, self.near, self.far),
            ProjectionMode::Orthographic => {
                // Frame the same height the perspective view shows at the target.
                let distance = (self.position - self.target).norm();
                let half_height = distance * (self.fov / two()).tan();
                let half_width = half_height * self.aspect;
                log::trace!(
                    "orthographic window {:?} x {:?} at distance {:?}",
                    half_width,
                    half_height,
                    distance
                );
                ortho(-half_width, half_width, -half_height, half_height, self.near, self.far)
            }
        }
    }

    pub fn view_projection(&self) -> Matrix4<T> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth the normalized device z in
    /// [-1, 1], or `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<T>,
        model_matrix: &Matrix4<T>,
        width: u32,
        height: u32,
    ) -> Option<(T, T, T)> {
        let mvp = self.view_projection() * model_matrix;
        let clip = mvp * to_point4(&point.coords);

        // Points on the camera plane have no projection.
        let min_w: T = nalgebra::convert::<f64, T>(1e-6);
        if clip.w.abs() < min_w {
            return None;
        }

        let ndc = from_homogeneous(&clip);
        let one = T::one();
        if ndc.iter().any(|c| *c < -one || *c > one) {
            return None;
        }

        let half = one / two();
        let screen_x = (ndc.x + one) * half * nalgebra::convert::<f64, T>(width as f64);
        let screen_y = (one - ndc.y) * half * nalgebra::convert::<f64, T>(height as f64);

        Some((screen_x, screen_y, ndc.z))
    }
}

impl<T: RealField + Copy> Default for Camera<T> {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
