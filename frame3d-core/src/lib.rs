//! frame3d core library - affine frames and the matrices built from them
//!
//! This library provides the stateless math behind a 3D renderer: nested
//! coordinate frames with forward/inverse transforms, camera and projection
//! matrices derived from those frames, and tangent-space bases for normal
//! mapping. Everything is generic over the float type (`f32` or `f64`).
//!
//! Numeric degeneracies (zero scale, collinear axes, singular texture
//! deltas) propagate as NaN/Inf; only the `try_*` helpers report them as
//! [`DegenerateInputError`].

pub mod error;
pub mod frame;
pub mod geometry;
pub mod homogeneous;
pub mod interp;
pub mod projection;
pub mod tangent;

// Re-export commonly used types
pub use error::DegenerateInputError;
pub use frame::AffineFrame;
pub use geometry::{Mesh, Triangle, Vertex};
pub use projection::{
    frustum, look_at, ortho, perspective, Camera, ProjectionMode,
};
pub use tangent::{tangent_bitangent, tangent_bitangent_by_hand, tangent_bitangent_normal};
