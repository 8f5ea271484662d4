//! Error surfaced by the checked wrappers around the numeric kernel

use thiserror::Error;

/// Input the numeric kernel cannot produce a finite answer for.
///
/// The kernel itself propagates NaN/Inf; only the `try_*` entry points and
/// mesh-level helpers turn that into this error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateInputError {
    #[error("texture-space edge matrix is singular (zero-area UV triangle)")]
    SingularTextureSpace,
    #[error("computed basis has non-finite components")]
    NonFinite,
}
