//! Linear remapping between scalar ranges

use nalgebra::RealField;

/// Where `p` sits between `p0` (0) and `p1` (1); unclamped
pub fn mix_ratio<T: RealField + Copy>(p0: T, p1: T, p: T) -> T {
    (p - p0) / (p1 - p0)
}

/// Map `p` from the range `[p0, p1]` onto `[q0, q1]`
pub fn mix<T: RealField + Copy>(q0: T, q1: T, p0: T, p1: T, p: T) -> T {
    q0 + (q1 - q0) * mix_ratio(p0, p1, p)
}
