//! Guarded vector operations.
//!
//! The solver divides by edge lengths in several places. These helpers
//! return well-defined results when a length collapses towards zero
//! instead of letting NaN or infinity leak into particle state.

use glam::Vec3;
use ribbon_types::constants::EPSILON;

/// Vector projection of `v` onto the axis `onto`.
///
/// Returns zero when `onto` is degenerate.
#[inline]
pub fn project(v: Vec3, onto: Vec3) -> Vec3 {
    let len_sq = onto.length_squared();
    if len_sq < EPSILON * EPSILON {
        return Vec3::ZERO;
    }
    onto * (v.dot(onto) / len_sq)
}

/// Unit vector along `v`, or `fallback` when `v` has no direction.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len < EPSILON {
        fallback
    } else {
        v / len
    }
}

/// Length of `v`, or `None` when it is too short to divide by.
#[inline]
pub fn safe_length(v: Vec3) -> Option<f32> {
    let len = v.length();
    if len.is_finite() && len >= EPSILON {
        Some(len)
    } else {
        None
    }
}
