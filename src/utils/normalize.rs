use crate::math::{Real, Vector, DEFAULT_EPSILON};

/// Normalizes `v` in-place, unless its norm is smaller than or equal to [`DEFAULT_EPSILON`].
///
/// A degenerate vector is left untouched instead of being divided by a near-zero norm. This
/// is the behavior expected by normal accumulation: a vertex without any well-formed incident
/// triangle simply keeps a zero normal.
///
/// Returns the norm of `v` before normalization.
#[inline]
pub fn normalize_or_keep(v: &mut Vector<Real>) -> Real {
    let norm = v.norm();

    if norm > DEFAULT_EPSILON {
        *v /= norm;
    }

    norm
}

/// Returns a normalized copy of `v`, or `v` itself if its norm is smaller than or equal to
/// [`DEFAULT_EPSILON`].
#[inline]
#[must_use]
pub fn normalized_or_keep(mut v: Vector<Real>) -> Vector<Real> {
    let _ = normalize_or_keep(&mut v);
    v
}
