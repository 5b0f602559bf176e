//! Numeric helpers for `f64` payloads.
//!
//! `0.0` and `-0.0` compare equal and hash equally. NaN compares equal only to
//! a NaN with the same bit pattern, which keeps `Eq` reflexive.

use std::hash::{Hash, Hasher};

#[inline]
pub(crate) fn float_eq(a: f64, b: f64) -> bool {
    a == b || a.to_bits() == b.to_bits()
}

#[inline]
pub(crate) fn hash_float<H: Hasher>(f: f64, h: &mut H) {
    if f == 0.0f64 {
        0.0f64.to_bits().hash(h);
    } else {
        f.to_bits().hash(h);
    }
}

/// The `i64` a float stands for exactly, if any. `-0.0` maps to `0`.
#[inline]
pub(crate) fn exact_i64(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && f >= -LIMIT && f < LIMIT).then(|| f as i64)
}
