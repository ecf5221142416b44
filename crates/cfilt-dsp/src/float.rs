// SPDX-License-Identifier: LGPL-3.0-or-later

//! Floating-point sanitization utilities.
//!
//! The cascade kernels propagate NaN, infinity, and denormals untouched
//! (an unstable coefficient set produces arithmetically what it produces).
//! Callers that want a clean signal path apply these helpers between
//! blocks instead.

/// Sanitize a single f32: flush denormals, NaN, and infinity to zero.
#[inline]
pub fn sanitize_f32(x: f32) -> f32 {
    if x.is_finite() && x.abs() >= f32::MIN_POSITIVE {
        x
    } else {
        0.0
    }
}

/// Sanitize an f32 buffer in place.
pub fn sanitize_buf_f32(buf: &mut [f32]) {
    for sample in buf.iter_mut() {
        *sample = sanitize_f32(*sample);
    }
}

/// Sanitize a single f64: flush denormals, NaN, and infinity to zero.
#[inline]
pub fn sanitize_f64(x: f64) -> f64 {
    if x.is_finite() && x.abs() >= f64::MIN_POSITIVE {
        x
    } else {
        0.0
    }
}

/// Sanitize an f64 buffer in place.
pub fn sanitize_buf_f64(buf: &mut [f64]) {
    for sample in buf.iter_mut() {
        *sample = sanitize_f64(*sample);
    }
}
