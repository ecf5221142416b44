// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad cascade processing (transposed direct form II).
//!
//! Coefficients are stored flat, five per second-order section:
//! `[b0, b1, b2, a1, a2]`, with `a1` and `a2` **pre-negated** relative to
//! the textbook denominator so the recurrence is purely additive:
//!
//! ```text
//!   y    = b0 * x + d[0]
//!   d[0] = b1 * x + a1 * y + d[1]
//!   d[1] = b2 * x + a2 * y
//! ```
//!
//! Each section owns two delay elements in the `state` slice; sections are
//! evaluated in order, each feeding its output to the next. Sample order
//! and section order are both part of the numeric contract: the delay
//! state carries the recursion history across calls, so consecutive calls
//! continue the signal rather than restarting it.
//!
//! The kernels perform no normalization, clipping, or non-finite
//! handling; instability from ill-conditioned coefficients propagates
//! arithmetically. See [`crate::float`] for explicit sanitization.

/// Coefficients per second-order section: `[b0, b1, b2, a1, a2]`.
pub const SOS_COEFFS_PER_STAGE: usize = 5;

/// Delay elements per second-order section.
pub const SOS_STATE_PER_STAGE: usize = 2;

/// Process `src` into `dst` through a cascade of second-order sections
/// (single precision).
///
/// `coeffs` holds [`SOS_COEFFS_PER_STAGE`] values per section with the
/// pre-negated `a` convention; `state` must hold [`SOS_STATE_PER_STAGE`]
/// delay elements per section and is mutated to the tail of the processed
/// sequence. Processes `min(dst.len(), src.len())` samples. An empty
/// coefficient slice passes the signal through unchanged.
pub fn sos_df2t_f32(dst: &mut [f32], src: &[f32], coeffs: &[f32], state: &mut [f32]) {
    debug_assert_eq!(coeffs.len() % SOS_COEFFS_PER_STAGE, 0);
    debug_assert!(
        state.len() >= (coeffs.len() / SOS_COEFFS_PER_STAGE) * SOS_STATE_PER_STAGE,
        "state slice too short for section count"
    );

    for (out, &inp) in dst.iter_mut().zip(src.iter()) {
        let mut s = inp;
        for (c, d) in coeffs
            .chunks_exact(SOS_COEFFS_PER_STAGE)
            .zip(state.chunks_exact_mut(SOS_STATE_PER_STAGE))
        {
            let s2 = c[0] * s + d[0];
            let p1 = c[1] * s + c[3] * s2;
            let p2 = c[2] * s + c[4] * s2;
            d[0] = d[1] + p1;
            d[1] = p2;
            s = s2;
        }
        *out = s;
    }
}

/// In-place variant of [`sos_df2t_f32`].
///
/// Produces bit-identical results to the out-of-place kernel: every
/// sample is fully consumed before its slot is overwritten, and all
/// recursion memory lives in `state`, not in the buffer.
pub fn sos_df2t_inplace_f32(buf: &mut [f32], coeffs: &[f32], state: &mut [f32]) {
    debug_assert_eq!(coeffs.len() % SOS_COEFFS_PER_STAGE, 0);
    debug_assert!(
        state.len() >= (coeffs.len() / SOS_COEFFS_PER_STAGE) * SOS_STATE_PER_STAGE,
        "state slice too short for section count"
    );

    for sample in buf.iter_mut() {
        let mut s = *sample;
        for (c, d) in coeffs
            .chunks_exact(SOS_COEFFS_PER_STAGE)
            .zip(state.chunks_exact_mut(SOS_STATE_PER_STAGE))
        {
            let s2 = c[0] * s + d[0];
            let p1 = c[1] * s + c[3] * s2;
            let p2 = c[2] * s + c[4] * s2;
            d[0] = d[1] + p1;
            d[1] = p2;
            s = s2;
        }
        *sample = s;
    }
}

/// Process `src` into `dst` through a cascade of second-order sections
/// (double precision).
///
/// Mirror of [`sos_df2t_f32`]; same layout, same recursion, same
/// contracts.
pub fn sos_df2t_f64(dst: &mut [f64], src: &[f64], coeffs: &[f64], state: &mut [f64]) {
    debug_assert_eq!(coeffs.len() % SOS_COEFFS_PER_STAGE, 0);
    debug_assert!(
        state.len() >= (coeffs.len() / SOS_COEFFS_PER_STAGE) * SOS_STATE_PER_STAGE,
        "state slice too short for section count"
    );

    for (out, &inp) in dst.iter_mut().zip(src.iter()) {
        let mut s = inp;
        for (c, d) in coeffs
            .chunks_exact(SOS_COEFFS_PER_STAGE)
            .zip(state.chunks_exact_mut(SOS_STATE_PER_STAGE))
        {
            let s2 = c[0] * s + d[0];
            let p1 = c[1] * s + c[3] * s2;
            let p2 = c[2] * s + c[4] * s2;
            d[0] = d[1] + p1;
            d[1] = p2;
            s = s2;
        }
        *out = s;
    }
}

/// In-place variant of [`sos_df2t_f64`].
pub fn sos_df2t_inplace_f64(buf: &mut [f64], coeffs: &[f64], state: &mut [f64]) {
    debug_assert_eq!(coeffs.len() % SOS_COEFFS_PER_STAGE, 0);
    debug_assert!(
        state.len() >= (coeffs.len() / SOS_COEFFS_PER_STAGE) * SOS_STATE_PER_STAGE,
        "state slice too short for section count"
    );

    for sample in buf.iter_mut() {
        let mut s = *sample;
        for (c, d) in coeffs
            .chunks_exact(SOS_COEFFS_PER_STAGE)
            .zip(state.chunks_exact_mut(SOS_STATE_PER_STAGE))
        {
            let s2 = c[0] * s + d[0];
            let p1 = c[1] * s + c[3] * s2;
            let p2 = c[2] * s + c[4] * s2;
            d[0] = d[1] + p1;
            d[1] = p2;
            s = s2;
        }
        *sample = s;
    }
}
