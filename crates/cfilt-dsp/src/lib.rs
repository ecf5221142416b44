// SPDX-License-Identifier: LGPL-3.0-or-later

//! # cfilt-dsp
//!
//! Low-level DSP kernels for the `cfilt` filter bank:
//!
//! - **Cascade**: transposed direct form II biquad cascade evaluation
//!   over flat coefficient/state slices, in single and double precision,
//!   out-of-place and in-place
//! - **Float utilities**: denormal/NaN/Inf flushing per precision
//!
//! ## Design
//!
//! The cascade kernels are plain scalar loops. The DF2T recursion carries
//! its delay state from one sample to the next, so the loop cannot be
//! vectorized across samples, and fused multiply-add contraction would
//! change the bit-exact output. All state lives in caller-owned slices;
//! nothing in this crate allocates or holds state between calls.

pub mod cascade;
pub mod float;
