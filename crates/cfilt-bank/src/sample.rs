// SPDX-License-Identifier: LGPL-3.0-or-later

//! Precision seam between the stateful filter types and the kernels.
//!
//! The single- and double-precision subsystems are mirror instantiations
//! of the same generic code; this trait is the only point where they
//! diverge, dispatching to the matching `cfilt-dsp` kernel.

use cfilt_dsp::cascade;

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Sample types the filter bank operates on. Sealed; implemented for
/// `f32` and `f64` only.
pub trait Sample:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + core::ops::Neg<Output = Self>
    + core::fmt::Debug
    + private::Sealed
    + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// Widen to f64 (response evaluation is always done in f64).
    fn to_f64(self) -> f64;

    /// Run the DF2T cascade kernel out of place.
    fn cascade(dst: &mut [Self], src: &[Self], coeffs: &[Self], state: &mut [Self]);

    /// Run the DF2T cascade kernel in place.
    fn cascade_inplace(buf: &mut [Self], coeffs: &[Self], state: &mut [Self]);
}

impl Sample for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn cascade(dst: &mut [Self], src: &[Self], coeffs: &[Self], state: &mut [Self]) {
        cascade::sos_df2t_f32(dst, src, coeffs, state);
    }

    #[inline]
    fn cascade_inplace(buf: &mut [Self], coeffs: &[Self], state: &mut [Self]) {
        cascade::sos_df2t_inplace_f32(buf, coeffs, state);
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn cascade(dst: &mut [Self], src: &[Self], coeffs: &[Self], state: &mut [Self]) {
        cascade::sos_df2t_f64(dst, src, coeffs, state);
    }

    #[inline]
    fn cascade_inplace(buf: &mut [Self], coeffs: &[Self], state: &mut [Self]) {
        cascade::sos_df2t_inplace_f64(buf, coeffs, state);
    }
}
