// SPDX-License-Identifier: LGPL-3.0-or-later

//! SOS coefficient loading and the per-filter cascade state.
//!
//! Filters are configured from `scipy.signal`-style second-order-section
//! matrices: one row per section, columns `[b0, b1, b2, a0, a1, a2]`.
//! Internally each section stores five values, `[b0, b1, b2, a1', a2']`
//! with `a1' = -a1` and `a2' = -a2`, the additive convention the DF2T
//! kernels in `cfilt-dsp` require. The leading `a0` is read and discarded:
//! callers normalize `a0 = 1` themselves, no rescaling happens here.

use std::f64::consts::PI;

use cfilt_dsp::cascade::{SOS_COEFFS_PER_STAGE, SOS_STATE_PER_STAGE};

use crate::consts::{MAX_COEFFS, MAX_FILTER_ORDER, MAX_STATE, SOS_COLUMNS};
use crate::error::{FilterError, FilterResult};
use crate::sample::Sample;

/// Borrowed row-major view of an SOS coefficient matrix.
///
/// Construction only checks that the flat data divides into whole rows;
/// the 6-column requirement and the section-count bounds are enforced by
/// [`SosFilter::configure`], so that a wrong shape surfaces as a distinct
/// error from ragged data.
#[derive(Debug, Clone, Copy)]
pub struct SosMatrix<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
}

impl<'a, T: Sample> SosMatrix<'a, T> {
    /// Create a view over `data` with `cols` values per row.
    pub fn new(data: &'a [T], cols: usize) -> FilterResult<Self> {
        if cols == 0 || data.len() % cols != 0 {
            return Err(FilterError::Ragged {
                len: data.len(),
                cols,
            });
        }
        Ok(Self {
            data,
            rows: data.len() / cols,
            cols,
        })
    }

    /// Number of rows (second-order sections).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns per row.
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn row(&self, i: usize) -> &'a [T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// One IIR filter: a cascade of up to [`MAX_FILTER_ORDER`] second-order
/// sections with persistent delay state.
///
/// The delay state is the filter's memory: it is mutated by every
/// processed sample and carries across calls, so consecutive calls
/// continue the signal rather than restarting it. Reconfiguring always
/// zeroes the state — coefficients and state are never valid from two
/// different configurations at once.
///
/// A freshly created filter has zero sections and passes the signal
/// through unchanged.
///
/// # Examples
///
/// ```ignore
/// use cfilt_bank::sos::{SosFilter, SosMatrix};
///
/// // Single passthrough section: b0 = 1, everything else 0, a0 = 1.
/// let rows = [1.0f64, 0.0, 0.0, 1.0, 0.0, 0.0];
/// let mut filt = SosFilter::new();
/// filt.configure(SosMatrix::new(&rows, 6)?)?;
///
/// let src = [1.0, 2.0, 3.0];
/// let mut dst = [0.0; 3];
/// filt.process(&mut dst, &src);
/// assert_eq!(dst, src);
/// ```
#[derive(Debug, Clone)]
pub struct SosFilter<T: Sample> {
    num_stages: usize,
    coeffs: [T; MAX_COEFFS],
    state: [T; MAX_STATE],
}

impl<T: Sample> Default for SosFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> SosFilter<T> {
    /// Create an empty (zero-section, passthrough) filter.
    pub fn new() -> Self {
        Self {
            num_stages: 0,
            coeffs: [T::ZERO; MAX_COEFFS],
            state: [T::ZERO; MAX_STATE],
        }
    }

    /// Load coefficients from an SOS matrix and zero the delay state.
    ///
    /// Requires exactly [`SOS_COLUMNS`] columns and `1..=MAX_FILTER_ORDER`
    /// rows; validation happens before anything is written, so a failed
    /// call leaves the filter exactly as it was. Per row, `b0, b1, b2`
    /// are copied verbatim and `a1, a2` are negated into the additive
    /// DF2T convention.
    pub fn configure(&mut self, sos: SosMatrix<'_, T>) -> FilterResult<()> {
        if sos.cols() != SOS_COLUMNS {
            return Err(FilterError::Columns(sos.cols()));
        }
        if sos.rows() < 1 || sos.rows() > MAX_FILTER_ORDER {
            return Err(FilterError::Stages(sos.rows()));
        }

        for i in 0..sos.rows() {
            let row = sos.row(i);
            let c = &mut self.coeffs[i * SOS_COEFFS_PER_STAGE..][..SOS_COEFFS_PER_STAGE];
            c[0] = row[0];
            c[1] = row[1];
            c[2] = row[2];
            // row[3] is the leading a0, 1 by convention; skip it
            c[3] = -row[4];
            c[4] = -row[5];
        }
        self.num_stages = sos.rows();
        self.state = [T::ZERO; MAX_STATE];
        Ok(())
    }

    /// Number of second-order sections.
    pub fn num_stages(&self) -> usize {
        self.num_stages
    }

    /// Live coefficients, five per section: `[b0, b1, b2, a1', a2']`.
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs[..self.num_stages * SOS_COEFFS_PER_STAGE]
    }

    /// Clear the delay state without touching the coefficients.
    pub fn clear(&mut self) {
        self.state = [T::ZERO; MAX_STATE];
    }

    /// Process `src` into `dst` through the cascade.
    ///
    /// Processes `min(dst.len(), src.len())` samples; an empty input
    /// leaves the state untouched. Non-finite values propagate untouched
    /// (see `cfilt_dsp::float` for explicit sanitization).
    pub fn process(&mut self, dst: &mut [T], src: &[T]) {
        let nc = self.num_stages * SOS_COEFFS_PER_STAGE;
        let ns = self.num_stages * SOS_STATE_PER_STAGE;
        T::cascade(dst, src, &self.coeffs[..nc], &mut self.state[..ns]);
    }

    /// Process `buf` in place; bit-identical to [`process`](Self::process)
    /// with separate buffers, since all recursion memory lives in the
    /// filter, not in the sample buffer.
    pub fn process_inplace(&mut self, buf: &mut [T]) {
        let nc = self.num_stages * SOS_COEFFS_PER_STAGE;
        let ns = self.num_stages * SOS_STATE_PER_STAGE;
        T::cascade_inplace(buf, &self.coeffs[..nc], &mut self.state[..ns]);
    }

    /// Compute the frequency response at `freq` Hz for a signal sampled
    /// at `sample_rate` Hz.
    ///
    /// Returns `(magnitude, phase)` — magnitude linear, phase in radians —
    /// as the product over sections of
    /// `(b0 + b1 e^{-jw} + b2 e^{-j2w}) / (1 - a1' e^{-jw} - a2' e^{-j2w})`,
    /// evaluated in f64 for both precisions. A zero-section filter reports
    /// unity response.
    pub fn freq_response(&self, freq: f64, sample_rate: f64) -> (f64, f64) {
        let w = 2.0 * PI * freq / sample_rate;
        let cos_w = w.cos();
        let sin_w = w.sin();
        let cos_2w = (2.0 * w).cos();
        let sin_2w = (2.0 * w).sin();

        let mut h_re = 1.0f64;
        let mut h_im = 0.0f64;

        for c in self.coeffs().chunks_exact(SOS_COEFFS_PER_STAGE) {
            let (b0, b1, b2) = (c[0].to_f64(), c[1].to_f64(), c[2].to_f64());
            let (a1, a2) = (c[3].to_f64(), c[4].to_f64());

            let num_re = b0 + b1 * cos_w + b2 * cos_2w;
            let num_im = -b1 * sin_w - b2 * sin_2w;

            // Pre-negated convention: denominator is 1 - a1'*z^-1 - a2'*z^-2
            let den_re = 1.0 - a1 * cos_w - a2 * cos_2w;
            let den_im = a1 * sin_w + a2 * sin_2w;

            let den_sq = den_re * den_re + den_im * den_im;
            let s_re = (num_re * den_re + num_im * den_im) / den_sq;
            let s_im = (num_im * den_re - num_re * den_im) / den_sq;

            let re = h_re * s_re - h_im * s_im;
            let im = h_re * s_im + h_im * s_re;
            h_re = re;
            h_im = im;
        }

        ((h_re * h_re + h_im * h_im).sqrt(), h_im.atan2(h_re))
    }
}
