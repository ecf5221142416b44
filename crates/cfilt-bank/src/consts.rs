// SPDX-License-Identifier: LGPL-3.0-or-later

//! Capacity and layout constants.

use cfilt_dsp::cascade::{SOS_COEFFS_PER_STAGE, SOS_STATE_PER_STAGE};

/// Maximum number of second-order sections in one filter cascade.
pub const MAX_FILTER_ORDER: usize = 16;

/// Columns of an SOS coefficient matrix: `[b0, b1, b2, a0, a1, a2]`.
pub const SOS_COLUMNS: usize = 6;

/// Default registry capacity (number of filter handles).
pub const DEFAULT_MAX_FILTERS: usize = 500;

/// Coefficient storage capacity of one filter (80).
pub const MAX_COEFFS: usize = MAX_FILTER_ORDER * SOS_COEFFS_PER_STAGE;

/// Delay-state storage capacity of one filter (32).
pub const MAX_STATE: usize = MAX_FILTER_ORDER * SOS_STATE_PER_STAGE;
