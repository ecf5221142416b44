// SPDX-License-Identifier: LGPL-3.0-or-later

//! Error types for coefficient loading and registry operations.
//!
//! Every condition is detected synchronously, before any filter slot is
//! mutated: a failed call never leaves a filter partially written and
//! never consumes a handle.

use thiserror::Error;

/// Result type for filter bank operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors reported by coefficient loading and the filter registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterError {
    /// SOS matrix does not have exactly 6 columns.
    #[error("SOS matrix must have 6 columns [b0 b1 b2 a0 a1 a2], got {0}")]
    Columns(usize),

    /// Section count outside the supported `1..=16` range.
    #[error("cascade must have between 1 and 16 sections, got {0}")]
    Stages(usize),

    /// Flat matrix data does not divide into whole rows.
    #[error("matrix data length {len} is not a multiple of {cols} columns")]
    Ragged { len: usize, cols: usize },

    /// Registry has no free handles left. Handles are never released;
    /// this is a hard limit, not a transient condition.
    #[error("filter registry is full ({capacity} filters)")]
    CapacityExceeded { capacity: usize },

    /// Handle does not name an allocated filter slot.
    #[error("invalid filter handle {handle} ({allocated} allocated)")]
    InvalidHandle { handle: usize, allocated: usize },
}
