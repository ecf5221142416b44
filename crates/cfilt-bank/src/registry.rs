// SPDX-License-Identifier: LGPL-3.0-or-later

//! Handle-indexed filter registry.
//!
//! A bounded arena of [`SosFilter`] slots: handles are allocated in order
//! `0, 1, 2, ...` and never released. A slot lives until it is explicitly
//! reinitialized under the same handle or the registry is dropped. The
//! registry is an owned object — capacity is construction-time
//! configuration, and independent registries (for example one per
//! precision, or one per test) never interact.

use crate::consts::DEFAULT_MAX_FILTERS;
use crate::error::{FilterError, FilterResult};
use crate::sample::Sample;
use crate::sos::{SosFilter, SosMatrix};

/// Fixed-capacity table of [`SosFilter`]s indexed by integer handle.
///
/// # Examples
///
/// ```ignore
/// use cfilt_bank::registry::FilterRegistry64;
/// use cfilt_bank::sos::SosMatrix;
///
/// let mut reg = FilterRegistry64::default();
/// let rows = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]; // passthrough section
/// let h = reg.init(SosMatrix::new(&rows, 6)?, None)?;
///
/// let y = reg.apply(h, &[1.0, 2.0, 3.0])?;
/// assert_eq!(y, vec![1.0, 2.0, 3.0]);
/// ```
pub struct FilterRegistry<T: Sample> {
    slots: Vec<SosFilter<T>>,
    capacity: usize,
}

/// Single-precision registry.
pub type FilterRegistry32 = FilterRegistry<f32>;

/// Double-precision registry.
pub type FilterRegistry64 = FilterRegistry<f64>;

impl<T: Sample> Default for FilterRegistry<T> {
    /// Registry with the default capacity of [`DEFAULT_MAX_FILTERS`].
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_FILTERS)
    }
}

impl<T: Sample> FilterRegistry<T> {
    /// Create a registry holding at most `capacity` filters.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of handles allocated so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no filter has been initialized yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of filters this registry can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Initialize a filter from an SOS matrix and return its handle.
    ///
    /// With `reuse: None` the next free handle is allocated in order;
    /// once `len() == capacity()` the call fails with
    /// [`FilterError::CapacityExceeded`]. With `reuse: Some(h)` the
    /// previously allocated slot `h` is overwritten in place, delay state
    /// zeroed; a handle that was never allocated is rejected with
    /// [`FilterError::InvalidHandle`], whether in range or not.
    ///
    /// Validation precedes mutation: a failed call consumes no handle and
    /// leaves every slot unchanged.
    pub fn init(&mut self, sos: SosMatrix<'_, T>, reuse: Option<usize>) -> FilterResult<usize> {
        match reuse {
            Some(handle) => {
                self.filter_mut(handle)?.configure(sos)?;
                Ok(handle)
            }
            None => {
                if self.slots.len() >= self.capacity {
                    return Err(FilterError::CapacityExceeded {
                        capacity: self.capacity,
                    });
                }
                let mut filter = SosFilter::new();
                filter.configure(sos)?;
                self.slots.push(filter);
                Ok(self.slots.len() - 1)
            }
        }
    }

    /// Borrow the filter at `handle`.
    pub fn filter(&self, handle: usize) -> FilterResult<&SosFilter<T>> {
        self.slots.get(handle).ok_or(FilterError::InvalidHandle {
            handle,
            allocated: self.slots.len(),
        })
    }

    /// Mutably borrow the filter at `handle`.
    ///
    /// Useful for driving disjoint handles concurrently: borrow each slot
    /// once and hand the `&mut SosFilter` to its worker, instead of going
    /// through `&mut self` per block.
    pub fn filter_mut(&mut self, handle: usize) -> FilterResult<&mut SosFilter<T>> {
        let allocated = self.slots.len();
        self.slots
            .get_mut(handle)
            .ok_or(FilterError::InvalidHandle { handle, allocated })
    }

    /// Run `src` through the filter at `handle` into `dst`.
    ///
    /// Processes `min(dst.len(), src.len())` samples; the slot's delay
    /// state carries over to the next call.
    pub fn process(&mut self, handle: usize, dst: &mut [T], src: &[T]) -> FilterResult<()> {
        self.filter_mut(handle)?.process(dst, src);
        Ok(())
    }

    /// In-place variant of [`process`](Self::process); numerically
    /// identical to the out-of-place path.
    pub fn process_inplace(&mut self, handle: usize, buf: &mut [T]) -> FilterResult<()> {
        self.filter_mut(handle)?.process_inplace(buf);
        Ok(())
    }

    /// Filter `src` and return the output as a new vector of the same
    /// length.
    ///
    /// Convenience for host boundaries that hand over one array per call;
    /// allocates exactly `src.len()` samples. An empty input yields an
    /// empty output with no state mutation.
    pub fn apply(&mut self, handle: usize, src: &[T]) -> FilterResult<Vec<T>> {
        let filter = self.filter_mut(handle)?;
        let mut out = vec![T::ZERO; src.len()];
        filter.process(&mut out, src);
        Ok(out)
    }
}
