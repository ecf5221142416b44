// SPDX-License-Identifier: LGPL-3.0-or-later

//! # cfilt-bank
//!
//! A real-time bank of IIR filters built from cascaded second-order
//! sections (SOS biquads), evaluated in transposed direct form II via
//! [`cfilt_dsp`]. It includes:
//!
//! - **Filters**: [`sos::SosFilter`], one biquad cascade with fixed-capacity
//!   coefficient storage and persistent delay state
//! - **Loading**: [`sos::SosMatrix`], a validated view over `scipy`-style
//!   `[b0, b1, b2, a0, a1, a2]` coefficient rows
//! - **Registry**: [`registry::FilterRegistry`], a bounded arena handing
//!   out stable integer handles to filter slots
//! - **Errors**: [`error::FilterError`], one typed channel for shape,
//!   capacity, and handle failures
//!
//! Single and double precision are mirror instantiations of the same
//! generic code, selected through the sealed [`sample::Sample`] trait;
//! see [`registry::FilterRegistry32`] and [`registry::FilterRegistry64`].
//!
//! ## Concurrency
//!
//! Nothing here locks. Every mutating operation takes `&mut self`, so the
//! single-writer-per-registry and single-writer-per-handle contracts are
//! enforced by the borrow checker; callers that need cross-thread access
//! wrap the registry (or individual filters borrowed via
//! [`registry::FilterRegistry::filter_mut`]) in their own exclusion.

pub mod consts;
pub mod error;
pub mod registry;
pub mod sample;
pub mod sos;
