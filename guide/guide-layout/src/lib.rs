//! Cutting-plane marker layout.
//!
//! Given a model's local bounds, a group's principal axis and its fragments,
//! this crate computes where each cutting-plane marker sits in the model's
//! local frame:
//!
//! - [`leftmost_point`] - Origin of slice offsets (`center - half_extent` on the axis)
//! - [`layout_fragment`] - Two local poses for one fragment
//! - [`layout_group`] - Every marker of a group with its color and size
//! - [`axis_indicators`] - End-point indicators just beyond the model along the axis
//! - [`FRAGMENT_PALETTE`] - Six-entry cyclic marker palette
//!
//! Layout is a pure function of its inputs: identical inputs give
//! bit-identical poses.
//!
//! # Example
//!
//! ```
//! use guide_layout::layout_fragment;
//! use guide_types::{Fragment, FragmentSlice, LocalBounds, PrincipalAxis};
//! use nalgebra::Vector3;
//!
//! let bounds = LocalBounds::new(Vector3::zeros(), Vector3::new(0.1, 0.05, 0.05));
//! let fragment = Fragment::new(
//!     FragmentSlice::new(0.05, 0.0, 0.0, 0.0),
//!     FragmentSlice::new(0.11, 0.0, 90.0, 0.0),
//!     0.06,
//! );
//! let [start, end] = layout_fragment(&bounds, PrincipalAxis::X, &fragment);
//! assert!((start.translation.x + 0.05).abs() < 1e-12);
//! assert!((end.translation.x - 0.01).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod layout;
mod marker;
mod palette;

pub use layout::{axis_indicators, layout_fragment, layout_group, leftmost_point};
pub use marker::{MarkerParams, MarkerPlacement, SliceEnd};
pub use palette::{FRAGMENT_PALETTE, Rgba, palette_color};
