//! Core data types for the cutting guide.
//!
//! - [`RigidPose`] - Translation and unit-quaternion orientation
//! - [`LocalBounds`] - Axis-aligned bounds of a model in its own frame
//! - [`FragmentGroup`], [`Fragment`], [`FragmentSlice`] - Immutable catalog records
//! - [`Catalog`] - Loaded set of fragment groups
//! - [`SessionState`] - Authoritative session state
//! - [`TrackingQuality`], [`AnchorId`] - Tracking-provider vocabulary
//!
//! # Design Philosophy
//!
//! These types are **data**. The rules that move a session between states live
//! in `guide-session`; marker placement lives in `guide-layout`. Poses are
//! `Copy` and are copied, never shared, between components.
//!
//! # Coordinate System
//!
//! Right-handed, meters. Y is up; Z is the device-forward axis whose twist the
//! upright constraint removes.
//!
//! # Example
//!
//! ```
//! use guide_types::{RigidPose, SessionState};
//! use nalgebra::Vector3;
//!
//! let pose = RigidPose::from_translation(Vector3::new(0.0, 0.1, 0.0));
//! assert_eq!(pose.transform_point(&Vector3::zeros()).y, 0.1);
//!
//! assert!(SessionState::Tracking.accepts_anchor_updates());
//! assert!(!SessionState::Locked.accepts_anchor_updates());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod bounds;
mod catalog;
mod error;
mod pose;
mod state;
mod tracking;

pub use bounds::LocalBounds;
pub use catalog::{Catalog, Fragment, FragmentGroup, FragmentSlice, PrincipalAxis};
pub use error::{CatalogError, Result};
pub use pose::RigidPose;
pub use state::SessionState;
pub use tracking::{AnchorId, LimitedReason, TrackingQuality};

// Re-export math types for convenience
pub use nalgebra::{Point2, UnitQuaternion, Vector3};
