//! Transform math for the cutting guide.
//!
//! Pure functions with no state:
//!
//! - [`euler_to_quaternion`] / [`quaternion_to_euler`] - Euler angle conversion
//!   in the fixed `z * y * x` composition order
//! - [`constrain_to_upright`] - Zero the twist about the device-forward axis
//! - [`compose_rigid`] / [`decompose_rigid`] - Homogeneous rigid transforms
//! - [`rotate_vector`] - Quaternion-vector rotation without building a matrix
//! - [`axis_angle`] - Rotation about an arbitrary (possibly unnormalized) axis
//!
//! # Euler Order Contract
//!
//! Slice orientations are authored offline and stored as three angles in
//! degrees. They only reproduce the authored pose when composed as
//! `Rz * Ry * Rx`. [`euler_to_quaternion`] composes in exactly that order and
//! must not be changed to another convention.
//!
//! # Layer 0 Crate
//!
//! This crate has no renderer or engine dependencies.
//!
//! # Example
//!
//! ```
//! use guide_math::{constrain_to_upright, euler_to_quaternion, quaternion_to_euler};
//!
//! let q = euler_to_quaternion(10.0, 20.0, 30.0);
//! let euler = quaternion_to_euler(&q);
//! assert!((euler.yaw.to_degrees() - 30.0).abs() < 1e-9);
//!
//! let upright = constrain_to_upright(&q);
//! assert!(quaternion_to_euler(&upright).yaw.abs() < 1e-9);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod euler;
mod rigid;

pub use euler::{EulerAngles, constrain_to_upright, euler_to_quaternion, quaternion_to_euler};
pub use rigid::{
    axis_angle, compose_rigid, decompose_rigid, rotate_vector, rotation_matrix,
    translation_matrix,
};

// Re-export math types for convenience
pub use nalgebra::{Matrix4, Point2, UnitQuaternion, Vector3};
