//! Euler angle conversion.

use nalgebra::{UnitQuaternion, Vector3};

/// Euler angles in radians.
///
/// `roll` rotates about X, `pitch` about Y and `yaw` about Z. The matching
/// quaternion is `Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    /// Rotation about the X axis.
    pub roll: f64,
    /// Rotation about the Y axis, in `[-pi/2, pi/2]`.
    pub pitch: f64,
    /// Rotation about the Z axis.
    pub yaw: f64,
}

impl EulerAngles {
    /// Create Euler angles from radians.
    #[must_use]
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Create Euler angles from degrees.
    #[must_use]
    pub fn from_degrees(x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        Self {
            roll: x_deg.to_radians(),
            pitch: y_deg.to_radians(),
            yaw: z_deg.to_radians(),
        }
    }

    /// Angles as `(x, y, z)` degrees.
    #[must_use]
    pub fn to_degrees(&self) -> (f64, f64, f64) {
        (
            self.roll.to_degrees(),
            self.pitch.to_degrees(),
            self.yaw.to_degrees(),
        )
    }

    /// Compose the per-axis rotations as `z * y * x`.
    #[must_use]
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        let x = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.roll);
        let y = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.pitch);
        let z = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.yaw);
        z * y * x
    }

    /// True if every angle is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.roll.is_finite() && self.pitch.is_finite() && self.yaw.is_finite()
    }
}

/// Build a quaternion from Euler angles in degrees.
///
/// The composition order is `z * y * x`, matching the tool that authored the
/// slice-rotation data. Every stored fragment angle depends on this order.
///
/// # Example
///
/// ```
/// use guide_math::euler_to_quaternion;
/// use nalgebra::Vector3;
///
/// let q = euler_to_quaternion(0.0, 90.0, 0.0);
/// let v = q * Vector3::x();
/// assert!((v - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
/// ```
#[must_use]
pub fn euler_to_quaternion(x_deg: f64, y_deg: f64, z_deg: f64) -> UnitQuaternion<f64> {
    EulerAngles::from_degrees(x_deg, y_deg, z_deg).to_quaternion()
}

/// Extract `(roll, pitch, yaw)` from a quaternion.
///
/// Pitch saturates at `±pi/2` when `|sin(pitch)| >= 1`, so the result is never
/// `NaN` for a unit quaternion, including at gimbal lock.
#[must_use]
#[allow(clippy::many_single_char_names)]
// Single-char names: standard quaternion component notation
pub fn quaternion_to_euler(q: &UnitQuaternion<f64>) -> EulerAngles {
    let w = q.scalar();
    let v = q.imag();
    let (x, y, z) = (v.x, v.y, v.z);

    let sinr_cosp = 2.0 * (w * x + y * z);
    let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
    let roll = sinr_cosp.atan2(cosr_cosp);

    let sinp = 2.0 * (w * y - z * x);
    let pitch = if sinp.abs() >= 1.0 {
        std::f64::consts::FRAC_PI_2.copysign(sinp)
    } else {
        sinp.asin()
    };

    let siny_cosp = 2.0 * (w * z + x * y);
    let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
    let yaw = siny_cosp.atan2(cosy_cosp);

    EulerAngles { roll, pitch, yaw }
}

/// Remove the twist about the device-forward (Z) axis.
///
/// Decomposes `q`, zeroes the yaw component and re-encodes with the same
/// `z * y * x` order. Applying it twice gives the same result as once.
#[must_use]
pub fn constrain_to_upright(q: &UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    let euler = quaternion_to_euler(q);
    EulerAngles::new(euler.roll, euler.pitch, 0.0).to_quaternion()
}
