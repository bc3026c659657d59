//! Measurement data types

/// One fully-validated IMU reading
///
/// Every field comes from the same sensor frame; a snapshot is replaced
/// wholesale on publish, never field-by-field. Callers receive copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuSnapshot {
    /// Yaw, pitch, roll (degrees)
    pub ypr: [f32; 3],
    /// Angular rate (rad/s)
    pub angular_rate: [f32; 3],
    /// Acceleration (m/s²)
    pub accel: [f32; 3],
    /// Orientation quaternion (x, y, z, w)
    pub quaternion: [f32; 4],
}

impl ImuSnapshot {
    /// Create zero snapshot
    pub fn zero() -> Self {
        Self {
            ypr: [0.0; 3],
            angular_rate: [0.0; 3],
            accel: [0.0; 3],
            quaternion: [0.0; 4],
        }
    }
}

impl Default for ImuSnapshot {
    fn default() -> Self {
        Self::zero()
    }
}
