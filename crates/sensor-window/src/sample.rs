//! Six-Axis IMU Sample Types

use serde::{Deserialize, Serialize};

/// One reading from the dual-IMU sensor node.
///
/// Field names match the wire format the firmware serializes: suffix `1`
/// is the front axle sensor, suffix `2` the rear. Accelerations are in
/// m/s², angular rates in rad/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub acc_x1: f64,
    pub acc_y1: f64,
    pub acc_z1: f64,
    pub acc_x2: f64,
    pub acc_y2: f64,
    pub acc_z2: f64,
    pub gyr_x1: f64,
    pub gyr_y1: f64,
    pub gyr_z1: f64,
    pub gyr_x2: f64,
    pub gyr_y2: f64,
    pub gyr_z2: f64,
}

impl SensorSample {
    /// Composite acceleration magnitude of the front sensor.
    pub fn front_magnitude(&self) -> f64 {
        (self.acc_x1 * self.acc_x1 + self.acc_y1 * self.acc_y1 + self.acc_z1 * self.acc_z1).sqrt()
    }

    /// Composite acceleration magnitude of the rear sensor.
    pub fn rear_magnitude(&self) -> f64 {
        (self.acc_x2 * self.acc_x2 + self.acc_y2 * self.acc_y2 + self.acc_z2 * self.acc_z2).sqrt()
    }
}
