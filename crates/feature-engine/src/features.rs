//! Feature Vector Assembly
//!
//! The classifier was trained on a fixed column order; the index layout
//! below is the contract and must not be reordered:
//!
//! - 0..12   front accelerometer x, y, z: min, max, mean, std
//! - 12..24  rear accelerometer x, y, z: min, max, mean, std
//! - 24..28  magnitude front max, rear max, front std, rear std
//! - 28..31  front gyro x, y, z: std
//! - 31..34  rear gyro x, y, z: std

use crate::statistics::ChannelStats;
use sensor_window::{SampleWindow, SensorSample};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of features the trained model expects.
pub const FEATURE_DIMENSION: usize = 34;

/// Ordered feature vector for classifier input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw feature values in training order
    pub values: Vec<f64>,

    // Named features for logging and alert context
    /// Peak front-sensor acceleration magnitude
    pub front_mag_max: f64,
    /// Peak rear-sensor acceleration magnitude
    pub rear_mag_max: f64,
    /// Front vertical-axis standard deviation
    pub front_z_std: f64,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            values: vec![0.0; FEATURE_DIMENSION],
            front_mag_max: 0.0,
            rear_mag_max: 0.0,
            front_z_std: 0.0,
        }
    }
}

impl FeatureVector {
    /// Feature values in training order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extracts the ordered feature vector from a detection window.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all 34 features from a window.
    pub fn extract(&self, window: &SampleWindow) -> FeatureVector {
        let mut values = Vec::with_capacity(FEATURE_DIMENSION);

        // Front then rear accelerometer axes, four stats each
        let accel_axes: [fn(&SensorSample) -> f64; 6] = [
            |s| s.acc_x1,
            |s| s.acc_y1,
            |s| s.acc_z1,
            |s| s.acc_x2,
            |s| s.acc_y2,
            |s| s.acc_z2,
        ];

        let mut front_z_std = 0.0;
        for (i, select) in accel_axes.iter().enumerate() {
            let stats = ChannelStats::compute(&window.channel(select));
            values.push(stats.min);
            values.push(stats.max);
            values.push(stats.mean);
            values.push(stats.std_dev);
            if i == 2 {
                front_z_std = stats.std_dev;
            }
        }

        // Composite magnitudes: both maxima, then both standard deviations
        let front_mag = ChannelStats::compute(&window.front_magnitudes());
        let rear_mag = ChannelStats::compute(&window.rear_magnitudes());
        values.push(front_mag.max);
        values.push(rear_mag.max);
        values.push(front_mag.std_dev);
        values.push(rear_mag.std_dev);

        // Gyro axes contribute standard deviation only
        let gyro_axes: [fn(&SensorSample) -> f64; 6] = [
            |s| s.gyr_x1,
            |s| s.gyr_y1,
            |s| s.gyr_z1,
            |s| s.gyr_x2,
            |s| s.gyr_y2,
            |s| s.gyr_z2,
        ];
        for select in &gyro_axes {
            let stats = ChannelStats::compute(&window.channel(select));
            values.push(stats.std_dev);
        }

        debug_assert_eq!(values.len(), FEATURE_DIMENSION);
        debug!(
            front_mag_max = front_mag.max,
            rear_mag_max = rear_mag.max,
            "extracted feature vector"
        );

        FeatureVector {
            values,
            front_mag_max: front_mag.max,
            rear_mag_max: rear_mag.max,
            front_z_std,
        }
    }
}
