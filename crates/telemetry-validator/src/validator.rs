//! Telemetry Validator for Range Checking

use crate::error::ValidationError;
use sensor_window::{SensorSample, WINDOW_SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration.
///
/// Defaults mirror the sensor node's hardware configuration: MPU6050 in
/// ±8 g accelerometer range and ±500 °/s gyro range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Acceleration valid range (m/s²)
    pub accel_range: (f64, f64),
    /// Angular rate valid range (rad/s)
    pub gyro_range: (f64, f64),
    /// Latitude valid range (degrees)
    pub latitude_range: (f64, f64),
    /// Longitude valid range (degrees)
    pub longitude_range: (f64, f64),
    /// Required window length
    pub window_size: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            // ±8 g
            accel_range: (-78.48, 78.48),
            // ±500 °/s
            gyro_range: (-8.727, 8.727),
            latitude_range: (-90.0, 90.0),
            longitude_range: (-180.0, 180.0),
            window_size: WINDOW_SIZE,
        }
    }
}

/// Validator for detection requests
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with the given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate GPS latitude
    pub fn validate_latitude(&self, lat: f64) -> Result<(), ValidationError> {
        self.validate_range("latitude", lat, self.config.latitude_range)
    }

    /// Validate GPS longitude
    pub fn validate_longitude(&self, lng: f64) -> Result<(), ValidationError> {
        self.validate_range("longitude", lng, self.config.longitude_range)
    }

    /// Validate every channel of a single sample
    pub fn validate_sample(&self, sample: &SensorSample) -> Result<(), ValidationError> {
        let accel = [
            ("acc_x1", sample.acc_x1),
            ("acc_y1", sample.acc_y1),
            ("acc_z1", sample.acc_z1),
            ("acc_x2", sample.acc_x2),
            ("acc_y2", sample.acc_y2),
            ("acc_z2", sample.acc_z2),
        ];
        for (field, value) in accel {
            self.validate_range(field, value, self.config.accel_range)?;
        }

        let gyro = [
            ("gyr_x1", sample.gyr_x1),
            ("gyr_y1", sample.gyr_y1),
            ("gyr_z1", sample.gyr_z1),
            ("gyr_x2", sample.gyr_x2),
            ("gyr_y2", sample.gyr_y2),
            ("gyr_z2", sample.gyr_z2),
        ];
        for (field, value) in gyro {
            self.validate_range(field, value, self.config.gyro_range)?;
        }

        Ok(())
    }

    /// Validate a full detection window: exact length, all channels in range.
    pub fn validate_window(&self, samples: &[SensorSample]) -> Result<(), ValidationError> {
        if samples.len() != self.config.window_size {
            return Err(ValidationError::WindowLength {
                expected: self.config.window_size,
                actual: samples.len(),
            });
        }
        for sample in samples {
            self.validate_sample(sample)?;
        }
        debug!("window of {} samples validated", samples.len());
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_window() -> Vec<SensorSample> {
        (0..WINDOW_SIZE)
            .map(|_| SensorSample {
                acc_z1: 9.81,
                acc_z2: 9.79,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_valid_window() {
        let validator = Validator::default();
        assert!(validator.validate_window(&quiet_window()).is_ok());
    }

    #[test]
    fn test_wrong_window_length() {
        let validator = Validator::default();
        let mut samples = quiet_window();
        samples.pop();
        let err = validator.validate_window(&samples).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::WindowLength {
                expected: WINDOW_SIZE,
                actual
            } if actual == WINDOW_SIZE - 1
        ));
    }

    #[test]
    fn test_accel_out_of_range() {
        let validator = Validator::default();
        let mut samples = quiet_window();
        samples[10].acc_z1 = 200.0; // beyond ±8 g
        assert!(validator.validate_window(&samples).is_err());
    }

    #[test]
    fn test_gyro_out_of_range() {
        let validator = Validator::default();
        let mut samples = quiet_window();
        samples[0].gyr_x2 = 12.0;
        assert!(validator.validate_window(&samples).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let validator = Validator::default();
        let mut samples = quiet_window();
        samples[3].acc_y1 = f64::NAN;
        assert!(matches!(
            validator.validate_window(&samples).unwrap_err(),
            ValidationError::NotFinite("acc_y1")
        ));
    }

    #[test]
    fn test_gps_ranges() {
        let validator = Validator::default();
        assert!(validator.validate_latitude(12.985).is_ok());
        assert!(validator.validate_latitude(-91.0).is_err());
        assert!(validator.validate_longitude(79.97).is_ok());
        assert!(validator.validate_longitude(180.5).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_in_range_coordinates_validate(
                lat in -90.0f64..=90.0,
                lng in -180.0f64..=180.0,
            ) {
                let validator = Validator::default();
                prop_assert!(validator.validate_latitude(lat).is_ok());
                prop_assert!(validator.validate_longitude(lng).is_ok());
            }
        }
    }
}
