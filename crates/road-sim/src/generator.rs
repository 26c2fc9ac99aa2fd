//! Synthetic Road Profiles
//!
//! Signal shapes follow the training-data generator: smooth road is
//! Gaussian background vibration plus a 5 Hz road component; a pothole is
//! a Gaussian pulse, strongest on the vertical axis. Amplitudes are in g
//! in the training scripts and scaled to m/s² here, with gravity on the
//! vertical axis, to match the firmware's units.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use sensor_window::{SensorSample, WindowBuffer, WINDOW_SIZE};
use telemetry_validator::EmaFilter;

/// Firmware sampling rate
pub const SAMPLE_RATE_HZ: f64 = 100.0;

/// Standard gravity, m/s²
const GRAVITY: f64 = 9.81;

/// Samples the rear axle lags behind the front at city speed
const REAR_DELAY: usize = 3;

/// Rear-sensor attenuation relative to the front
const REAR_SCALE: f64 = 0.8;

/// Generates detection windows of synthetic road data.
///
/// Samples flow through the same SPSC ingest buffer the sensor node uses,
/// so each returned window is whatever the buffer holds, not a freestanding
/// vector.
pub struct RoadProfile {
    rng: StdRng,
    buffer: WindowBuffer,
}

impl RoadProfile {
    /// Create a generator with a random seed.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a generator with a fixed seed (deterministic output).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            buffer: WindowBuffer::with_default_capacity(),
        }
    }

    /// One window of smooth-road vibration.
    pub fn normal_window(&mut self) -> Vec<SensorSample> {
        let pulse = vec![0.0; WINDOW_SIZE];
        self.window_with_pulse(&pulse)
    }

    /// One window containing a pothole impact centered in the window.
    pub fn pothole_window(&mut self) -> Vec<SensorSample> {
        // Gaussian pulse over normalized time [-3, 3]
        let pulse: Vec<f64> = (0..WINDOW_SIZE)
            .map(|i| {
                let t = -3.0 + 6.0 * i as f64 / (WINDOW_SIZE - 1) as f64;
                (-t * t).exp()
            })
            .collect();
        self.window_with_pulse(&pulse)
    }

    fn window_with_pulse(&mut self, pulse: &[f64]) -> Vec<SensorSample> {
        let acc_noise = Normal::new(0.0, 0.2 * GRAVITY).unwrap();
        let z_noise = Normal::new(0.0, 0.3 * GRAVITY).unwrap();
        let gyro_noise = Normal::new(0.0, 0.02).unwrap();

        // Raw front-sensor series
        let mut front: Vec<(f64, f64, f64)> = Vec::with_capacity(WINDOW_SIZE);
        for (i, &p) in pulse.iter().enumerate() {
            let t = i as f64 / SAMPLE_RATE_HZ;
            let road_component = 0.2 * GRAVITY * (2.0 * std::f64::consts::PI * 5.0 * t).sin();
            let x = 0.5 * GRAVITY * p + acc_noise.sample(&mut self.rng);
            let y = 0.3 * GRAVITY * p + acc_noise.sample(&mut self.rng);
            let z = GRAVITY - 2.0 * GRAVITY * p + road_component + z_noise.sample(&mut self.rng);
            front.push((x, y, z));
        }

        // The firmware smooths accelerometer channels before buffering
        let mut filters: Vec<EmaFilter> = (0..6).map(|_| EmaFilter::firmware_default()).collect();

        for i in 0..WINDOW_SIZE {
            let (fx, fy, fz) = front[i];
            // Rear axle sees the same surface later and softer
            let (rx, ry, rz) = if i >= REAR_DELAY {
                let (x, y, z) = front[i - REAR_DELAY];
                (x * REAR_SCALE, y * REAR_SCALE, GRAVITY + (z - GRAVITY) * REAR_SCALE)
            } else {
                (0.0, 0.0, GRAVITY)
            };

            let p = pulse[i];
            self.buffer.push(SensorSample {
                acc_x1: filters[0].filter(fx),
                acc_y1: filters[1].filter(fy),
                acc_z1: filters[2].filter(fz),
                acc_x2: filters[3].filter(rx),
                acc_y2: filters[4].filter(ry),
                acc_z2: filters[5].filter(rz),
                gyr_x1: 0.3 * p + gyro_noise.sample(&mut self.rng),
                gyr_y1: 0.2 * p + gyro_noise.sample(&mut self.rng),
                gyr_z1: 0.1 * p + gyro_noise.sample(&mut self.rng),
                gyr_x2: 0.3 * p * REAR_SCALE + gyro_noise.sample(&mut self.rng),
                gyr_y2: 0.2 * p * REAR_SCALE + gyro_noise.sample(&mut self.rng),
                gyr_z2: 0.1 * p * REAR_SCALE + gyro_noise.sample(&mut self.rng),
            });
        }
        self.buffer.read_last(WINDOW_SIZE)
    }

    /// Total samples pushed through the ingest buffer since creation.
    pub fn samples_generated(&self) -> usize {
        self.buffer.total_pushed()
    }
}

impl Default for RoadProfile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telemetry_validator::Validator;

    fn std_dev(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
    }

    #[test]
    fn test_window_length() {
        let mut profile = RoadProfile::with_seed(7);
        assert_eq!(profile.normal_window().len(), WINDOW_SIZE);
        assert_eq!(profile.pothole_window().len(), WINDOW_SIZE);
    }

    #[test]
    fn test_generated_windows_pass_validation() {
        let mut profile = RoadProfile::with_seed(7);
        let validator = Validator::default();
        for _ in 0..10 {
            assert!(validator.validate_window(&profile.normal_window()).is_ok());
            assert!(validator.validate_window(&profile.pothole_window()).is_ok());
        }
    }

    #[test]
    fn test_pothole_has_stronger_vertical_signature() {
        let mut profile = RoadProfile::with_seed(42);

        let normal: Vec<f64> = profile.normal_window().iter().map(|s| s.acc_z1).collect();
        let pothole: Vec<f64> = profile.pothole_window().iter().map(|s| s.acc_z1).collect();

        // The impact pulse dominates the background vibration
        assert!(std_dev(&pothole) > std_dev(&normal));
        let pothole_min = pothole.iter().cloned().fold(f64::MAX, f64::min);
        let normal_min = normal.iter().cloned().fold(f64::MAX, f64::min);
        assert!(pothole_min < normal_min);
    }

    #[test]
    fn test_rear_sensor_is_attenuated() {
        let mut profile = RoadProfile::with_seed(11);
        let window = profile.pothole_window();

        let front: Vec<f64> = window.iter().map(|s| s.acc_z1 - GRAVITY).collect();
        let rear: Vec<f64> = window.iter().map(|s| s.acc_z2 - GRAVITY).collect();
        assert!(std_dev(&rear) < std_dev(&front));
    }

    #[test]
    fn test_windows_flow_through_ingest_buffer() {
        let mut profile = RoadProfile::with_seed(5);
        let window = profile.normal_window();
        assert_eq!(window.len(), WINDOW_SIZE);
        assert_eq!(profile.samples_generated(), WINDOW_SIZE);

        profile.pothole_window();
        assert_eq!(profile.samples_generated(), 2 * WINDOW_SIZE);
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let a = RoadProfile::with_seed(3).pothole_window();
        let b = RoadProfile::with_seed(3).pothole_window();
        assert_eq!(a, b);
    }
}
