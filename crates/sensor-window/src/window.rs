//! Fixed-Length Detection Windows

use crate::SensorSample;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of samples per detection window. Matches the window the
/// classifier was trained on (0.5 s at the firmware's 100 Hz rate).
pub const WINDOW_SIZE: usize = 50;

/// Errors constructing a window
#[derive(Debug, Clone, Error)]
pub enum WindowError {
    #[error("window must contain at least 2 samples, got {0}")]
    TooShort(usize),
}

/// A contiguous slice of sensor samples used to compute one feature vector.
///
/// Derived composite magnitudes are computed here, never carried on the
/// wire. The firmware keeps them in its ring buffer; the server recomputes
/// them from the raw axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleWindow {
    samples: Vec<SensorSample>,
}

impl SampleWindow {
    /// Build a window from raw samples.
    pub fn new(samples: Vec<SensorSample>) -> Result<Self, WindowError> {
        if samples.len() < 2 {
            return Err(WindowError::TooShort(samples.len()));
        }
        Ok(Self { samples })
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Raw samples in arrival order.
    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    /// Extract one channel as a contiguous series.
    pub fn channel(&self, select: impl Fn(&SensorSample) -> f64) -> Vec<f64> {
        self.samples.iter().map(select).collect()
    }

    /// Front-sensor acceleration magnitudes, one per sample.
    pub fn front_magnitudes(&self) -> Vec<f64> {
        self.samples.iter().map(SensorSample::front_magnitude).collect()
    }

    /// Rear-sensor acceleration magnitudes, one per sample.
    pub fn rear_magnitudes(&self) -> Vec<f64> {
        self.samples.iter().map(SensorSample::rear_magnitude).collect()
    }
}
