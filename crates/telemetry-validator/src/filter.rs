//! EMA Filter for Accelerometer Smoothing

/// Smoothing factor the firmware uses on accelerometer channels.
/// Lower alpha means more smoothing.
pub const FIRMWARE_ALPHA: f64 = 0.1;

/// Exponential moving average filter.
///
/// The sensor node smooths each accelerometer axis before buffering;
/// gyro channels pass through unfiltered. The simulator applies the same
/// filter so generated windows match what the device would send.
#[derive(Debug, Clone)]
pub struct EmaFilter {
    alpha: f64,
    state: f64,
    initialized: bool,
}

impl EmaFilter {
    /// Create a filter with the given smoothing factor.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            state: 0.0,
            initialized: false,
        }
    }

    /// Create a filter with the firmware's smoothing factor.
    pub fn firmware_default() -> Self {
        Self::new(FIRMWARE_ALPHA)
    }

    /// Feed a value and get the smoothed output.
    pub fn filter(&mut self, value: f64) -> f64 {
        if !self.initialized {
            // The firmware starts its EMA state at zero; seeding with the
            // first observation avoids the long warm-up ramp instead.
            self.state = value;
            self.initialized = true;
            return value;
        }
        self.state = self.alpha * value + (1.0 - self.alpha) * self.state;
        self.state
    }

    /// Reset the filter state.
    pub fn reset(&mut self) {
        self.state = 0.0;
        self.initialized = false;
    }
}
