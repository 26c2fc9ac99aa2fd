//! Per-Channel Statistics

/// Summary statistics for one sensor channel over a window.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelStats {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl ChannelStats {
    /// Compute statistics over a slice of values.
    ///
    /// Uses the Σ / Σx² form the firmware uses, so server-side features
    /// are bit-comparable with on-device extraction. Empty input yields
    /// the zero stats.
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;

        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            sum_sq += v * v;
        }

        let mean = sum / n;
        // Guard against small negative variance from cancellation
        let variance = (sum_sq / n - mean * mean).max(0.0);

        Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}
