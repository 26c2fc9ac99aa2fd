//! Classification Engine

use crate::{ClassifierError, LinearModel};
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Confidence above which a window is classified as a pothole.
pub const DETECTION_THRESHOLD: f64 = 0.5;

/// Result of classifying one window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Detection {
    /// Whether the window crossed the detection threshold
    pub is_pothole: bool,
    /// Classifier confidence in [0, 1], also stored as severity
    pub confidence: f64,
}

/// Binary pothole classifier: logistic over the model's affine score.
pub struct PotholeClassifier {
    model: LinearModel,
    threshold: f64,
}

impl PotholeClassifier {
    /// Create a classifier with the default threshold.
    pub fn new(model: LinearModel) -> Self {
        Self::with_threshold(model, DETECTION_THRESHOLD)
    }

    /// Create a classifier with an explicit threshold.
    pub fn with_threshold(model: LinearModel, threshold: f64) -> Self {
        Self { model, threshold }
    }

    /// Confidence score for a feature vector.
    ///
    /// The logistic squash is strictly increasing, so ordering by affine
    /// score and ordering by confidence always agree.
    pub fn score(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let affine = self.model.affine_score(features.as_slice())?;
        Ok(sigmoid(affine))
    }

    /// Classify a feature vector against the threshold (strictly greater).
    pub fn classify(&self, features: &FeatureVector) -> Result<Detection, ClassifierError> {
        let confidence = self.score(features)?;
        let is_pothole = confidence > self.threshold;
        debug!(confidence, is_pothole, "classified window");
        Ok(Detection {
            is_pothole,
            confidence,
        })
    }

    /// Number of features the underlying model expects.
    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Logistic squashing function.
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
