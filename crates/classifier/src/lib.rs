//! Pothole Classifier
//!
//! A binary linear classifier (SVM exported as affine + sigmoid) over the
//! 34-dimension feature vector, plus load/save for the model artifact the
//! offline conversion tool produces.

mod engine;
mod model;

pub use engine::{Detection, PotholeClassifier, DETECTION_THRESHOLD};
pub use model::LinearModel;

use thiserror::Error;

/// Errors from model loading and inference
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is malformed: {0}")]
    MalformedArtifact(String),
    #[error("invalid input shape: model expects {expected} features, got {actual}")]
    InputShape { expected: usize, actual: usize },
}
