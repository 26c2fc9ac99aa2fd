//! Model Artifact I/O
//!
//! The offline conversion tool exports the trained SVM as a flat binary
//! file: N little-endian f32 weights followed by one f32 bias. For 34
//! features that is a 140-byte artifact.

use crate::ClassifierError;
use std::path::Path;
use tracing::info;

/// Affine model parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearModel {
    /// Build a model from explicit parameters.
    pub fn from_parts(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Load a model from the binary artifact format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;

        if bytes.len() < 8 || bytes.len() % 4 != 0 {
            return Err(ClassifierError::MalformedArtifact(format!(
                "artifact is {} bytes, expected a multiple of 4 with at least one weight and a bias",
                bytes.len()
            )));
        }

        let mut scalars: Vec<f64> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect();

        // Last scalar is the bias
        let bias = scalars.pop().ok_or_else(|| {
            ClassifierError::MalformedArtifact("artifact contains no scalars".into())
        })?;

        if !bias.is_finite() || scalars.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::MalformedArtifact(
                "artifact contains non-finite parameters".into(),
            ));
        }

        info!(
            path = %path.display(),
            features = scalars.len(),
            "loaded model artifact"
        );

        Ok(Self {
            weights: scalars,
            bias,
        })
    }

    /// Write the model in the binary artifact format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ClassifierError> {
        let mut bytes = Vec::with_capacity((self.weights.len() + 1) * 4);
        for &w in &self.weights {
            bytes.extend_from_slice(&(w as f32).to_le_bytes());
        }
        bytes.extend_from_slice(&(self.bias as f32).to_le_bytes());
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Number of features the model expects.
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Affine score: w · x + b. Errors if the input length does not match.
    pub fn affine_score(&self, input: &[f64]) -> Result<f64, ClassifierError> {
        if input.len() != self.weights.len() {
            return Err(ClassifierError::InputShape {
                expected: self.weights.len(),
                actual: input.len(),
            });
        }
        let dot: f64 = self
            .weights
            .iter()
            .zip(input)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.bias)
    }
}
