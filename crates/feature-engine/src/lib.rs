//! Feature Engineering Engine
//!
//! Turns a detection window into the ordered 34-dimension statistical
//! feature vector the classifier was trained on.

mod features;
mod statistics;

pub use features::{FeatureExtractor, FeatureVector, FEATURE_DIMENSION};
pub use statistics::ChannelStats;
