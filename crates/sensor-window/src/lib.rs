//! Sensor Windows
//!
//! Sample types shared across the pipeline, fixed-length detection windows,
//! and an SPSC ring buffer for continuous ingest.

mod buffer;
mod sample;
mod window;

pub use buffer::WindowBuffer;
pub use sample::SensorSample;
pub use window::{SampleWindow, WindowError, WINDOW_SIZE};
