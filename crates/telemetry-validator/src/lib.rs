//! Telemetry Validation
//!
//! Range checking for incoming sensor windows and GPS coordinates, plus
//! the EMA smoothing filter the firmware applies to accelerometer channels.

mod error;
mod filter;
mod validator;

pub use error::ValidationError;
pub use filter::EmaFilter;
pub use validator::{ValidationConfig, Validator};
