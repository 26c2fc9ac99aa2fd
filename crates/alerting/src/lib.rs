//! Detection Alerting
//!
//! Severity banding for the map display and throttling of detection
//! alerts. Throttling only gates alert emission; persistence of detected
//! potholes is never suppressed.

mod manager;

pub use manager::{AlertThrottle, Severity, ThrottleConfig};
