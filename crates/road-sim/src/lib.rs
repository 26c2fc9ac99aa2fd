//! Road Data Simulator
//!
//! Generates synthetic dual-IMU windows that mimic what the sensor node
//! sends: smooth-road background vibration and pothole impact pulses.

mod generator;

pub use generator::{RoadProfile, SAMPLE_RATE_HZ};
