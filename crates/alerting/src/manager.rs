//! Alert Throttle and Severity Bands

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Severity bands the map front-end uses for marker coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Band a confidence score: severe above 0.8, moderate above 0.6.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            Severity::Severe
        } else if confidence > 0.6 {
            Severity::Moderate
        } else {
            Severity::Mild
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

/// Throttle configuration.
///
/// Defaults are the firmware's notification constants: at least five
/// seconds between alerts, at most ten per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum interval between fired alerts
    pub min_interval: Duration,
    /// Maximum alerts per session
    pub session_limit: usize,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(5),
            session_limit: 10,
        }
    }
}

/// Throttles detection alerts with a cooldown and a session cap.
pub struct AlertThrottle {
    config: ThrottleConfig,
    last_fired: Option<Instant>,
    fired_count: usize,
}

impl AlertThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            last_fired: None,
            fired_count: 0,
        }
    }

    /// Whether an alert may fire now.
    pub fn should_fire(&self) -> bool {
        if self.fired_count >= self.config.session_limit {
            debug!("alert suppressed: session limit reached");
            return false;
        }
        if let Some(last) = self.last_fired {
            if last.elapsed() < self.config.min_interval {
                debug!("alert suppressed: in cooldown");
                return false;
            }
        }
        true
    }

    /// Record a fired alert.
    pub fn record_fire(&mut self, severity: Severity, latitude: f64, longitude: f64) {
        self.last_fired = Some(Instant::now());
        self.fired_count += 1;
        info!(
            severity = severity.as_str(),
            latitude,
            longitude,
            count = self.fired_count,
            "pothole alert fired"
        );
    }

    /// Fire an alert if the throttle allows it; returns whether it fired.
    pub fn try_fire(&mut self, severity: Severity, latitude: f64, longitude: f64) -> bool {
        if !self.should_fire() {
            return false;
        }
        self.record_fire(severity, latitude, longitude);
        true
    }

    /// Alerts fired this session.
    pub fn fired_count(&self) -> usize {
        self.fired_count
    }

    /// Reset cooldown and session counter.
    pub fn reset(&mut self) {
        self.last_fired = None;
        self.fired_count = 0;
    }
}

impl Default for AlertThrottle {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_bands() {
        assert_eq!(Severity::from_confidence(0.95), Severity::Severe);
        assert_eq!(Severity::from_confidence(0.8), Severity::Moderate);
        assert_eq!(Severity::from_confidence(0.7), Severity::Moderate);
        assert_eq!(Severity::from_confidence(0.6), Severity::Mild);
        assert_eq!(Severity::from_confidence(0.51), Severity::Mild);
    }

    #[test]
    fn test_cooldown_suppresses_second_alert() {
        let mut throttle = AlertThrottle::default();
        assert!(throttle.try_fire(Severity::Severe, 12.98, 79.97));
        assert!(!throttle.try_fire(Severity::Severe, 12.98, 79.97));
        assert_eq!(throttle.fired_count(), 1);
    }

    #[test]
    fn test_session_limit() {
        let mut throttle = AlertThrottle::new(ThrottleConfig {
            min_interval: Duration::ZERO,
            session_limit: 3,
        });
        for _ in 0..5 {
            throttle.try_fire(Severity::Mild, 0.0, 0.0);
        }
        assert_eq!(throttle.fired_count(), 3);
    }

    #[test]
    fn test_reset() {
        let mut throttle = AlertThrottle::new(ThrottleConfig {
            min_interval: Duration::ZERO,
            session_limit: 1,
        });
        assert!(throttle.try_fire(Severity::Mild, 0.0, 0.0));
        assert!(!throttle.should_fire());
        throttle.reset();
        assert!(throttle.should_fire());
    }
}
