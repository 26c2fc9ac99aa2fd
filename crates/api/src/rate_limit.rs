//! Rate Limiting Middleware
//!
//! Per-IP GCRA rate limiting via tower_governor. Sensor nodes post at
//! most one window every few seconds, so anything chattier than the
//! burst budget is noise or abuse.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config with X-RateLimit-* response headers enabled
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Seconds per replenished request
    pub per_second: u64,
    /// Burst size
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            // One window per two seconds sustained, short bursts allowed
            per_second: 2,
            burst_size: 10,
        }
    }
}

/// Build the governor config for the router.
///
/// Requires the service to be created with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer IP
/// is available to the key extractor.
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.per_second)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .expect("rate limit config must be non-zero"),
    )
}
