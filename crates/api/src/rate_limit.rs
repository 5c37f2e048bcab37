//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP rate limiting with tower_governor. The Generic Cell Rate Algorithm
//! enforces the quota without background processes.

use governor::middleware::StateInformationMiddleware;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed by peer IP, with X-RateLimit-* headers
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Seconds to replenish one request
    pub per_second: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        // A form fires one resolve call per edited field
        Self {
            per_second: 1,
            burst_size: 30,
        }
    }
}

/// Zero period or zero burst
#[derive(Debug, Error)]
#[error("invalid rate limit: per_second={per_second}, burst_size={burst_size}")]
pub struct InvalidRateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Create a rate limiting governor config.
///
/// Uses [`PeerIpKeyExtractor`], so the service must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_governor_config(
    config: &RateLimitConfig,
) -> Result<Arc<DefaultGovernorConfig>, InvalidRateLimit> {
    GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish()
        .map(Arc::new)
        .ok_or(InvalidRateLimit {
            per_second: config.per_second,
            burst_size: config.burst_size,
        })
}
