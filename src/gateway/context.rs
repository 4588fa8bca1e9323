//! Shared gateway state, constructed once at startup.

use std::sync::Arc;
use std::time::Duration;

use crate::assets::StaticAssets;
use crate::config::GatewayConfig;
use crate::http::forwarder::{Forwarder, HttpForwarder};
use crate::routing::RouteTable;
use crate::security::{Authenticator, RateLimiter};

/// Everything the pipeline stages need, captured at startup.
///
/// The route table, authenticator and asset root are immutable; the rate
/// limiter owns the only mutable state and serializes it internally.
pub struct GatewayContext {
    pub routes: RouteTable,
    pub limiter: RateLimiter,
    pub authenticator: Authenticator,
    pub assets: StaticAssets,
    pub forwarder: Arc<dyn Forwarder>,
    pub max_body_bytes: usize,
}

impl GatewayContext {
    /// Build a context with the production HTTP forwarder.
    pub fn new(config: &GatewayConfig) -> Self {
        let forwarder = Arc::new(HttpForwarder::new(
            Duration::from_secs(config.timeouts.upstream_secs),
            config.security.max_body_bytes,
        ));
        Self::with_forwarder(config, forwarder)
    }

    /// Build a context around an injected forwarder (used by tests).
    pub fn with_forwarder(config: &GatewayConfig, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            routes: RouteTable::from_config(&config.routing),
            limiter: RateLimiter::new(
                config.rate_limit.max_requests,
                Duration::from_secs(config.rate_limit.window_secs),
            ),
            authenticator: Authenticator::new(config.auth.secret_key.clone()),
            assets: StaticAssets::new(
                config.static_assets.root.clone(),
                &config.static_assets.index,
            ),
            forwarder,
            max_body_bytes: config.security.max_body_bytes,
        }
    }
}
