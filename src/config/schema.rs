//! Configuration schema definitions.
//!
//! The gateway consumes this plain struct; environment access lives in
//! `loader.rs`. All types derive Serde traits so configs can also be read
//! from files or embedded in tests as literals.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Shared-secret authentication settings.
    pub auth: AuthConfig,

    /// API prefix and upstream namespaces.
    pub routing: RoutingConfig,

    /// Per-client rate limiting.
    pub rate_limit: RateLimitConfig,

    /// Request hardening limits.
    pub security: SecurityConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Bundled UI serving.
    pub static_assets: StaticAssetConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4000".to_string(),
        }
    }
}

/// Shared-secret authentication.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// The shared secret compared against the `X-RIZ-KEY` header. An empty
    /// secret rejects every API request.
    pub secret_key: String,
}

/// Prefix routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Common prefix under which requests require authentication and are
    /// dispatched to upstreams.
    pub api_prefix: String,

    /// One entry per upstream namespace.
    pub upstreams: Vec<UpstreamConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/v1".to_string(),
            upstreams: Vec::new(),
        }
    }
}

/// A single upstream namespace beneath the API prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Name used for logging and error messages.
    pub name: String,

    /// Path segment directly after the API prefix (e.g., "wa").
    pub segment: String,

    /// Base URL requests are forwarded to. `None` means the upstream is not
    /// configured; matching requests fail with a configuration error.
    pub base_url: Option<String>,
}

/// Rate limiting configuration (fixed window).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per client per window.
    pub max_requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 50,
            window_secs: 60,
        }
    }
}

/// Request hardening limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes, enforced for direct and relayed
    /// requests alike.
    pub max_body_bytes: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2 MiB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time budget for an inbound request in seconds.
    pub request_secs: u64,

    /// Ceiling for a single upstream call in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 10,
        }
    }
}

/// Bundled UI serving.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticAssetConfig {
    /// Root of the prebuilt asset tree.
    pub root: PathBuf,

    /// Index document served for unmatched non-asset paths.
    pub index: String,
}

impl Default for StaticAssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            index: "index.html".to_string(),
        }
    }
}
