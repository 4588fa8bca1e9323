//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file)
//!     → loader.rs (read & validate)
//!     → GatewayConfig (plain struct, immutable)
//!     → consumed once at startup by GatewayContext / GatewayServer
//! ```
//!
//! # Design Decisions
//! - The core never touches the process environment; it only sees a
//!   `GatewayConfig` produced by the loader.
//! - All sections have defaults so tests can build configs from literals.
//! - Unset upstream base URLs load as `None` and fail per-request, never by
//!   proxying to a relative path.

pub mod loader;
pub mod schema;

pub use loader::{from_env, ConfigError};
pub use schema::{
    AuthConfig, GatewayConfig, ListenerConfig, RateLimitConfig, RoutingConfig, SecurityConfig,
    StaticAssetConfig, TimeoutConfig, UpstreamConfig,
};
