//! RizGate — a minimal edge gateway.
//!
//! Authenticates inbound requests with a shared secret, enforces a
//! per-client request-rate ceiling, routes API requests to upstream services
//! by path prefix, and serves a bundled static UI for everything else.
//!
//! # Request lifecycle
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                    RIZGATE                       │
//!                  │                                                  │
//!  Client ─────────┼─▶ http/server ─▶ gateway/pipeline                │
//!                  │        CORS → body ceiling → rate check          │
//!                  │              │                                   │
//!                  │     ┌────────┴─────────┐                         │
//!                  │     ▼                  ▼                         │
//!                  │  /status        routing/router                   │
//!                  │                 │            │                   │
//!                  │            /v1/* paths   other paths             │
//!                  │                 ▼            ▼                   │
//!                  │          security/auth    assets (SPA            │
//!                  │                 ▼          fallback)             │
//!  Client ◀────────┼───────── http/forwarder ◀──── upstream           │
//!                  │                                                  │
//!                  │  cross-cutting: config · security headers ·      │
//!                  │  tracing · error mapping                         │
//!                  └──────────────────────────────────────────────────┘
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod routing;
pub mod security;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::GatewayContext;
pub use http::GatewayServer;
