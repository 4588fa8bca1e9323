//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers, request ID)
//!     → gateway pipeline (admission, routing)
//!     → forwarder.rs (upstream relay for authenticated API requests)
//!     → Send to client
//! ```

pub mod forwarder;
pub mod server;

pub use forwarder::{Forwarder, HttpForwarder};
pub use server::{AppState, GatewayServer};
