//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (per-client fixed-window admission)
//!     → auth.rs (shared-secret check, API paths only)
//! Outgoing response:
//!     → headers.rs (hardening headers on every response)
//! ```
//!
//! # Design Decisions
//! - Fail closed: any failed check rejects the request.
//! - The limiter key is the caller's network address; it is never treated as
//!   an authenticated identity.
//! - Secret comparison is constant-time.

pub mod auth;
pub mod headers;
pub mod rate_limit;

pub use auth::{Authenticator, API_KEY_HEADER};
pub use rate_limit::RateLimiter;
