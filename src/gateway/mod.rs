//! Gateway core: request admission and routing.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → pipeline.rs, fixed stage order:
//!         CORS preflight → body ceiling → rate check
//!         → liveness | route dispatch
//!         → (authenticate → proxy) | static serve
//!     → hardening + CORS headers attached to every response
//! ```
//!
//! # Design Decisions
//! - Stages are plain functions over `StageOutcome`; the driver composes
//!   them, so the lifecycle is testable without a network listener.
//! - All shared state lives in `GatewayContext`, constructed once at
//!   startup; no ambient globals.
//! - Exactly one response and one log line per rejected request.

pub mod context;
pub mod pipeline;

pub use context::GatewayContext;
pub use pipeline::{handle, StageOutcome};
