//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → router.rs (prefix match against the compiled table)
//!     → Return: Upstream { route, remainder } | StaticAsset | NotFound
//!
//! Table compilation (at startup):
//!     RoutingConfig
//!     → one entry per upstream namespace, most specific segment first
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Compiled at startup, immutable at runtime (no locks needed)
//! - No regex in the hot path; single-segment prefix matching only
//! - Deterministic: the same path always resolves the same way

pub mod router;

pub use router::{RouteDecision, RouteEntry, RouteTable};
