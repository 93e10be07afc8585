//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → table.rs (partition lookup)
//!     → matcher.rs (evaluate prefix conditions)
//!     → Return: Reserved | Public | Protected
//!
//! Table Compilation (at startup):
//!     SessionConfig prefixes
//!     → Compile prefix matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same path always lands in the same partition

pub mod matcher;
pub mod table;

pub use table::{RouteClass, RouteTable};
