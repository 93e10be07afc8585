//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → session.rs (parse session cookie)
//!     → session_gate.rs (reserved / public / protected decision)
//!         → redirect: return_path.rs builds login?from=...
//!         → pass: Session inserted into request extensions
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - The gate decision is a pure function; the middleware only adapts it
//! - Unknown paths are protected
//! - The auth provider's own endpoints are never gated

pub mod return_path;
pub mod session;
pub mod session_gate;

pub use return_path::ReturnPath;
pub use session::Session;
pub use session_gate::{session_gate_middleware, GateDecision, SessionGate};
