//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID)
//!     → security::session_gate (pass or redirect)
//!     → auth.rs     /api/auth/session
//!       portal.rs   /api/portal/*, /api/upstream/*
//!       forward.rs  everything else → page renderer
//! ```

pub mod auth;
pub mod forward;
pub mod portal;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, PortalServer, ServerError};
