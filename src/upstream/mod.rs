//! Upstream proxy subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → endpoints.rs (declared request + response schema)
//!     → request.rs (ProxyRequest descriptor)
//!     → client.rs (resolve URL, attach credential, single attempt)
//!         → credentials.rs (bearer token for the current session)
//!     → Some(parsed response) | None
//! ```

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod request;

pub use client::{UpstreamClient, UpstreamError};
pub use credentials::{CredentialSource, SessionCredentials};
pub use endpoints::Endpoint;
pub use request::ProxyRequest;
