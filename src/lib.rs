//! Student portal gateway.
//!
//! Sits in front of the portal's page renderer and the institutional API:
//! gates every request on the session cookie and serves portal data from
//! the upstream API with the visitor's bearer credential attached.

pub mod activity;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::PortalConfig;
pub use http::PortalServer;
pub use lifecycle::Shutdown;
