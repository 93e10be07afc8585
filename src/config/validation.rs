//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the route table is coherent (login page public, root not the
//!   login page, no overlaps) so the gate cannot redirect in a loop
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PortalConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::PortalConfig;
use crate::routing::{RouteClass, RouteTable};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must start with '/' (got {value:?})")]
    NotAbsolutePath { field: &'static str, value: String },

    #[error("login path {0:?} is under an auth-provider reserved prefix")]
    LoginPathReserved(String),

    #[error("login path {0:?} is not covered by a public prefix")]
    LoginPathNotPublic(String),

    #[error("root path {0:?} is the login path")]
    RootIsLoginPath(String),

    #[error("root path {0:?} is under an auth-provider reserved prefix")]
    RootPathReserved(String),

    #[error("public prefix {public:?} overlaps reserved prefix {reserved:?}")]
    OverlappingPrefix { public: String, reserved: String },

    #[error("session cookie name must not be empty")]
    EmptyCookieName,

    #[error("upstream base_url {0:?} is not a valid http(s) URL")]
    InvalidUpstreamUrl(String),

    #[error("{field} {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &PortalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let session = &config.session;

    if session.cookie_name.trim().is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }

    check_absolute(&mut errors, "session.login_path", &session.login_path);
    check_absolute(&mut errors, "session.root_path", &session.root_path);
    for prefix in &session.reserved_prefixes {
        check_absolute(&mut errors, "session.reserved_prefixes", prefix);
    }
    for prefix in &session.public_prefixes {
        check_absolute(&mut errors, "session.public_prefixes", prefix);
    }

    let table = RouteTable::from_config(session);
    if session.login_path.starts_with('/') {
        match table.classify(&session.login_path) {
            RouteClass::Public => {}
            RouteClass::Reserved => {
                errors.push(ValidationError::LoginPathReserved(session.login_path.clone()))
            }
            RouteClass::Protected => {
                errors.push(ValidationError::LoginPathNotPublic(session.login_path.clone()))
            }
        }
    }
    if session.root_path == session.login_path {
        errors.push(ValidationError::RootIsLoginPath(session.root_path.clone()));
    } else if table.classify(&session.root_path) == RouteClass::Reserved {
        errors.push(ValidationError::RootPathReserved(session.root_path.clone()));
    }

    for public in &session.public_prefixes {
        for reserved in &session.reserved_prefixes {
            if public.starts_with(reserved.as_str()) || reserved.starts_with(public.as_str()) {
                errors.push(ValidationError::OverlappingPrefix {
                    public: public.clone(),
                    reserved: reserved.clone(),
                });
            }
        }
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidUpstreamUrl(
            config.upstream.base_url.clone(),
        )),
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_address(&mut errors, "pages.address", &config.pages.address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_absolute(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.starts_with('/') {
        errors.push(ValidationError::NotAbsolutePath {
            field,
            value: value.to_string(),
        });
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
