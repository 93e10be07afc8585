//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the portal gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Session gate: cookie name, login entry point and route table.
    pub session: SessionConfig,

    /// Institutional backend API.
    pub upstream: UpstreamConfig,

    /// Page renderer that receives gated page requests.
    pub pages: PagesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Activity log sink.
    pub activity: ActivityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Session gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,

    /// Login entry point. Receives the `from` return-path parameter.
    pub login_path: String,

    /// Where an already authenticated visitor of the login page is sent.
    pub root_path: String,

    /// Prefixes owned by the authentication provider. Never gated.
    pub reserved_prefixes: Vec<String>,

    /// Prefixes servable without a session. Everything else is protected.
    pub public_prefixes: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session-token".to_string(),
            login_path: "/login".to_string(),
            root_path: "/".to_string(),
            reserved_prefixes: vec!["/api/auth/".to_string()],
            public_prefixes: vec![
                "/login".to_string(),
                "/forgot-password".to_string(),
                "/health".to_string(),
                "/static/".to_string(),
                "/favicon.ico".to_string(),
            ],
        }
    }
}

/// Institutional backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; request paths are appended to it.
    pub base_url: String,

    /// Per-call timeout in seconds. Covers the single attempt end to end.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Page renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Renderer address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Where activity events go.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivitySinkKind {
    /// Structured log events on the `activity` target.
    Tracing,
    /// JSON documents appended to `ActivityConfig::path`, one per line.
    File,
    /// Dropped.
    Disabled,
}

/// Activity log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub sink: ActivitySinkKind,

    /// Output file for the `file` sink.
    pub path: String,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            sink: ActivitySinkKind::Tracing,
            path: "activity.jsonl".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
