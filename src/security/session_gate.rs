//! Session gate middleware.
//!
//! Decides, per request, whether to let it through or send the visitor to
//! the login entry point.
//!
//! # Decision Order
//! ```text
//! reserved prefix            → Pass (always)
//! public, login page + token → Redirect(root)
//! public                     → Pass
//! protected, no token        → Redirect(login?from=<path+query>)
//! protected, token           → Pass
//! ```
//!
//! Cookie presence is all the gate checks. Token validity is the upstream
//! API's business.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::SessionConfig;
use crate::routing::{RouteClass, RouteTable};
use crate::security::return_path::login_redirect_url;
use crate::security::session::Session;

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(String),
}

/// Compiled gate: route table plus the login entry point.
#[derive(Debug, Clone)]
pub struct SessionGate {
    table: RouteTable,
    cookie_name: String,
    login_path: String,
    root_path: String,
}

impl SessionGate {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            table: RouteTable::from_config(config),
            cookie_name: config.cookie_name.clone(),
            login_path: config.login_path.clone(),
            root_path: config.root_path.clone(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Pure decision over `(path, query, token present)`.
    pub fn decide(&self, path: &str, query: Option<&str>, has_token: bool) -> GateDecision {
        match self.table.classify(path) {
            RouteClass::Reserved => GateDecision::Pass,
            RouteClass::Public if has_token && path == self.login_path => {
                GateDecision::Redirect(self.root_path.clone())
            }
            RouteClass::Public => GateDecision::Pass,
            RouteClass::Protected if has_token => GateDecision::Pass,
            RouteClass::Protected => {
                GateDecision::Redirect(login_redirect_url(&self.login_path, path, query))
            }
        }
    }
}

/// Axum middleware wrapping [`SessionGate::decide`].
///
/// On pass, the parsed [`Session`] rides along in the request extensions.
pub async fn session_gate_middleware(
    State(gate): State<Arc<SessionGate>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = Session::from_headers(req.headers(), gate.cookie_name());

    let decision = gate.decide(
        req.uri().path(),
        req.uri().query(),
        session.is_authenticated(),
    );

    match decision {
        GateDecision::Pass => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        GateDecision::Redirect(location) => Redirect::temporary(&location).into_response(),
    }
}
