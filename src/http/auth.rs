//! Session probe under the auth-provider prefix.

use axum::{
    extract::{RawQuery, State},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::security::{ReturnPath, Session};

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    /// Where the login page should send the visitor, once authenticated.
    pub return_to: Option<String>,
}

/// `GET /api/auth/session[?from=...]`
pub async fn session_status(
    State(state): State<AppState>,
    session: Session,
    RawQuery(query): RawQuery,
) -> Json<SessionStatus> {
    let authenticated = session.is_authenticated();
    let return_to = authenticated.then(|| {
        ReturnPath::from_query(query.as_deref(), state.gate.root_path()).into_inner()
    });

    Json(SessionStatus {
        authenticated,
        return_to,
    })
}
