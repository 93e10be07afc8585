//! Portal data endpoints.
//!
//! Every response is `200 {"data": ...}`; `null` data means the upstream API
//! had nothing usable and the page should render its empty state.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::Value;

use crate::http::server::AppState;
use crate::security::Session;
use crate::upstream::endpoints::{
    Notices, PaymentLedger, ProfileUpdate, RegisteredCourses, SemesterList, SemesterResults,
    StudentProfile, UpdateProfile,
};
use crate::upstream::{Endpoint, ProxyRequest};

/// Prefix of the raw JSON passthrough route.
pub const PASSTHROUGH_PREFIX: &str = "/api/upstream";

/// Body of every portal data response.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: Option<T>,
}

/// Routes mounted under `/api/portal`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/semesters", get(semesters))
        .route("/ledger/{semester}", get(ledger))
        .route("/results/{semester}", get(results))
        .route("/courses", get(courses))
        .route("/notices", get(notices))
        .route("/profile", get(profile).put(update_profile))
}

/// Fetch a declared endpoint and record one activity event for it.
async fn fetch_recorded<E: Endpoint>(
    state: &AppState,
    session: &Session,
    endpoint: E,
    event: &str,
    mut attributes: Vec<(&str, String)>,
) -> Json<DataEnvelope<E::Response>> {
    let data = state.upstream.fetch(session, &endpoint).await;

    attributes.push(("has_data", data.is_some().to_string()));
    state.activity.record(event, &attributes);

    Json(DataEnvelope { data })
}

async fn semesters(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    fetch_recorded(&state, &session, SemesterList, "view_semesters", Vec::new()).await
}

async fn ledger(
    State(state): State<AppState>,
    session: Session,
    Path(semester): Path<String>,
) -> impl IntoResponse {
    let attributes = vec![("semester", semester.clone())];
    fetch_recorded(&state, &session, PaymentLedger { semester }, "view_ledger", attributes).await
}

async fn results(
    State(state): State<AppState>,
    session: Session,
    Path(semester): Path<String>,
) -> impl IntoResponse {
    let attributes = vec![("semester", semester.clone())];
    fetch_recorded(&state, &session, SemesterResults { semester }, "view_results", attributes)
        .await
}

async fn courses(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    fetch_recorded(&state, &session, RegisteredCourses, "view_courses", Vec::new()).await
}

async fn notices(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    fetch_recorded(&state, &session, Notices, "view_notices", Vec::new()).await
}

async fn profile(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    fetch_recorded(&state, &session, StudentProfile, "view_profile", Vec::new()).await
}

async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<ProfileUpdate>,
) -> impl IntoResponse {
    fetch_recorded(&state, &session, UpdateProfile(update), "update_profile", Vec::new()).await
}

/// Raw JSON passthrough: `/api/upstream/<path>?<query>` → `<base>/<path>?<query>`.
pub async fn passthrough(
    State(state): State<AppState>,
    session: Session,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix(PASSTHROUGH_PREFIX).unwrap_or("/");
    if has_dot_segment(path) {
        tracing::debug!(path, "Passthrough path has dot segments");
        return (StatusCode::BAD_REQUEST, "Path must not contain dot segments").into_response();
    }
    let path = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut request = ProxyRequest::new(method, path);
    if !body.is_empty() {
        match serde_json::from_slice::<Value>(&body) {
            Ok(json) => request = request.json(json),
            Err(e) => {
                tracing::debug!(error = %e, "Passthrough body is not JSON");
                return (StatusCode::BAD_REQUEST, "Request body must be JSON").into_response();
            }
        }
    }

    let data: Option<Value> = state.upstream.send(&session, request).await;
    Json(DataEnvelope { data }).into_response()
}

/// True when any segment is `.` or `..`, raw or percent-encoded. The URL
/// parser would resolve those against the upstream base path.
fn has_dot_segment(path: &str) -> bool {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    decoded
        .split(['/', '\\'])
        .any(|segment| segment == "." || segment == "..")
}
