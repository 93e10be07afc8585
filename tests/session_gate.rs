//! Session gate behaviour through the fully layered router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;

use portal_gateway::security::return_path::decode_return_path;
use portal_gateway::security::ReturnPath;

mod common;

use common::MemoryRecorder;

async fn send(uri: &str, cookie: Option<&str>) -> (Response, common::Captured) {
    let (pages, captured) = common::start_mock_backend(200, "<html>portal page</html>").await;
    let upstream = common::closed_port().await;
    let server = common::test_server(
        common::test_config(upstream, pages),
        Arc::new(MemoryRecorder::default()),
    );

    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    let response = server
        .router()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    (response, captured)
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_protected_page_without_cookie_redirects_to_login() {
    let (response, captured) = send("/dashboard/courses", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?from=%2Fdashboard%2Fcourses");
    assert!(captured.lock().unwrap().is_empty(), "page renderer must not be hit");
}

#[tokio::test]
async fn test_login_with_cookie_redirects_to_root() {
    let (response, _) = send("/login", Some("session-token=abc")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_auth_session_endpoint_never_redirected() {
    let (response, _) = send("/api/auth/session", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"authenticated": false, "return_to": null})
    );
}

#[tokio::test]
async fn test_query_is_encoded_into_return_path() {
    let (response, _) = send("/result?semester=2024-1", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?from=%2Fresult%3Fsemester%3D2024-1");
}

#[tokio::test]
async fn test_return_path_round_trips_through_redirect() {
    let target = "/ledger?semester=2024%20Spring&view=d%C3%A9tail&page=2";
    let (response, _) = send(target, None).await;

    let location = location(&response).to_string();
    let (_, query) = location.split_once('?').unwrap();
    let encoded = query.strip_prefix("from=").unwrap();

    assert_eq!(decode_return_path(encoded), target);
    assert_eq!(ReturnPath::from_query(Some(query), "/").as_str(), target);
}

#[tokio::test]
async fn test_public_paths_pass_without_cookie() {
    let (response, _) = send("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (response, captured) = send("/login?from=%2Fresult", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(captured.lock().unwrap()[0].target, "/login?from=%2Fresult");
}

#[tokio::test]
async fn test_protected_page_with_cookie_is_forwarded_with_cookie() {
    let (response, captured) =
        send("/dashboard/courses?tab=current", Some("theme=dark; session-token=abc")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<html>portal page</html>");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].target, "/dashboard/courses?tab=current");
    assert_eq!(captured[0].header("cookie"), Some("theme=dark; session-token=abc"));
    assert!(captured[0].header("x-request-id").is_some());
}

#[tokio::test]
async fn test_api_routes_are_gated_too() {
    let (response, _) = send("/api/portal/courses", None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?from=%2Fapi%2Fportal%2Fcourses");
}

#[tokio::test]
async fn test_empty_cookie_counts_as_no_session() {
    let (response, _) = send("/notices", Some("session-token=")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?from=%2Fnotices");
}

#[tokio::test]
async fn test_session_probe_reports_return_path() {
    let (response, _) = send(
        "/api/auth/session?from=%2Fresult%3Fsemester%3D2024-1",
        Some("session-token=abc"),
    )
    .await;

    assert_eq!(
        body_json(response).await,
        serde_json::json!({"authenticated": true, "return_to": "/result?semester=2024-1"})
    );
}

#[tokio::test]
async fn test_session_probe_ignores_external_return_path() {
    let (response, _) = send(
        "/api/auth/session?from=https%3A%2F%2Fevil.example",
        Some("session-token=abc"),
    )
    .await;

    assert_eq!(
        body_json(response).await,
        serde_json::json!({"authenticated": true, "return_to": "/"})
    );
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (response, _) = send("/health", None).await;
    assert!(response.headers().contains_key("x-request-id"));

    let (response, _) = send("/dashboard", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_page_renderer_down_is_bad_gateway() {
    let upstream = common::closed_port().await;
    let pages = common::closed_port().await;
    let server = common::test_server(
        common::test_config(upstream, pages),
        Arc::new(MemoryRecorder::default()),
    );

    let response = server
        .router()
        .oneshot(
            Request::builder()
                .uri("/dashboard")
                .header(header::COOKIE, "session-token=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
