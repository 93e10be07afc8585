//! Page forwarding.
//!
//! Requests that passed the gate and match no gateway route go to the page
//! renderer unchanged, cookies included.

use std::str::FromStr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Plain-HTTP client bound to the page renderer.
#[derive(Clone)]
pub struct PageForwarder {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl PageForwarder {
    pub fn new(address: &str) -> Result<Self, InvalidUri> {
        let authority = Authority::from_str(address)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self { client, authority })
    }

    /// Point the request's URI at the renderer, keeping path and query.
    fn rewrite(&self, uri: &Uri) -> Result<Uri, axum::http::Error> {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Ok(Uri::from_parts(parts)?)
    }
}

/// Fallback handler: forward to the page renderer.
pub async fn forward_page(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let forwarder = &state.pages;

    let (mut parts, body) = request.into_parts();
    parts.uri = match forwarder.rewrite(&parts.uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot rewrite page URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        uri = %parts.uri,
        "Forwarding page request"
    );

    match forwarder.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_forward(response.status().as_u16(), start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Page renderer unreachable");
            metrics::record_forward(StatusCode::BAD_GATEWAY.as_u16(), start);
            (StatusCode::BAD_GATEWAY, "Page renderer unavailable").into_response()
        }
    }
}
