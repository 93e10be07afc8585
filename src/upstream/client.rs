//! Upstream API client.
//!
//! # Responsibilities
//! - Resolve `base_url + path`
//! - Attach the bearer credential (wins over caller headers)
//! - One attempt per call, bounded by the configured timeout
//! - Collapse every failure into `None`, logged once
//!
//! # Design Decisions
//! - No retries: portal pages render a "no data" state instead
//! - Failures are typed internally (`UpstreamError`) for logs and metrics
//! - The client holds no lock across the outbound await

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{
    header::{ACCEPT, AUTHORIZATION},
    HeaderValue, StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::security::Session;
use crate::upstream::credentials::{CredentialSource, SessionCredentials};
use crate::upstream::endpoints::Endpoint;
use crate::upstream::request::ProxyRequest;

/// Why an upstream call produced no data.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("upstream path {0:?} must start with '/'")]
    InvalidPath(String),

    #[error("no credential available for the current session")]
    MissingCredential,

    #[error("credential is not a valid header value")]
    InvalidCredential,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("response body does not match the declared schema: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::BaseUrl(_) | UpstreamError::InvalidPath(_) => "invalid_request",
            UpstreamError::MissingCredential | UpstreamError::InvalidCredential => "no_credential",
            UpstreamError::Transport(e) if e.is_timeout() => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
        }
    }
}

/// Client for the institutional backend API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialSource>,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    pub fn new(
        config: &UpstreamConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Client that forwards each visitor's session token as the credential.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Self::new(config, Arc::new(SessionCredentials))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Call a declared endpoint. `None` means no data.
    pub async fn fetch<E: Endpoint>(&self, session: &Session, endpoint: &E) -> Option<E::Response> {
        self.send(session, endpoint.request()).await
    }

    /// Send a described request and parse the JSON response. Every failure
    /// is logged here, exactly once, and comes back as `None`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: ProxyRequest,
    ) -> Option<T> {
        let start = Instant::now();

        match self.try_send(session, &request).await {
            Ok(value) => {
                tracing::debug!(
                    method = %request.method,
                    route = %request.route(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream call succeeded"
                );
                metrics::record_upstream(request.method.as_str(), "ok", start);
                Some(value)
            }
            Err(e) => {
                tracing::warn!(
                    method = %request.method,
                    route = %request.route(),
                    outcome = e.outcome(),
                    error = %e,
                    "Upstream call failed"
                );
                metrics::record_upstream(request.method.as_str(), e.outcome(), start);
                None
            }
        }
    }

    /// Like [`send`](Self::send) but surfaces the failure instead of logging it.
    pub async fn try_send<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: &ProxyRequest,
    ) -> Result<T, UpstreamError> {
        let url = self.resolve(&request.path)?;

        let token = self
            .credentials
            .bearer_token(session)
            .ok_or(UpstreamError::MissingCredential)?;
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| UpstreamError::InvalidCredential)?;
        bearer.set_sensitive(true);

        let mut headers = request.headers.clone();
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        // Injected credential replaces any caller-supplied value.
        headers.insert(AUTHORIZATION, bearer);

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn resolve(&self, path: &str) -> Result<Url, UpstreamError> {
        if !path.starts_with('/') {
            return Err(UpstreamError::InvalidPath(path.to_string()));
        }
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|_| UpstreamError::InvalidPath(path.to_string()))
    }
}
