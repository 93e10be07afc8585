//! Return-path parameter handling.
//!
//! The originally requested path and query are percent-encoded exactly once
//! and carried to the login entry point as `from`. Reading it back decodes
//! exactly once.
//!
//! The encode set matches `encodeURIComponent` minus `!'()*`: a space is
//! `%20`, never `+`, so a login page may decode with either
//! `decodeURIComponent` or a form decoder.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

/// Everything except ASCII alphanumerics and `-_.~`.
const RETURN_PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Query parameter carrying the return path.
pub const RETURN_PATH_PARAM: &str = "from";

/// Join a request path with its (possibly empty) query string.
pub fn path_and_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    }
}

/// Percent-encode a path+query for use as a query parameter value.
pub fn encode_return_path(path_and_query: &str) -> String {
    utf8_percent_encode(path_and_query, RETURN_PATH_ENCODE_SET).to_string()
}

/// Inverse of [`encode_return_path`].
pub fn decode_return_path(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

/// `login_path?from=<encoded path+query>`.
pub fn login_redirect_url(login_path: &str, path: &str, query: Option<&str>) -> String {
    format!(
        "{login_path}?{RETURN_PATH_PARAM}={}",
        encode_return_path(&path_and_query(path, query))
    )
}

/// Where to send a visitor once they have a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnPath(String);

impl ReturnPath {
    /// Read `from` out of a raw query string. Anything that is not a local
    /// path resolves to `fallback`.
    pub fn from_query(query: Option<&str>, fallback: &str) -> Self {
        let requested = query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == RETURN_PATH_PARAM)
                .map(|(_, value)| value.into_owned())
        });

        match requested {
            Some(path) if is_local_path(&path) => Self(path),
            _ => Self(fallback.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}
