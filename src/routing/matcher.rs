//! Path matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive, on segment boundaries)
//! - Combine several prefixes with OR semantics
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - `/login` covers `/login` and `/login/...`, never `/login-history`;
//!   a prefix ending in `/` covers everything below it
//! - No regex to guarantee O(n) matching
//! - Matchers see the path only; query strings never participate

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || self.prefix.ends_with('/'),
            None => false,
        }
    }
}

/// Matches when any of its prefixes matches.
#[derive(Debug, Clone, Default)]
pub struct AnyPrefixMatcher {
    matchers: Vec<PathPrefixMatcher>,
}

impl AnyPrefixMatcher {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matchers: prefixes.into_iter().map(PathPrefixMatcher::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}
