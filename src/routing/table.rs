//! Route classification table.
//!
//! # Responsibilities
//! - Hold the reserved, public and protected partitions
//! - Classify a path into exactly one of them
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Reserved prefixes are checked before the public list
//! - Unmatched paths default to protected

use crate::config::SessionConfig;
use crate::routing::matcher::{AnyPrefixMatcher, Matcher};

/// Which partition a path falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Owned by the authentication provider; never gated.
    Reserved,
    /// Servable without a session.
    Public,
    /// Requires a session.
    Protected,
}

/// Static partition of path prefixes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    reserved: AnyPrefixMatcher,
    public: AnyPrefixMatcher,
}

impl RouteTable {
    pub fn new<R, P, S>(reserved: R, public: P) -> Self
    where
        R: IntoIterator<Item = S>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: AnyPrefixMatcher::new(reserved),
            public: AnyPrefixMatcher::new(public),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.reserved_prefixes.iter().cloned(),
            config.public_prefixes.iter().cloned(),
        )
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.reserved.matches(path) {
            RouteClass::Reserved
        } else if self.public.matches(path) {
            RouteClass::Public
        } else {
            RouteClass::Protected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::from_config(&SessionConfig::default())
    }

    #[test]
    fn test_default_table() {
        let table = table();

        assert_eq!(table.classify("/api/auth/session"), RouteClass::Reserved);
        assert_eq!(table.classify("/api/auth/callback/credentials"), RouteClass::Reserved);
        assert_eq!(table.classify("/login"), RouteClass::Public);
        assert_eq!(table.classify("/static/logo.svg"), RouteClass::Public);
        assert_eq!(table.classify("/dashboard/courses"), RouteClass::Protected);
        assert_eq!(table.classify("/result"), RouteClass::Protected);
        assert_eq!(table.classify("/"), RouteClass::Protected);
    }

    #[test]
    fn test_lookalike_paths_are_protected() {
        let table = table();

        for path in [
            "/login-history",
            "/loginAs/admin",
            "/healthcare",
            "/healthcare/records",
            "/forgot-passwordless/secret",
            "/favicon.ico.bak",
        ] {
            assert_eq!(table.classify(path), RouteClass::Protected, "{path}");
        }
        assert_eq!(table.classify("/health"), RouteClass::Public);
        assert_eq!(table.classify("/login/help"), RouteClass::Public);
    }

    #[test]
    fn test_unmatched_defaults_to_protected() {
        let table = RouteTable::new(Vec::<String>::new(), Vec::new());

        assert_eq!(table.classify("/anything"), RouteClass::Protected);
        assert_eq!(table.classify("/login"), RouteClass::Protected);
    }

    #[test]
    fn test_reserved_wins_over_public() {
        let table = RouteTable::new(["/api/auth/"], ["/api/"]);

        assert_eq!(table.classify("/api/auth/session"), RouteClass::Reserved);
        assert_eq!(table.classify("/api/other"), RouteClass::Public);
    }
}
