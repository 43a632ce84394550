//! Admin session checks.

use axum::http::{header, HeaderMap};

/// Decides whether a request carries an admin session.
pub trait SessionGate: Send + Sync {
    fn is_authorized(&self, headers: &HeaderMap) -> bool;
}

/// Accepts a fixed set of tokens sent as `Authorization: Bearer <token>` or
/// in the session cookie.
#[derive(Debug, Clone)]
pub struct TokenGate {
    tokens: Vec<String>,
    cookie: String,
}

impl TokenGate {
    pub fn new(tokens: Vec<String>, cookie: impl Into<String>) -> Self {
        Self {
            tokens,
            cookie: cookie.into(),
        }
    }

    fn accepts(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.tokens.iter().any(|t| t == candidate)
    }

    fn bearer(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
    }

    fn cookie_value<'h>(&self, headers: &'h HeaderMap) -> Option<&'h str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie)
            .map(|(_, value)| value)
    }
}

impl SessionGate for TokenGate {
    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        Self::bearer(headers).is_some_and(|t| self.accepts(t))
            || self.cookie_value(headers).is_some_and(|t| self.accepts(t))
    }
}
