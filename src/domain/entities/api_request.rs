use axum::http::header::{AsHeaderName, AUTHORIZATION};
use axum::http::HeaderMap;
use std::collections::HashMap;

/// Query parameter naming the user a session-authenticated caller acts as
pub const USER_ID_PARAM: &str = "userId";

/// Authorization scheme prefix for API tokens (case-sensitive)
pub const BEARER_PREFIX: &str = "Bearer ";

/// Framework-neutral description of an inbound API request.
///
/// Only the parts identity resolution looks at are kept: the decoded query
/// parameters and the request headers (which carry the session cookie and
/// the authorization header).
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(query: HashMap<String, String>, headers: HeaderMap) -> Self {
        Self { query, headers }
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Header value as text; values that are not valid visible ASCII count as absent
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Token following the `Bearer ` prefix of the authorization header.
    /// An empty token is still returned.
    pub fn bearer_token(&self) -> Option<&str> {
        self.header(AUTHORIZATION)?.strip_prefix(BEARER_PREFIX)
    }
}
