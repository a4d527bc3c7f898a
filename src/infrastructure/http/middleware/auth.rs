use crate::application::services::{
    ApiTokenService, AuthService, FileService, IdentityResolver, SessionService,
};
use crate::domain::entities::ApiRequest;
use crate::infrastructure::http::middleware::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query, Request, State},
    http::{request::Parts, HeaderMap, Uri},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::convert::Infallible;

#[derive(Clone)]
pub struct AppState {
    pub identity_resolver: IdentityResolver,
    pub session_service: SessionService,
    pub auth_service: AuthService,
    pub api_token_service: ApiTokenService,
    pub file_service: FileService,
}

/// User id resolved for the current API request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUser(pub String);

/// Build the resolver's view of a request. A malformed query string is
/// treated as having no parameters.
pub fn describe_request(uri: &Uri, headers: &HeaderMap) -> ApiRequest {
    let query = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map(|Query(query)| query)
        .unwrap_or_default();

    ApiRequest::new(query, headers.clone())
}

#[async_trait]
impl<S> FromRequestParts<S> for ApiRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(describe_request(&parts.uri, &parts.headers))
    }
}

/// Resolve the caller through the identity resolver and reject with 401
/// when no identity can be established
pub async fn require_api_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_request = describe_request(request.uri(), request.headers());

    let user_id = state
        .identity_resolver
        .resolve(&api_request)
        .await
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(ApiUser(user_id));

    Ok(next.run(request).await)
}
