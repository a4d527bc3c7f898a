use crate::domain::entities::{ApiRequest, USER_ID_PARAM};
use crate::domain::ports::session_provider::SessionProvider;
use crate::domain::ports::time_service::TimeService;
use crate::domain::ports::token_store::TokenStore;
use std::sync::Arc;

/// Resolves the user an API request acts as.
///
/// Two credentials are recognised, checked in this order:
///
/// 1. A `userId` query parameter. It must name the user of the session
///    attached to the request. When the parameter is present the outcome is
///    decided by the session alone; a bearer token on the same request is
///    never consulted.
/// 2. An `Authorization: Bearer <token>` header. The token must exist in the
///    token store and must not have expired.
///
/// Resolution never fails: missing credentials, mismatches and lookup
/// errors all yield `None`, which callers treat as unauthenticated.
#[derive(Clone)]
pub struct IdentityResolver {
    session_provider: Arc<dyn SessionProvider>,
    token_store: Arc<dyn TokenStore>,
    time_service: Arc<dyn TimeService>,
}

impl IdentityResolver {
    pub fn new(
        session_provider: Arc<dyn SessionProvider>,
        token_store: Arc<dyn TokenStore>,
        time_service: Arc<dyn TimeService>,
    ) -> Self {
        Self {
            session_provider,
            token_store,
            time_service,
        }
    }

    pub async fn resolve(&self, request: &ApiRequest) -> Option<String> {
        let (method, user_id) = if let Some(user_id) = request.query_param(USER_ID_PARAM) {
            ("session", self.resolve_session_user(request, user_id).await)
        } else if let Some(token) = request.bearer_token() {
            ("token", self.resolve_token_user(token).await)
        } else {
            ("none", None)
        };

        let outcome = if user_id.is_some() { "resolved" } else { "rejected" };
        metrics::counter!(
            "identity_resolutions_total",
            "method" => method,
            "outcome" => outcome
        )
        .increment(1);
        tracing::debug!("Identity resolution finished ({}, {})", method, outcome);

        user_id
    }

    async fn resolve_session_user(&self, request: &ApiRequest, user_id: &str) -> Option<String> {
        let current_user = match self.session_provider.get_current_user(request).await {
            Ok(current_user) => current_user,
            Err(e) => {
                tracing::warn!("Session lookup failed during identity resolution: {}", e);
                return None;
            }
        };

        match current_user {
            Some(user) if user.id == user_id => Some(user.id),
            Some(user) => {
                tracing::debug!(
                    "userId parameter {} does not match session user {}",
                    user_id,
                    user.id
                );
                None
            }
            None => None,
        }
    }

    async fn resolve_token_user(&self, token: &str) -> Option<String> {
        let record = match self.token_store.find_token(token).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("API token not found");
                return None;
            }
            Err(e) => {
                tracing::warn!("Token lookup failed during identity resolution: {}", e);
                return None;
            }
        };

        if record.is_valid_at(self.time_service.now()) {
            Some(record.user_id)
        } else {
            tracing::debug!("API token for user {} has expired", record.user_id);
            None
        }
    }
}
