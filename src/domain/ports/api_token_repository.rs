use crate::domain::entities::ApiToken;
use crate::infrastructure::http::middleware::error::ApiResult;

/// Repository for API token management
#[async_trait::async_trait]
pub trait ApiTokenRepository: Send + Sync {
    async fn create_api_token(&self, token: &ApiToken) -> ApiResult<()>;

    /// Tokens owned by a user, newest first
    async fn list_user_api_tokens(&self, user_id: &str) -> ApiResult<Vec<ApiToken>>;

    /// Delete a token only if it belongs to the user. Returns whether a row was removed.
    async fn delete_user_api_token(&self, user_id: &str, token_id: &str) -> ApiResult<bool>;

    /// Delete tokens whose expiry is before `now` (RFC 3339)
    async fn cleanup_expired_api_tokens(&self, now: &str) -> ApiResult<u64>;
}
