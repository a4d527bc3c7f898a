use crate::domain::entities::Session;
use crate::infrastructure::http::middleware::error::ApiResult;

#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &Session) -> ApiResult<()>;
    async fn get_session_by_token(&self, token: &str) -> ApiResult<Option<Session>>;
    async fn delete_session(&self, token: &str) -> ApiResult<()>;
    /// Delete sessions whose expiry is before `now` (RFC 3339)
    async fn cleanup_expired_sessions(&self, now: &str) -> ApiResult<u64>;
}
