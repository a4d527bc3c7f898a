use crate::domain::entities::TokenRecord;
use crate::infrastructure::http::middleware::error::ApiResult;

/// Lookup of API tokens for bearer authentication
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// Exact match on the unique token string
    async fn find_token(&self, token: &str) -> ApiResult<Option<TokenRecord>>;
}
