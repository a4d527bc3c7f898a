use crate::domain::entities::{ApiRequest, CurrentUser};
use crate::infrastructure::http::middleware::error::ApiResult;

/// Resolves the user of the authenticated session attached to a request
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns None when the request carries no live session
    async fn get_current_user(&self, request: &ApiRequest) -> ApiResult<Option<CurrentUser>>;
}
