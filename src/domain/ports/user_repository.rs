use crate::domain::entities::{User, UserRole};
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> ApiResult<()>;
    async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>>;
    /// Insert the user as admin when no account exists yet, otherwise as a
    /// regular user. The role is decided by the insert itself. Returns the stored role.
    async fn create_user_first_admin(&self, user: &User) -> ApiResult<UserRole>;
}
