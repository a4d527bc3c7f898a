use crate::domain::entities::{File, Post, PostFile};
use crate::infrastructure::http::middleware::error::ApiResult;

#[async_trait::async_trait]
pub trait FileRepository: Send + Sync {
    async fn create_post(&self, post: &Post) -> ApiResult<()>;
    async fn create_file(&self, file: &File) -> ApiResult<()>;
    async fn get_file_by_id(&self, id: &str) -> ApiResult<Option<File>>;
    /// File joined with its post's visibility
    async fn get_post_file(&self, id: &str) -> ApiResult<Option<PostFile>>;
}
