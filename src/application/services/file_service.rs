use crate::domain::entities::File;
use crate::domain::ports::file_repository::FileRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use std::sync::Arc;

/// `Content-Disposition` value for serving a file under its own title.
/// Quotes and control characters in the title are replaced with `_`.
pub fn content_disposition(title: &str, download: bool) -> String {
    let filename: String = title
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();
    let disposition = if download { "attachment" } else { "inline" };
    format!("{}; filename=\"{}\"", disposition, filename)
}

#[derive(Clone)]
pub struct FileService {
    file_repo: Arc<dyn FileRepository>,
}

impl FileService {
    pub fn new(file_repo: Arc<dyn FileRepository>) -> Self {
        Self { file_repo }
    }

    pub async fn get_raw_file(&self, file_id: &str) -> ApiResult<File> {
        self.file_repo
            .get_file_by_id(file_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("File not found".to_string()))
    }

    /// File with pre-rendered HTML, only for posts that may appear as web pages
    pub async fn get_rendered_file(&self, file_id: &str) -> ApiResult<File> {
        match self.file_repo.get_post_file(file_id).await? {
            Some(post_file) if post_file.visibility.is_allowed_for_webpage() => Ok(post_file.file),
            Some(post_file) => {
                tracing::debug!(
                    "Rendered page for file {} hidden: post is {}",
                    file_id,
                    post_file.visibility
                );
                Err(ApiError::NotFound("File not found".to_string()))
            }
            None => Err(ApiError::NotFound("File not found".to_string())),
        }
    }
}
