use crate::domain::entities::{File, Post, PostFile, Visibility};
use crate::domain::ports::file_repository::FileRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

fn file_from_row(row: &AnyRow) -> ApiResult<File> {
    Ok(File {
        id: row.try_get("id")?,
        post_id: row.try_get("post_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        html: row.try_get("html")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl FileRepository for Database {
    async fn create_post(&self, post: &Post) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO posts (id, title, description, visibility, author_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.description)
        .bind(post.visibility.to_string())
        .bind(&post.author_id)
        .bind(&post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create_file(&self, file: &File) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO files (id, post_id, title, content, html, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&file.id)
        .bind(&file.post_id)
        .bind(&file.title)
        .bind(&file.content)
        .bind(&file.html)
        .bind(&file.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_file_by_id(&self, id: &str) -> ApiResult<Option<File>> {
        let row = sqlx::query(
            "SELECT id, post_id, title, content, html, created_at
             FROM files
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(file_from_row).transpose()
    }

    async fn get_post_file(&self, id: &str) -> ApiResult<Option<PostFile>> {
        let row = sqlx::query(
            "SELECT f.id, f.post_id, f.title, f.content, f.html, f.created_at,
                    p.visibility
             FROM files f
             JOIN posts p ON p.id = f.post_id
             WHERE f.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let visibility: String = row.try_get("visibility")?;
        let visibility: Visibility = visibility
            .parse()
            .map_err(|e: String| ApiError::Internal(e))?;

        Ok(Some(PostFile {
            file: file_from_row(&row)?,
            visibility,
        }))
    }
}
