use crate::domain::entities::{ApiToken, TokenRecord};
use crate::domain::ports::api_token_repository::ApiTokenRepository;
use crate::domain::ports::token_store::TokenStore;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::Row;

#[async_trait]
impl TokenStore for Database {
    async fn find_token(&self, token: &str) -> ApiResult<Option<TokenRecord>> {
        let row = sqlx::query(
            "SELECT user_id, expires_at
             FROM api_tokens
             WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(TokenRecord {
                user_id: row.try_get("user_id")?,
                // NULL means the token never expires; anything undecodable is an error
                expires_at: row.try_get::<Option<String>, _>("expires_at")?,
            }))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl ApiTokenRepository for Database {
    async fn create_api_token(&self, token: &ApiToken) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO api_tokens (id, user_id, name, token, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&token.id)
        .bind(&token.user_id)
        .bind(&token.name)
        .bind(&token.token)
        .bind(&token.expires_at)
        .bind(&token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_user_api_tokens(&self, user_id: &str) -> ApiResult<Vec<ApiToken>> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, token, expires_at, created_at
             FROM api_tokens
             WHERE user_id = ?
             ORDER BY created_at DESC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut tokens = Vec::with_capacity(rows.len());
        for row in rows {
            tokens.push(ApiToken {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                name: row.try_get("name")?,
                token: row.try_get("token")?,
                expires_at: row.try_get::<Option<String>, _>("expires_at")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(tokens)
    }

    async fn delete_user_api_token(&self, user_id: &str, token_id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM api_tokens WHERE id = ? AND user_id = ?")
            .bind(token_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn cleanup_expired_api_tokens(&self, now: &str) -> ApiResult<u64> {
        let result = sqlx::query(
            "DELETE FROM api_tokens
             WHERE expires_at IS NOT NULL AND expires_at < ?",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
