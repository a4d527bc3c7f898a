use crate::domain::entities::{User, UserRole};
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

fn user_from_row(row: &AnyRow) -> ApiResult<User> {
    let role: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        // Unknown roles get the least privilege
        role: role.parse().unwrap_or(UserRole::User),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserRepository for Database {
    async fn create_user(&self, user: &User) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, role, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.to_string())
        .bind(&user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, role, created_at
             FROM users
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, role, created_at
             FROM users
             WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_user_first_admin(&self, user: &User) -> ApiResult<UserRole> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, role, created_at)
             SELECT ?, ?, ?,
                    CASE WHEN EXISTS (SELECT 1 FROM users) THEN 'user' ELSE 'admin' END,
                    ?",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.created_at)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query("SELECT role FROM users WHERE id = ?")
            .bind(&user.id)
            .fetch_one(&self.pool)
            .await?;
        let role: String = row.try_get("role")?;

        Ok(role.parse().unwrap_or(UserRole::User))
    }
}
