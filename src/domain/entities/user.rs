use crate::domain::errors::DomainResult;
use crate::shared::utils::format_timestamp;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: String,
}

impl User {
    pub fn new(username: String, password_hash: String, role: UserRole) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            role,
            created_at: format_timestamp(OffsetDateTime::now_utc())?,
        })
    }
}

/// The user behind an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

// DTOs for API requests/responses

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    /// Server passcode, required when registration is gated
    #[serde(default)]
    pub passcode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            created_at: user.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    pub user: UserResponse,
    pub expires_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequiresPasscodeResponse {
    pub requires_passcode: bool,
}
