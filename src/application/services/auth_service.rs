use crate::application::services::SessionService;
use crate::domain::entities::{Session, SignInRequest, SignUpRequest, User, UserRole};
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use std::sync::Arc;

pub const MAX_USERNAME_LEN: usize = 64;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Usernames are 1-64 characters of ASCII letters, digits, `_` and `-`
pub fn validate_username(username: &str) -> ApiResult<()> {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "Username must be 1-{} characters long",
            MAX_USERNAME_LEN
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::BadRequest(
            "Username may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> ApiResult<()> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN || len > MAX_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "Password must be {}-{} characters long",
            MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
        )));
    }

    Ok(())
}

/// Hash password using Argon2id with parameters:
/// - m_cost = 19456 KiB (19 MiB)
/// - t_cost = 2 iterations
/// - p_cost = 1 thread
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .build()
        .map_err(|_| ApiError::Internal("Failed to build Argon2 params".to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify password against Argon2id hash
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApiError::Internal("Invalid password hash format".to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Credential sign-up, sign-in and sign-out
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    session_service: SessionService,
    registration_password: Option<String>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_service: SessionService,
        registration_password: Option<String>,
    ) -> Self {
        Self {
            user_repo,
            session_service,
            registration_password,
        }
    }

    /// Whether sign-up requires the server passcode
    pub fn requires_passcode(&self) -> bool {
        self.registration_password.is_some()
    }

    pub async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        self.user_repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Register a new user. The first account on the server becomes an admin.
    pub async fn signup(&self, request: &SignUpRequest) -> ApiResult<User> {
        if let Some(expected) = &self.registration_password {
            if request.passcode.as_deref() != Some(expected.as_str()) {
                tracing::warn!("Sign-up rejected: invalid server passcode");
                return Err(ApiError::Forbidden("Invalid server passcode".to_string()));
            }
        }

        let username = request.username.trim();
        validate_username(username)?;
        validate_password(&request.password)?;

        if self.user_repo.get_user_by_username(username).await?.is_some() {
            return Err(ApiError::Conflict("Username is already taken".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let mut user = User::new(username.to_string(), password_hash, UserRole::User)?;
        user.role = self.user_repo.create_user_first_admin(&user).await?;

        tracing::info!("User {} registered with role {}", user.id, user.role);
        Ok(user)
    }

    /// Check credentials and open a session.
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn signin(&self, request: &SignInRequest) -> ApiResult<(User, Session)> {
        let user = match self
            .user_repo
            .get_user_by_username(request.username.trim())
            .await?
        {
            Some(user) => user,
            None => {
                tracing::debug!("Sign-in failed: unknown username");
                return Err(ApiError::Unauthorized);
            }
        };

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::warn!("Sign-in failed: wrong password for user {}", user.id);
            return Err(ApiError::Unauthorized);
        }

        let session = self.session_service.start_session(&user.id).await?;
        Ok((user, session))
    }

    /// End the session named by `token`, if any
    pub async fn signout(&self, token: Option<&str>) -> ApiResult<()> {
        if let Some(token) = token {
            self.session_service.delete_session(token).await?;
        }
        Ok(())
    }
}
