use crate::domain::entities::{ApiRequest, CurrentUser, Session};
use crate::domain::ports::session_provider::SessionProvider;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::time_service::TimeService;
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::shared::utils::{format_timestamp, generate_token};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie-backed sessions stored in the database
#[derive(Clone)]
pub struct SessionService {
    session_repo: Arc<dyn SessionRepository>,
    user_repo: Arc<dyn UserRepository>,
    time_service: Arc<dyn TimeService>,
    cookie_name: String,
    duration_hours: i64,
}

impl SessionService {
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        user_repo: Arc<dyn UserRepository>,
        time_service: Arc<dyn TimeService>,
        cookie_name: String,
        duration_hours: i64,
    ) -> Self {
        Self {
            session_repo,
            user_repo,
            time_service,
            cookie_name,
            duration_hours,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn duration_hours(&self) -> i64 {
        self.duration_hours
    }

    /// Create and persist a fresh session for the user
    pub async fn start_session(&self, user_id: &str) -> ApiResult<Session> {
        let session = Session::new(
            user_id.to_string(),
            generate_token(),
            self.duration_hours,
            self.time_service.now(),
        )?;
        self.session_repo.create_session(&session).await?;

        tracing::info!("Session started for user {}", user_id);
        Ok(session)
    }

    pub async fn get_session_by_token(&self, token: &str) -> ApiResult<Option<Session>> {
        self.session_repo.get_session_by_token(token).await
    }

    pub async fn delete_session(&self, token: &str) -> ApiResult<()> {
        self.session_repo.delete_session(token).await
    }

    pub async fn cleanup_expired_sessions(&self) -> ApiResult<u64> {
        let now = format_timestamp(self.time_service.now())?;
        self.session_repo.cleanup_expired_sessions(&now).await
    }

    /// Session token carried by the request's cookie header
    pub fn session_token(&self, request: &ApiRequest) -> Option<String> {
        CookieJar::from_headers(&request.headers)
            .get(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
    }
}

#[async_trait::async_trait]
impl SessionProvider for SessionService {
    async fn get_current_user(&self, request: &ApiRequest) -> ApiResult<Option<CurrentUser>> {
        let Some(token) = self.session_token(request) else {
            return Ok(None);
        };

        let Some(session) = self.session_repo.get_session_by_token(&token).await? else {
            return Ok(None);
        };

        if session.is_expired_at(self.time_service.now()) {
            tracing::debug!("Session {} has expired", session.id);
            return Ok(None);
        }

        let user = self.user_repo.get_user_by_id(&session.user_id).await?;
        Ok(user.as_ref().map(CurrentUser::from))
    }
}
