use crate::domain::entities::{
    ApiToken, ApiTokenListItem, ApiTokenListResponse, CreateApiTokenRequest,
    CreateApiTokenResponse,
};
use crate::domain::ports::api_token_repository::ApiTokenRepository;
use crate::domain::ports::time_service::TimeService;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::shared::utils::{format_timestamp, generate_token};
use std::sync::Arc;

pub const MAX_TOKEN_NAME_LEN: usize = 100;
pub const MAX_TOKEN_LIFETIME_DAYS: i64 = 3650;

fn validate_token_request(request: &CreateApiTokenRequest) -> ApiResult<()> {
    let name_len = request.name.trim().chars().count();
    if name_len == 0 || name_len > MAX_TOKEN_NAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "Token name must be 1-{} characters long",
            MAX_TOKEN_NAME_LEN
        )));
    }

    if let Some(days) = request.expires_in_days {
        if !(1..=MAX_TOKEN_LIFETIME_DAYS).contains(&days) {
            return Err(ApiError::BadRequest(format!(
                "expires_in_days must be between 1 and {}",
                MAX_TOKEN_LIFETIME_DAYS
            )));
        }
    }

    Ok(())
}

#[derive(Clone)]
pub struct ApiTokenService {
    token_repo: Arc<dyn ApiTokenRepository>,
    time_service: Arc<dyn TimeService>,
}

impl ApiTokenService {
    pub fn new(token_repo: Arc<dyn ApiTokenRepository>, time_service: Arc<dyn TimeService>) -> Self {
        Self {
            token_repo,
            time_service,
        }
    }

    /// Issue a token for the user. The full token is only ever returned here.
    pub async fn issue_token(
        &self,
        user_id: &str,
        request: &CreateApiTokenRequest,
    ) -> ApiResult<CreateApiTokenResponse> {
        validate_token_request(request)?;

        let token = ApiToken::new(
            user_id.to_string(),
            request.name.trim().to_string(),
            generate_token(),
            request.expires_in_days,
            self.time_service.now(),
        )?;
        self.token_repo.create_api_token(&token).await?;

        tracing::info!("API token {} issued for user {}", token.id, user_id);
        Ok(CreateApiTokenResponse::from(&token))
    }

    pub async fn list_tokens(&self, user_id: &str) -> ApiResult<ApiTokenListResponse> {
        let tokens = self.token_repo.list_user_api_tokens(user_id).await?;

        Ok(ApiTokenListResponse {
            tokens: tokens.iter().map(ApiTokenListItem::from).collect(),
        })
    }

    pub async fn revoke_token(&self, user_id: &str, token_id: &str) -> ApiResult<()> {
        if !self.token_repo.delete_user_api_token(user_id, token_id).await? {
            return Err(ApiError::NotFound("API token not found".to_string()));
        }

        tracing::info!("API token {} revoked by user {}", token_id, user_id);
        Ok(())
    }

    pub async fn cleanup_expired_tokens(&self) -> ApiResult<u64> {
        let now = format_timestamp(self.time_service.now())?;
        self.token_repo.cleanup_expired_api_tokens(&now).await
    }
}
