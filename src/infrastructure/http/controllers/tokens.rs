use crate::domain::entities::{ApiTokenListResponse, CreateApiTokenRequest, CreateApiTokenResponse};
use crate::infrastructure::http::middleware::{ApiResult, ApiUser, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

/// GET /api/user/tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    Extension(ApiUser(user_id)): Extension<ApiUser>,
) -> ApiResult<Json<ApiTokenListResponse>> {
    let response = state.api_token_service.list_tokens(&user_id).await?;
    Ok(Json(response))
}

/// POST /api/user/tokens
///
/// The response is the only place the full token is ever shown
pub async fn create_token(
    State(state): State<AppState>,
    Extension(ApiUser(user_id)): Extension<ApiUser>,
    Json(request): Json<CreateApiTokenRequest>,
) -> ApiResult<(StatusCode, Json<CreateApiTokenResponse>)> {
    let response = state
        .api_token_service
        .issue_token(&user_id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/user/tokens/:id
pub async fn revoke_token(
    State(state): State<AppState>,
    Extension(ApiUser(user_id)): Extension<ApiUser>,
    Path(token_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .api_token_service
        .revoke_token(&user_id, &token_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
