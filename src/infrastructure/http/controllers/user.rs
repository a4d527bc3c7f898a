use crate::domain::entities::UserResponse;
use crate::infrastructure::http::middleware::{ApiResult, ApiUser, AppState};
use axum::{extract::State, Extension, Json};

/// GET /api/user/self
///
/// Profile of the user the request resolved to
pub async fn get_self(
    State(state): State<AppState>,
    Extension(ApiUser(user_id)): Extension<ApiUser>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.auth_service.get_user(&user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}
