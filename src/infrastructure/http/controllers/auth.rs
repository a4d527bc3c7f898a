use crate::domain::entities::{
    RequiresPasscodeResponse, SignInRequest, SignInResponse, SignUpRequest, UserResponse,
};
use crate::infrastructure::http::middleware::{ApiResult, AppState};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.auth_service.signup(&request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/auth/signin
///
/// Opens a session and hands its token back as an HttpOnly cookie
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignInRequest>,
) -> ApiResult<(CookieJar, Json<SignInResponse>)> {
    let (user, session) = state.auth_service.signin(&request).await?;

    let cookie = Cookie::build((
        state.session_service.cookie_name().to_string(),
        session.token.clone(),
    ))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(time::Duration::hours(state.session_service.duration_hours()));

    Ok((
        jar.add(cookie),
        Json(SignInResponse {
            user: UserResponse::from(&user),
            expires_at: session.expires_at,
        }),
    ))
}

/// POST /api/auth/signout
///
/// Always succeeds; clears the session cookie whether or not it was valid
pub async fn signout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, StatusCode)> {
    let cookie_name = state.session_service.cookie_name().to_string();
    let token = jar.get(&cookie_name).map(|cookie| cookie.value().to_string());

    state.auth_service.signout(token.as_deref()).await?;

    Ok((
        jar.remove(Cookie::build((cookie_name, "")).path("/")),
        StatusCode::NO_CONTENT,
    ))
}

/// GET /api/auth/requires-passcode
pub async fn requires_passcode(State(state): State<AppState>) -> Json<RequiresPasscodeResponse> {
    Json(RequiresPasscodeResponse {
        requires_passcode: state.auth_service.requires_passcode(),
    })
}
