use crate::infrastructure::http::controllers;
use crate::infrastructure::http::middleware::{require_api_user, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Routes that need a resolved API user
    let protected = Router::new()
        .route("/api/user/self", get(controllers::user::get_self))
        .route(
            "/api/user/tokens",
            get(controllers::tokens::list_tokens).post(controllers::tokens::create_token),
        )
        .route(
            "/api/user/tokens/:id",
            delete(controllers::tokens::revoke_token),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_api_user,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/signup", post(controllers::auth::signup))
        .route("/api/auth/signin", post(controllers::auth::signin))
        .route("/api/auth/signout", post(controllers::auth::signout))
        .route(
            "/api/auth/requires-passcode",
            get(controllers::auth::requires_passcode),
        )
        .route(
            "/post/:id/file/raw/:title",
            get(controllers::files::get_raw_file),
        )
        .route(
            "/pages/:file_id/:file_title",
            get(controllers::files::get_rendered_file),
        )
        .merge(protected)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}
