use crate::application::services::file_service::content_disposition;
use crate::domain::entities::{RawFileQuery, RawFileResponse};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    Json,
};

/// GET /post/:id/file/raw/:title
///
/// Raw content of a file as JSON `{ "data": ... }`. The title segment is
/// cosmetic; `?download=true` switches the disposition to attachment.
pub async fn get_raw_file(
    State(state): State<AppState>,
    Path((file_id, _title)): Path<(String, String)>,
    Query(query): Query<RawFileQuery>,
) -> ApiResult<Response> {
    let file = state.file_service.get_raw_file(&file_id).await?;

    let disposition = HeaderValue::from_str(&content_disposition(&file.title, query.is_download()))
        .map_err(|e| ApiError::Internal(format!("Invalid Content-Disposition: {}", e)))?;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        ),
        (header::CACHE_CONTROL, HeaderValue::from_static("s-maxage=86400")),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    let body = RawFileResponse {
        data: String::from_utf8_lossy(&file.content).into_owned(),
    };

    Ok((headers, Json(body)).into_response())
}

/// GET /pages/:file_id/:file_title
///
/// Stored HTML of a file whose post is public or unlisted
pub async fn get_rendered_file(
    State(state): State<AppState>,
    Path((file_id, _file_title)): Path<(String, String)>,
) -> ApiResult<Html<String>> {
    let file = state.file_service.get_rendered_file(&file_id).await?;
    Ok(Html(String::from_utf8_lossy(&file.html).into_owned()))
}
