//! Public download of generated registration pages.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use formbridge_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/generated/{filename}
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    let html = state
        .artifacts
        .read(&filename)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Generated form", &filename)))?;
    Ok(([(CONTENT_TYPE, "text/html; charset=utf-8")], html))
}
