//! Handlers for the `/forms` resource. Every query is scoped to the caller.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use formbridge_core::error::CoreError;
use formbridge_core::types::FormId;
use formbridge_db::models::form::{CreateForm, Form, FormSummary, UpdateForm};
use formbridge_db::models::status::{FormStatus, StatusId};
use formbridge_db::repositories::FormRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/forms
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Form>>)> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::BadRequest("Form name is required".into()));
    }
    validate_status(input.status_id)?;
    input.apply_widget_url();

    let form = FormRepo::create(&state.pool, auth_user.user_id, &input).await?;
    tracing::info!(user_id = auth_user.user_id, form_id = %form.id, "Form created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: form })))
}

/// GET /api/v1/forms
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FormSummary>>>> {
    let forms = FormRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: forms }))
}

/// GET /api/v1/forms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FormId>,
) -> AppResult<Json<DataResponse<Form>>> {
    let form = FormRepo::find_by_id(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;
    Ok(Json(DataResponse { data: form }))
}

/// PUT /api/v1/forms/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FormId>,
    Json(mut input): Json<UpdateForm>,
) -> AppResult<Json<DataResponse<Form>>> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Form name must not be empty".into()));
        }
    }
    validate_status(input.status_id)?;

    let existing = FormRepo::find_by_id(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;
    input.apply_widget_url(existing.widget_url.as_deref());

    let form = FormRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;
    tracing::info!(user_id = auth_user.user_id, form_id = %id, "Form updated");
    Ok(Json(DataResponse { data: form }))
}

/// DELETE /api/v1/forms/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FormId>,
) -> AppResult<StatusCode> {
    if FormRepo::delete(&state.pool, id, auth_user.user_id).await? {
        tracing::info!(user_id = auth_user.user_id, form_id = %id, "Form deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Form", id)))
    }
}

fn validate_status(status_id: Option<StatusId>) -> AppResult<()> {
    match status_id {
        Some(id) if FormStatus::from_id(id).is_none() => {
            Err(AppError::BadRequest(format!("Unknown status_id: {id}")))
        }
        _ => Ok(()),
    }
}
