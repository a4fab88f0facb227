//! Handlers for the `/generate` resource: source-form validation and
//! registration page generation.

use axum::extract::{Path, State};
use axum::Json;
use formbridge_core::error::CoreError;
use formbridge_core::generator::{FormGenerator, GenerateInput};
use formbridge_core::naming::artifact_filename;
use formbridge_core::types::FormId;
use formbridge_core::validation::{validate, ValidationResult};
use formbridge_db::models::form::Form;
use formbridge_db::repositories::{FormRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /generate/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub source_html: String,
}

/// Result of a successful generation.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub filename: String,
    pub download_url: String,
    pub html: String,
}

/// POST /api/v1/generate/validate
pub async fn validate_source(
    _auth_user: AuthUser,
    Json(input): Json<ValidateRequest>,
) -> AppResult<Json<DataResponse<ValidationResult>>> {
    if input.source_html.trim().is_empty() {
        return Err(AppError::BadRequest("source_html is required".into()));
    }
    Ok(Json(DataResponse {
        data: validate(&input.source_html),
    }))
}

/// POST /api/v1/generate/form/{id}
///
/// Validate the stored source form, merge it into the registration template,
/// write the artifact and mark the form `generated`. The status only changes
/// once the artifact is on disk.
pub async fn generate_form(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FormId>,
) -> AppResult<Json<DataResponse<GenerateResponse>>> {
    let form = FormRepo::find_by_id(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Form", id)))?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;
    let secret_token = user
        .secret_token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(
                "Secret token not configured. Please update your settings.".into(),
            )
        })?;

    let validation = validate(&form.source_html);
    if !validation.is_valid {
        tracing::debug!(form_id = %id, errors = ?validation.errors, "Refusing to generate");
        return Err(AppError::InvalidForm(validation.errors));
    }

    let _guard = state.generation_locks.try_acquire(id).ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "A generation for this form is already in progress".into(),
        ))
    })?;

    let filename = artifact_filename(&form.name, form.id);
    let html = render(state.config.template_path.clone(), form, secret_token).await?;

    state.artifacts.write(&filename, &html).await?;

    let generated_at = chrono::Utc::now();
    let marked =
        FormRepo::mark_generated(&state.pool, id, auth_user.user_id, &filename, generated_at)
            .await?;
    if !marked {
        tracing::warn!(form_id = %id, filename = %filename, "Form vanished during generation");
        return Err(AppError::Core(CoreError::not_found("Form", id)));
    }
    tracing::info!(user_id = auth_user.user_id, form_id = %id, filename = %filename, "Form generated");

    Ok(Json(DataResponse {
        data: GenerateResponse {
            message: "Form generated successfully".to_string(),
            download_url: format!("/api/v1/generated/{filename}"),
            filename,
            html,
        },
    }))
}

/// Load the template and merge the form off the async runtime.
async fn render(
    template_path: std::path::PathBuf,
    form: Form,
    secret_token: String,
) -> AppResult<String> {
    tokio::task::spawn_blocking(move || -> AppResult<String> {
        let generator = FormGenerator::from_file(&template_path)?;
        let input = GenerateInput {
            source_html: &form.source_html,
            session_id: form.session_id.as_deref().unwrap_or_default(),
            widget_id: form.widget_id.as_deref().unwrap_or_default(),
            widget_version: form.widget_version.as_deref().unwrap_or_default(),
            secret_token: &secret_token,
        };
        Ok(generator.generate(&input)?)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Generation task failed: {e}")))?
}
