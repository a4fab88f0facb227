//! Whole-document access to the flat-file JSON store.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use formbridge_core::error::CoreError;
use formbridge_db::legacy_store::{JsonDocumentStore, LegacyDocument};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
}

/// GET /api/v1/legacy/{document}
pub async fn read(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(document): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let (store, doc) = resolve(&state, &document)?;
    let value = store.read(doc).await?;
    Ok(Json(DataResponse { data: value }))
}

/// POST /api/v1/legacy/{document}
///
/// Replaces the whole document with the request body.
pub async fn write(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(document): Path<String>,
    Json(value): Json<Value>,
) -> AppResult<Json<DataResponse<SaveResponse>>> {
    let (store, doc) = resolve(&state, &document)?;
    store.write(doc, &value).await?;
    tracing::info!(
        user_id = auth_user.user_id,
        document = doc.name(),
        "Legacy document replaced"
    );
    Ok(Json(DataResponse {
        data: SaveResponse { success: true },
    }))
}

/// Both a disabled store and an unknown document name read as 404.
fn resolve(
    state: &AppState,
    document: &str,
) -> AppResult<(Arc<JsonDocumentStore>, LegacyDocument)> {
    let not_found = || AppError::Core(CoreError::not_found("Legacy document", document));
    let store = state.legacy_store.clone().ok_or_else(not_found)?;
    let doc = document.parse::<LegacyDocument>().map_err(|()| not_found())?;
    Ok((store, doc))
}
