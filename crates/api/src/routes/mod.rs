pub mod artifact;
pub mod auth;
pub mod form;
pub mod generate;
pub mod health;
pub mod legacy;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/*           register, login, profile, secret token
/// /forms/*          form CRUD (auth)
/// /generate/*       validation and page generation (auth)
/// /generated/*      public artifact download
/// /legacy/*         flat-file JSON documents (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/forms", form::router())
        .nest("/generate", generate::router())
        .nest("/generated", artifact::router())
        .nest("/legacy", legacy::router())
}
