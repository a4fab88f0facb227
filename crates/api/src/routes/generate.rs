use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// POST /validate    -> validate_source
/// POST /form/{id}   -> generate_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(generate::validate_source))
        .route("/form/{id}", post(generate::generate_form))
}
