use axum::routing::get;
use axum::Router;

use crate::handlers::legacy;
use crate::state::AppState;

/// Routes mounted at `/legacy`.
///
/// ```text
/// GET  /{document}  -> read
/// POST /{document}  -> write
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{document}", get(legacy::read).post(legacy::write))
}
