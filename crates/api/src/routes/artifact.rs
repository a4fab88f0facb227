use axum::routing::get;
use axum::Router;

use crate::handlers::artifact;
use crate::state::AppState;

/// Routes mounted at `/generated`. Public: the pages are meant to be embedded.
pub fn router() -> Router<AppState> {
    Router::new().route("/{filename}", get(artifact::download))
}
