//! Route definitions for the public share surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/s`.
///
/// ```text
/// GET  /{share_id}              -> get_by_share_id
/// POST /{share_id}/submissions  -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{share_id}", get(public::get_by_share_id))
        .route("/{share_id}/submissions", post(public::submit))
}
