//! Route definitions for the owner-facing `/forms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PATCH  /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/share        -> get_share
/// GET    /{id}/submissions  -> list_submissions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::list).post(form::create))
        .route(
            "/{id}",
            get(form::get_by_id).patch(form::update).delete(form::delete),
        )
        .route("/{id}/share", get(form::get_share))
        .route("/{id}/submissions", get(form::list_submissions))
}
