pub mod auth;
pub mod form;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register              register (public)
/// /auth/login                 login (public)
/// /auth/me                    get, patch (requires auth)
///
/// /forms                      list (auth), create (optional auth)
/// /forms/{id}                 get, patch, delete (auth)
/// /forms/{id}/share           share link info (auth)
/// /forms/{id}/submissions     list submissions (auth)
///
/// /s/{share_id}               fetch published form (public)
/// /s/{share_id}/submissions   submit a response (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/forms", form::router())
        .nest("/s", public::router())
}
