//! Handlers for the `/forms` resource (owner-facing CRUD).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use formbox_core::blocks::FormBlock;
use formbox_core::error::CoreError;
use formbox_core::share::generate_share_id;
use formbox_core::types::{DbId, Timestamp};
use formbox_db::models::form::{CreateForm, Form, UpdateForm};
use formbox_db::models::submission::Submission;
use formbox_db::repositories::{FormRepo, SubmissionRepo};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Form representation returned to clients: the row plus its share URL and
/// (on public fetches) a response count.
///
/// `blocks` is the stored JSON array, returned verbatim so the designer
/// round-trips its schema untouched.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub id: DbId,
    pub title: String,
    pub blocks: serde_json::Value,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
    pub cover_height: i32,
    pub share_id: String,
    pub share_url: String,
    pub response_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Response body for `GET /forms/{id}/share`.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub share_id: String,
    pub share_url: String,
}

/// Build the public link for a share id from the configured base URL.
pub(crate) fn share_url(config: &ServerConfig, share_id: &str) -> String {
    format!(
        "{}/s/{}",
        config.public_base_url.trim_end_matches('/'),
        share_id
    )
}

/// Assemble a [`FormResponse`] from a stored row.
pub(crate) fn form_response(form: Form, config: &ServerConfig, response_count: i64) -> FormResponse {
    FormResponse {
        id: form.id,
        title: form.title,
        blocks: form.blocks,
        logo_url: form.logo_url,
        cover_url: form.cover_url,
        cover_height: form.cover_height,
        share_url: share_url(config, &form.share_id),
        share_id: form.share_id,
        response_count,
        created_at: form.created_at,
        updated_at: form.updated_at,
    }
}

/// Check that a submitted block array parses as a block schema before it
/// is stored. The raw JSON is what gets persisted; this only rejects
/// structurally broken input (missing ids, non-string type tags).
fn ensure_valid_blocks(blocks: &serde_json::Value) -> AppResult<()> {
    serde_json::from_value::<Vec<FormBlock>>(blocks.clone())
        .map(|_| ())
        .map_err(|e| AppError::BadRequest(format!("Invalid block schema: {e}")))
}

fn form_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Form", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/forms
///
/// Create a form. Works with or without credentials; anonymous forms have
/// no owner and are only reachable through their share link.
pub async fn create(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Json(input): Json<CreateForm>,
) -> AppResult<(StatusCode, Json<FormResponse>)> {
    ensure_valid_blocks(&input.blocks)?;
    let user_id = user.map(|u| u.user_id);

    // Regenerate on collision; the unique index is the backstop.
    let mut share_id = generate_share_id();
    while FormRepo::share_id_exists(&state.pool, &share_id).await? {
        share_id = generate_share_id();
    }

    let form = FormRepo::create(&state.pool, &input, user_id, &share_id).await?;
    tracing::info!(form_id = form.id, ?user_id, "Created form");

    Ok((
        StatusCode::CREATED,
        Json(form_response(form, &state.config, 0)),
    ))
}

/// GET /api/v1/forms
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<FormResponse>>> {
    let forms = FormRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let responses = forms
        .into_iter()
        .map(|form| form_response(form, &state.config, 0))
        .collect();
    Ok(Json(responses))
}

/// GET /api/v1/forms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<FormResponse>> {
    let form = FormRepo::find_by_id_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| form_not_found(id))?;
    Ok(Json(form_response(form, &state.config, 0)))
}

/// PATCH /api/v1/forms/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateForm>,
) -> AppResult<Json<FormResponse>> {
    if let Some(blocks) = &input.blocks {
        ensure_valid_blocks(blocks)?;
    }

    let form = FormRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| form_not_found(id))?;
    Ok(Json(form_response(form, &state.config, 0)))
}

/// DELETE /api/v1/forms/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FormRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(form_not_found(id))
    }
}

/// GET /api/v1/forms/{id}/share
pub async fn get_share(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ShareResponse>> {
    let form = FormRepo::find_by_id_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| form_not_found(id))?;

    Ok(Json(ShareResponse {
        share_url: share_url(&state.config, &form.share_id),
        share_id: form.share_id,
    }))
}

/// GET /api/v1/forms/{id}/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Submission>>> {
    // Unowned forms read as missing, never as forbidden.
    let form = FormRepo::find_by_id_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| form_not_found(id))?;

    let submissions = SubmissionRepo::list_for_form(&state.pool, form.id).await?;
    Ok(Json(submissions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;
    use serde_json::json;

    fn test_config(base_url: &str) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            public_base_url: base_url.to_string(),
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                access_token_expiry_mins: 60,
            },
        }
    }

    #[test]
    fn test_share_url_handles_trailing_slash() {
        let plain = test_config("https://forms.example.com");
        let slashed = test_config("https://forms.example.com/");
        assert_eq!(share_url(&plain, "abc123"), "https://forms.example.com/s/abc123");
        assert_eq!(share_url(&slashed, "abc123"), "https://forms.example.com/s/abc123");
    }

    #[test]
    fn test_ensure_valid_blocks_accepts_designer_schema() {
        let blocks = json!([
            { "id": "b1", "type": "short-answer", "required": true },
            { "id": "b2", "type": "divider" },
            { "id": "b3", "type": "matrix", "rows": ["r1"], "columns": ["Yes", "No"] }
        ]);
        assert!(ensure_valid_blocks(&blocks).is_ok());
    }

    #[test]
    fn test_ensure_valid_blocks_rejects_broken_shapes() {
        // Not an array.
        assert!(ensure_valid_blocks(&json!({"id": "b1"})).is_err());
        // Missing id.
        assert!(ensure_valid_blocks(&json!([{ "type": "email" }])).is_err());
        // Non-string type tag.
        assert!(ensure_valid_blocks(&json!([{ "id": "b1", "type": 7 }])).is_err());
    }
}
