//! Handlers for the public `/s/{share_id}` surface: fetching a published
//! form and creating submissions. No authentication.

use axum::extract::{Path, State};
use axum::Json;

use formbox_core::validation::validate_submission;
use formbox_db::models::submission::{CreateSubmission, Submission};
use formbox_db::repositories::{FormRepo, SubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::form::{form_response, FormResponse};
use crate::state::AppState;

/// GET /api/v1/s/{share_id}
///
/// Fetch a published form by share id, including its response count.
pub async fn get_by_share_id(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> AppResult<Json<FormResponse>> {
    let form = FormRepo::find_by_share_id(&state.pool, &share_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".into()))?;

    let response_count = SubmissionRepo::count_for_form(&state.pool, form.id).await?;
    Ok(Json(form_response(form, &state.config, response_count)))
}

/// POST /api/v1/s/{share_id}/submissions
///
/// Create a submission for a published form. The payload is judged against
/// the form's block schema; any failure rejects the whole submission with a
/// 422 carrying the complete ordered error list, and nothing is persisted.
pub async fn submit(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
    Json(input): Json<CreateSubmission>,
) -> AppResult<Json<Submission>> {
    let form = FormRepo::find_by_share_id(&state.pool, &share_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".into()))?;

    let blocks = form
        .parsed_blocks()
        .map_err(|e| AppError::InternalError(format!("Stored block schema failed to parse: {e}")))?;

    validate_submission(&blocks, &input.data).map_err(AppError::SubmissionRejected)?;

    let submission = SubmissionRepo::create(&state.pool, form.id, &input.data).await?;
    tracing::info!(form_id = form.id, submission_id = submission.id, "Stored submission");

    Ok(Json(submission))
}
