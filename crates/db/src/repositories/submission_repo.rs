//! Repository for the `submissions` table.

use formbox_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::submission::Submission;

const COLUMNS: &str = "id, form_id, data, created_at";

/// Provides insert and listing for submissions. Rows are immutable once
/// written; there is no update path.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a validated submission payload, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        form_id: DbId,
        data: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (form_id, data)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(form_id)
            .bind(Json(data))
            .fetch_one(pool)
            .await
    }

    /// List all submissions for a form, newest first.
    pub async fn list_for_form(
        pool: &PgPool,
        form_id: DbId,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM submissions WHERE form_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Submission>(&query)
            .bind(form_id)
            .fetch_all(pool)
            .await
    }

    /// Count submissions for a form.
    pub async fn count_for_form(pool: &PgPool, form_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions WHERE form_id = $1")
            .bind(form_id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
