//! Repository for the `forms` table.

use formbox_core::types::DbId;
use sqlx::PgPool;

use crate::models::form::{CreateForm, Form, UpdateForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, logo_url, cover_url, cover_height, blocks, share_id, \
                       created_at, updated_at";

/// Provides CRUD operations for forms.
///
/// All owner-facing lookups are scoped by `user_id`; only the share-id
/// lookup is unscoped (that is the public path).
pub struct FormRepo;

impl FormRepo {
    /// Insert a new form, returning the created row.
    ///
    /// `user_id` is `None` for anonymously created forms. `share_id`
    /// uniqueness is enforced by `uq_forms_share_id`; callers generate and
    /// retry on collision.
    pub async fn create(
        pool: &PgPool,
        input: &CreateForm,
        user_id: Option<DbId>,
        share_id: &str,
    ) -> Result<Form, sqlx::Error> {
        let query = format!(
            "INSERT INTO forms (user_id, title, blocks, share_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.blocks)
            .bind(share_id)
            .fetch_one(pool)
            .await
    }

    /// Find a form owned by `user_id`.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published form by its share id (public path, no owner scope).
    pub async fn find_by_share_id(
        pool: &PgPool,
        share_id: &str,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE share_id = $1");
        sqlx::query_as::<_, Form>(&query)
            .bind(share_id)
            .fetch_optional(pool)
            .await
    }

    /// List all forms owned by `user_id`, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Form>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM forms WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Form>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a form owned by `user_id`. Only non-`None` fields in `input`
    /// are applied; `updated_at` is always bumped.
    ///
    /// Returns `None` if the user owns no form with the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateForm,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!(
            "UPDATE forms SET
                title = COALESCE($3, title),
                blocks = COALESCE($4, blocks),
                logo_url = COALESCE($5, logo_url),
                cover_url = COALESCE($6, cover_url),
                cover_height = COALESCE($7, cover_height),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.blocks)
            .bind(&input.logo_url)
            .bind(&input.cover_url)
            .bind(input.cover_height)
            .fetch_optional(pool)
            .await
    }

    /// Delete a form owned by `user_id`; submissions cascade. Returns
    /// `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any form already uses `share_id`.
    pub async fn share_id_exists(pool: &PgPool, share_id: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM forms WHERE share_id = $1)")
                .bind(share_id)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }
}
