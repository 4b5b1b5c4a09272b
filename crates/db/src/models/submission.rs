//! Submission entity model and DTOs.

use formbox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A respondent's stored answers for one form.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub form_id: DbId,
    /// Mapping of block id to submitted value, stored as-submitted
    /// (values are judged, never normalized).
    pub data: serde_json::Value,
    pub created_at: Timestamp,
}

/// Request body for creating a submission: one value per block id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmission {
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}
