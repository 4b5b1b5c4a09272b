//! Form entity model and DTOs.

use formbox_core::blocks::FormBlock;
use formbox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A form row from the `forms` table.
///
/// `blocks` is the designer's JSON array stored verbatim as JSONB. Use
/// [`Form::parsed_blocks`] when the typed schema is needed (submission
/// validation, API output).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Form {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub title: String,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
    pub cover_height: i32,
    pub blocks: serde_json::Value,
    pub share_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Form {
    /// Deserialize the stored block schema.
    pub fn parsed_blocks(&self) -> Result<Vec<FormBlock>, serde_json::Error> {
        serde_json::from_value(self.blocks.clone())
    }
}

/// DTO for creating a new form.
///
/// `blocks` stays a raw JSON array so decorative or newer designer block
/// kinds survive storage byte-for-byte; the api layer checks that it
/// parses as a block schema before accepting it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub title: String,
    #[serde(default = "empty_blocks")]
    pub blocks: serde_json::Value,
}

/// DTO for updating an existing form. All fields are optional; only
/// supplied fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateForm {
    pub title: Option<String>,
    pub blocks: Option<serde_json::Value>,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
    pub cover_height: Option<i32>,
}

fn empty_blocks() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}
