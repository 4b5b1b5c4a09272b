//! Form block schema types.
//!
//! A form is an ordered list of [`FormBlock`]s designed in the frontend
//! builder. Field names follow the designer's JSON wire format (camelCase),
//! which is also what lands in the `forms.blocks` JSONB column, so the
//! schema round-trips untouched.

use serde::{Deserialize, Serialize};

/// Closed set of block type tags known to the validator.
///
/// Tags the designer ships that this backend does not recognize (decorative
/// blocks, future question kinds) deserialize as [`BlockType::Other`] and
/// validate as always-valid, so a newer frontend never bricks submissions
/// against an older backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    ShortAnswer,
    LongAnswer,
    Text,
    Paragraph,
    Title,
    Label,
    ThankYouPage,
    Email,
    Number,
    Url,
    Phone,
    Date,
    Time,
    MultipleChoice,
    Dropdown,
    Checkboxes,
    MultiSelect,
    LinearScale,
    Rating,
    Matrix,
    Ranking,
    FileUpload,
    Signature,
    RespondentCountry,
    Recaptcha,
    HiddenField,
    Payment,
    WalletConnect,
    #[serde(other)]
    Other,
}

impl BlockType {
    /// Payment-adjacent block types are disabled upstream. The validator
    /// skips them entirely, required or not.
    pub fn is_disabled(self) -> bool {
        matches!(self, BlockType::Payment | BlockType::WalletConnect)
    }
}

/// One block definition in a form.
///
/// Only `id` and `type` are always present; which of the remaining fields
/// matter depends on the block type (choice options, matrix rows/columns,
/// scale bounds, file allow-list, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_step: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_allowed_types: Option<Vec<String>>,
}

impl FormBlock {
    /// Construct a block with the given id and type and every optional
    /// field unset.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            content: String::new(),
            options: None,
            required: None,
            placeholder: None,
            rows: None,
            columns: None,
            time_start: None,
            time_end: None,
            time_step: None,
            scale_min: None,
            scale_max: None,
            rating_max: None,
            file_allowed_types: None,
        }
    }

    /// Whether an answer for this block is mandatory. Defaults to false.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Choice options for choice-like and ranking blocks (empty when unset).
    pub fn choice_options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Row labels for matrix blocks (empty when unset).
    pub fn matrix_rows(&self) -> &[String] {
        self.rows.as_deref().unwrap_or_default()
    }

    /// Column labels for matrix blocks (empty when unset).
    pub fn matrix_columns(&self) -> &[String] {
        self.columns.as_deref().unwrap_or_default()
    }

    /// Inclusive bounds for linear-scale blocks. Defaults to 1..=5.
    pub fn scale_bounds(&self) -> (f64, f64) {
        (self.scale_min.unwrap_or(1.0), self.scale_max.unwrap_or(5.0))
    }

    /// Upper bound for rating blocks. Defaults to 5.
    pub fn rating_cap(&self) -> f64 {
        self.rating_max.unwrap_or(5.0)
    }

    /// File-type allow-list patterns for file-upload blocks (empty when
    /// unset, meaning any type is accepted).
    pub fn allowed_file_types(&self) -> &[String] {
        self.file_allowed_types.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_kebab_tags() {
        let json = serde_json::to_string(&BlockType::ThankYouPage).expect("serialize");
        assert_eq!(json, "\"thank-you-page\"");

        let parsed: BlockType = serde_json::from_str("\"multiple-choice\"").expect("deserialize");
        assert_eq!(parsed, BlockType::MultipleChoice);
    }

    #[test]
    fn test_unknown_tag_maps_to_other() {
        // Decorative designer blocks the backend does not model.
        for tag in ["\"heading1\"", "\"divider\"", "\"page-break\"", "\"image\""] {
            let parsed: BlockType = serde_json::from_str(tag).expect("deserialize");
            assert_eq!(parsed, BlockType::Other, "tag {tag} should map to Other");
        }
    }

    #[test]
    fn test_form_block_parses_designer_json() {
        let block: FormBlock = serde_json::from_value(serde_json::json!({
            "id": "b1",
            "type": "linear-scale",
            "content": "How satisfied are you?",
            "required": true,
            "scaleMin": 0,
            "scaleMax": 10
        }))
        .expect("deserialize");

        assert_eq!(block.block_type, BlockType::LinearScale);
        assert!(block.is_required());
        assert_eq!(block.scale_bounds(), (0.0, 10.0));
    }

    #[test]
    fn test_form_block_defaults() {
        let block: FormBlock =
            serde_json::from_value(serde_json::json!({ "id": "b1", "type": "rating" }))
                .expect("deserialize");

        assert!(!block.is_required());
        assert_eq!(block.rating_cap(), 5.0);
        assert_eq!(block.scale_bounds(), (1.0, 5.0));
        assert!(block.choice_options().is_empty());
        assert!(block.allowed_file_types().is_empty());
    }

    #[test]
    fn test_disabled_types() {
        assert!(BlockType::Payment.is_disabled());
        assert!(BlockType::WalletConnect.is_disabled());
        assert!(!BlockType::Email.is_disabled());
        assert!(!BlockType::Other.is_disabled());
    }
}
