//! Dispatch core: one pass over the block schema, one rule per block type.

use serde_json::{Map, Value};

use super::report::ValidationReport;
use super::rules;
use crate::blocks::{BlockType, FormBlock};

/// Message emitted for a required block with an empty value.
const REQUIRED_MESSAGE: &str = "This field is required.";

/// Validate a submitted payload against a form's block schema.
///
/// Walks `blocks` in order and looks each block's value up in `data`
/// (absent keys count as empty). Every failing block contributes exactly
/// one [`FieldError`](super::FieldError), in schema order; the pass never
/// stops early, so the caller always gets the complete picture.
///
/// Returns `Ok(())` iff every block's value satisfies its rule.
pub fn validate_submission(
    blocks: &[FormBlock],
    data: &Map<String, Value>,
) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::default();

    for block in blocks {
        let value = data.get(&block.id).unwrap_or(&Value::Null);

        // Payment and wallet-connect are disabled upstream: never
        // validated, required or not.
        if block.block_type.is_disabled() {
            continue;
        }

        if rules::is_empty(value) {
            if block.is_required() {
                report.push(&block.id, REQUIRED_MESSAGE);
            }
            // An empty optional field skips type-specific checks entirely.
            continue;
        }

        let outcome = match block.block_type {
            BlockType::ShortAnswer
            | BlockType::LongAnswer
            | BlockType::Text
            | BlockType::Paragraph
            | BlockType::Title
            | BlockType::Label
            | BlockType::ThankYouPage => rules::check_text(value),
            BlockType::Email => rules::check_email(value),
            BlockType::Number => rules::check_number(value),
            BlockType::Url => rules::check_url(value),
            BlockType::Phone => rules::check_phone(value),
            BlockType::Date => rules::check_date(value),
            BlockType::Time => rules::check_time(value),
            BlockType::MultipleChoice | BlockType::Dropdown => rules::check_choice(value, block),
            BlockType::Checkboxes | BlockType::MultiSelect => {
                rules::check_multi_choice(value, block)
            }
            BlockType::LinearScale => rules::check_linear_scale(value, block),
            BlockType::Rating => rules::check_rating(value, block),
            BlockType::Matrix => rules::check_matrix(value, block),
            BlockType::Ranking => rules::check_ranking(value, block),
            BlockType::FileUpload => rules::check_file_upload(value, block),
            BlockType::Signature => rules::check_signature(value),
            BlockType::RespondentCountry => rules::check_country(value),
            BlockType::Recaptcha => rules::check_recaptcha(value),
            BlockType::HiddenField => rules::check_hidden_field(value),
            // Skipped above; listed so the match stays exhaustive and
            // re-enabling is an additive change.
            BlockType::Payment | BlockType::WalletConnect => Ok(()),
            // The designer may ship types this backend does not know yet.
            BlockType::Other => Ok(()),
        };

        if let Err(message) = outcome {
            report.push(&block.id, message);
        }
    }

    report.into_result()
}
