//! Per-type validation rules and shared helpers.
//!
//! Each rule is a pure function from a submitted [`Value`] (plus the block
//! definition where it matters) to `Result<(), &'static str>`, where the
//! error string is the fixed user-facing message for that rule. Rules are
//! only invoked on non-empty values; emptiness is handled by the evaluator
//! before dispatch.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::blocks::FormBlock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+0-9()\s-]{6,}$").expect("phone pattern"));
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("time pattern"));

/// Maximum accepted upload size (1 MiB).
const MAX_FILE_SIZE_BYTES: f64 = 1024.0 * 1024.0;

/// Emptiness classifier applied before any type-specific rule.
///
/// Numbers and booleans are never empty; strings are empty when
/// whitespace-only; sequences and mappings when they have no entries.
pub(super) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Numeric reading of a submitted value: a JSON number, or a string that
/// parses as one. Numbers-as-strings are accepted but never coerced for
/// storage.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Absolute http/https URL with a non-empty host.
fn is_valid_url(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once("://") else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return false;
    }
    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    !rest[..host_end].is_empty()
}

/// File-type allow-list matcher.
///
/// An empty allow-list accepts everything. Entries are trimmed and matched
/// case-insensitively: `x/*` matches by MIME prefix, an entry containing
/// `/` matches by exact MIME equality, anything else is an extension
/// pattern (with or without a leading dot) matched against the file name's
/// extension. Uninterpretable (empty) entries are skipped.
pub(super) fn matches_allowed_type(file_type: &str, allowed: &[String], file_name: &str) -> bool {
    if allowed.is_empty() {
        return true;
    }

    let file_type = file_type.to_ascii_lowercase();
    let lower_name = file_name.to_ascii_lowercase();
    let ext = lower_name
        .rsplit_once('.')
        .map(|(_, e)| e)
        .unwrap_or_default();

    for entry in allowed {
        let normalized = entry.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        if normalized.ends_with("/*") {
            // Keep the slash: "image/*" matches any "image/..." subtype.
            let prefix = &normalized[..normalized.len() - 1];
            if file_type.starts_with(prefix) {
                return true;
            }
            continue;
        }
        if normalized.contains('/') {
            if file_type == normalized {
                return true;
            }
            continue;
        }
        if ext.is_empty() {
            continue;
        }
        match normalized.strip_prefix('.') {
            Some(dotted) if ext == dotted => return true,
            Some(_) => continue,
            None if ext == normalized => return true,
            None => continue,
        }
    }

    false
}

// ---------------------------------------------------------------------------
// Per-type rules
// ---------------------------------------------------------------------------

pub(super) fn check_text(value: &Value) -> Result<(), &'static str> {
    if value.is_string() {
        Ok(())
    } else {
        Err("Must be text.")
    }
}

pub(super) fn check_email(value: &Value) -> Result<(), &'static str> {
    match value.as_str() {
        Some(s) if EMAIL_PATTERN.is_match(s) => Ok(()),
        _ => Err("Enter a valid email."),
    }
}

pub(super) fn check_number(value: &Value) -> Result<(), &'static str> {
    match value {
        Value::Number(_) => Ok(()),
        Value::String(s) if s.trim().parse::<f64>().is_ok() => Ok(()),
        _ => Err("Enter a valid number."),
    }
}

pub(super) fn check_url(value: &Value) -> Result<(), &'static str> {
    match value.as_str() {
        Some(s) if is_valid_url(s) => Ok(()),
        _ => Err("Enter a valid URL."),
    }
}

pub(super) fn check_phone(value: &Value) -> Result<(), &'static str> {
    match value.as_str() {
        Some(s) if PHONE_PATTERN.is_match(s) => Ok(()),
        _ => Err("Enter a valid phone number."),
    }
}

/// Pattern check only (`YYYY-MM-DD`); no calendar validity.
pub(super) fn check_date(value: &Value) -> Result<(), &'static str> {
    match value.as_str() {
        Some(s) if DATE_PATTERN.is_match(s) => Ok(()),
        _ => Err("Enter a valid date."),
    }
}

/// Pattern check only (`HH:MM`); no range validity.
pub(super) fn check_time(value: &Value) -> Result<(), &'static str> {
    match value.as_str() {
        Some(s) if TIME_PATTERN.is_match(s) => Ok(()),
        _ => Err("Enter a valid time."),
    }
}

pub(super) fn check_choice(value: &Value, block: &FormBlock) -> Result<(), &'static str> {
    let is_member = value
        .as_str()
        .is_some_and(|s| block.choice_options().iter().any(|o| o == s));
    if is_member {
        Ok(())
    } else {
        Err("Select a valid option.")
    }
}

pub(super) fn check_multi_choice(value: &Value, block: &FormBlock) -> Result<(), &'static str> {
    let Some(items) = value.as_array() else {
        return Err("Select valid options.");
    };
    let options = block.choice_options();
    let all_members = items
        .iter()
        .all(|item| item.as_str().is_some_and(|s| options.iter().any(|o| o == s)));
    if all_members {
        Ok(())
    } else {
        Err("Select valid options.")
    }
}

pub(super) fn check_linear_scale(value: &Value, block: &FormBlock) -> Result<(), &'static str> {
    let (min, max) = block.scale_bounds();
    match numeric_value(value) {
        Some(n) if n >= min && n <= max => Ok(()),
        _ => Err("Select a valid value."),
    }
}

pub(super) fn check_rating(value: &Value, block: &FormBlock) -> Result<(), &'static str> {
    let cap = block.rating_cap();
    match numeric_value(value) {
        Some(n) if n >= 1.0 && n <= cap => Ok(()),
        _ => Err("Select a valid rating."),
    }
}

/// Matrix answers map row name -> selected column name.
///
/// Rows are checked in schema order; the first violating row settles the
/// block. On a required block every row must carry a valid selection; on an
/// optional block a row may be blank, but a present selection must still
/// name a real column.
pub(super) fn check_matrix(value: &Value, block: &FormBlock) -> Result<(), &'static str> {
    let Some(answers) = value.as_object() else {
        return Err("Complete the matrix.");
    };

    let columns = block.matrix_columns();
    for row in block.matrix_rows() {
        let selected = answers.get(row);
        let is_member = selected
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .is_some_and(|s| columns.iter().any(|c| c == s));

        if block.is_required() && !is_member {
            return Err("Complete the matrix.");
        }
        if selected.is_some_and(|v| !is_empty(v)) && !is_member {
            return Err("Select valid options.");
        }
    }

    Ok(())
}

pub(super) fn check_ranking(value: &Value, block: &FormBlock) -> Result<(), &'static str> {
    let Some(items) = value.as_array() else {
        return Err("Provide a ranking.");
    };

    let options = block.choice_options();
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let Some(s) = item.as_str() else {
            return Err("Provide a valid ranking.");
        };
        if !options.iter().any(|o| o == s) || !seen.insert(s) {
            return Err("Provide a valid ranking.");
        }
    }

    Ok(())
}

pub(super) fn check_file_upload(value: &Value, block: &FormBlock) -> Result<(), &'static str> {
    let Some(file) = value.as_object() else {
        return Err("Upload a valid file.");
    };

    let name = file.get("name").and_then(Value::as_str).unwrap_or_default();
    let mime = file.get("type").and_then(Value::as_str).unwrap_or_default();
    let data = file.get("data").and_then(Value::as_str).unwrap_or_default();
    if name.is_empty() || mime.is_empty() || data.is_empty() {
        return Err("Upload a valid file.");
    }

    if let Some(size) = file.get("size").and_then(Value::as_f64) {
        if size > MAX_FILE_SIZE_BYTES {
            return Err("File exceeds size limit.");
        }
    }

    if !matches_allowed_type(mime, block.allowed_file_types(), name) {
        return Err("File type not allowed.");
    }

    Ok(())
}

pub(super) fn check_signature(value: &Value) -> Result<(), &'static str> {
    match value.as_str() {
        Some(s) if s.starts_with("data:image/") => Ok(()),
        _ => Err("Add a signature."),
    }
}

pub(super) fn check_country(value: &Value) -> Result<(), &'static str> {
    if value.is_string() {
        Ok(())
    } else {
        Err("Country is required.")
    }
}

pub(super) fn check_recaptcha(value: &Value) -> Result<(), &'static str> {
    match value.as_str() {
        Some("verified") => Ok(()),
        _ => Err("Verify reCAPTCHA."),
    }
}

pub(super) fn check_hidden_field(value: &Value) -> Result<(), &'static str> {
    if value.is_string() {
        Ok(())
    } else {
        Err("Hidden field is invalid.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!("   \t")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));

        assert!(!is_empty(&json!("x")));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!(["a"])));
        assert!(!is_empty(&json!({"a": 1})));
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com/path?q=1#frag"));
        assert!(is_valid_url("HTTPS://EXAMPLE.COM"));

        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("https:///missing-host"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("mailto:user@example.com"));
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value(&json!(3)), Some(3.0));
        assert_eq!(numeric_value(&json!(2.5)), Some(2.5));
        assert_eq!(numeric_value(&json!("4")), Some(4.0));
        assert_eq!(numeric_value(&json!(" 4.5 ")), Some(4.5));

        assert_eq!(numeric_value(&json!("four")), None);
        assert_eq!(numeric_value(&json!(true)), None);
        assert_eq!(numeric_value(&json!([1])), None);
    }

    #[test]
    fn test_matcher_empty_allow_list_accepts_all() {
        assert!(matches_allowed_type("application/x-anything", &[], "f.bin"));
    }

    #[test]
    fn test_matcher_wildcard_mime() {
        let allowed = vec!["image/*".to_string()];
        assert!(matches_allowed_type("image/png", &allowed, "photo.png"));
        assert!(matches_allowed_type("IMAGE/JPEG", &allowed, "photo.jpg"));
        assert!(!matches_allowed_type("application/pdf", &allowed, "doc.pdf"));
    }

    #[test]
    fn test_matcher_exact_mime() {
        let allowed = vec!["application/pdf".to_string()];
        assert!(matches_allowed_type("application/pdf", &allowed, "doc.pdf"));
        // A slashed entry never falls back to extension matching.
        assert!(!matches_allowed_type("application/x-pdf", &allowed, "doc.pdf"));
    }

    #[test]
    fn test_matcher_extension_with_and_without_dot() {
        let dotted = vec![".pdf".to_string()];
        let bare = vec!["pdf".to_string()];
        assert!(matches_allowed_type("application/octet-stream", &dotted, "Report.PDF"));
        assert!(matches_allowed_type("application/octet-stream", &bare, "report.pdf"));
        assert!(!matches_allowed_type("application/octet-stream", &bare, "report.txt"));
    }

    #[test]
    fn test_matcher_no_extension_skips_extension_entries() {
        let allowed = vec!["pdf".to_string()];
        assert!(!matches_allowed_type("application/pdf", &allowed, "README"));
    }

    #[test]
    fn test_matcher_skips_blank_entries() {
        let allowed = vec!["  ".to_string(), "png".to_string()];
        assert!(matches_allowed_type("image/png", &allowed, "a.png"));
        assert!(!matches_allowed_type("image/gif", &["  ".to_string()], "a.gif"));
    }

    #[test]
    fn test_patterns() {
        assert!(EMAIL_PATTERN.is_match("user@example.com"));
        assert!(!EMAIL_PATTERN.is_match("user@example"));
        assert!(!EMAIL_PATTERN.is_match("us er@example.com"));

        assert!(PHONE_PATTERN.is_match("+1 (555) 123-4567"));
        assert!(!PHONE_PATTERN.is_match("12345"));
        assert!(!PHONE_PATTERN.is_match("555-CALL"));

        assert!(DATE_PATTERN.is_match("2024-01-31"));
        assert!(!DATE_PATTERN.is_match("31-01-2024"));

        assert!(TIME_PATTERN.is_match("09:30"));
        assert!(!TIME_PATTERN.is_match("9:30"));
    }
}
