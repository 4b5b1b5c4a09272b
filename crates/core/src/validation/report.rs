//! Validation failure report types.

use serde::{Deserialize, Serialize};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Id of the block whose submitted value failed.
    pub block_id: String,
    /// Fixed, user-facing message for the failing rule. Not retranslated
    /// anywhere downstream.
    pub message: String,
}

/// Ordered collection of [`FieldError`]s, at most one per failing block,
/// in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Append an error for the given block.
    pub fn push(&mut self, block_id: &str, message: &str) {
        self.errors.push(FieldError {
            block_id: block_id.to_string(),
            message: message.to_string(),
        });
    }

    /// True when no block failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing blocks.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Convert into the engine's result shape: `Ok(())` iff no errors.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
