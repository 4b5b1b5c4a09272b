//! Submission validation engine.
//!
//! [`validate_submission`] walks a form's block schema once, dispatches each
//! submitted value to the rule for its block type, and aggregates every
//! failure into an ordered [`ValidationReport`]. The pass never aborts on a
//! bad field, so one invalid answer cannot hide another; only the matrix
//! rule short-circuits, and only within its own block.
//!
//! The engine is pure: no I/O, no shared state, safe to call from any
//! number of request handlers concurrently.

mod evaluator;
mod report;
mod rules;

pub use evaluator::validate_submission;
pub use report::{FieldError, ValidationReport};
