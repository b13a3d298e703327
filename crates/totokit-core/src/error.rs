//! Validation failure reporting.

use serde::Serialize;
use thiserror::Error;

/// Identifies which request input a validation failure blames, so a
/// caller can flag the corresponding field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Field {
    Count,
    System,
    MustIncludes,
    MustExcludes,
    /// Numbers list of the custom group at this index.
    CustomNumbers(usize),
    /// Count spec of the custom group at this index.
    CustomCount(usize),
    Odd,
    Even,
    Low,
    High,
    /// Count spec of the decade bucket at this index.
    Decade(usize),
    MaxRunLength,
    MaxRunCount,
}

/// A recoverable validation failure: a human-readable reason plus the
/// blamed input field. Validators return these rather than panic; the
/// pipeline propagates the first one it sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct RuleViolation {
    pub field: Field,
    pub reason: String,
}

impl RuleViolation {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        RuleViolation {
            field,
            reason: reason.into(),
        }
    }
}
