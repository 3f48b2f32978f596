//! Validation errors raised while turning persisted records into transactions.

/// What was wrong with a persisted record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    /// `amount` could not be read as a number.
    #[error("amount \"{0}\" is not numeric")]
    NonNumericAmount(String),

    /// `amount` parsed but is NaN or infinite.
    #[error("amount is not a finite number")]
    NonFiniteAmount,

    /// Polarity is carried by `type`, so amounts must not be negative.
    #[error("amount {0} is negative")]
    NegativeAmount(f64),

    /// Finite but beyond what a single record may carry.
    #[error("amount {0} is too large")]
    AmountTooLarge(f64),

    /// `type` was neither `positive` nor `negative`.
    #[error("unknown transaction type \"{0}\"")]
    UnknownType(String),

    /// `date` was not an RFC 3339 timestamp or a `YYYY-MM-DD` date.
    #[error("date \"{0}\" could not be parsed")]
    InvalidDate(String),
}

/// A persisted record failed validation.
///
/// Carries the id of the offending record so the caller can report it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid transaction {id}: {issue}")]
pub struct ValidationError {
    pub id: String,
    pub issue: ValidationIssue,
}

impl ValidationError {
    pub fn new(id: impl Into<String>, issue: ValidationIssue) -> Self {
        Self {
            id: id.into(),
            issue,
        }
    }
}
