//! Domain error model.

use thiserror::Error;

use crate::id::OptionId;
use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, illegal transitions). Infrastructure concerns belong elsewhere.
///
/// Every variant is recoverable: callers report it and let the user retry. A
/// rejected operation must leave the prior state fully intact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty cart, non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested resource was not found (domain-level).
    #[error("not found: {0}")]
    NotFound(String),

    /// An order state transition was rejected by the lifecycle guard.
    #[error("illegal transition from '{from}' to '{to}'")]
    IllegalTransition { from: String, to: String },

    /// Two mutually exclusive vehicle options were selected together.
    #[error("options {a} and {b} are incompatible")]
    IncompatibleOptions { a: OptionId, b: OptionId },

    /// Credit payment was processed before credit details were computed.
    #[error("credit details must be calculated before processing payment")]
    PaymentNotConfigured,

    /// A payment amount is out of range for the chosen strategy.
    #[error("invalid payment terms: {0}")]
    InvalidPaymentTerms(String),

    /// An identifier was malformed (parse failure at the API boundary).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn illegal_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::IllegalTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn incompatible_options(a: OptionId, b: OptionId) -> Self {
        Self::IncompatibleOptions { a, b }
    }

    pub fn invalid_payment_terms(msg: impl Into<String>) -> Self {
        Self::InvalidPaymentTerms(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Convenience used by validation helpers that reject negative amounts.
pub fn ensure_non_negative(amount: Money, what: &str) -> DomainResult<()> {
    if amount.minor_units() < 0 {
        return Err(DomainError::validation(format!(
            "{what} cannot be negative"
        )));
    }
    Ok(())
}
