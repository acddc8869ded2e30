//! Domain-specific errors for the banking engine.
//!
//! Contains error variants for common failure cases like:
//! - Account-related errors (not found, inactive, duplicate)
//! - Amount validation errors (non-positive, above the per-transfer ceiling)
//! - Limit and rate errors (daily limit exceeded, no rate for a pair)
//!
//! These errors represent business rule rejections rather than technical
//! errors like I/O or parsing issues. Every variant renders a human-readable
//! reason so callers can surface it directly.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::dto::{AccountId, Currency};

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("account {0} is inactive")]
    AccountInactive(AccountId),

    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),

    #[error("source and destination accounts are the same")]
    SameAccount,

    #[error("amount {0} is not positive")]
    InvalidAmount(Decimal),

    #[error("amount {amount} exceeds the per-transfer ceiling of {ceiling}")]
    AmountAboveCeiling { amount: Decimal, ceiling: Decimal },

    #[error("insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("daily transfer limit exceeded: {spent} already transferred today, limit is {limit}")]
    DailyLimitExceeded { spent: Decimal, limit: Decimal },

    #[error("no exchange rate from {from} to {to}")]
    RateNotFound { from: Currency, to: Currency },

    #[error("operation is missing a required account id")]
    InvalidOperation,
}
