//! Error taxonomy for the payment pipeline.
//!
//! `DataError` covers user-input and business-rule violations: the pipeline
//! aborts before any durable write and the `Display` text is shown to the
//! user as-is. `SystemError` covers environment, transport and crypto
//! failures: the pipeline logs them with the failing stage and shows a
//! generic message instead.

use thiserror::Error;

/// A recoverable violation of a payment rule or a malformed user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("the recipient address must differ from the sender address")]
    SelfPayment,
    #[error("the selected token is not held by this account")]
    UnknownToken,
    #[error("the account balance does not cover the requested amount")]
    InsufficientBalance,
    #[error("the scanned code is not a valid payment request")]
    MalformedPayload,
    #[error("the recipient address is not a valid TRON address")]
    InvalidRecipient,
    #[error("the payment request carries no token")]
    MissingToken,
    #[error("the amount is below the smallest transferable unit")]
    AmountBelowMinimum,
    #[error("the description exceeds 500 characters")]
    DescriptionTooLong,
}

/// An environment or transport failure outside the user's control.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("remote service unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("malformed remote response: {0}")]
    MalformedResponse(String),
    #[error("transaction signing failed: {0}")]
    SigningFailed(String),
    #[error("local store failure: {0}")]
    Storage(String),
}
