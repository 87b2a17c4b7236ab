//! Payment request validation.
//!
//! Two validators: `validate` runs the domain rules against the sender's
//! state right before submission, and `parse_scanned_payment` checks the
//! format of a scanned QR payload before it ever reaches the domain rules.
//! Both are pure functions of their inputs.

use serde::{Deserialize, Serialize};

use crate::domain::account::TokenBalance;
use crate::domain::address::is_address_valid;
use crate::domain::error::DataError;

/// Longest accepted payment description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A user-entered or scanned payment intent. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Recipient address.
    pub address: String,
    /// Amount in the token's smallest unit.
    pub amount: u64,
    pub token: String,
    /// Optional free-text description; "data" on the QR payload.
    #[serde(default, rename = "data")]
    pub description: Option<String>,
}

/// Run the domain rules for a payment request.
///
/// Check order matters for the user-facing message: self-payment first,
/// then token presence, then balance coverage. The balance must strictly
/// exceed the amount (the remainder pays the network fee).
pub fn validate(
    request: &PaymentRequest,
    sender_address: &str,
    sender_balances: &[TokenBalance],
) -> Result<(), DataError> {
    if sender_address == request.address {
        return Err(DataError::SelfPayment);
    }
    let entry = sender_balances
        .iter()
        .find(|b| b.name == request.token)
        .ok_or(DataError::UnknownToken)?;
    if entry.balance <= request.amount {
        return Err(DataError::InsufficientBalance);
    }
    Ok(())
}

/// Decode and format-check a scanned payment payload (QR JSON).
///
/// Payloads that fail to decode at all report `MalformedPayload` so the
/// caller can offer a scan retry; field-level violations report their own
/// variants and get a static alert instead.
pub fn parse_scanned_payment(payload: &str) -> Result<PaymentRequest, DataError> {
    let request: PaymentRequest =
        serde_json::from_str(payload).map_err(|_| DataError::MalformedPayload)?;

    if !is_address_valid(&request.address) {
        return Err(DataError::InvalidRecipient);
    }
    if request.token.is_empty() {
        return Err(DataError::MissingToken);
    }
    if request.amount == 0 {
        return Err(DataError::AmountBelowMinimum);
    }
    if let Some(description) = &request.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DataError::DescriptionTooLong);
        }
    }

    Ok(request)
}
