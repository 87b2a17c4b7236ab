//! Translation of remote broadcast error codes to user-facing messages.

/// Shown when the remote error code has no specific translation, or when
/// the broadcast failed without a code at all.
pub const DEFAULT_BROADCAST_ERROR: &str =
    "Something went wrong while broadcasting the transaction. Please try again later.";

/// Map a known broadcast error code to its user-facing message.
///
/// `BANDWITH_ERROR` is the upstream node's own spelling.
pub fn translate_broadcast_error(code: &str) -> &'static str {
    match code {
        "SIGERROR" => "The transaction signature is invalid.",
        "CONTRACT_VALIDATE_ERROR" => "The contract could not be validated.",
        "CONTRACT_EXE_ERROR" => "The contract could not be executed.",
        "BANDWITH_ERROR" => "Not enough bandwidth to broadcast the transaction.",
        "DUP_TRANSACTION_ERROR" => "This transaction was already broadcast.",
        "TAPOS_ERROR" => "The transaction references an outdated block.",
        "TOO_BIG_TRANSACTION_ERROR" => "The transaction is too large.",
        "TRANSACTION_EXPIRATION_ERROR" => "The transaction expired before it was broadcast.",
        "SERVER_BUSY" => "The network is busy. Please try again later.",
        "NOT_ENOUGH_EFFECTIVE_CONNECTION" => {
            "Not enough connected nodes to broadcast. Please try again later."
        }
        _ => DEFAULT_BROADCAST_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_have_specific_messages() {
        assert_ne!(
            translate_broadcast_error("BANDWITH_ERROR"),
            DEFAULT_BROADCAST_ERROR
        );
        assert_ne!(
            translate_broadcast_error("DUP_TRANSACTION_ERROR"),
            DEFAULT_BROADCAST_ERROR
        );
    }

    #[test]
    fn test_unknown_code_maps_to_default() {
        assert_eq!(translate_broadcast_error("FAILED"), DEFAULT_BROADCAST_ERROR);
        assert_eq!(translate_broadcast_error(""), DEFAULT_BROADCAST_ERROR);
    }
}
