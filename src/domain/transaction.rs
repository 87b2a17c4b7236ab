//! Domain transaction records and the builder that derives them from the
//! remote service's decoded transaction details.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::error::SystemError;

/// Native coin symbol. Native transfers carry no explicit token field
/// upstream, so the record's token name is forced to this literal.
pub const NATIVE_TOKEN: &str = "TRX";

/// Sun per TRX (the smallest transferable unit is one sun).
pub const ONE_TRX: u64 = 1_000_000;

/// Human transaction kind, resolved from the remote contract type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Transfer,
    TransferAsset,
    Other,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Transfer => write!(f, "Transfer"),
            TransactionKind::TransferAsset => write!(f, "Transfer Asset"),
            TransactionKind::Other => write!(f, "Other"),
        }
    }
}

/// Resolve a remote contract type id to a transaction kind.
///
/// 1 = TransferContract, 2 = TransferAssetContract. Unknown codes map to
/// `Other` rather than failing: the record is still worth keeping.
pub fn kind_for_contract_type(contract_type_id: u32) -> TransactionKind {
    match contract_type_id {
        1 => TransactionKind::Transfer,
        2 => TransactionKind::TransferAsset,
        _ => TransactionKind::Other,
    }
}

/// Decoded `contracts[0]` descriptor from the remote transaction details.
///
/// Asset-issuance contracts carry `ownerAddress` instead of `from`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDetails {
    pub contract_type_id: u32,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub owner_address: Option<String>,
    pub to: String,
    #[serde(default)]
    pub token: Option<String>,
    pub amount: u64,
}

/// Details the remote service reports for a signed payload: the ledger hash
/// and the decoded contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub hash: String,
    pub contracts: Vec<ContractDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractData {
    pub transfer_from_address: String,
    pub transfer_to_address: String,
    pub token_name: String,
    pub amount: u64,
}

/// Local transaction record, keyed by the ledger hash.
///
/// Created optimistically right before broadcast; `confirmed` starts false
/// and is flipped later by the external confirmation poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub contract_data: ContractData,
    pub owner_address: String,
    /// Wall-clock construction time in milliseconds, not ledger time.
    pub timestamp: i64,
    pub confirmed: bool,
}

impl Transaction {
    /// Build the domain record from the signed transaction's details.
    pub fn from_details(details: &TransactionDetails) -> Result<Self, SystemError> {
        let contract = details.contracts.first().ok_or_else(|| {
            SystemError::MalformedResponse("transaction details carry no contracts".to_string())
        })?;

        let kind = kind_for_contract_type(contract.contract_type_id);
        let from = contract
            .from
            .clone()
            .or_else(|| contract.owner_address.clone())
            .ok_or_else(|| {
                SystemError::MalformedResponse(
                    "contract carries neither from nor ownerAddress".to_string(),
                )
            })?;
        let token_name = if kind == TransactionKind::Transfer {
            NATIVE_TOKEN.to_string()
        } else {
            contract.token.clone().unwrap_or_default()
        };

        Ok(Self {
            id: details.hash.clone(),
            kind,
            contract_data: ContractData {
                transfer_from_address: from.clone(),
                transfer_to_address: contract.to.clone(),
                token_name,
                amount: contract.amount,
            },
            owner_address: from,
            timestamp: Utc::now().timestamp_millis(),
            confirmed: false,
        })
    }
}

/// Format an amount of sun as TRX for display.
pub fn format_trx(sun: u64) -> String {
    let whole = sun / ONE_TRX;
    let frac = sun % ONE_TRX;
    if frac == 0 {
        format!("{whole}")
    } else {
        let s = format!("{whole}.{frac:06}");
        s.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(contract: ContractDetails) -> TransactionDetails {
        TransactionDetails {
            hash: "a1b2c3".to_string(),
            contracts: vec![contract],
        }
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!(kind_for_contract_type(1), TransactionKind::Transfer);
        assert_eq!(kind_for_contract_type(2), TransactionKind::TransferAsset);
        assert_eq!(kind_for_contract_type(9), TransactionKind::Other);
        assert_eq!(kind_for_contract_type(0), TransactionKind::Other);
    }

    #[test]
    fn test_native_transfer_forces_trx_token() {
        let tx = Transaction::from_details(&details(ContractDetails {
            contract_type_id: 1,
            from: Some("Tsender".to_string()),
            owner_address: None,
            to: "Tother".to_string(),
            token: Some("IGNORED".to_string()),
            amount: 50,
        }))
        .unwrap();

        assert_eq!(tx.id, "a1b2c3");
        assert_eq!(tx.kind, TransactionKind::Transfer);
        assert_eq!(tx.contract_data.token_name, NATIVE_TOKEN);
        assert_eq!(tx.contract_data.amount, 50);
        assert!(!tx.confirmed);
    }

    #[test]
    fn test_asset_transfer_keeps_token_name() {
        let tx = Transaction::from_details(&details(ContractDetails {
            contract_type_id: 2,
            from: Some("Tsender".to_string()),
            owner_address: None,
            to: "Tother".to_string(),
            token: Some("BTT".to_string()),
            amount: 7,
        }))
        .unwrap();

        assert_eq!(tx.kind, TransactionKind::TransferAsset);
        assert_eq!(tx.contract_data.token_name, "BTT");
    }

    #[test]
    fn test_owner_address_fallback() {
        // Asset-issuance contracts use ownerAddress instead of from.
        let tx = Transaction::from_details(&details(ContractDetails {
            contract_type_id: 6,
            from: None,
            owner_address: Some("Tissuer".to_string()),
            to: "Tother".to_string(),
            token: Some("NEW".to_string()),
            amount: 1,
        }))
        .unwrap();

        assert_eq!(tx.kind, TransactionKind::Other);
        assert_eq!(tx.contract_data.transfer_from_address, "Tissuer");
        assert_eq!(tx.owner_address, "Tissuer");
    }

    #[test]
    fn test_empty_contracts_is_malformed() {
        let result = Transaction::from_details(&TransactionDetails {
            hash: "a1b2c3".to_string(),
            contracts: vec![],
        });
        assert!(matches!(result, Err(SystemError::MalformedResponse(_))));
    }

    #[test]
    fn test_format_trx() {
        assert_eq!(format_trx(0), "0");
        assert_eq!(format_trx(ONE_TRX), "1");
        assert_eq!(format_trx(1), "0.000001");
        assert_eq!(format_trx(1_500_000), "1.5");
        assert_eq!(format_trx(50 * ONE_TRX), "50");
    }
}
