use std::fmt;

use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Opaque handle around a raw signing key.
///
/// The pipeline only forwards this to the signing delegate; nothing else
/// reads the key material. The backing bytes are wiped on drop.
#[derive(Clone)]
pub struct PrivateKeySecret(Zeroizing<[u8; 32]>);

impl PrivateKeySecret {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Expose the raw key bytes. Only the signing delegate should call this.
    pub fn expose(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PrivateKeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeySecret(..)")
    }
}

/// Per-token balance entry, amounts in the token's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub name: String,
    pub balance: u64,
}

/// An account in the wallet: its address, raw signing key and cached
/// per-token balances. Balances are refreshed from the wallet API, not
/// maintained locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    pub private_key: [u8; 32],
    pub balances: Vec<TokenBalance>,
}

impl Account {
    pub fn new(address: String, private_key: [u8; 32]) -> Self {
        Self {
            address,
            private_key,
            balances: Vec::new(),
        }
    }

    /// Import an account from a hex-encoded private key.
    pub fn from_key_hex(address: String, private_key_hex: &str) -> Result<Self> {
        let bytes = hex::decode(private_key_hex.trim().trim_start_matches("0x"))?;
        let private_key: [u8; 32] = bytes
            .try_into()
            .map_err(|_| eyre!("Invalid private key length: expected 32 bytes"))?;
        Ok(Self::new(address, private_key))
    }

    /// Get the signing key handle for this account.
    pub fn private_key(&self) -> PrivateKeySecret {
        PrivateKeySecret::new(self.private_key)
    }

    /// Look up the balance for a token, if the account holds it.
    pub fn balance_of(&self, token: &str) -> Option<u64> {
        self.balances
            .iter()
            .find(|b| b.name == token)
            .map(|b| b.balance)
    }
}
