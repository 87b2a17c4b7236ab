//! Balance re-sync after a successful debit.

use async_trait::async_trait;

use crate::domain::{coordinator::AccountDataRefresher, error::SystemError};
use crate::infra::{api::ApiClient, store::Store};

/// Re-fetches an account's balances from the wallet API and rewrites the
/// stored account record.
pub struct BalanceRefresher {
    api: ApiClient,
    store: Store,
    address: String,
}

impl BalanceRefresher {
    pub fn new(api: ApiClient, store: Store, address: String) -> Self {
        Self { api, store, address }
    }
}

#[async_trait]
impl AccountDataRefresher for BalanceRefresher {
    async fn reload(&self) -> Result<(), SystemError> {
        let balances = self.api.get_account_balances(&self.address).await?;

        let mut account = self
            .store
            .get_account(&self.address)
            .map_err(|e| SystemError::Storage(e.to_string()))?
            .ok_or_else(|| {
                SystemError::Storage(format!("no stored account for {}", self.address))
            })?;

        account.balances = balances;
        self.store
            .save_account(&account)
            .map_err(|e| SystemError::Storage(e.to_string()))?;

        Ok(())
    }
}
