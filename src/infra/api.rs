//! HTTP client for the wallet API fronting the TRON network.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::domain::{
    account::TokenBalance,
    coordinator::{
        BroadcastResult, DeviceList, LedgerService, SignedTransaction, UnsignedTransaction,
    },
    error::SystemError,
    transaction::TransactionDetails,
};

#[derive(Debug, Deserialize)]
struct UnsignedResponse {
    transaction: String,
}

#[derive(Debug, Deserialize)]
struct BalancesResponse {
    balances: Vec<TokenBalance>,
}

/// Wallet API client.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.network.api_url.clone(),
        }
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, SystemError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| SystemError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SystemError::RemoteUnavailable(format!(
                "API error {status} on {path}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SystemError::MalformedResponse(e.to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, SystemError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SystemError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SystemError::RemoteUnavailable(format!(
                "API error {status} on {path}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SystemError::MalformedResponse(e.to_string()))
    }

    /// Fetch the per-token balances for an address.
    pub async fn get_account_balances(
        &self,
        address: &str,
    ) -> Result<Vec<TokenBalance>, SystemError> {
        let response: BalancesResponse =
            self.get_json(&format!("/accounts/{address}/balances")).await?;
        Ok(response.balances)
    }
}

#[async_trait]
impl LedgerService for ApiClient {
    async fn get_transfer_transaction(
        &self,
        from: &str,
        to: &str,
        amount: u64,
        token: &str,
    ) -> Result<UnsignedTransaction, SystemError> {
        let body = json!({
            "from": from,
            "to": to,
            "amount": amount,
            "token": token,
        });
        let response: UnsignedResponse = self.post_json("/unsigned/transfer", &body).await?;
        Ok(UnsignedTransaction {
            raw: response.transaction,
        })
    }

    async fn get_transaction_details(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TransactionDetails, SystemError> {
        let body = json!({
            "transaction": signed.raw,
            "signature": signed.signature,
        });
        self.post_json("/transactions/details", &body).await
    }

    async fn broadcast_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<BroadcastResult, SystemError> {
        let body = json!({
            "transaction": signed.raw,
            "signature": signed.signature,
        });
        self.post_json("/transactions/broadcast", &body).await
    }

    async fn get_devices_from_public_key(
        &self,
        address: &str,
    ) -> Result<DeviceList, SystemError> {
        self.get_json(&format!("/users/{address}/devices")).await
    }
}
