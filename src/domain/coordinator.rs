//! Submission coordinator: the state machine that turns a validated payment
//! request into a signed, broadcast, locally-recorded transaction.
//!
//! The local record is written optimistically before broadcast so the UI can
//! show the pending transaction immediately; a failed broadcast compensates
//! with a delete. The store therefore never ends a submission holding a
//! record for a hash whose broadcast did not succeed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::domain::account::{Account, PrivateKeySecret};
use crate::domain::error::{DataError, SystemError};
use crate::domain::error_map::{translate_broadcast_error, DEFAULT_BROADCAST_ERROR};
use crate::domain::payment::{self, PaymentRequest};
use crate::domain::transaction::{Transaction, TransactionDetails, TransactionKind};
use crate::infra::store::Store;

/// Transaction kinds that trigger recipient push notifications.
pub const NOTIFIABLE_KINDS: [TransactionKind; 2] =
    [TransactionKind::Transfer, TransactionKind::TransferAsset];

/// A not-yet-signed ledger operation, opaque beyond its raw hex payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub raw: String,
}

/// An unsigned transaction plus its signature, ready for broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub raw: String,
    /// 65-byte recoverable signature, hex encoded.
    pub signature: String,
}

/// Broadcast status as reported by the remote ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl BroadcastResult {
    pub fn is_success(&self) -> bool {
        self.code == "SUCCESS"
    }
}

/// Devices registered for an address, as reported by the wallet API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceList {
    pub users: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "deviceid")]
    pub device_id: String,
}

/// Remote ledger service consumed by the pipeline.
#[async_trait]
pub trait LedgerService: Send + Sync {
    async fn get_transfer_transaction(
        &self,
        from: &str,
        to: &str,
        amount: u64,
        token: &str,
    ) -> Result<UnsignedTransaction, SystemError>;

    async fn get_transaction_details(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TransactionDetails, SystemError>;

    async fn broadcast_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<BroadcastResult, SystemError>;

    async fn get_devices_from_public_key(
        &self,
        address: &str,
    ) -> Result<DeviceList, SystemError>;
}

/// Cryptographic signing delegate. The coordinator never inspects key
/// material; it only forwards the sender's opaque key handle.
pub trait TransactionSigner: Send + Sync {
    fn sign(
        &self,
        key: &PrivateKeySecret,
        unsigned: &UnsignedTransaction,
    ) -> Result<SignedTransaction, SystemError>;
}

/// Push notification delivery. Fire-and-forget: failures never fail a
/// submission.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn post(
        &self,
        content: &str,
        summary: &Transaction,
        device_id: &str,
    ) -> Result<(), SystemError>;
}

/// Re-syncs account balances after a successful debit.
#[async_trait]
pub trait AccountDataRefresher: Send + Sync {
    async fn reload(&self) -> Result<(), SystemError>;
}

/// Submission result exposed to callers; the UI renders an alert or
/// navigates based on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    ValidationFailed(DataError),
    BuildFailed,
    SigningFailed,
    BroadcastFailed(String),
}

/// Coordinator stage, observable for logging and UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    Idle,
    Validating,
    Building,
    Signing,
    PersistingLocal,
    Broadcasting,
    Reconciled,
    RolledBack,
}

/// Orchestrates one submission at a time: validation, building, signing,
/// optimistic local persistence, broadcast, rollback and post-success
/// side effects. `submit` takes `&mut self`, so concurrent submissions
/// through one coordinator are ruled out statically.
pub struct SubmissionCoordinator<L, S, N, R> {
    ledger: L,
    signer: S,
    notifier: N,
    refresher: R,
    store: Store,
    stage: SubmitStage,
}

impl<L, S, N, R> SubmissionCoordinator<L, S, N, R>
where
    L: LedgerService,
    S: TransactionSigner,
    N: Notifier,
    R: AccountDataRefresher,
{
    pub fn new(ledger: L, signer: S, notifier: N, refresher: R, store: Store) -> Self {
        Self {
            ledger,
            signer,
            notifier,
            refresher,
            store,
            stage: SubmitStage::Idle,
        }
    }

    pub fn stage(&self) -> SubmitStage {
        self.stage
    }

    fn enter(&mut self, stage: SubmitStage) {
        debug!(?stage, "submission stage");
        self.stage = stage;
    }

    /// Run a full submission. Always returns to `Idle`, whatever the
    /// outcome.
    pub async fn submit(
        &mut self,
        request: &PaymentRequest,
        sender: &Account,
    ) -> SubmitOutcome {
        let outcome = self.run(request, sender).await;
        self.enter(SubmitStage::Idle);
        outcome
    }

    async fn run(&mut self, request: &PaymentRequest, sender: &Account) -> SubmitOutcome {
        self.enter(SubmitStage::Validating);
        if let Err(reason) = payment::validate(request, &sender.address, &sender.balances) {
            return SubmitOutcome::ValidationFailed(reason);
        }

        // Last fully-reversible point: nothing local or remote is touched
        // until the store write below.
        self.enter(SubmitStage::Building);
        let unsigned = match self
            .ledger
            .get_transfer_transaction(&sender.address, &request.address, request.amount, &request.token)
            .await
        {
            Ok(unsigned) => unsigned,
            Err(err) => {
                error!(stage = "building", %err, "failed to fetch unsigned transaction");
                return SubmitOutcome::BuildFailed;
            }
        };

        self.enter(SubmitStage::Signing);
        let signed = match self.signer.sign(&sender.private_key(), &unsigned) {
            Ok(signed) => signed,
            Err(err) => {
                error!(stage = "signing", %err, "failed to sign transaction");
                return SubmitOutcome::SigningFailed;
            }
        };

        // Finalize: the remote service derives the ledger hash and decodes
        // the contracts for the signed payload.
        let details = match self.ledger.get_transaction_details(&signed).await {
            Ok(details) => details,
            Err(err) => {
                error!(stage = "finalizing", %err, "failed to fetch transaction details");
                return SubmitOutcome::BuildFailed;
            }
        };
        let transaction = match Transaction::from_details(&details) {
            Ok(transaction) => transaction,
            Err(err) => {
                error!(stage = "finalizing", %err, "failed to build transaction record");
                return SubmitOutcome::BuildFailed;
            }
        };

        // Optimistic write: the pending record is visible (and survives a
        // restart) while the broadcast is in flight.
        self.enter(SubmitStage::PersistingLocal);
        if let Err(err) = self.store.create_transaction(&transaction) {
            error!(stage = "persisting", %err, hash = %transaction.id, "failed to persist transaction");
            return SubmitOutcome::BroadcastFailed(DEFAULT_BROADCAST_ERROR.to_string());
        }

        self.enter(SubmitStage::Broadcasting);
        match self.ledger.broadcast_transaction(&signed).await {
            Ok(result) if result.is_success() => {
                self.enter(SubmitStage::Reconciled);
                self.fan_out(&transaction).await;
                SubmitOutcome::Success
            }
            Ok(result) => {
                warn!(code = %result.code, hash = %transaction.id, "broadcast rejected");
                self.roll_back(&transaction.id);
                SubmitOutcome::BroadcastFailed(translate_broadcast_error(&result.code).to_string())
            }
            Err(err) => {
                error!(stage = "broadcasting", %err, hash = %transaction.id, "broadcast failed");
                self.roll_back(&transaction.id);
                SubmitOutcome::BroadcastFailed(DEFAULT_BROADCAST_ERROR.to_string())
            }
        }
    }

    /// Compensating delete: restore the pre-submission local state.
    fn roll_back(&mut self, hash: &str) {
        self.enter(SubmitStage::RolledBack);
        if let Err(err) = self.store.delete_transaction(hash) {
            error!(stage = "rollback", %err, %hash, "failed to delete local transaction record");
        }
    }

    /// Best-effort side effects after a confirmed broadcast: recipient
    /// notifications and a balance refresh. Individual failures are logged
    /// and swallowed; a successful payment is never reported as failed here.
    async fn fan_out(&self, transaction: &Transaction) {
        if NOTIFIABLE_KINDS.contains(&transaction.kind) {
            match self
                .ledger
                .get_devices_from_public_key(&transaction.contract_data.transfer_to_address)
                .await
            {
                Ok(devices) => {
                    let content = format!(
                        "You received a payment from {}",
                        transaction.contract_data.transfer_from_address
                    );
                    for device in &devices.users {
                        if let Err(err) =
                            self.notifier.post(&content, transaction, &device.device_id).await
                        {
                            warn!(%err, device = %device.device_id, "notification dispatch failed");
                        }
                    }
                }
                Err(err) => warn!(%err, "recipient device lookup failed"),
            }
        }

        if let Err(err) = self.refresher.reload().await {
            warn!(%err, "account data refresh failed");
        }
    }
}
