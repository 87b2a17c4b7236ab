use color_eyre::eyre::{eyre, Result};

use sun_wallet::{
    config::Config,
    domain::{
        account::Account,
        coordinator::{SubmissionCoordinator, SubmitOutcome},
        payment::{self, PaymentRequest},
        transaction::format_trx,
    },
    infra::{
        api::ApiClient, notifier::PushNotifier, refresh::BalanceRefresher,
        signer::Secp256k1Signer, store::Store,
    },
};

mod cli;
mod errors;
mod logging;

use cli::Command;

#[tokio::main]
async fn main() -> Result<()> {
    errors::install_hooks()?;

    let args = cli::Args::parse_args();

    if let Some(ref data_dir) = args.data_dir {
        // SAFETY: This is called at program startup before any other threads exist
        unsafe {
            std::env::set_var("SUN_WALLET_DATA", data_dir);
        }
    }

    logging::init()?;

    let config = Config::new(
        args.network.as_deref().unwrap_or("testnet"),
        args.api_url.as_deref(),
    );
    let store = Store::new()?;

    match args.command {
        Command::Import {
            address,
            private_key,
        } => {
            let account = Account::from_key_hex(address, &private_key)?;
            store.save_account(&account)?;
            println!("Imported account {}", account.address);
        }
        Command::Scan { payload } => match payment::parse_scanned_payment(&payload) {
            Ok(request) => {
                println!(
                    "Payment request: {} {} to {}",
                    format_trx(request.amount),
                    request.token,
                    request.address
                );
                if let Some(description) = request.description {
                    println!("Description: {description}");
                }
            }
            Err(reason) => {
                eprintln!("Rejected: {reason}");
                std::process::exit(1);
            }
        },
        Command::History => {
            for tx in store.list_transactions()? {
                let status = if tx.confirmed { "confirmed" } else { "pending" };
                println!(
                    "{} [{}] {} {} {} -> {} ({})",
                    tx.id,
                    tx.kind,
                    format_trx(tx.contract_data.amount),
                    tx.contract_data.token_name,
                    tx.contract_data.transfer_from_address,
                    tx.contract_data.transfer_to_address,
                    status,
                );
            }
        }
        Command::Send {
            to,
            amount,
            token,
            note,
            from,
        } => {
            let mut sender = resolve_sender(&store, from.as_deref())?;

            let api = ApiClient::new(&config);

            // Refresh balances so validation sees the ledger's view.
            sender.balances = api.get_account_balances(&sender.address).await?;
            store.save_account(&sender)?;

            let request = PaymentRequest {
                address: to,
                amount,
                token,
                description: note,
            };

            let signer = Secp256k1Signer::new();
            let notifier = PushNotifier::new(&config);
            let refresher =
                BalanceRefresher::new(api.clone(), store.clone(), sender.address.clone());
            let mut coordinator =
                SubmissionCoordinator::new(api, signer, notifier, refresher, store.clone());

            match coordinator.submit(&request, &sender).await {
                SubmitOutcome::Success => {
                    println!("Payment broadcast; the transaction is recorded as pending.");
                }
                SubmitOutcome::ValidationFailed(reason) => {
                    eprintln!("Payment rejected: {reason}");
                    std::process::exit(1);
                }
                SubmitOutcome::BuildFailed => {
                    eprintln!("Could not prepare the transaction. Please try again later.");
                    std::process::exit(1);
                }
                SubmitOutcome::SigningFailed => {
                    eprintln!("Could not sign the transaction.");
                    std::process::exit(1);
                }
                SubmitOutcome::BroadcastFailed(message) => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Resolve the sending account: an explicit address, or the only imported
/// account.
fn resolve_sender(store: &Store, from: Option<&str>) -> Result<Account> {
    match from {
        Some(address) => store
            .get_account(address)?
            .ok_or_else(|| eyre!("No imported account with address {address}")),
        None => {
            let mut accounts = store.list_accounts()?;
            match accounts.len() {
                0 => Err(eyre!("No imported accounts; run `sun-wallet import` first")),
                1 => Ok(accounts.remove(0)),
                _ => Err(eyre!("Multiple accounts imported; pass --from")),
            }
        }
    }
}
