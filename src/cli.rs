use clap::{Parser, Subcommand};

use sun_wallet::domain::transaction::NATIVE_TOKEN;

#[derive(Parser, Debug)]
#[command(name = "sun-wallet")]
#[command(version)]
#[command(about = "A TRON wallet client with an optimistic payment pipeline")]
pub struct Args {
    /// Network to connect to (testnet, mainnet, devnet)
    #[arg(short, long)]
    pub network: Option<String>,

    /// Custom wallet API URL (overrides network default)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Data directory path
    #[arg(long)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import an account from a raw private key
    Import {
        /// Account address
        #[arg(long)]
        address: String,
        /// Hex-encoded 32-byte private key
        #[arg(long)]
        private_key: String,
    },
    /// Send a payment
    Send {
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Amount in the token's smallest unit (sun for TRX)
        #[arg(long)]
        amount: u64,
        /// Token symbol
        #[arg(long, default_value = NATIVE_TOKEN)]
        token: String,
        /// Optional payment description
        #[arg(long)]
        note: Option<String>,
        /// Sender address (defaults to the only imported account)
        #[arg(long)]
        from: Option<String>,
    },
    /// Decode and validate a scanned payment payload (QR JSON)
    Scan {
        /// Raw JSON payload
        payload: String,
    },
    /// List locally recorded transactions
    History,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
