use std::path::PathBuf;

use color_eyre::eyre::Result;
use heed::{types::*, Database, Env, EnvOpenOptions};

use crate::{
    config::get_data_dir,
    domain::{account::Account, transaction::Transaction},
};

/// Wrapper around LMDB database for persistent storage.
///
/// Every mutation runs in its own scoped write transaction, so a record is
/// either fully applied or not applied at all; readers always observe a
/// consistent snapshot.
#[derive(Clone)]
pub struct Store {
    env: Env,
}

impl Store {
    pub fn new() -> Result<Self> {
        Self::with_path(get_data_dir().join("wallet.mdb"))
    }

    pub fn with_path(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(100 * 1024 * 1024) // 100MB
                .max_dbs(10)
                .open(path)?
        };
        Ok(Self { env })
    }

    /// Save a transaction record keyed by its ledger hash.
    ///
    /// The hash is remote-derived and globally unique, so a put keeps the
    /// store at most one record per hash.
    pub fn create_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<Str, SerdeRmp<Transaction>> =
            self.env.create_database(&mut wtxn, Some("transactions"))?;
        db.put(&mut wtxn, &transaction.id, transaction)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Get a transaction by its ledger hash.
    pub fn get_transaction(&self, hash: &str) -> Result<Option<Transaction>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<Str, SerdeRmp<Transaction>>> =
            self.env.open_database(&rtxn, Some("transactions"))?;

        match db {
            Some(db) => Ok(db.get(&rtxn, hash)?),
            None => Ok(None),
        }
    }

    /// Delete a transaction by its ledger hash. Idempotent.
    pub fn delete_transaction(&self, hash: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<Str, SerdeRmp<Transaction>> =
            self.env.create_database(&mut wtxn, Some("transactions"))?;
        db.delete(&mut wtxn, hash)?;
        wtxn.commit()?;
        Ok(())
    }

    /// List all transactions, most recent first.
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<Str, SerdeRmp<Transaction>>> =
            self.env.open_database(&rtxn, Some("transactions"))?;

        match db {
            Some(db) => {
                let mut transactions = Vec::new();
                for result in db.iter(&rtxn)? {
                    let (_, transaction) = result?;
                    transactions.push(transaction);
                }
                transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                Ok(transactions)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Save an account keyed by its address.
    pub fn save_account(&self, account: &Account) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<Str, SerdeRmp<Account>> =
            self.env.create_database(&mut wtxn, Some("accounts"))?;
        db.put(&mut wtxn, &account.address, account)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Get an account by address.
    pub fn get_account(&self, address: &str) -> Result<Option<Account>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<Str, SerdeRmp<Account>>> =
            self.env.open_database(&rtxn, Some("accounts"))?;

        match db {
            Some(db) => Ok(db.get(&rtxn, address)?),
            None => Ok(None),
        }
    }

    /// List all accounts.
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<Str, SerdeRmp<Account>>> =
            self.env.open_database(&rtxn, Some("accounts"))?;

        match db {
            Some(db) => {
                let mut accounts = Vec::new();
                for result in db.iter(&rtxn)? {
                    let (_, account) = result?;
                    accounts.push(account);
                }
                Ok(accounts)
            }
            None => Ok(Vec::new()),
        }
    }
}
