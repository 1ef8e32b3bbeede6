//! Account store contract
//!
//! The store owns persistence of accounts, account types, and the
//! transfer ledger - and nothing else. Business rules live in the
//! transfer engine, which is the only caller of `commit_transfer`.

use async_trait::async_trait;
use thiserror::Error;

use crate::account::models::{Account, AccountType, Permissions};
use crate::core_types::{AccountId, AccountTypeId, Amount};
use crate::ledger::Transfer;

/// Store-level failures, below the engine's error taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("account type not found: {0}")]
    AccountTypeNotFound(AccountTypeId),

    /// A balance mutation would underflow or overflow. The commit is
    /// abandoned with no partial state.
    #[error("balance out of range: {0}")]
    BalanceOutOfRange(&'static str),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Durable keeper of accounts and the ledger.
///
/// # Contract
///
/// - `get_account_with_type` returns a *consistent snapshot*: the account
///   and its type as they existed at a single point in time, never two
///   independently-racing reads.
/// - `commit_transfer` is all-or-nothing: debit sender, credit receiver,
///   append one ledger entry - or leave the store untouched. It assigns
///   the transfer id from the store's own monotonic sequencing.
/// - `list_transfers` returns committed entries only, ascending by id.
///
/// The trait is object-safe; the engine holds an `Arc<dyn AccountStore>`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create a named capability bundle.
    async fn create_account_type(
        &self,
        name: &str,
        permissions: Permissions,
    ) -> Result<AccountType, StoreError>;

    /// Create an account under an existing type with an opening balance.
    async fn create_account(
        &self,
        account_type_id: AccountTypeId,
        initial_balance: Amount,
    ) -> Result<Account, StoreError>;

    /// Resolve an account together with its type, as one snapshot.
    async fn get_account_with_type(
        &self,
        account_id: AccountId,
    ) -> Result<Option<(Account, AccountType)>, StoreError>;

    /// Atomically debit sender, credit receiver, and append the ledger
    /// entry. Only the transfer engine calls this.
    async fn commit_transfer(
        &self,
        sender_id: AccountId,
        receiver_id: AccountId,
        amount: Amount,
    ) -> Result<Transfer, StoreError>;

    /// All committed transfers, ascending by id.
    async fn list_transfers(&self) -> Result<Vec<Transfer>, StoreError>;
}
