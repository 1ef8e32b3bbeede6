//! In-memory account store
//!
//! Non-durable `AccountStore` used by tests and by embedders that derive
//! balances elsewhere. One `RwLock` guards the whole state, so every
//! read is a consistent snapshot and every commit is naturally atomic.
//! Critical sections never await.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use rustc_hash::FxHashMap;

use super::models::{Account, AccountType, Permissions};
use super::store::{AccountStore, StoreError};
use crate::core_types::{AccountId, AccountTypeId, Amount};
use crate::ledger::Transfer;

#[derive(Default)]
struct MemoryInner {
    accounts: FxHashMap<AccountId, Account>,
    account_types: FxHashMap<AccountTypeId, AccountType>,
    transfers: Vec<Transfer>,
    next_account_id: AccountId,
    next_account_type_id: AccountTypeId,
    next_transfer_id: u64,
}

/// In-process account store backed by hash maps.
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account_type(
        &self,
        name: &str,
        permissions: Permissions,
    ) -> Result<AccountType, StoreError> {
        let mut inner = self.inner.write().unwrap();

        inner.next_account_type_id += 1;
        let account_type = AccountType {
            id: inner.next_account_type_id,
            name: name.to_string(),
            permissions,
        };
        inner
            .account_types
            .insert(account_type.id, account_type.clone());

        Ok(account_type)
    }

    async fn create_account(
        &self,
        account_type_id: AccountTypeId,
        initial_balance: Amount,
    ) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().unwrap();

        if !inner.account_types.contains_key(&account_type_id) {
            return Err(StoreError::AccountTypeNotFound(account_type_id));
        }

        inner.next_account_id += 1;
        let account = Account::new(inner.next_account_id, account_type_id, initial_balance);
        inner.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn get_account_with_type(
        &self,
        account_id: AccountId,
    ) -> Result<Option<(Account, AccountType)>, StoreError> {
        let inner = self.inner.read().unwrap();

        let Some(account) = inner.accounts.get(&account_id) else {
            return Ok(None);
        };

        // The type must exist: accounts are only created against one.
        let account_type = inner
            .account_types
            .get(&account.account_type_id)
            .ok_or(StoreError::AccountTypeNotFound(account.account_type_id))?;

        Ok(Some((account.clone(), account_type.clone())))
    }

    async fn commit_transfer(
        &self,
        sender_id: AccountId,
        receiver_id: AccountId,
        amount: Amount,
    ) -> Result<Transfer, StoreError> {
        let mut inner = self.inner.write().unwrap();

        // Validate both mutations on copies before touching the live
        // accounts, so a failure leaves the store untouched.
        let mut sender = inner
            .accounts
            .get(&sender_id)
            .cloned()
            .ok_or(StoreError::AccountNotFound(sender_id))?;
        let mut receiver = inner
            .accounts
            .get(&receiver_id)
            .cloned()
            .ok_or(StoreError::AccountNotFound(receiver_id))?;

        sender.debit(amount).map_err(StoreError::BalanceOutOfRange)?;
        receiver
            .credit(amount)
            .map_err(StoreError::BalanceOutOfRange)?;

        inner.next_transfer_id += 1;
        let transfer = Transfer {
            id: inner.next_transfer_id,
            sender_id,
            receiver_id,
            amount,
            created_at: Utc::now(),
        };

        inner.accounts.insert(sender_id, sender);
        inner.accounts.insert(receiver_id, receiver);
        inner.transfers.push(transfer.clone());

        Ok(transfer)
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.transfers.clone())
    }
}
