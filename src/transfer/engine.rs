//! Transfer engine
//!
//! Validates and executes a single transfer as an atomic operation.
//! The engine is the only writer of balances: every mutation flows
//! through `AccountStore::commit_transfer`, and both account locks are
//! held from the first stateful gate through the commit so no gate can
//! be evaluated against a balance another transfer is about to change.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{InvalidReason, TransferError};
use super::locks::AccountLocks;
use super::state::TransferState;
use super::types::{Side, TransferRequest};
use crate::account::models::Capability;
use crate::account::store::AccountStore;
use crate::core_types::Amount;
use crate::ledger::Transfer;

/// How long `execute` waits for a result before returning `Timeout`.
/// The commit itself is never abandoned.
pub const DEFAULT_COMMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Funds gate applied to the sender before a transfer may proceed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalancePolicy {
    /// Any positive balance opens the gate, regardless of amount. An
    /// amount the balance cannot cover then fails at commit with the
    /// store untouched, so balances still never go negative.
    #[default]
    PositiveBalance,

    /// The balance must cover the full amount.
    CoverAmount,
}

impl BalancePolicy {
    /// Does `balance` open the gate for `amount`?
    #[inline]
    pub fn passes(&self, balance: Amount, amount: Amount) -> bool {
        match self {
            BalancePolicy::PositiveBalance => balance > 0,
            BalancePolicy::CoverAmount => balance >= amount,
        }
    }
}

/// The funds-transfer engine.
///
/// Cheap to share behind an `Arc`; safe to call from many tasks at once.
/// Transfers touching a common account serialize on that account's
/// lock; disjoint pairs run in parallel.
pub struct TransferEngine {
    store: Arc<dyn AccountStore>,
    locks: Arc<AccountLocks>,
    policy: BalancePolicy,
    commit_timeout: Duration,
}

impl TransferEngine {
    /// Engine with the default funds gate and commit timeout
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self::with_settings(store, BalancePolicy::default(), DEFAULT_COMMIT_TIMEOUT)
    }

    pub fn with_settings(
        store: Arc<dyn AccountStore>,
        policy: BalancePolicy,
        commit_timeout: Duration,
    ) -> Self {
        Self {
            store,
            locks: Arc::new(AccountLocks::new()),
            policy,
            commit_timeout,
        }
    }

    /// Engine wired from a loaded configuration section
    pub fn from_config(store: Arc<dyn AccountStore>, config: &crate::config::EngineConfig) -> Self {
        Self::with_settings(store, config.balance_policy, config.commit_timeout())
    }

    pub fn policy(&self) -> BalancePolicy {
        self.policy
    }

    /// Validate and execute one transfer.
    ///
    /// Gate order, first violation wins:
    /// 1. sender != receiver
    /// 2. amount > 0
    /// 3. sender resolvable with its type
    /// 4. receiver resolvable with its type
    /// 5. sender balance passes the funds gate
    /// 6. sender type has `send`
    /// 7. receiver type has `receive`
    ///
    /// On success: exactly one ledger entry, exactly two balance
    /// changes. On any failure the store is untouched.
    ///
    /// Validation and commit run in a spawned task. If the result does
    /// not arrive within the configured timeout the caller gets
    /// `Timeout`, but the task keeps running - an in-flight commit is
    /// never rolled back because the caller stopped waiting.
    pub async fn execute(&self, request: TransferRequest) -> Result<Transfer, TransferError> {
        debug!(%request, state = %TransferState::Received, "transfer request");

        // Shape gates need no account state; fail before spawning
        if request.sender_id == request.receiver_id {
            return Err(self.reject(&request, InvalidReason::SelfTransfer));
        }
        if request.amount == 0 {
            return Err(self.reject(&request, InvalidReason::NonPositiveAmount));
        }

        let store = self.store.clone();
        let locks = self.locks.clone();
        let policy = self.policy;
        let task = tokio::spawn(run_transfer(store, locks, policy, request));

        match tokio::time::timeout(self.commit_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(TransferError::TransferFailed(format!(
                "transfer task aborted: {join_error}"
            ))),
            Err(_elapsed) => {
                warn!(%request, "caller timed out; in-flight transfer continues to completion");
                Err(TransferError::Timeout)
            }
        }
    }

    fn reject(&self, request: &TransferRequest, reason: InvalidReason) -> TransferError {
        debug!(%request, state = %TransferState::Rejected, %reason, "transfer rejected");
        TransferError::InvalidRequest(reason)
    }
}

/// Stateful gates + commit, under both account locks.
async fn run_transfer(
    store: Arc<dyn AccountStore>,
    locks: Arc<AccountLocks>,
    policy: BalancePolicy,
    request: TransferRequest,
) -> Result<Transfer, TransferError> {
    let _guards = locks.lock_pair(request.sender_id, request.receiver_id).await;
    debug!(%request, state = %TransferState::Validating, "gates under account locks");

    let (sender, sender_type) = store
        .get_account_with_type(request.sender_id)
        .await?
        .ok_or(TransferError::AccountNotFound(Side::Sender, request.sender_id))?;
    let (_, receiver_type) = store
        .get_account_with_type(request.receiver_id)
        .await?
        .ok_or(TransferError::AccountNotFound(Side::Receiver, request.receiver_id))?;

    if !policy.passes(sender.balance(), request.amount) {
        debug!(%request, balance = sender.balance(), "funds gate failed");
        return Err(TransferError::InsufficientFunds);
    }

    if !sender_type.can_send() {
        return Err(TransferError::PermissionDenied {
            side: Side::Sender,
            capability: Capability::Send,
        });
    }
    if !receiver_type.can_receive() {
        return Err(TransferError::PermissionDenied {
            side: Side::Receiver,
            capability: Capability::Receive,
        });
    }

    debug!(%request, state = %TransferState::Committing, "gates passed");
    let transfer = store
        .commit_transfer(request.sender_id, request.receiver_id, request.amount)
        .await
        .map_err(|e| {
            warn!(%request, error = %e, state = %TransferState::Failed, "commit failed, store unchanged");
            TransferError::from(e)
        })?;

    info!(
        transfer_id = transfer.id,
        state = %TransferState::Committed,
        "transfer committed: {} -> {} amount={}",
        transfer.sender_id,
        transfer.receiver_id,
        transfer.amount
    );
    Ok(transfer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_balance_gate() {
        let policy = BalancePolicy::PositiveBalance;
        assert!(policy.passes(1, 1000)); // any positive balance opens it
        assert!(policy.passes(100, 30));
        assert!(!policy.passes(0, 1));
    }

    #[test]
    fn test_cover_amount_gate() {
        let policy = BalancePolicy::CoverAmount;
        assert!(policy.passes(100, 100));
        assert!(policy.passes(100, 30));
        assert!(!policy.passes(99, 100));
        assert!(!policy.passes(0, 1));
    }

    #[test]
    fn test_from_config() {
        let config = crate::config::EngineConfig {
            commit_timeout_ms: 250,
            balance_policy: BalancePolicy::CoverAmount,
        };
        let store = Arc::new(crate::account::MemoryStore::new());
        let engine = TransferEngine::from_config(store, &config);

        assert_eq!(engine.policy(), BalancePolicy::CoverAmount);
        assert_eq!(engine.commit_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_policy_config_names() {
        // Names as they appear in config files
        assert_eq!(
            serde_yaml::from_str::<BalancePolicy>("positive_balance").unwrap(),
            BalancePolicy::PositiveBalance
        );
        assert_eq!(
            serde_yaml::from_str::<BalancePolicy>("cover_amount").unwrap(),
            BalancePolicy::CoverAmount
        );
    }
}
