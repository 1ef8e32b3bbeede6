//! Ledger - append-only transfer history
//!
//! Every committed transfer is one immutable entry. Reversals are new
//! opposite-direction entries, never edits. The ledger is the audit
//! source of truth: replaying it from the initial balances must land on
//! the balances the store currently reports.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core_types::{AccountId, Amount, TransferId};

/// One committed transfer.
///
/// `id` is assigned by the store's own sequencing and is strictly
/// monotonic, so it doubles as the ledger ordering key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransferId,
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
    pub amount: Amount,
    pub created_at: DateTime<Utc>,
}

/// Replay a ledger on top of initial balances.
///
/// Returns the balance each account should hold after applying every
/// entry in order: `initial + sum(credits) - sum(debits)`.
///
/// # Errors
/// A debit exceeding the running balance means the ledger and the
/// initial balances disagree - corruption, reported with the offending
/// transfer id.
pub fn replay(
    initial_balances: &FxHashMap<AccountId, Amount>,
    transfers: &[Transfer],
) -> Result<FxHashMap<AccountId, Amount>, TransferId> {
    let mut balances = initial_balances.clone();

    for transfer in transfers {
        let sender = balances.entry(transfer.sender_id).or_insert(0);
        *sender = sender.checked_sub(transfer.amount).ok_or(transfer.id)?;

        let receiver = balances.entry(transfer.receiver_id).or_insert(0);
        *receiver = receiver.checked_add(transfer.amount).ok_or(transfer.id)?;
    }

    Ok(balances)
}
