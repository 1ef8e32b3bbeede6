//! Account and account-type models
//!
//! An account holds a balance and references exactly one account type.
//! The account type is a named bundle of capabilities that governs what
//! the account may do in a transfer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core_types::{AccountId, AccountTypeId, Amount};

// ============================================================================
// Capability flags (bitmask)
// ============================================================================
pub mod capability_flags {
    pub const SEND: u32 = 0x01;
    pub const RECEIVE: u32 = 0x02;
}

/// A single capability an account type may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Send,
    Receive,
}

impl Capability {
    /// The bitmask bit backing this capability
    #[inline]
    pub fn bit(&self) -> u32 {
        match self {
            Capability::Send => capability_flags::SEND,
            Capability::Receive => capability_flags::RECEIVE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Send => "send",
            Capability::Receive => "receive",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability set for an account type.
///
/// Membership only: order is irrelevant and duplicates collapse.
/// Stored as a bitmask so a type row fits in one integer column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(u32);

impl Permissions {
    /// No capabilities at all
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Both `send` and `receive`
    pub const fn full() -> Self {
        Self(capability_flags::SEND | capability_flags::RECEIVE)
    }

    pub fn new(capabilities: &[Capability]) -> Self {
        let mut bits = 0;
        for cap in capabilities {
            bits |= cap.bit();
        }
        Self(bits)
    }

    /// Raw bitmask, for storage
    #[inline]
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Rebuild from a stored bitmask. Unknown bits are preserved so a
    /// newer store can round-trip capabilities this build doesn't know.
    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    pub fn allows(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn grant(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }
}

/// A named capability bundle shared by many accounts.
///
/// Immutable once real transfers have run under it: changing permissions
/// retroactively does not rewrite past ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountType {
    pub id: AccountTypeId,
    pub name: String,
    pub permissions: Permissions,
}

impl AccountType {
    pub fn can_send(&self) -> bool {
        self.permissions.allows(Capability::Send)
    }

    pub fn can_receive(&self) -> bool {
        self.permissions.allows(Capability::Receive)
    }
}

/// An account: a balance plus a reference to its account type.
///
/// # Invariants (enforced by the private field):
/// 1. `id` and `account_type_id` are immutable after creation
/// 2. `balance` only changes through checked `credit`/`debit`
/// 3. Stores call those methods only on behalf of the transfer engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub account_type_id: AccountTypeId,
    balance: Amount, // PRIVATE - mutate through credit/debit only
}

impl Account {
    pub fn new(id: AccountId, account_type_id: AccountTypeId, initial_balance: Amount) -> Self {
        Self {
            id,
            account_type_id,
            balance: initial_balance,
        }
    }

    /// Current balance (read-only)
    #[inline(always)]
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Credit funds to the balance.
    ///
    /// # Errors
    /// Returns error on overflow; balance unchanged.
    pub fn credit(&mut self, amount: Amount) -> Result<(), &'static str> {
        self.balance = self.balance.checked_add(amount).ok_or("Credit overflow")?;
        Ok(())
    }

    /// Debit funds from the balance.
    ///
    /// # Errors
    /// Returns error if the balance cannot cover the debit; balance unchanged.
    /// This is the last line of defense keeping balances non-negative,
    /// independent of whatever gate the engine applied.
    pub fn debit(&mut self, amount: Amount) -> Result<(), &'static str> {
        if self.balance < amount {
            return Err("Insufficient funds");
        }
        self.balance = self.balance.checked_sub(amount).ok_or("Debit underflow")?;
        Ok(())
    }
}

// ============================================================
// TESTS - Prove enforcement works
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_membership() {
        let send_only = Permissions::new(&[Capability::Send]);
        assert!(send_only.allows(Capability::Send));
        assert!(!send_only.allows(Capability::Receive));

        // Order and duplicates don't matter
        let both = Permissions::new(&[Capability::Receive, Capability::Send, Capability::Send]);
        assert_eq!(both, Permissions::full());

        assert!(!Permissions::empty().allows(Capability::Send));
        assert!(!Permissions::empty().allows(Capability::Receive));
    }

    #[test]
    fn test_permissions_bits_roundtrip() {
        let perms = Permissions::new(&[Capability::Send]);
        assert_eq!(Permissions::from_bits(perms.bits()), perms);

        // Unknown future bits survive a roundtrip
        let future = Permissions::from_bits(0x80 | capability_flags::RECEIVE);
        assert!(future.allows(Capability::Receive));
        assert_eq!(future.bits() & 0x80, 0x80);
    }

    #[test]
    fn test_permissions_grant() {
        let mut perms = Permissions::empty();
        perms.grant(Capability::Receive);
        assert!(perms.allows(Capability::Receive));
        assert!(!perms.allows(Capability::Send));
    }

    #[test]
    fn test_account_type_helpers() {
        let account_type = AccountType {
            id: 1,
            name: "checking".to_string(),
            permissions: Permissions::new(&[Capability::Send]),
        };

        assert!(account_type.can_send());
        assert!(!account_type.can_receive());
    }

    #[test]
    fn test_credit() {
        let mut account = Account::new(1, 1, 0);
        assert_eq!(account.balance(), 0);

        account.credit(100).unwrap();
        assert_eq!(account.balance(), 100);

        account.credit(50).unwrap();
        assert_eq!(account.balance(), 150);
    }

    #[test]
    fn test_credit_overflow() {
        let mut account = Account::new(1, 1, u64::MAX);
        assert!(account.credit(1).is_err());
        assert_eq!(account.balance(), u64::MAX); // Unchanged
    }

    #[test]
    fn test_debit() {
        let mut account = Account::new(1, 1, 100);
        account.debit(60).unwrap();
        assert_eq!(account.balance(), 40);
    }

    #[test]
    fn test_debit_insufficient() {
        let mut account = Account::new(1, 1, 50);
        assert!(account.debit(100).is_err());
        assert_eq!(account.balance(), 50); // Unchanged
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::Send.to_string(), "send");
        assert_eq!(Capability::Receive.to_string(), "receive");
    }
}
