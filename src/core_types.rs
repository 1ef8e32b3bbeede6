//! Core types used throughout the system
//!
//! Fundamental type aliases shared by all modules. They carry semantic
//! meaning and leave room for future type evolution.

/// Account ID - globally unique identifier for an account.
///
/// # Constraints:
/// - **Immutable**: Once assigned, NEVER changes
/// - **Store-assigned**: Allocated by the account store's own sequencing
pub type AccountId = u64;

/// Account type ID - identifies a named capability bundle.
///
/// Many accounts may reference the same account type.
pub type AccountTypeId = u64;

/// Transfer ID - unique, monotonically assigned by the store.
///
/// Also serves as the ledger ordering key.
pub type TransferId = u64;

/// Amount in the smallest unit of the ledger's currency.
///
/// Balances and transfer amounts share this unit. Unsigned by design:
/// a balance can never be negative, and every mutation goes through
/// checked arithmetic.
pub type Amount = u64;
