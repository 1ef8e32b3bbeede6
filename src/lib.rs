//! paycore - Funds-Transfer Engine
//!
//! Moves value between capability-gated accounts as atomic, audited
//! transfers. The crate is a library: an upstream protocol layer (HTTP,
//! RPC, CLI) translates its requests into [`TransferEngine::execute`]
//! calls and maps the typed failures back out.
//!
//! # Modules
//!
//! - [`core_types`] - Core type aliases (AccountId, Amount, etc.)
//! - [`account`] - Account/account-type model and the store implementations
//! - [`transfer`] - The engine: gate chain, per-account locks, atomic commit
//! - [`ledger`] - Append-only transfer history and replay audit
//! - [`config`] - YAML runtime configuration
//! - [`logging`] - tracing subscriber bootstrap

// Core types - must be first!
pub mod core_types;

pub mod account;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{
    Account, AccountStore, AccountType, Capability, Database, MemoryStore, Permissions, PgStore,
    StoreError,
};
pub use config::AppConfig;
pub use core_types::{AccountId, AccountTypeId, Amount, TransferId};
pub use ledger::Transfer;
pub use transfer::{
    BalancePolicy, InvalidReason, Side, TransferEngine, TransferError, TransferRequest,
    TransferState,
};
