//! Account management
//!
//! The account/account-type model and the store implementations that
//! persist it. Business rules stay out: the transfer engine decides what
//! may move; stores only keep state and commit atomically.

pub mod db;
pub mod memory;
pub mod models;
pub mod store;

// Re-exports for convenience
pub use db::{Database, PgStore};
pub use memory::MemoryStore;
pub use models::{Account, AccountType, Capability, Permissions};
pub use store::{AccountStore, StoreError};
