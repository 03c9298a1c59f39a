//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - The `AccountStore` abstraction the engine is generic over
//! - `account_store` - Concurrent in-memory account store
//! - `ledger` - Deposit, withdraw, transfer and balance operations
//! - `batch_processor` - Concurrent batch application partitioned by account

pub mod account_store;
pub mod batch_processor;
pub mod ledger;
pub mod traits;

pub use account_store::InMemoryAccountStore;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use ledger::{Ledger, LedgerConfig, SelfTransferPolicy, WithdrawFailureMode};
pub use traits::AccountStore;
