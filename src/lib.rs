//! Account Ledger Library
//! # Overview
//!
//! This library provides an in-memory account ledger: clients submit deposit,
//! withdraw and transfer events against named accounts and query balances.
//! A CSV front-end applies event files with either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, LedgerEvent, LedgerError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Concurrent account storage
//!   - [`core::ledger`] - Ledger operations and invariants
//!   - [`core::batch_processor`] - Concurrent batch application
//! - [`io`] - CSV input validation and balance output
//! - [`strategy`] - Sync and async processing pipelines
//! - [`logging`] - Tracing setup
//!
//! # Operations
//!
//! - **Deposit**: Credit funds to an account, creating it on first use
//! - **Withdraw**: Debit funds from an existing account with sufficient balance
//! - **Transfer**: Withdraw from one account, then deposit into another
//! - **Balance**: Read an account's balance; unknown accounts are an error, not zero
//!
//! # Invariants
//!
//! - Balances are never negative
//! - A transfer whose withdraw fails changes nothing
//! - A successful transfer conserves the sum of both balances

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use crate::core::{AccountStore, InMemoryAccountStore, Ledger, LedgerConfig};
pub use crate::io::write_accounts_csv;
pub use crate::types::{Account, AccountId, EventOutcome, EventRecord, LedgerError, LedgerEvent};
