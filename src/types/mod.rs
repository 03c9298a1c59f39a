//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `event`: Ledger events, raw event records and outcomes
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod event;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use event::{
    EventOutcome, EventRecord, EventType, LedgerEvent, TransferOutcome, AMOUNT_SCALE,
};
