//! Error types for the account ledger
//!
//! This module defines every failure the ledger engine and its front-end can report.
//!
//! # Error Categories
//!
//! - **Engine Errors**: account not found, insufficient funds, invalid amount, overflow
//! - **Request Errors**: missing fields or unknown event types at the input boundary
//! - **File I/O Errors**: file not found, permission denied, etc.
//! - **CSV Parsing Errors**: malformed CSV rows

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the account ledger
///
/// The engine returns these as discriminated results and never logs or
/// retries on its own; translating them into user-facing responses is
/// the caller's job.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account exists for the given id
    ///
    /// Returned by balance queries, and by withdrawals when failure causes
    /// are reported distinctly.
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The id that was looked up
        id: String,
    },

    /// The account exists but its balance does not cover the withdrawal
    #[error("Insufficient funds in account {id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account id
        id: String,
        /// Balance at the time of the attempt
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Collapsed withdraw failure
    ///
    /// Used instead of `AccountNotFound` / `InsufficientFunds` when the
    /// ledger is configured with `WithdrawFailureMode::Collapsed`.
    #[error("Account {id} not found or has insufficient funds")]
    AccountNotFoundOrInsufficientFunds {
        /// Account id
        id: String,
    },

    /// Amount is zero or negative
    #[error("Invalid amount {amount}: amounts must be positive")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Malformed request at the input boundary
    ///
    /// Missing required fields, an unknown event type, or an unparseable amount.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of what was wrong with the request
        message: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected and the account is left untouched.
    #[error("Arithmetic overflow in {operation} for account {id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        id: String,
    },

    /// Input file not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading input or writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error
    ///
    /// Recoverable: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A worker task panicked or was cancelled before finishing its events
    ///
    /// Fatal: the events it held may be partially applied.
    #[error("Worker task failed after {events} events were scheduled: {message}")]
    TaskFailed {
        /// Number of events the task was given
        events: usize,
        /// Description of the join failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        LedgerError::AccountNotFound { id: id.to_string() }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(id: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            id: id.to_string(),
            balance,
            requested,
        }
    }

    /// Create an AccountNotFoundOrInsufficientFunds error
    pub fn not_found_or_insufficient(id: &str) -> Self {
        LedgerError::AccountNotFoundOrInsufficientFunds { id: id.to_string() }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InvalidRequest error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        LedgerError::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, id: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether this is a withdraw rejection
    ///
    /// True for the not-found and insufficient-funds kinds in both their
    /// distinct and collapsed forms.
    pub fn is_withdraw_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::AccountNotFound { .. }
                | LedgerError::InsufficientFunds { .. }
                | LedgerError::AccountNotFoundOrInsufficientFunds { .. }
        )
    }
}
