//! Account-related types for the account ledger
//!
//! This module defines the Account structure held by the account store.

use rust_decimal::Decimal;

/// Account identifier
///
/// Opaque, caller-assigned string. The ledger never generates ids.
pub type AccountId = String;

/// A named balance record
///
/// Accounts are created implicitly by the first deposit that references
/// an unseen id, and are never deleted individually.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The caller-supplied account id
    pub id: AccountId,

    /// Current balance
    ///
    /// Never negative after a completed operation.
    pub balance: Decimal,
}

impl Account {
    /// Create an account holding `balance`
    pub fn new(id: impl Into<AccountId>, balance: Decimal) -> Self {
        Account {
            id: id.into(),
            balance,
        }
    }
}
