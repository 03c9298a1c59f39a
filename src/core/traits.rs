//! Core traits for account storage
//!
//! The ledger engine is generic over `AccountStore`, so alternative backends
//! can be swapped in without touching the engine's invariant checks.

use crate::types::{Account, LedgerError};

/// Authoritative map from account id to account state
///
/// Implementations must make `modify` linearizable per key: no other
/// operation on the same id may interleave between the read handed to the
/// closure and the write of its result.
pub trait AccountStore: Send + Sync {
    /// Look up an account, returning a snapshot
    fn find_by_id(&self, id: &str) -> Option<Account>;

    /// Insert or replace the record for `account.id`
    fn save(&self, account: Account);

    /// Atomically read-modify-write a single account
    ///
    /// `f` receives the current record (`None` if the id is unknown) and
    /// returns the replacement. If `f` fails, nothing is written and an
    /// unknown id stays unknown.
    fn modify<F>(&self, id: &str, f: F) -> Result<Account, LedgerError>
    where
        F: FnOnce(Option<&Account>) -> Result<Account, LedgerError>;

    /// Snapshot of every account, in no particular order
    fn all_accounts(&self) -> Vec<Account>;

    /// Number of accounts
    fn len(&self) -> usize;

    /// Whether the store holds no accounts
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every account
    fn reset(&self);
}
