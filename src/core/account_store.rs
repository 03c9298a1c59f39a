//! Thread-safe in-memory account store
//!
//! This module provides `InMemoryAccountStore`, the authoritative owner of all
//! account records.
//!
//! # Design
//!
//! The store uses `DashMap` (a sharded concurrent HashMap). Every
//! read-modify-write goes through the entry API, which holds the shard lock
//! for the key across the read and the write. Operations on different
//! accounts proceed in parallel; operations on the same account are
//! serialized.
//!
//! # Thread Safety
//!
//! All methods take `&self` and are safe to call from any number of threads.
//! Snapshots returned by `find_by_id` and `all_accounts` are clones and may be
//! stale as soon as they are returned.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, LedgerError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Concurrent account store keyed by account id
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    /// Account records by id
    accounts: DashMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_id(&self, id: &str) -> Option<Account> {
        self.accounts.get(id).map(|entry| entry.value().clone())
    }

    fn save(&self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    /// Atomically read-modify-write a single account
    ///
    /// The entry lock is held while `f` runs, so `f` must not call back into
    /// this store.
    fn modify<F>(&self, id: &str, f: F) -> Result<Account, LedgerError>
    where
        F: FnOnce(Option<&Account>) -> Result<Account, LedgerError>,
    {
        match self.accounts.entry(id.to_owned()) {
            Entry::Occupied(mut entry) => {
                let updated = f(Some(entry.get()))?;
                *entry.get_mut() = updated.clone();
                Ok(updated)
            }
            Entry::Vacant(entry) => {
                let created = f(None)?;
                entry.insert(created.clone());
                Ok(created)
            }
        }
    }

    fn all_accounts(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn reset(&self) {
        self.accounts.clear();
    }
}
