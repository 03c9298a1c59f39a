//! Ledger engine
//!
//! This module provides `Ledger`, which applies money-movement events to the
//! account store and enforces the ledger's invariants:
//! - Balances never go negative
//! - Amounts must be positive
//! - A transfer whose withdraw leg fails mutates nothing
//! - A successful transfer conserves the sum of both balances
//!
//! The engine keeps no balance state of its own. Every operation re-reads the
//! store, and every single-account mutation runs inside one
//! `AccountStore::modify` call so it is atomic per account.
//!
//! A transfer is two atomic steps (withdraw, then deposit), not one. A
//! concurrent reader may observe the amount after it has left the origin and
//! before it reaches the destination.

use crate::core::account_store::InMemoryAccountStore;
use crate::core::traits::AccountStore;
use crate::types::{Account, EventOutcome, LedgerError, LedgerEvent, TransferOutcome};
use rust_decimal::Decimal;
use std::sync::Arc;

/// How withdraw failures are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WithdrawFailureMode {
    /// `AccountNotFound` and `InsufficientFunds` are reported separately
    #[default]
    Distinct,

    /// Both causes are reported as `AccountNotFoundOrInsufficientFunds`
    Collapsed,
}

/// How a transfer whose origin equals its destination is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfTransferPolicy {
    /// Validate the account atomically and write nothing
    #[default]
    NoOp,

    /// Withdraw then deposit on the same account (two writes)
    Sequential,
}

/// Engine policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerConfig {
    pub withdraw_failures: WithdrawFailureMode,
    pub self_transfer: SelfTransferPolicy,
}

/// Ledger engine over an account store
///
/// `Ledger` is `Send + Sync` whenever its store is, so one instance can be
/// shared behind an `Arc` by concurrent callers.
#[derive(Debug)]
pub struct Ledger<S: AccountStore = InMemoryAccountStore> {
    store: Arc<S>,
    config: LedgerConfig,
}

impl Ledger<InMemoryAccountStore> {
    /// Create a ledger over a fresh in-memory store with default policies
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a ledger over a fresh in-memory store
    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_store(Arc::new(InMemoryAccountStore::new()), config)
    }
}

impl Default for Ledger<InMemoryAccountStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AccountStore> Ledger<S> {
    /// Create a ledger over an existing store
    pub fn with_store(store: Arc<S>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// The backing store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The active policies
    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    /// Current balance of an account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account exists for `id`. A missing
    /// account is never reported as a zero balance.
    pub fn get_balance(&self, id: &str) -> Result<Decimal, LedgerError> {
        self.store
            .find_by_id(id)
            .map(|account| account.balance)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Credit `amount` to `destination`, creating the account if needed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive
    /// - Adding the amount would overflow the balance
    pub fn deposit(&self, destination: &str, amount: Decimal) -> Result<Account, LedgerError> {
        ensure_positive(amount)?;

        self.store.modify(destination, |current| {
            let balance = match current {
                Some(account) => account
                    .balance
                    .checked_add(amount)
                    .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", destination))?,
                None => amount,
            };
            Ok(Account::new(destination, balance))
        })
    }

    /// Debit `amount` from `origin`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive
    /// - The account does not exist
    /// - The balance is smaller than the amount
    ///
    /// The last two are reported according to `WithdrawFailureMode`.
    pub fn withdraw(&self, origin: &str, amount: Decimal) -> Result<Account, LedgerError> {
        ensure_positive(amount)?;

        let mode = self.config.withdraw_failures;
        self.store.modify(origin, |current| {
            let account = current.ok_or_else(|| withdraw_failure(mode, || {
                LedgerError::account_not_found(origin)
            }))?;

            if account.balance < amount {
                return Err(withdraw_failure(mode, || {
                    LedgerError::insufficient_funds(origin, account.balance, amount)
                }));
            }

            Ok(Account::new(origin, account.balance - amount))
        })
    }

    /// Move `amount` from `origin` to `destination`
    ///
    /// The withdraw leg runs first. If it fails, the transfer fails with the
    /// same error and neither account has been touched. The deposit leg cannot
    /// fail on account state once the withdraw has succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive
    /// - The withdraw leg fails (see `withdraw`)
    /// - The deposit leg would overflow the destination balance
    /// - Crediting a failed deposit back to the origin is impossible because
    ///   the origin was removed or would overflow
    pub fn transfer(
        &self,
        origin: &str,
        destination: &str,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        if origin == destination && self.config.self_transfer == SelfTransferPolicy::NoOp {
            let account = self.validate_self_transfer(origin, amount)?;
            return Ok(TransferOutcome {
                origin: account.clone(),
                destination: account,
            });
        }

        let origin_account = self.withdraw(origin, amount)?;
        let destination_account = match self.deposit(destination, amount) {
            Ok(account) => account,
            Err(error) => {
                // Overflow on the destination: put the funds back on the origin.
                // A rollback that cannot land is reported instead of the
                // deposit error; a vanished origin is never recreated.
                self.store.modify(origin, |current| {
                    let account = current.ok_or_else(|| LedgerError::account_not_found(origin))?;
                    let balance = account
                        .balance
                        .checked_add(amount)
                        .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", origin))?;
                    Ok(Account::new(origin, balance))
                })?;
                return Err(error);
            }
        };

        let origin_account = if origin == destination {
            destination_account.clone()
        } else {
            origin_account
        };

        Ok(TransferOutcome {
            origin: origin_account,
            destination: destination_account,
        })
    }

    /// Apply one validated event
    pub fn apply(&self, event: &LedgerEvent) -> Result<EventOutcome, LedgerError> {
        match event {
            LedgerEvent::Deposit {
                destination,
                amount,
            } => Ok(EventOutcome {
                origin: None,
                destination: Some(self.deposit(destination, *amount)?),
            }),
            LedgerEvent::Withdraw { origin, amount } => Ok(EventOutcome {
                origin: Some(self.withdraw(origin, *amount)?),
                destination: None,
            }),
            LedgerEvent::Transfer {
                origin,
                destination,
                amount,
            } => self
                .transfer(origin, destination, *amount)
                .map(EventOutcome::from),
        }
    }

    /// All accounts, sorted by id
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts = self.store.all_accounts();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    /// Remove every account
    ///
    /// Used to isolate test scenarios; never called by normal ledger operations.
    pub fn reset(&self) {
        self.store.reset();
    }

    /// Existence and funds check for a self-transfer against one snapshot
    fn validate_self_transfer(&self, id: &str, amount: Decimal) -> Result<Account, LedgerError> {
        ensure_positive(amount)?;

        let mode = self.config.withdraw_failures;
        let account = self
            .store
            .find_by_id(id)
            .ok_or_else(|| withdraw_failure(mode, || LedgerError::account_not_found(id)))?;

        if account.balance < amount {
            return Err(withdraw_failure(mode, || {
                LedgerError::insufficient_funds(id, account.balance, amount)
            }));
        }

        Ok(account)
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}

fn withdraw_failure<F>(mode: WithdrawFailureMode, distinct: F) -> LedgerError
where
    F: FnOnce() -> LedgerError,
{
    match mode {
        WithdrawFailureMode::Distinct => distinct(),
        WithdrawFailureMode::Collapsed => match distinct() {
            LedgerError::AccountNotFound { id } | LedgerError::InsufficientFunds { id, .. } => {
                LedgerError::AccountNotFoundOrInsufficientFunds { id }
            }
            other => other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::thread;

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn collapsed() -> Ledger {
        Ledger::with_config(LedgerConfig {
            withdraw_failures: WithdrawFailureMode::Collapsed,
            ..LedgerConfig::default()
        })
    }

    #[test]
    fn test_deposit_creates_account_with_initial_balance() {
        let ledger = Ledger::new();

        let account = ledger.deposit("user1", dec(100)).unwrap();

        assert_eq!(account, Account::new("user1", dec(100)));
        assert_eq!(ledger.get_balance("user1"), Ok(dec(100)));
    }

    #[test]
    fn test_deposit_accumulates_on_existing_account() {
        let ledger = Ledger::new();

        ledger.deposit("user1", dec(100)).unwrap();
        let account = ledger.deposit("user1", dec(50)).unwrap();

        assert_eq!(account.balance, dec(150));
        assert_eq!(ledger.get_balance("user1"), Ok(dec(150)));
    }

    #[test]
    fn test_withdraw_decrements_balance() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(200)).unwrap();

        let account = ledger.withdraw("user1", dec(50)).unwrap();

        assert_eq!(account.balance, dec(150));
        assert_eq!(ledger.get_balance("user1"), Ok(dec(150)));
    }

    #[test]
    fn test_withdraw_entire_balance_leaves_zero() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(75)).unwrap();

        let account = ledger.withdraw("user1", dec(75)).unwrap();

        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(ledger.get_balance("user1"), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_transfer_moves_funds() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(300)).unwrap();
        ledger.deposit("user2", dec(100)).unwrap();

        let outcome = ledger.transfer("user1", "user2", dec(50)).unwrap();

        assert_eq!(outcome.origin, Account::new("user1", dec(250)));
        assert_eq!(outcome.destination, Account::new("user2", dec(150)));
        assert_eq!(ledger.get_balance("user1"), Ok(dec(250)));
        assert_eq!(ledger.get_balance("user2"), Ok(dec(150)));
    }

    #[test]
    fn test_transfer_creates_destination() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(30)).unwrap();

        let outcome = ledger.transfer("user1", "fresh", dec(10)).unwrap();

        assert_eq!(outcome.destination, Account::new("fresh", dec(10)));
    }

    #[rstest]
    #[case(dec(300), dec(100), dec(50))]
    #[case(dec(300), dec(0), dec(300))]
    #[case(Decimal::new(10001, 4), Decimal::new(5, 4), Decimal::new(1, 4))]
    fn test_transfer_conserves_total(
        #[case] origin_balance: Decimal,
        #[case] destination_balance: Decimal,
        #[case] amount: Decimal,
    ) {
        let ledger = Ledger::new();
        ledger.deposit("a", origin_balance).unwrap();
        if destination_balance > Decimal::ZERO {
            ledger.deposit("b", destination_balance).unwrap();
        }
        let before = origin_balance + destination_balance;

        let outcome = ledger.transfer("a", "b", amount).unwrap();

        assert_eq!(outcome.origin.balance + outcome.destination.balance, before);
    }

    #[test]
    fn test_withdraw_from_nonexistent_account_fails_without_creating_it() {
        let ledger = Ledger::new();

        let result = ledger.withdraw("nonexistent", dec(50));

        assert_eq!(result, Err(LedgerError::account_not_found("nonexistent")));
        assert!(result.unwrap_err().is_withdraw_rejection());
        assert!(ledger.store().is_empty());
    }

    #[test]
    fn test_withdraw_insufficient_funds_leaves_balance_unchanged() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(20)).unwrap();

        let result = ledger.withdraw("user1", dec(21));

        assert_eq!(
            result,
            Err(LedgerError::insufficient_funds("user1", dec(20), dec(21)))
        );
        assert_eq!(ledger.get_balance("user1"), Ok(dec(20)));
    }

    #[rstest]
    #[case::not_found("ghost", dec(5))]
    #[case::insufficient("user1", dec(500))]
    fn test_collapsed_mode_reports_single_failure_kind(
        #[case] origin: &str,
        #[case] amount: Decimal,
    ) {
        let ledger = collapsed();
        ledger.deposit("user1", dec(10)).unwrap();

        let result = ledger.withdraw(origin, amount);

        assert_eq!(result, Err(LedgerError::not_found_or_insufficient(origin)));
    }

    #[test]
    fn test_failed_transfer_leaves_both_balances_unchanged() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(40)).unwrap();
        ledger.deposit("user2", dec(60)).unwrap();

        let result = ledger.transfer("user1", "user2", dec(41));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(ledger.get_balance("user1"), Ok(dec(40)));
        assert_eq!(ledger.get_balance("user2"), Ok(dec(60)));
    }

    #[test]
    fn test_failed_transfer_from_unknown_origin_does_not_create_destination() {
        let ledger = collapsed();

        let result = ledger.transfer("ghost", "user2", dec(1));

        assert_eq!(result, Err(LedgerError::not_found_or_insufficient("ghost")));
        assert_eq!(
            ledger.get_balance("user2"),
            Err(LedgerError::account_not_found("user2"))
        );
        assert!(ledger.store().is_empty());
    }

    #[test]
    fn test_get_balance_of_unknown_account_is_not_found() {
        let ledger = Ledger::new();
        assert_eq!(
            ledger.get_balance("nonexistent"),
            Err(LedgerError::account_not_found("nonexistent"))
        );
    }

    #[test]
    fn test_get_balance_distinguishes_zero_from_missing() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(5)).unwrap();
        ledger.withdraw("user1", dec(5)).unwrap();

        assert_eq!(ledger.get_balance("user1"), Ok(Decimal::ZERO));
        assert!(ledger.get_balance("user2").is_err());
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(dec(-10))]
    fn test_non_positive_amounts_are_rejected(#[case] amount: Decimal) {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(100)).unwrap();

        assert_eq!(
            ledger.deposit("user1", amount),
            Err(LedgerError::invalid_amount(amount))
        );
        assert_eq!(
            ledger.withdraw("user1", amount),
            Err(LedgerError::invalid_amount(amount))
        );
        assert_eq!(
            ledger.transfer("user1", "user2", amount),
            Err(LedgerError::invalid_amount(amount))
        );
        assert_eq!(ledger.get_balance("user1"), Ok(dec(100)));
        assert_eq!(ledger.store().len(), 1);
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let ledger = Ledger::new();
        ledger.deposit("user1", Decimal::MAX).unwrap();

        let result = ledger.deposit("user1", Decimal::ONE);

        assert_eq!(
            result,
            Err(LedgerError::arithmetic_overflow("deposit", "user1"))
        );
        assert_eq!(ledger.get_balance("user1"), Ok(Decimal::MAX));
    }

    #[test]
    fn test_transfer_overflow_on_destination_restores_origin() {
        let ledger = Ledger::new();
        ledger.deposit("rich", Decimal::MAX).unwrap();
        ledger.deposit("user1", dec(10)).unwrap();

        let result = ledger.transfer("user1", "rich", dec(1));

        assert!(matches!(result, Err(LedgerError::ArithmeticOverflow { .. })));
        assert_eq!(ledger.get_balance("user1"), Ok(dec(10)));
        assert_eq!(ledger.get_balance("rich"), Ok(Decimal::MAX));
    }

    /// What another caller does to `user1` between the two legs of a transfer
    #[derive(Debug, Clone, Copy)]
    enum Interleave {
        SetOrigin(Decimal),
        Reset,
    }

    /// Store that runs one `Interleave` right before the first write to `rich`
    #[derive(Debug)]
    struct InterleavingStore {
        inner: InMemoryAccountStore,
        pending: std::sync::Mutex<Option<Interleave>>,
    }

    impl InterleavingStore {
        fn new(interleave: Interleave) -> Self {
            Self {
                inner: InMemoryAccountStore::new(),
                pending: std::sync::Mutex::new(Some(interleave)),
            }
        }
    }

    impl AccountStore for InterleavingStore {
        fn find_by_id(&self, id: &str) -> Option<Account> {
            self.inner.find_by_id(id)
        }

        fn save(&self, account: Account) {
            self.inner.save(account)
        }

        fn modify<F>(&self, id: &str, f: F) -> Result<Account, LedgerError>
        where
            F: FnOnce(Option<&Account>) -> Result<Account, LedgerError>,
        {
            if id == "rich" {
                let pending = self.pending.lock().unwrap().take();
                match pending {
                    Some(Interleave::SetOrigin(balance)) => {
                        self.inner.save(Account::new("user1", balance));
                    }
                    Some(Interleave::Reset) => {
                        let rich = self.inner.find_by_id("rich");
                        self.inner.reset();
                        if let Some(rich) = rich {
                            self.inner.save(rich);
                        }
                    }
                    None => {}
                }
            }
            self.inner.modify(id, f)
        }

        fn all_accounts(&self) -> Vec<Account> {
            self.inner.all_accounts()
        }

        fn len(&self) -> usize {
            self.inner.len()
        }

        fn reset(&self) {
            self.inner.reset()
        }
    }

    fn interleaved_ledger(interleave: Interleave) -> Ledger<InterleavingStore> {
        let store = Arc::new(InterleavingStore::new(interleave));
        store.inner.save(Account::new("rich", Decimal::MAX));
        store.inner.save(Account::new("user1", dec(1)));
        Ledger::with_store(store, LedgerConfig::default())
    }

    #[test]
    fn test_transfer_rollback_overflow_is_reported_not_panicked() {
        let ledger = interleaved_ledger(Interleave::SetOrigin(Decimal::MAX));

        let result = ledger.transfer("user1", "rich", dec(1));

        assert_eq!(
            result,
            Err(LedgerError::arithmetic_overflow("transfer", "user1"))
        );
        assert_eq!(ledger.get_balance("user1"), Ok(Decimal::MAX));
        assert_eq!(ledger.get_balance("rich"), Ok(Decimal::MAX));
    }

    #[test]
    fn test_transfer_rollback_does_not_recreate_removed_origin() {
        let ledger = interleaved_ledger(Interleave::Reset);

        let result = ledger.transfer("user1", "rich", dec(1));

        assert_eq!(result, Err(LedgerError::account_not_found("user1")));
        assert_eq!(
            ledger.get_balance("user1"),
            Err(LedgerError::account_not_found("user1"))
        );
        assert_eq!(ledger.store().len(), 1);
    }

    #[rstest]
    #[case(SelfTransferPolicy::NoOp)]
    #[case(SelfTransferPolicy::Sequential)]
    fn test_self_transfer_keeps_balance(#[case] policy: SelfTransferPolicy) {
        let ledger = Ledger::with_config(LedgerConfig {
            self_transfer: policy,
            ..LedgerConfig::default()
        });
        ledger.deposit("user1", dec(100)).unwrap();

        let outcome = ledger.transfer("user1", "user1", dec(40)).unwrap();

        assert_eq!(outcome.origin, Account::new("user1", dec(100)));
        assert_eq!(outcome.destination, Account::new("user1", dec(100)));
        assert_eq!(ledger.get_balance("user1"), Ok(dec(100)));
    }

    #[rstest]
    #[case(SelfTransferPolicy::NoOp)]
    #[case(SelfTransferPolicy::Sequential)]
    fn test_self_transfer_fails_like_withdraw(#[case] policy: SelfTransferPolicy) {
        let ledger = Ledger::with_config(LedgerConfig {
            self_transfer: policy,
            ..LedgerConfig::default()
        });
        ledger.deposit("user1", dec(10)).unwrap();

        assert_eq!(
            ledger.transfer("user1", "user1", dec(11)),
            Err(LedgerError::insufficient_funds("user1", dec(10), dec(11)))
        );
        assert_eq!(
            ledger.transfer("ghost", "ghost", dec(1)),
            Err(LedgerError::account_not_found("ghost"))
        );
        assert_eq!(ledger.store().len(), 1);
    }

    #[test]
    fn test_apply_dispatches_events() {
        let ledger = Ledger::new();

        let deposit = ledger
            .apply(&LedgerEvent::Deposit {
                destination: "user1".to_string(),
                amount: dec(300),
            })
            .unwrap();
        assert_eq!(deposit.origin, None);
        assert_eq!(deposit.destination, Some(Account::new("user1", dec(300))));

        let withdraw = ledger
            .apply(&LedgerEvent::Withdraw {
                origin: "user1".to_string(),
                amount: dec(100),
            })
            .unwrap();
        assert_eq!(withdraw.origin, Some(Account::new("user1", dec(200))));
        assert_eq!(withdraw.destination, None);

        let transfer = ledger
            .apply(&LedgerEvent::Transfer {
                origin: "user1".to_string(),
                destination: "user2".to_string(),
                amount: dec(50),
            })
            .unwrap();
        assert_eq!(transfer.origin, Some(Account::new("user1", dec(150))));
        assert_eq!(transfer.destination, Some(Account::new("user2", dec(50))));
    }

    #[test]
    fn test_accounts_are_sorted_by_id() {
        let ledger = Ledger::new();
        ledger.deposit("carol", dec(3)).unwrap();
        ledger.deposit("alice", dec(1)).unwrap();
        ledger.deposit("bob", dec(2)).unwrap();

        let ids: Vec<String> = ledger.accounts().into_iter().map(|a| a.id).collect();

        assert_eq!(ids, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_reset_clears_accounts() {
        let ledger = Ledger::new();
        ledger.deposit("user1", dec(100)).unwrap();

        ledger.reset();

        assert!(ledger.accounts().is_empty());
        assert!(ledger.get_balance("user1").is_err());
    }

    #[test]
    fn test_concurrent_operations_never_lose_updates_or_go_negative() {
        let ledger = Arc::new(Ledger::new());
        ledger.deposit("shared", dec(1000)).unwrap();
        let mut handles = vec![];

        for worker in 0..8 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                let mut withdrawn = 0i64;
                for _ in 0..200 {
                    if worker % 2 == 0 {
                        ledger.deposit("shared", dec(1)).unwrap();
                    } else if ledger.withdraw("shared", dec(3)).is_ok() {
                        withdrawn += 3;
                    }
                    assert!(ledger.get_balance("shared").unwrap() >= Decimal::ZERO);
                }
                withdrawn
            }));
        }

        let withdrawn: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 4 depositing workers x 200 deposits of 1
        let expected = dec(1000) + dec(800) - dec(withdrawn);
        assert_eq!(ledger.get_balance("shared"), Ok(expected));
    }

    #[test]
    fn test_concurrent_transfers_conserve_total() {
        let ledger = Arc::new(Ledger::new());
        ledger.deposit("a", dec(500)).unwrap();
        ledger.deposit("b", dec(500)).unwrap();
        let mut handles = vec![];

        for worker in 0..6 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                let (from, to) = if worker % 2 == 0 { ("a", "b") } else { ("b", "a") };
                for _ in 0..100 {
                    let _ = ledger.transfer(from, to, dec(7));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let total = ledger.get_balance("a").unwrap() + ledger.get_balance("b").unwrap();
        assert_eq!(total, dec(1000));
    }
}
