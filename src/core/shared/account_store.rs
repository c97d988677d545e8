//! Thread-safe account storage
//!
//! This module provides the `SharedAccountStore` struct, which keeps account
//! states in a `DashMap` so several threads can work on the ledger at once.
//!
//! # Thread Safety
//!
//! - Operations on different accounts proceed in parallel
//! - [`SharedAccountStore::update`] runs its closure while holding the entry
//!   guard, so a whole authenticate, check, mutate and append sequence is one
//!   critical section per account
//! - Account numbers come from an atomic counter, so concurrent creations
//!   never share a number

use crate::types::{Account, AccountNumber, LedgerError};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrent account state store
#[derive(Debug)]
pub struct SharedAccountStore {
    /// Concurrent HashMap storing account states by account number
    accounts: DashMap<AccountNumber, Account>,

    /// Next number to hand out
    next_number: AtomicU64,
}

impl SharedAccountStore {
    /// Create an empty store whose first account gets `first_number`
    pub fn starting_at(first_number: u64) -> Self {
        Self {
            accounts: DashMap::new(),
            next_number: AtomicU64::new(first_number),
        }
    }

    /// Reserve the next account number
    ///
    /// Safe to call from many threads; every call returns a distinct number.
    /// `u64::MAX` itself is never handed out.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNumbersExhausted`] once the counter would
    /// overflow.
    pub fn allocate_number(&self) -> Result<AccountNumber, LedgerError> {
        self.next_number
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map(AccountNumber::from_sequence)
            .map_err(|_| LedgerError::AccountNumbersExhausted)
    }

    /// Store a newly opened account
    ///
    /// An account whose number is already present is ignored.
    pub fn insert(&self, account: Account) {
        let number = account.number.clone();
        let mut inserted = false;
        self.accounts.entry(number.clone()).or_insert_with(|| {
            inserted = true;
            account
        });

        if !inserted {
            log::error!("Account {} already exists, keeping the original", number);
        }
    }

    /// Run `f` against an account while holding its lock
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] if the account does not exist,
    /// otherwise whatever `f` returns.
    pub fn update<T, F>(&self, number: &AccountNumber, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<T, LedgerError>,
    {
        let mut entry = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;
        f(entry.value_mut())
    }

    /// Run `f` against a shared view of an account
    pub fn read<T, F>(&self, number: &AccountNumber, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&Account) -> Result<T, LedgerError>,
    {
        let entry = self
            .accounts
            .get(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;
        f(entry.value())
    }

    /// Snapshot of every account in allocation order
    ///
    /// Accounts created or modified by other threads after the call are not
    /// reflected in the result.
    pub fn snapshot(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| {
            (a.number.as_str().len(), a.number.as_str())
                .cmp(&(b.number.as_str().len(), b.number.as_str()))
        });
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
