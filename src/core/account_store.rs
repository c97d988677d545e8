//! In-memory account storage
//!
//! This module provides the `AccountStore` struct which keeps every account in
//! memory for the lifetime of the owning ledger.
//!
//! The AccountStore is responsible for:
//! - Allocating account numbers from a monotonic counter
//! - Holding account state keyed by account number
//! - Listing accounts in the order they were opened

use crate::config::DEFAULT_FIRST_ACCOUNT_NUMBER;
use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountNumber, LedgerError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Owns all accounts of a single-threaded ledger
#[derive(Debug)]
pub struct AccountStore {
    /// Map of account numbers to account states
    accounts: HashMap<AccountNumber, Account>,

    /// Account numbers in insertion order
    order: Vec<AccountNumber>,

    /// Next number the allocator will hand out
    next_number: u64,
}

impl AccountStore {
    /// Create an empty store whose first account will be number 1001
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_FIRST_ACCOUNT_NUMBER)
    }

    /// Create an empty store whose first account gets `first_number`
    pub fn starting_at(first_number: u64) -> Self {
        AccountStore {
            accounts: HashMap::new(),
            order: Vec::new(),
            next_number: first_number,
        }
    }
}

impl AccountRepository for AccountStore {
    /// `u64::MAX` itself is never handed out
    fn allocate_number(&mut self) -> Result<AccountNumber, LedgerError> {
        let next = self
            .next_number
            .checked_add(1)
            .ok_or(LedgerError::AccountNumbersExhausted)?;
        let number = AccountNumber::from_sequence(self.next_number);
        self.next_number = next;
        Ok(number)
    }

    /// An account whose number is already present is ignored
    fn insert(&mut self, account: Account) {
        if let Entry::Vacant(slot) = self.accounts.entry(account.number.clone()) {
            self.order.push(account.number.clone());
            slot.insert(account);
        } else {
            log::error!("Account {} already exists, keeping the original", account.number);
        }
    }

    fn get(&self, number: &AccountNumber) -> Option<&Account> {
        self.accounts.get(number)
    }

    fn get_mut(&mut self, number: &AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    fn accounts(&self) -> Vec<&Account> {
        self.order
            .iter()
            .filter_map(|number| self.accounts.get(number))
            .collect()
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}
