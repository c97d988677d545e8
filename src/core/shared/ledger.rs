//! Ledger for concurrent callers
//!
//! `SharedLedger` exposes the same operations as [`crate::core::Ledger`] through
//! `&self`, so it can be wrapped in an `Arc` and used from many threads. Each
//! operation runs its rules inside [`SharedAccountStore::update`] or
//! [`SharedAccountStore::read`], which hold the account's entry lock for the
//! whole check-then-mutate sequence. Timestamps are taken under that lock as
//! well, so each history stays in chronological order.

use crate::config::LedgerConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::rules;
use crate::core::shared::account_store::SharedAccountStore;
use crate::types::{Account, AccountNumber, LedgerError, Pin, TransactionRecord};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Thread-safe ledger
pub struct SharedLedger {
    store: SharedAccountStore,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        SharedLedger {
            store: SharedAccountStore::starting_at(config.first_account_number),
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Open a new account; see [`crate::core::Ledger::create_account`]
    pub fn create_account(
        &self,
        name: &str,
        age: i32,
        pin: Option<&str>,
    ) -> Result<AccountNumber, LedgerError> {
        let new_account = rules::validate_new_account(name, age, pin, self.config.minimum_age)?;

        let number = self.store.allocate_number()?;
        let mut account = Account::open(number.clone(), new_account.holder, self.clock.now());
        if let Some(pin) = &new_account.pin {
            account.set_pin(pin);
        }
        self.store.insert(account);

        log::info!("Created account {}", number);
        Ok(number)
    }

    /// Set or replace the PIN of an account without checking the old one
    pub fn set_pin(&self, number: &AccountNumber, pin: &str) -> Result<(), LedgerError> {
        self.store.update(number, |account| {
            let pin = Pin::parse(pin)?;
            if account.has_pin() {
                log::warn!(
                    "PIN for account {} replaced without verifying the previous PIN",
                    account.number
                );
            }
            account.set_pin(&pin);
            Ok(())
        })
    }

    pub fn authenticate(&self, number: &AccountNumber, pin: &str) -> Result<bool, LedgerError> {
        self.store.read(number, |account| rules::check_pin(account, pin))
    }

    pub fn deposit(
        &self,
        number: &AccountNumber,
        amount: Decimal,
        pin: &str,
    ) -> Result<Decimal, LedgerError> {
        self.store.update(number, |account| {
            rules::deposit(account, amount, pin, self.clock.now())
        })
    }

    pub fn withdraw(
        &self,
        number: &AccountNumber,
        amount: Decimal,
        pin: &str,
    ) -> Result<Decimal, LedgerError> {
        self.store.update(number, |account| {
            rules::withdraw(account, amount, pin, self.clock.now())
        })
    }

    pub fn view_balance(&self, number: &AccountNumber, pin: &str) -> Result<Decimal, LedgerError> {
        self.store
            .read(number, |account| rules::view_balance(account, pin))
    }

    pub fn transaction_history(
        &self,
        number: &AccountNumber,
        pin: &str,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        self.store
            .read(number, |account| rules::transaction_history(account, pin))
    }

    /// Snapshot of all accounts in allocation order
    pub fn accounts(&self) -> Vec<Account> {
        self.store.snapshot()
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new()
    }
}
