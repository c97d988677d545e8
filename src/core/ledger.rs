//! Ledger service
//!
//! This module provides the `Ledger` that owns an account repository and exposes
//! the account operations: opening accounts, setting PINs, and the PIN-gated
//! deposit, withdrawal, balance and history operations.
//!
//! The ledger enforces business rules such as:
//! - Validation of every input before any state changes
//! - PIN checks ahead of every sensitive operation
//! - Non-negative balances, with the history always summing to the balance

use crate::config::LedgerConfig;
use crate::core::account_store::AccountStore;
use crate::core::clock::{Clock, SystemClock};
use crate::core::rules;
use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountNumber, LedgerError, Pin, TransactionRecord};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Single-threaded ledger
///
/// Mutating operations take `&mut self`; the borrow checker guarantees one
/// caller at a time. See [`crate::core::shared::SharedLedger`] for a variant
/// that can be used from several threads.
pub struct Ledger<R: AccountRepository = AccountStore> {
    store: R,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
}

impl Ledger<AccountStore> {
    /// Create an empty ledger with default settings
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty ledger with the given settings and the system clock
    pub fn with_config(config: LedgerConfig) -> Self {
        let store = AccountStore::starting_at(config.first_account_number);
        Ledger::with_parts(store, config, Arc::new(SystemClock))
    }
}

impl<R: AccountRepository> Ledger<R> {
    /// Assemble a ledger from its parts
    pub fn with_parts(store: R, config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        Ledger {
            store,
            config,
            clock,
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

    /// Open a new account
    ///
    /// # Arguments
    ///
    /// * `name` - Holder name; trimmed, must not be empty
    /// * `age` - Holder age; must reach the configured minimum
    /// * `pin` - Optional PIN to set right away
    ///
    /// # Returns
    ///
    /// The freshly allocated account number
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty after trimming
    /// - The age is below the minimum
    /// - A PIN was given and is not four digits
    /// - No account numbers are left
    ///
    /// All checks run before a number is allocated, so a failed call leaves
    /// the ledger untouched.
    pub fn create_account(
        &mut self,
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

        log::info!(
            "Created account {} ({})",
            number,
            if new_account.pin.is_some() { "PIN set" } else { "no PIN" }
        );
        Ok(number)
    }

    /// Set or replace the PIN of an account
    ///
    /// The previous PIN is not required, so anyone who knows an account number
    /// can reset its PIN. Replacing an existing PIN is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the PIN is malformed.
    pub fn set_pin(&mut self, number: &AccountNumber, pin: &str) -> Result<(), LedgerError> {
        let account = self.account_mut(number)?;
        let pin = Pin::parse(pin)?;

        if account.has_pin() {
            log::warn!(
                "PIN for account {} replaced without verifying the previous PIN",
                number
            );
        } else {
            log::info!("PIN set for account {}", number);
        }
        account.set_pin(&pin);

        Ok(())
    }

    /// Check a PIN without performing any operation
    ///
    /// # Returns
    ///
    /// `true` if `pin` matches the most recently set PIN
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist, has no PIN, or `pin`
    /// is not four digits.
    pub fn authenticate(&self, number: &AccountNumber, pin: &str) -> Result<bool, LedgerError> {
        rules::check_pin(self.account(number)?, pin)
    }

    /// Deposit funds
    ///
    /// The amount is rounded to two decimal places before it is applied and
    /// recorded.
    ///
    /// # Returns
    ///
    /// The balance after the deposit
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The account has no PIN, or the PIN is malformed or wrong
    /// - The amount is not positive
    pub fn deposit(
        &mut self,
        number: &AccountNumber,
        amount: Decimal,
        pin: &str,
    ) -> Result<Decimal, LedgerError> {
        let at = self.clock.now();
        let account = self.account_mut(number)?;
        let balance = rules::deposit(account, amount, pin, at)?;

        log::debug!("Deposited {} into account {}", rules::round_amount(amount), number);
        Ok(balance)
    }

    /// Withdraw funds
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal
    ///
    /// # Errors
    ///
    /// Same as [`Ledger::deposit`], plus [`LedgerError::InsufficientFunds`]
    /// when the amount exceeds the balance.
    pub fn withdraw(
        &mut self,
        number: &AccountNumber,
        amount: Decimal,
        pin: &str,
    ) -> Result<Decimal, LedgerError> {
        let at = self.clock.now();
        let account = self.account_mut(number)?;
        let balance = rules::withdraw(account, amount, pin, at)?;

        log::debug!("Withdrew {} from account {}", rules::round_amount(amount), number);
        Ok(balance)
    }

    /// Current balance
    pub fn view_balance(&self, number: &AccountNumber, pin: &str) -> Result<Decimal, LedgerError> {
        rules::view_balance(self.account(number)?, pin)
    }

    /// Full history, oldest entry first
    ///
    /// The returned vector is a copy; later operations do not change it.
    pub fn transaction_history(
        &self,
        number: &AccountNumber,
        pin: &str,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        rules::transaction_history(self.account(number)?, pin)
    }

    /// All accounts in the order they were opened
    ///
    /// Operator-side view used for reports; it does not check PINs.
    pub fn accounts(&self) -> Vec<&Account> {
        self.store.accounts()
    }

    fn account(&self, number: &AccountNumber) -> Result<&Account, LedgerError> {
        self.store
            .get(number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    fn account_mut(&mut self, number: &AccountNumber) -> Result<&mut Account, LedgerError> {
        self.store
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }
}

impl Default for Ledger<AccountStore> {
    fn default() -> Self {
        Self::new()
    }
}
