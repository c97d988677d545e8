//! Account-related types for the ledger
//!
//! This module defines the Account structure and the balance/history rules that
//! every ledger implementation shares.

use super::error::LedgerError;
use super::pin::{Pin, PinHash};
use super::transaction::{TransactionKind, TransactionRecord};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Account identifier
///
/// Numbers are handed out by the account store's monotonic allocator. Any
/// string can be used for lookups; unknown ones simply resolve to no account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Account number for a position in the allocation sequence
    pub fn from_sequence(n: u64) -> Self {
        AccountNumber(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountNumber {
    fn from(raw: &str) -> Self {
        AccountNumber(raw.trim().to_string())
    }
}

impl From<String> for AccountNumber {
    fn from(raw: String) -> Self {
        AccountNumber::from(raw.as_str())
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer account state
///
/// The balance and the history only change together, through
/// [`Account::credit`] and [`Account::debit`], so the balance always equals the
/// sum of the signed history amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The account number
    pub number: AccountNumber,

    /// Trimmed, non-empty holder name
    pub holder: String,

    balance: Decimal,

    /// Hash of the current PIN, absent until one is set
    pin_hash: Option<PinHash>,

    /// Append-only, in chronological order
    transactions: Vec<TransactionRecord>,
}

impl Account {
    /// Open a new account with a zero balance
    ///
    /// The history starts with a single `ACCOUNT_CREATED` entry of amount zero.
    /// No PIN is set.
    pub fn open(number: AccountNumber, holder: String, at: NaiveDateTime) -> Self {
        Account {
            number,
            holder,
            balance: Decimal::ZERO,
            pin_hash: None,
            transactions: vec![TransactionRecord::new(
                TransactionKind::AccountCreated,
                Decimal::ZERO,
                at,
            )],
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Full history, oldest entry first
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn has_pin(&self) -> bool {
        self.pin_hash.is_some()
    }

    /// Store the hash of `pin`, replacing any previous one
    pub fn set_pin(&mut self, pin: &Pin) {
        self.pin_hash = Some(pin.hash());
    }

    /// Compare `pin` against the stored hash
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PinNotSet`] if the account has no PIN yet.
    pub fn verify_pin(&self, pin: &Pin) -> Result<bool, LedgerError> {
        match &self.pin_hash {
            Some(hash) => Ok(hash.verify(pin)),
            None => Err(LedgerError::pin_not_set(&self.number)),
        }
    }

    /// Add funds and record a `DEPOSIT` entry
    ///
    /// `amount` must already be validated and rounded by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the new balance would overflow. Nothing is changed
    /// in that case.
    pub fn credit(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<Decimal, LedgerError> {
        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &self.number))?;

        self.balance = new_balance;
        self.transactions
            .push(TransactionRecord::new(TransactionKind::Deposit, amount, at));

        Ok(new_balance)
    }

    /// Remove funds and record a `WITHDRAWAL` entry
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if `amount` exceeds the
    /// balance. Nothing is changed in that case.
    pub fn debit(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<Decimal, LedgerError> {
        if amount > self.balance {
            return Err(LedgerError::insufficient_funds(
                &self.number,
                self.balance,
                amount,
            ));
        }

        let new_balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal", &self.number))?;

        self.balance = new_balance;
        self.transactions
            .push(TransactionRecord::new(TransactionKind::Withdrawal, amount, at));

        Ok(new_balance)
    }

    /// Balance recomputed from the history alone
    pub fn replayed_balance(&self) -> Decimal {
        self.transactions
            .iter()
            .map(TransactionRecord::signed_amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn open() -> Account {
        Account::open(AccountNumber::from("1001"), "Sai".to_string(), at())
    }

    #[test]
    fn test_open_starts_with_creation_record() {
        let account = open();

        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(!account.has_pin());
        assert_eq!(account.transactions().len(), 1);
        assert_eq!(account.transactions()[0].kind, TransactionKind::AccountCreated);
        assert_eq!(account.transactions()[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_account_number_trims_input() {
        assert_eq!(AccountNumber::from("  1001 "), AccountNumber::from_sequence(1001));
    }

    #[test]
    fn test_verify_pin_without_pin_fails_distinctly() {
        let account = open();
        let pin = Pin::parse("1234").unwrap();

        assert!(matches!(
            account.verify_pin(&pin),
            Err(LedgerError::PinNotSet { .. })
        ));
    }

    #[test]
    fn test_set_pin_replaces_previous_pin() {
        let mut account = open();
        let first = Pin::parse("1111").unwrap();
        let second = Pin::parse("2222").unwrap();

        account.set_pin(&first);
        account.set_pin(&second);

        assert_eq!(account.verify_pin(&first), Ok(false));
        assert_eq!(account.verify_pin(&second), Ok(true));
    }

    #[test]
    fn test_credit_and_debit_keep_history_in_sync() {
        let mut account = open();

        account.credit(Decimal::new(50000, 2), at()).unwrap();
        account.debit(Decimal::new(12550, 2), at()).unwrap();

        assert_eq!(account.balance(), Decimal::new(37450, 2));
        assert_eq!(account.replayed_balance(), account.balance());
        assert_eq!(account.transactions().len(), 3);
    }

    #[test]
    fn test_debit_more_than_balance_changes_nothing() {
        let mut account = open();
        account.credit(Decimal::TEN, at()).unwrap();

        let result = account.debit(Decimal::new(1001, 2), at());

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(account.balance(), Decimal::TEN);
        assert_eq!(account.transactions().len(), 2);
    }

    #[test]
    fn test_debit_entire_balance() {
        let mut account = open();
        account.credit(Decimal::TEN, at()).unwrap();

        assert_eq!(account.debit(Decimal::TEN, at()), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_credit_overflow_changes_nothing() {
        let mut account = open();
        account.credit(Decimal::MAX, at()).unwrap();

        let result = account.credit(Decimal::ONE, at());

        assert!(matches!(
            result,
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
        assert_eq!(account.balance(), Decimal::MAX);
        assert_eq!(account.transactions().len(), 2);
    }
}
