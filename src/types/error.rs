//! Error types for the ledger
//!
//! Every ledger operation either succeeds completely or fails with one of these
//! errors and leaves all state untouched. None of them are retried or recovered
//! internally.
//!
//! # Error Categories
//!
//! - **Validation**: malformed caller input (name, age, amount, PIN)
//! - **Lookup**: unknown account number
//! - **Authentication**: PIN never set, or PIN does not match
//! - **Business rules**: insufficient funds, holder under the minimum age
//! - **Arithmetic**: overflow in balance calculations or account numbering

use crate::types::account::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Malformed input
    ///
    /// Empty holder name, unparsable age or amount, non-positive amount or a
    /// PIN that is not four digits.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Which input was rejected
        field: &'static str,
        /// Human readable reason
        message: String,
    },

    /// No account with this number exists
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The number that was looked up
        account: AccountNumber,
    },

    /// A PIN-gated operation was attempted before any PIN was set
    ///
    /// Distinct from [`LedgerError::InvalidPin`]: the account simply has no
    /// credential to check against yet.
    #[error("PIN not set for account {account}; set a PIN before performing this action")]
    PinNotSet {
        /// Account without a PIN
        account: AccountNumber,
    },

    /// The supplied PIN does not match the stored hash
    #[error("Invalid PIN for account {account}")]
    InvalidPin {
        /// Account the PIN was checked against
        account: AccountNumber,
    },

    /// Withdrawal amount exceeds the current balance
    ///
    /// The withdrawal is rejected and the balance stays as it was.
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account the withdrawal targeted
        account: AccountNumber,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Account holder is younger than the configured minimum age
    #[error("Must be {minimum} or older to create an account (age given: {age})")]
    Underage {
        /// Age supplied at creation
        age: i32,
        /// Minimum age in force
        minimum: i32,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to keep the balance and history consistent.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account being updated
        account: AccountNumber,
    },

    /// The account number counter cannot advance any further
    #[error("Account numbers exhausted; no new accounts can be opened")]
    AccountNumbersExhausted,
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a Validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &AccountNumber) -> Self {
        LedgerError::AccountNotFound {
            account: account.clone(),
        }
    }

    /// Create a PinNotSet error
    pub fn pin_not_set(account: &AccountNumber) -> Self {
        LedgerError::PinNotSet {
            account: account.clone(),
        }
    }

    /// Create an InvalidPin error
    pub fn invalid_pin(account: &AccountNumber) -> Self {
        LedgerError::InvalidPin {
            account: account.clone(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &AccountNumber, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.clone(),
            balance,
            requested,
        }
    }

    /// Create an Underage error
    pub fn underage(age: i32, minimum: i32) -> Self {
        LedgerError::Underage { age, minimum }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn acct() -> AccountNumber {
        AccountNumber::from("1001")
    }

    #[rstest]
    #[case::validation(
        LedgerError::Validation { field: "name", message: "Name cannot be empty".to_string() },
        "Invalid name: Name cannot be empty"
    )]
    #[case::not_found(
        LedgerError::AccountNotFound { account: acct() },
        "Account 1001 not found"
    )]
    #[case::pin_not_set(
        LedgerError::PinNotSet { account: acct() },
        "PIN not set for account 1001; set a PIN before performing this action"
    )]
    #[case::invalid_pin(
        LedgerError::InvalidPin { account: acct() },
        "Invalid PIN for account 1001"
    )]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds { account: acct(), balance: Decimal::new(40000, 2), requested: Decimal::new(200000, 2) },
        "Insufficient funds in account 1001: balance 400.00, requested 2000.00"
    )]
    #[case::underage(
        LedgerError::Underage { age: 15, minimum: 18 },
        "Must be 18 or older to create an account (age given: 15)"
    )]
    #[case::overflow(
        LedgerError::ArithmeticOverflow { operation: "deposit".to_string(), account: acct() },
        "Arithmetic overflow in deposit for account 1001"
    )]
    #[case::numbers_exhausted(
        LedgerError::AccountNumbersExhausted,
        "Account numbers exhausted; no new accounts can be opened"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::validation(
        LedgerError::validation("amount", "must be positive"),
        LedgerError::Validation { field: "amount", message: "must be positive".to_string() }
    )]
    #[case::not_found(
        LedgerError::account_not_found(&acct()),
        LedgerError::AccountNotFound { account: acct() }
    )]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds(&acct(), Decimal::ONE, Decimal::TWO),
        LedgerError::InsufficientFunds { account: acct(), balance: Decimal::ONE, requested: Decimal::TWO }
    )]
    #[case::underage(
        LedgerError::underage(17, 18),
        LedgerError::Underage { age: 17, minimum: 18 }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }
}
