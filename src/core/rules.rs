//! Validation and PIN-gated account operations
//!
//! These functions hold the business rules shared by [`crate::core::Ledger`]
//! and [`crate::core::shared::SharedLedger`]. Each one works on a single
//! account that the caller has already looked up (and, for the shared ledger,
//! locked), so an operation either applies completely or not at all.
//!
//! Precondition order for sensitive operations is fixed: the PIN is checked
//! first (not set, malformed, wrong), then the amount, then the balance.

use crate::types::{Account, LedgerError, Pin, TransactionRecord};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places kept for amounts and balances
pub const AMOUNT_SCALE: u32 = 2;

/// Round an amount to two decimal places, ties to even
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Trim and check a holder name
pub fn validate_holder_name(name: &str) -> Result<String, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("name", "Name cannot be empty"));
    }
    Ok(name.to_string())
}

pub fn validate_age(age: i32, minimum: i32) -> Result<(), LedgerError> {
    if age < minimum {
        return Err(LedgerError::underage(age, minimum));
    }
    Ok(())
}

/// Check that an amount is positive and return it rounded
///
/// A positive amount that rounds to zero is rejected as well, so every
/// deposit and withdrawal record carries a positive amount.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(
            "amount",
            format!("Amount must be positive (got {})", amount),
        ));
    }

    let rounded = round_amount(amount);
    if rounded.is_zero() {
        return Err(LedgerError::validation(
            "amount",
            format!("Amount {} rounds to zero", amount),
        ));
    }

    Ok(rounded)
}

/// Parse user-entered text as an amount
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        LedgerError::validation("amount", format!("Amount must be numeric (got '{}')", raw.trim()))
    })
}

/// Parse user-entered text as an age
pub fn parse_age(raw: &str) -> Result<i32, LedgerError> {
    raw.trim().parse::<i32>().map_err(|_| {
        LedgerError::validation("age", format!("Age must be an integer (got '{}')", raw.trim()))
    })
}

/// Validated inputs for a new account
#[derive(Debug)]
pub struct NewAccount {
    pub holder: String,
    pub pin: Option<Pin>,
}

/// Validate everything `create_account` needs before any state changes
pub fn validate_new_account(
    name: &str,
    age: i32,
    pin: Option<&str>,
    minimum_age: i32,
) -> Result<NewAccount, LedgerError> {
    let holder = validate_holder_name(name)?;
    validate_age(age, minimum_age)?;
    let pin = pin.map(Pin::parse).transpose()?;

    Ok(NewAccount { holder, pin })
}

/// Compare a raw PIN against the account's stored hash
///
/// # Errors
///
/// - [`LedgerError::PinNotSet`] if the account has no PIN
/// - [`LedgerError::Validation`] if `raw_pin` is not four digits
pub fn check_pin(account: &Account, raw_pin: &str) -> Result<bool, LedgerError> {
    if !account.has_pin() {
        return Err(LedgerError::pin_not_set(&account.number));
    }
    let pin = Pin::parse(raw_pin)?;
    account.verify_pin(&pin)
}

/// Like [`check_pin`], but a mismatch is an error
pub fn authorize(account: &Account, raw_pin: &str) -> Result<(), LedgerError> {
    if check_pin(account, raw_pin)? {
        Ok(())
    } else {
        log::warn!("Rejected PIN for account {}", account.number);
        Err(LedgerError::invalid_pin(&account.number))
    }
}

pub fn deposit(
    account: &mut Account,
    amount: Decimal,
    raw_pin: &str,
    at: NaiveDateTime,
) -> Result<Decimal, LedgerError> {
    authorize(account, raw_pin)?;
    let amount = validate_amount(amount)?;
    account.credit(amount, at)
}

/// The unrounded request is compared against the balance
///
/// The balance always has two decimal places, so a request that fits also
/// fits once rounded.
pub fn withdraw(
    account: &mut Account,
    amount: Decimal,
    raw_pin: &str,
    at: NaiveDateTime,
) -> Result<Decimal, LedgerError> {
    authorize(account, raw_pin)?;
    let rounded = validate_amount(amount)?;

    if amount > account.balance() {
        return Err(LedgerError::insufficient_funds(
            &account.number,
            account.balance(),
            amount,
        ));
    }

    account.debit(rounded, at)
}

pub fn view_balance(account: &Account, raw_pin: &str) -> Result<Decimal, LedgerError> {
    authorize(account, raw_pin)?;
    Ok(account.balance())
}

/// Owned copy of the full history
pub fn transaction_history(
    account: &Account,
    raw_pin: &str,
) -> Result<Vec<TransactionRecord>, LedgerError> {
    authorize(account, raw_pin)?;
    Ok(account.transactions().to_vec())
}
