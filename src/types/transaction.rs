//! Transaction-related types for the ledger
//!
//! This module defines the transaction kinds and the immutable records that make
//! up an account's history.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Format used whenever a transaction timestamp is rendered
///
/// Local wall-clock time with second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kinds of entries that can appear in an account history
///
/// The kind implies the sign of the amount: deposits add to the balance,
/// withdrawals subtract from it and the creation entry carries zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// First entry of every account, always with a zero amount
    AccountCreated,

    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Only recorded when the balance covered the amount.
    Withdrawal,
}

impl TransactionKind {
    /// Label used in reports and the menu; matches the serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::AccountCreated => "ACCOUNT_CREATED",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable entry in an account history
///
/// Records are only ever appended to an account; nothing hands out mutable
/// access to a record once it has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// What happened
    pub kind: TransactionKind,

    /// Non-negative magnitude, already rounded to two decimal places
    pub amount: Decimal,

    /// When the entry was appended
    pub timestamp: NaiveDateTime,
}

impl TransactionRecord {
    pub fn new(kind: TransactionKind, amount: Decimal, timestamp: NaiveDateTime) -> Self {
        TransactionRecord {
            kind,
            amount,
            timestamp,
        }
    }

    /// Amount with the sign implied by the kind
    ///
    /// Summing the signed amounts of a full history yields the account balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::AccountCreated => Decimal::ZERO,
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
