//! PIN Ledger Library
//! # Overview
//!
//! An in-memory banking ledger. Accounts are opened for adult holders, guarded
//! by a four-digit PIN, and keep an append-only transaction history. Every
//! sensitive operation (deposit, withdrawal, balance, history) requires the
//! correct PIN.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, AccountNumber, Pin, TransactionRecord, errors)
//! - [`config`] - Runtime settings (first account number, minimum age, currency)
//! - [`core`] - Business logic:
//!   - [`core::ledger`] - Single-threaded ledger service
//!   - [`core::shared`] - Thread-safe ledger with per-account locking
//!   - [`core::rules`] - Validation and PIN-gated operations on one account
//!   - [`core::account_store`] - Account repository with monotonic numbering
//! - [`io`] - CSV operation scripts and account output
//! - [`replay`] - Batch application of operation scripts
//! - [`selftest`] - Built-in acceptance checks and their report
//! - [`cli`] - Argument parsing and the interactive menu
//!
//! # Transaction Kinds
//!
//! - **ACCOUNT_CREATED**: Recorded once when the account opens, amount 0
//! - **DEPOSIT**: Credit to the balance
//! - **WITHDRAWAL**: Debit from the balance, never below zero
//!
//! # Security
//!
//! PINs are stored only as SHA-256 hex digests and never appear in `Debug`
//! output or logs.

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod replay;
pub mod selftest;
pub mod types;

pub use config::LedgerConfig;
pub use core::{AccountRepository, AccountStore, Ledger, SharedLedger};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountNumber, LedgerError, Pin, PinHash, TransactionKind, TransactionRecord,
};
