//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account numbers and account state
//! - `transaction`: Transaction kinds and history records
//! - `pin`: PIN credentials and their hashes
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod pin;
pub mod transaction;

pub use account::{Account, AccountNumber};
pub use error::LedgerError;
pub use pin::{Pin, PinHash};
pub use transaction::{TransactionKind, TransactionRecord, TIMESTAMP_FORMAT};
