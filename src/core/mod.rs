//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Repository abstraction the ledger stores accounts through
//! - `account_store` - In-memory repository with monotonic number allocation
//! - `rules` - Validation and PIN-gated operations on a single account
//! - `clock` - Time source for transaction timestamps
//! - `ledger` - The single-threaded ledger service
//! - `shared` - Thread-safe variants

pub mod account_store;
pub mod clock;
pub mod ledger;
pub mod rules;
pub mod shared;
pub mod traits;

pub use account_store::AccountStore;
pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::Ledger;
pub use shared::{SharedAccountStore, SharedLedger};
pub use traits::AccountRepository;
