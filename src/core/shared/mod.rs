//! Thread-safe implementations of core components
//!
//! These mirror the single-threaded ledger but use concurrent data structures:
//!
//! - **SharedAccountStore**: account state in a `DashMap`, atomic number allocation
//! - **SharedLedger**: the ledger operations over `&self`
//!
//! # Thread Safety
//!
//! - Operations on different accounts proceed in parallel
//! - Operations on the same account are serialized by the entry lock
//! - No global lock around the whole store

pub mod account_store;
pub mod ledger;

pub use account_store::SharedAccountStore;
pub use ledger::SharedLedger;
