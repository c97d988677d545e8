//! Storage abstraction behind the ledger
//!
//! The ledger owns its repository explicitly; there is no process-wide store.
//! Tests and embedders can build as many isolated ledgers as they like.

use crate::types::{Account, AccountNumber, LedgerError};

/// Trait for storing accounts and handing out account numbers
pub trait AccountRepository {
    /// Reserve the next account number
    ///
    /// Numbers come from a monotonic counter, never from the store size, and
    /// are never handed out twice by the same repository.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNumbersExhausted`] once the counter would
    /// overflow.
    fn allocate_number(&mut self) -> Result<AccountNumber, LedgerError>;

    /// Store a newly opened account
    fn insert(&mut self, account: Account);

    /// Look up an account
    fn get(&self, number: &AccountNumber) -> Option<&Account>;

    /// Look up an account for modification
    fn get_mut(&mut self, number: &AccountNumber) -> Option<&mut Account>;

    /// All accounts, in allocation order
    fn accounts(&self) -> Vec<&Account>;

    /// Number of stored accounts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
