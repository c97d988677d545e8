//! Batch replay of ledger operations
//!
//! Reads a CSV script of operations, applies each one to a fresh [`Ledger`] in
//! order and writes the final account states as CSV. Histories returned by
//! `history` operations can be exported as a second CSV.
//!
//! Individual operation failures (malformed rows, rejected operations) are
//! logged and skipped; only failures to open the script or write the output
//! abort the replay.

use crate::config::LedgerConfig;
use crate::core::{AccountRepository, Ledger};
use crate::io::{write_accounts_csv, write_history_csv, Operation, OperationReader};
use crate::types::{AccountNumber, LedgerError, TransactionRecord};
use std::io::{Read, Write};
use std::path::Path;

/// Counts of what happened during a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Operations the ledger accepted
    pub applied: usize,
    /// Operations the ledger rejected
    pub rejected: usize,
    /// Rows that could not be parsed
    pub malformed: usize,
}

/// Histories returned by `history` operations, in script order
pub type HistoryExport = Vec<(AccountNumber, Vec<TransactionRecord>)>;

/// Apply a single operation to a ledger
///
/// A successful `history` operation appends the returned records to `exports`.
pub fn apply<R: AccountRepository>(
    ledger: &mut Ledger<R>,
    operation: Operation,
    exports: &mut HistoryExport,
) -> Result<(), LedgerError> {
    match operation {
        Operation::Create { name, age, pin } => {
            ledger.create_account(&name, age, pin.as_deref())?;
        }
        Operation::SetPin { account, pin } => {
            ledger.set_pin(&account, &pin)?;
        }
        Operation::Deposit {
            account,
            amount,
            pin,
        } => {
            ledger.deposit(&account, amount, &pin)?;
        }
        Operation::Withdraw {
            account,
            amount,
            pin,
        } => {
            ledger.withdraw(&account, amount, &pin)?;
        }
        Operation::Balance { account, pin } => {
            let balance = ledger.view_balance(&account, &pin)?;
            log::info!("Balance of account {}: {:.2}", account, balance);
        }
        Operation::History { account, pin } => {
            let history = ledger.transaction_history(&account, &pin)?;
            log::info!("Account {} has {} transactions", account, history.len());
            exports.push((account, history));
        }
    }
    Ok(())
}

/// Apply every operation from `reader` to `ledger`
pub fn replay<R, S>(
    ledger: &mut Ledger<S>,
    reader: OperationReader<R>,
    exports: &mut HistoryExport,
) -> ReplaySummary
where
    R: Read,
    S: AccountRepository,
{
    let mut summary = ReplaySummary::default();

    for result in reader {
        match result {
            Ok(operation) => match apply(ledger, operation, exports) {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    log::warn!("Operation rejected: {}", e);
                    summary.rejected += 1;
                }
            },
            Err(e) => {
                log::warn!("CSV parsing error: {}", e);
                summary.malformed += 1;
            }
        }
    }

    summary
}

/// Replay a script file into a new ledger and write the resulting accounts
///
/// When `history_output` is given, histories from `history` operations are
/// written there as well.
///
/// # Errors
///
/// Returns an error if the script cannot be opened or an output cannot be
/// written.
pub fn replay_file(
    input_path: &Path,
    config: LedgerConfig,
    output: &mut dyn Write,
    history_output: Option<&mut dyn Write>,
) -> Result<ReplaySummary, String> {
    let mut ledger = Ledger::with_config(config);
    let reader = OperationReader::from_path(input_path)?;
    let mut exports = HistoryExport::new();

    let summary = replay(&mut ledger, reader, &mut exports);
    log::info!(
        "Replay finished: {} applied, {} rejected, {} malformed",
        summary.applied,
        summary.rejected,
        summary.malformed
    );

    write_accounts_csv(&ledger.accounts(), output)?;
    if let Some(history_output) = history_output {
        write_history_csv(&exports, history_output)?;
    }

    Ok(summary)
}
