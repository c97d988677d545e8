use crate::config::{
    LedgerConfig, DEFAULT_CURRENCY_SYMBOL, DEFAULT_FIRST_ACCOUNT_NUMBER, DEFAULT_MINIMUM_AGE,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PIN-protected in-memory banking ledger
#[derive(Parser, Debug)]
#[command(name = "pin-ledger")]
#[command(
    about = "PIN-protected in-memory banking ledger",
    long_about = "PIN-protected in-memory banking ledger.\n\n\
                  Without a subcommand the built-in self-test runs first, \
                  followed by the interactive menu."
)]
pub struct CliArgs {
    /// What to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Number assigned to the first account
    #[arg(
        long = "first-account",
        value_name = "NUMBER",
        global = true,
        help = "Number assigned to the first account (default: 1001)"
    )]
    pub first_account: Option<u64>,

    /// Minimum holder age
    #[arg(
        long = "min-age",
        value_name = "YEARS",
        global = true,
        allow_negative_numbers = true,
        help = "Minimum age required to open an account (default: 18)"
    )]
    pub min_age: Option<i32>,

    /// Currency symbol used in messages
    #[arg(
        long = "currency",
        value_name = "SYMBOL",
        global = true,
        help = "Currency symbol shown in messages (default: ₹)"
    )]
    pub currency: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the interactive menu only
    Menu,

    /// Run the built-in self-test and print its report
    SelfTest {
        /// Report format
        #[arg(long = "format", value_name = "FORMAT", default_value = "text")]
        format: ReportFormat,
    },

    /// Apply a CSV script of operations and print the resulting accounts
    Replay {
        /// Script with columns: op, account, name, age, pin, amount
        #[arg(value_name = "INPUT", help = "Path to the operations CSV file")]
        input_file: PathBuf,

        /// Where to export histories returned by `history` operations
        #[arg(long = "history", value_name = "FILE")]
        history: Option<PathBuf>,
    },
}

/// Output formats for the self-test report
#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Csv,
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    ///
    /// Values that were not given fall back to the defaults.
    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(
            self.first_account.unwrap_or(DEFAULT_FIRST_ACCOUNT_NUMBER),
            self.min_age.unwrap_or(DEFAULT_MINIMUM_AGE),
            self.currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
        )
    }
}
