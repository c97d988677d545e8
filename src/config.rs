//! Ledger configuration
//!
//! Built from command-line arguments by [`crate::cli::CliArgs::to_ledger_config`]
//! or taken from [`LedgerConfig::default`] in tests.

/// First account number handed out by a fresh ledger
pub const DEFAULT_FIRST_ACCOUNT_NUMBER: u64 = 1001;

/// Youngest age allowed to open an account
pub const DEFAULT_MINIMUM_AGE: i32 = 18;

/// Currency symbol shown by the menu and reports
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Settings for a ledger instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Number assigned to the first account; later ones count up from here
    pub first_account_number: u64,

    /// Account creation is rejected below this age
    pub minimum_age: i32,

    /// Display-only currency symbol
    pub currency_symbol: String,
}

impl LedgerConfig {
    /// Create a configuration, falling back to defaults for invalid values
    ///
    /// A negative minimum age makes no sense and is replaced by the default,
    /// with a warning.
    pub fn new(first_account_number: u64, minimum_age: i32, currency_symbol: String) -> Self {
        let minimum_age = if minimum_age < 0 {
            log::warn!(
                "Minimum age {} is negative, using default {}",
                minimum_age,
                DEFAULT_MINIMUM_AGE
            );
            DEFAULT_MINIMUM_AGE
        } else {
            minimum_age
        };

        LedgerConfig {
            first_account_number,
            minimum_age,
            currency_symbol,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            first_account_number: DEFAULT_FIRST_ACCOUNT_NUMBER,
            minimum_age: DEFAULT_MINIMUM_AGE,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}
