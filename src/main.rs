//! PIN Ledger CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run                                  # self-test report, then the menu
//! cargo run -- menu                          # interactive menu only
//! cargo run -- self-test --format csv        # self-test report as CSV
//! cargo run -- replay operations.csv > accounts.csv
//! cargo run -- replay operations.csv --history history.csv > accounts.csv
//! cargo run -- --first-account 5000 --min-age 21 --currency '$' menu
//! ```
//!
//! Log output goes to stderr and is controlled with `RUST_LOG`
//! (default level: `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable input, failed self-test check, output failure, etc.)

use env_logger::Env;
use pin_ledger::cli::{self, Command, Menu, ReportFormat};
use pin_ledger::replay::replay_file;
use pin_ledger::selftest::{all_passed, run_self_test, write_report, write_report_csv};
use pin_ledger::{Ledger, LedgerConfig};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process;

fn run_menu(config: LedgerConfig) -> Result<(), String> {
    let mut ledger = Ledger::with_config(config);
    let stdin = io::stdin();
    let stdout = io::stdout();

    Menu::new(&mut ledger, stdin.lock(), stdout.lock())
        .run()
        .map_err(|e| format!("Menu I/O failed: {}", e))
}

fn run_self_test_report(config: &LedgerConfig, format: ReportFormat) -> Result<bool, String> {
    let outcomes = run_self_test(config);
    let mut output = io::stdout().lock();

    match format {
        ReportFormat::Text => write_report(&outcomes, &mut output)
            .map_err(|e| format!("Failed to write report: {}", e))?,
        ReportFormat::Csv => write_report_csv(&outcomes, &mut output)?,
    }
    output
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(all_passed(&outcomes))
}

fn run_replay(input_file: &Path, history: Option<&Path>, config: LedgerConfig) -> Result<(), String> {
    let mut history_file = history
        .map(|path| {
            File::create(path)
                .map_err(|e| format!("Failed to create history file '{}': {}", path.display(), e))
        })
        .transpose()?;
    let mut output = io::stdout();

    replay_file(
        input_file,
        config,
        &mut output,
        history_file.as_mut().map(|file| file as &mut dyn Write),
    )
    .map(|_| ())
}

fn run(args: cli::CliArgs) -> Result<(), String> {
    let config = args.to_ledger_config();

    match args.command {
        None => {
            run_self_test_report(&config, ReportFormat::Text)?;
            run_menu(config)
        }
        Some(Command::Menu) => run_menu(config),
        Some(Command::SelfTest { format }) => {
            if run_self_test_report(&config, format)? {
                Ok(())
            } else {
                Err("One or more self-test checks failed".to_string())
            }
        }
        Some(Command::Replay {
            input_file,
            history,
        }) => run_replay(&input_file, history.as_deref(), config),
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
