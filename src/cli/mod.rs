// CLI module
// Command-line arguments and the interactive menu

mod args;
mod menu;

pub use args::{CliArgs, Command, ReportFormat};
pub use menu::Menu;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing input path, or --help), clap
/// prints an error or the help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
