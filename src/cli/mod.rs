// CLI module
// Command-line argument parsing and the interactive console session

mod args;
pub mod session;

pub use args::{CliArgs, StrategyType};
pub use session::{Session, SessionConfig, SessionOutcome};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g. invalid arguments or `--help`), clap displays an
/// error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
