//! Expense Tracker CLI
//!
//! Interactive console for logging expenses by category.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --file ~/expenses.txt
//! cargo run -- --strategy async --workers 8
//! EXPENSE_FILE=spend.txt cargo run -- --log-level debug
//! ```
//!
//! Enter a category and then an amount for each expense. Type `SEARCH` to
//! look up a category, or `DONE` to list everything, print the total and
//! save. Logs go to stderr so they never mix with the prompts.
//!
//! # Exit Codes
//!
//! Always 0. Sessions ended by an invalid amount print the error on stdout;
//! console I/O failures and failed saves are reported on stderr. An
//! unreadable storage file starts an empty session.

use expense_tracker::cli::{self, Session};
use expense_tracker::core::Persister;
use expense_tracker::strategy;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(format!("expense_tracker={}", args.log_level))
        .with_writer(std::io::stderr)
        .init();

    let reducer = strategy::create_strategy(args.strategy.clone(), Some(args.to_reducer_config()));
    let config = args.to_session_config();

    let persister = match Persister::new() {
        Ok(persister) => persister,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let session = Session::open(config, reducer, persister);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    match session.run(stdin.lock(), &mut stdout) {
        Ok(outcome) => tracing::debug!(?outcome, "session finished"),
        Err(e) => eprintln!("Error: {}", e),
    }
}
