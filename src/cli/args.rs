use crate::cli::session::SessionConfig;
use crate::core::DEFAULT_POLL_INTERVAL;
use crate::strategy::ReducerConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Log expenses by category and total them up
#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Log expenses by category and total them up", long_about = None)]
pub struct CliArgs {
    /// Storage file holding one `category amount` line per expense
    #[arg(
        long = "file",
        value_name = "PATH",
        env = "EXPENSE_FILE",
        default_value = "expenses.txt",
        help = "Path to the expense storage file"
    )]
    pub file: PathBuf,

    /// Reduction strategy used to compute the total
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "threaded",
        help = "Total strategy: 'threaded' for OS threads or 'async' for tokio tasks"
    )]
    pub strategy: StrategyType,

    /// Number of workers summing partitions in parallel
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of workers used to compute the total (default: 4)"
    )]
    pub workers: Option<usize>,

    /// Interval between checks for background save completion
    #[arg(
        long = "poll-interval-ms",
        value_name = "MS",
        help = "Milliseconds between save completion checks (default: 50)"
    )]
    pub poll_interval_ms: Option<u64>,

    /// Log verbosity, written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level: error, warn, info, debug or trace"
    )]
    pub log_level: String,
}

/// Available strategies for computing the total
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Threaded,
    Async,
}

impl CliArgs {
    /// Create a ReducerConfig from CLI arguments
    ///
    /// A zero worker count falls back to the default with a warning.
    pub fn to_reducer_config(&self) -> ReducerConfig {
        match self.workers {
            Some(workers) => ReducerConfig::new(workers),
            None => ReducerConfig::default(),
        }
    }

    /// Create a SessionConfig from CLI arguments
    ///
    /// A zero poll interval falls back to the default with a warning.
    pub fn to_session_config(&self) -> SessionConfig {
        let poll_interval = match self.poll_interval_ms {
            Some(0) => {
                tracing::warn!(
                    default_ms = DEFAULT_POLL_INTERVAL.as_millis() as u64,
                    "invalid poll interval (0), using default"
                );
                DEFAULT_POLL_INTERVAL
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_POLL_INTERVAL,
        };

        SessionConfig {
            storage_path: self.file.clone(),
            poll_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program"], StrategyType::Threaded)]
    #[case::explicit_threaded(&["program", "--strategy", "threaded"], StrategyType::Threaded)]
    #[case::explicit_async(&["program", "--strategy", "async"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Threaded, StrategyType::Threaded) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[rstest]
    #[case::explicit_file(&["program", "--file", "spend.txt"], "spend.txt")]
    #[case::nested_file(&["program", "--file", "data/2026.txt"], "data/2026.txt")]
    fn test_file_option(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.file, PathBuf::from(expected));
    }

    // Reducer config conversion tests
    #[rstest]
    #[case::default_workers(&["program"], 4)]
    #[case::custom_workers(&["program", "--workers", "8"], 8)]
    #[case::zero_workers_fallback(&["program", "--workers", "0"], 4)]
    fn test_reducer_config_conversion(#[case] args: &[&str], #[case] expected_workers: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_reducer_config().workers(), expected_workers);
    }

    // Session config conversion tests
    #[rstest]
    #[case::default_interval(&["program"], 50)]
    #[case::custom_interval(&["program", "--poll-interval-ms", "10"], 10)]
    #[case::zero_interval_fallback(&["program", "--poll-interval-ms", "0"], 50)]
    fn test_session_config_conversion(#[case] args: &[&str], #[case] expected_ms: u64) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_session_config();
        assert_eq!(config.poll_interval, Duration::from_millis(expected_ms));
        assert_eq!(config.storage_path, parsed.file);
    }

    #[test]
    fn test_log_level_default() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        assert_eq!(parsed.log_level, "warn");
    }

    // Error handling tests
    #[rstest]
    #[case::invalid_strategy(&["program", "--strategy", "invalid"])]
    #[case::negative_workers(&["program", "--workers", "-1"])]
    #[case::non_numeric_interval(&["program", "--poll-interval-ms", "soon"])]
    #[case::unexpected_positional(&["program", "extra"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
