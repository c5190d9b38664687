//! End-to-end integration tests
//!
//! These tests drive a complete console session from a scripted input using
//! predefined fixtures. Each test:
//! 1. Copies stored.txt (if present) into a scratch storage file
//! 2. Runs the session with input.txt as console input
//! 3. Checks the session outcome and reported total
//! 4. Compares the storage file with expected.txt (absent means no file)
//!
//! Fixtures are located in tests/fixtures/ and cover:
//! - Fresh and resumed sessions
//! - Storage files truncated at a malformed line
//! - Uneven partitioning (18 records over 4 workers)
//! - Invalid and negative amounts, and totals with nothing recorded
//! - Category lookups interleaved with entries
//!
//! Each test is run twice: once with the threaded reducer and once with the async reducer.

#[cfg(test)]
mod tests {
    use expense_tracker::cli::{Session, SessionConfig, SessionOutcome, StrategyType};
    use expense_tracker::core::Persister;
    use expense_tracker::strategy::{create_strategy, ReducerConfig};
    use rstest::rstest;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Run a fixture through a full session
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read, the session fails, or the
    /// outcome or storage file differ from what is expected.
    fn run_test_fixture(
        fixture_name: &str,
        expected_total: Option<f64>,
        strategy_type: StrategyType,
    ) {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let input_path = fixture_dir.join("input.txt");
        let stored_path = fixture_dir.join("stored.txt");
        let expected_path = fixture_dir.join("expected.txt");

        assert!(
            input_path.exists(),
            "Input file not found: {}",
            input_path.display()
        );

        let scratch = TempDir::new().expect("Failed to create temp dir");
        let storage_path = scratch.path().join("expenses.txt");
        if stored_path.exists() {
            fs::copy(&stored_path, &storage_path).expect("Failed to copy stored fixture");
        }

        let config = SessionConfig {
            storage_path: storage_path.clone(),
            poll_interval: Duration::from_millis(5),
        };
        let reducer = create_strategy(strategy_type.clone(), Some(ReducerConfig::default()));
        let persister = Persister::new().expect("Failed to create persister");
        let session = Session::open(config, reducer, persister);

        let input = fs::read_to_string(&input_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", input_path.display(), e));
        let mut output = Vec::new();
        let outcome = session
            .run(Cursor::new(input), &mut output)
            .unwrap_or_else(|e| panic!("Session failed: {}", e));
        let console = String::from_utf8(output).expect("Console output is not UTF-8");

        match (expected_total, &outcome) {
            (Some(expected), SessionOutcome::Saved { total, .. }) => {
                assert_eq!(*total, expected, "Total mismatch for fixture: {}", fixture_name);
                assert!(
                    console.contains(&format!("Total spending: ${:.2}", expected)),
                    "Console output missing total for fixture {}:\n{}",
                    fixture_name,
                    console
                );
            }
            (None, SessionOutcome::Aborted(_)) => {
                assert!(!console.contains("Total spending"));
            }
            _ => panic!(
                "Unexpected outcome for fixture {} (strategy: {:?}): {:?}",
                fixture_name, strategy_type, outcome
            ),
        }

        if expected_path.exists() {
            let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                panic!("Failed to read expected file {}: {}", expected_path.display(), e)
            });
            let actual =
                fs::read_to_string(&storage_path).expect("Storage file was not written");
            assert_eq!(
                actual, expected,
                "\n\nStorage mismatch for fixture: {} (strategy: {:?})\n\nActual:\n{}\n\nExpected:\n{}\n",
                fixture_name, strategy_type, actual, expected
            );
        } else {
            assert!(
                !storage_path.exists(),
                "Storage file should not exist for fixture: {}",
                fixture_name
            );
        }
    }

    /// End-to-end test for all fixtures with both reduction strategies
    #[rstest]
    #[case("fresh_session", Some(952.75))]
    #[case("resume_session", Some(27.5))]
    #[case("truncated_storage", Some(915.0))]
    #[case("eighteen_records", Some(171.0))]
    #[case("search_then_add", Some(68.25))]
    #[case("invalid_amount", None)]
    #[case("negative_amount", None)]
    #[case("nothing_recorded", None)]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] expected_total: Option<f64>,
        #[values(StrategyType::Threaded, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, expected_total, strategy);
    }
}
