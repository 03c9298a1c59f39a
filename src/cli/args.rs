use crate::core::{LedgerConfig, SelfTransferPolicy, WithdrawFailureMode};
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply deposit, withdraw and transfer events to an account ledger
#[derive(Parser, Debug)]
#[command(name = "account-ledger")]
#[command(about = "Apply deposit, withdraw and transfer events to an account ledger", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger events
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Number of events per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of events per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of worker threads for batch processing (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// How withdraw failures are reported
    #[arg(
        long = "withdraw-errors",
        value_name = "MODE",
        default_value = "distinct",
        help = "'distinct' reports not-found and insufficient funds separately, 'collapsed' reports one error"
    )]
    pub withdraw_errors: WithdrawErrorsArg,

    /// How transfers to the same account are applied
    #[arg(
        long = "self-transfer",
        value_name = "POLICY",
        default_value = "no-op",
        help = "'no-op' validates without writing, 'sequential' withdraws then deposits"
    )]
    pub self_transfer: SelfTransferArg,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level or filter directive (overridden by RUST_LOG)"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WithdrawErrorsArg {
    Distinct,
    Collapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SelfTransferArg {
    NoOp,
    Sequential,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments, falling back to defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.worker_threads.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.worker_threads
                    .unwrap_or(default.worker_threads),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the engine policies from CLI arguments
    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            withdraw_failures: match self.withdraw_errors {
                WithdrawErrorsArg::Distinct => WithdrawFailureMode::Distinct,
                WithdrawErrorsArg::Collapsed => WithdrawFailureMode::Collapsed,
            },
            self_transfer: match self.self_transfer {
                SelfTransferArg::NoOp => SelfTransferPolicy::NoOp,
                SelfTransferArg::Sequential => SelfTransferPolicy::Sequential,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "input.csv"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[rstest]
    #[case::all_defaults(&["program", "input.csv"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "input.csv"], 2000, num_cpus::get())]
    #[case::custom_workers(&["program", "--workers", "8", "input.csv"], 1000, 8)]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "input.csv"], 1000, num_cpus::get())]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_workers: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.worker_threads, expected_workers);
    }

    #[rstest]
    #[case::defaults(
        &["program", "input.csv"],
        LedgerConfig::default()
    )]
    #[case::collapsed(
        &["program", "--withdraw-errors", "collapsed", "input.csv"],
        LedgerConfig { withdraw_failures: WithdrawFailureMode::Collapsed, self_transfer: SelfTransferPolicy::NoOp }
    )]
    #[case::sequential(
        &["program", "--self-transfer", "sequential", "input.csv"],
        LedgerConfig { withdraw_failures: WithdrawFailureMode::Distinct, self_transfer: SelfTransferPolicy::Sequential }
    )]
    fn test_ledger_config_conversion(#[case] args: &[&str], #[case] expected: LedgerConfig) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_ledger_config(), expected);
    }

    #[test]
    fn test_log_level_defaults_to_warn() {
        let parsed = CliArgs::try_parse_from(["program", "input.csv"]).unwrap();
        assert_eq!(parsed.log_level, "warn");
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.csv"])]
    #[case::invalid_withdraw_mode(&["program", "--withdraw-errors", "maybe", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
