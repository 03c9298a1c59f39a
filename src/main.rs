//! Account Ledger CLI
//!
//! Applies ledger events from a CSV file and prints the resulting balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- events.csv > balances.csv
//! cargo run -- --strategy sync events.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --workers 8 events.csv > balances.csv
//! cargo run -- --withdraw-errors collapsed --self-transfer sequential events.csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use account_ledger::cli;
use account_ledger::logging;
use account_ledger::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();
    logging::init(&args.log_level);

    let strategy = {
        let batch_config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), args.to_ledger_config(), batch_config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
