//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete event processing
//! pipelines: CSV parsing, application through the ledger engine, and balance
//! output. Different implementations (synchronous, asynchronous batch) can be
//! selected at runtime.

use crate::cli::StrategyType;
use crate::core::LedgerConfig;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Counts of what happened to each input row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Events applied successfully
    pub applied: usize,
    /// Valid events the engine refused (not found, insufficient funds, ...)
    pub rejected: usize,
    /// Rows that failed parsing or request validation
    pub malformed: usize,
}

/// Processing strategy trait for complete event processing pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process events from the input file and write final balances to output
    ///
    /// Individual row and event failures are logged and counted in the
    /// returned summary; they never abort processing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The output cannot be written
    /// - The async runtime cannot be created
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `batch_config` is only used by the async strategy; `None` selects defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    ledger_config: LedgerConfig,
    batch_config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(ledger_config)),
        StrategyType::Async => {
            let config = batch_config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, ledger_config))
        }
    }
}
