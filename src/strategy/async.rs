//! Asynchronous batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, worker_threads)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (account partitioning + tokio tasks)
//!     └── Ledger (shared engine)
//!         └── InMemoryAccountStore (DashMap-backed account state)
//! ```
//!
//! Batches run one after another. Within a batch, events that touch disjoint
//! sets of accounts run in parallel, so the final balances match sequential
//! processing of the whole file.

use crate::core::{BatchProcessor, Ledger, LedgerConfig};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::open_input;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of events per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            tracing::warn!(
                worker_threads,
                default = default.worker_threads,
                "invalid worker_threads, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    ledger_config: LedgerConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(config: BatchConfig, ledger_config: LedgerConfig) -> Self {
        Self {
            config,
            ledger_config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process events from the input file and write final balances to output
    ///
    /// 1. Builds a tokio multi-threaded runtime with the configured worker count
    /// 2. Reads events in batches with `AsyncReader`
    /// 3. Applies each batch through `BatchProcessor`, waiting before the next
    /// 4. Writes the final balances with `write_accounts_csv`
    ///
    /// A panicked batch task aborts the run with `TaskFailed`.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .build()
            .map_err(|e| LedgerError::Io {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let engine = Arc::new(Ledger::with_config(self.ledger_config));
            let processor = BatchProcessor::new(Arc::clone(&engine));

            let file = tokio::fs::File::from_std(open_input(input_path)?);
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut summary = ProcessingSummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for processed in processor.process_batch(batch).await? {
                    match processed.result {
                        Ok(_) => summary.applied += 1,
                        Err(error) => {
                            summary.rejected += 1;
                            tracing::warn!(
                                event = %processed.event.event_type(),
                                %error,
                                "event rejected"
                            );
                        }
                    }
                }
            }
            summary.malformed = reader.malformed();

            write_accounts_csv(&engine.accounts(), output)?;

            tracing::info!(
                applied = summary.applied,
                rejected = summary.rejected,
                malformed = summary.malformed,
                "processing complete"
            );

            Ok(summary)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_batch_config_zero_values_fall_back_to_defaults() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.worker_threads, num_cpus::get());
    }

    #[test]
    fn test_async_strategy_processes_valid_deposit() {
        let file = create_temp_csv("type,origin,destination,amount\ndeposit,,user1,100\n");

        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), LedgerConfig::default());
        let mut output = Vec::new();

        let summary = strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(summary.applied, 1);
        assert_eq!(String::from_utf8(output).unwrap(), "id,balance\nuser1,100.0000\n");
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), LedgerConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }

    #[test]
    fn test_async_strategy_maintains_ordering_across_batches() {
        // user1's withdrawals only succeed if its deposit, in an earlier batch,
        // was applied first
        let csv_content = "type,origin,destination,amount\n\
                          deposit,,user1,100\n\
                          deposit,,user2,50\n\
                          withdraw,user1,,30\n\
                          transfer,user2,user1,25\n\
                          withdraw,user1,,20\n";
        let file = create_temp_csv(csv_content);

        let strategy =
            AsyncProcessingStrategy::new(BatchConfig::new(2, num_cpus::get()), LedgerConfig::default());
        let mut output = Vec::new();

        let summary = strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(summary.applied, 5);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,balance\nuser1,75.0000\nuser2,25.0000\n"
        );
    }

    #[test]
    fn test_async_strategy_counts_rejections_and_malformed_rows() {
        let csv_content = "type,origin,destination,amount\n\
                          withdraw,ghost,,1\n\
                          bogus,,a,1\n\
                          deposit,,a,1\n";
        let file = create_temp_csv(csv_content);

        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), LedgerConfig::default());
        let mut output = Vec::new();

        let summary = strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(
            summary,
            ProcessingSummary {
                applied: 1,
                rejected: 1,
                malformed: 1
            }
        );
    }
}
