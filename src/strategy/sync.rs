//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It delegates:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Event application to `Ledger`
//! - CSV output to `csv_format::write_accounts_csv`
//!
//! Rows are streamed one at a time, so memory use is O(accounts), not O(rows).

use crate::core::{Ledger, LedgerConfig};
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use account_ledger::core::LedgerConfig;
/// use account_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(LedgerConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("events.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    ledger_config: LedgerConfig,
}

impl SyncProcessingStrategy {
    /// Create a strategy whose ledger uses `ledger_config`
    pub fn new(ledger_config: LedgerConfig) -> Self {
        Self { ledger_config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        let ledger = Ledger::with_config(self.ledger_config);
        let reader = SyncReader::new(input_path)?;
        let mut summary = ProcessingSummary::default();

        for row in reader {
            match row {
                Ok(event) => match ledger.apply(&event) {
                    Ok(_) => summary.applied += 1,
                    Err(error) => {
                        summary.rejected += 1;
                        tracing::warn!(event = %event.event_type(), %error, "event rejected");
                    }
                },
                Err(error) => {
                    summary.malformed += 1;
                    tracing::warn!(%error, "skipping malformed row");
                }
            }
        }

        write_accounts_csv(&ledger.accounts(), output)?;

        tracing::info!(
            applied = summary.applied,
            rejected = summary.rejected,
            malformed = summary.malformed,
            "processing complete"
        );

        Ok(summary)
    }
}
