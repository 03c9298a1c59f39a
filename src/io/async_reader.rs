//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of ledger events from an async byte source.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of LedgerEvents
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord, RowError};
use crate::types::{LedgerError, LedgerEvent};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Rejected rows are logged and counted, never returned in a batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    malformed: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            malformed: 0,
        }
    }

    /// Number of rows rejected so far
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Read a batch of events
    ///
    /// Reads up to `batch_size` valid events. Rows that fail to parse or
    /// validate are logged and skipped. Returns an empty vector at end of file.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerEvent> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let Some(row) = records.next().await else {
                break;
            };
            self.line_num += 1;

            let converted = row
                .map_err(|e| LedgerError::Parse {
                    line: Some(self.line_num),
                    message: e.to_string(),
                })
                .and_then(convert_csv_record);

            match converted {
                Ok(event) => batch.push(event),
                Err(error) => {
                    self.malformed += 1;
                    let rejected = RowError {
                        line: self.line_num,
                        error,
                    };
                    tracing::warn!(error = %rejected, "skipping malformed row");
                }
            }
        }

        batch
    }
}
