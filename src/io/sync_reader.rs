//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger events from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<LedgerEvent, RowError>`
//! for each CSV row:
//!
//! ```no_run
//! use account_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("events.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(event) => println!("Applying event: {:?}", event),
//!         Err(e) => eprintln!("Skipping row: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants carrying the line number

use crate::io::csv_format::{convert_csv_record, CsvRecord, RowError};
use crate::types::{LedgerError, LedgerEvent};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Open an input file, mapping a missing file to `FileNotFound`
pub(crate) fn open_input(path: &Path) -> Result<File, LedgerError> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LedgerError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LedgerError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        },
    })
}

/// Synchronous CSV reader
///
/// Streams one row at a time; memory use does not grow with file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader trims whitespace from all fields, allows rows with
    /// fewer fields than the header, and uses an 8KB buffer.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path does not exist, `Io` for any other
    /// open failure.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = open_input(path)?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerEvent, RowError>;

    /// Get the next event from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(LedgerEvent))` - Valid row
    /// * `Some(Err(RowError))` - Parse or validation error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;

        let line = self.line_num;
        Some(
            row.map_err(LedgerError::from)
                .and_then(convert_csv_record)
                .map_err(|error| RowError { line, error }),
        )
    }
}
