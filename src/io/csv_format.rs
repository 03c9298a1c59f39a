//! CSV format handling for ledger events and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to validated ledger events
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, EventRecord, LedgerError, LedgerEvent, AMOUNT_SCALE};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// A rejected input row, tagged with its line number
///
/// Line numbers count the header as line 1.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Line {line}: {error}")]
pub struct RowError {
    pub line: u64,
    pub error: LedgerError,
}

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, origin, destination, amount.
/// Every column but the type is optional so that missing values surface as
/// `InvalidRequest` errors during conversion instead of parse failures.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a validated LedgerEvent
///
/// Parses the amount string into a Decimal (if present) and hands the raw
/// record to `LedgerEvent::try_from` for field validation.
///
/// # Errors
///
/// Returns `InvalidRequest` if the amount is not a number, or if the record
/// fails event validation (unknown type, missing fields, missing amount).
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerEvent, LedgerError> {
    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            let amount = Decimal::from_str(amount_str.trim()).map_err(|_| {
                LedgerError::invalid_request(format!("Invalid amount '{}'", amount_str))
            })?;
            Some(amount)
        }
        _ => None,
    };

    LedgerEvent::try_from(EventRecord {
        event_type: csv_record.event_type,
        origin: csv_record.origin,
        destination: csv_record.destination,
        amount,
    })
}

/// Write account balances to CSV format
///
/// Writes accounts with columns: id, balance. Accounts are sorted by id for
/// deterministic output and balances are written with four decimal places.
///
/// # Errors
///
/// Returns `Io` if the output cannot be written.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "balance"])
        .map_err(|e| LedgerError::Io {
            message: format!("Failed to write CSV header: {}", e),
        })?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.id.cmp(&b.id));

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.id.clone(),
                format!("{:.*}", AMOUNT_SCALE as usize, account.balance),
            ])
            .map_err(|e| LedgerError::Io {
                message: format!("Failed to write account record: {}", e),
            })?;
    }

    writer.flush()?;

    Ok(())
}
