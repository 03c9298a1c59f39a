//! Ledger event types
//!
//! This module defines the events clients submit against accounts, the raw
//! request shape they arrive in, and the outcomes the engine hands back.

use super::account::{Account, AccountId};
use super::error::LedgerError;
use rust_decimal::Decimal;
use std::fmt;

/// Maximum number of decimal places accepted for an amount
pub const AMOUNT_SCALE: u32 = 4;

/// Event kinds supported by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Credit funds to an account, creating it if needed
    Deposit,

    /// Debit funds from an existing account
    Withdraw,

    /// Move funds from one account to another
    Transfer,
}

impl EventType {
    /// Parse an event type name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "deposit" => Some(EventType::Deposit),
            "withdraw" => Some(EventType::Withdraw),
            "transfer" => Some(EventType::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::Deposit => "deposit",
            EventType::Withdraw => "withdraw",
            EventType::Transfer => "transfer",
        };
        f.write_str(name)
    }
}

/// A validated money-movement event
///
/// Events are ephemeral: they are applied to the store and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Deposit {
        destination: AccountId,
        amount: Decimal,
    },
    Withdraw {
        origin: AccountId,
        amount: Decimal,
    },
    Transfer {
        origin: AccountId,
        destination: AccountId,
        amount: Decimal,
    },
}

impl LedgerEvent {
    /// The kind of this event
    pub fn event_type(&self) -> EventType {
        match self {
            LedgerEvent::Deposit { .. } => EventType::Deposit,
            LedgerEvent::Withdraw { .. } => EventType::Withdraw,
            LedgerEvent::Transfer { .. } => EventType::Transfer,
        }
    }

    /// The amount moved by this event
    pub fn amount(&self) -> Decimal {
        match self {
            LedgerEvent::Deposit { amount, .. }
            | LedgerEvent::Withdraw { amount, .. }
            | LedgerEvent::Transfer { amount, .. } => *amount,
        }
    }

    /// Every account id this event reads or writes
    pub fn account_ids(&self) -> Vec<&str> {
        match self {
            LedgerEvent::Deposit { destination, .. } => vec![destination.as_str()],
            LedgerEvent::Withdraw { origin, .. } => vec![origin.as_str()],
            LedgerEvent::Transfer {
                origin,
                destination,
                ..
            } => vec![origin.as_str(), destination.as_str()],
        }
    }
}

/// Raw, unvalidated event as received from a caller
///
/// Every field except the type is optional so that missing fields can be
/// reported as `InvalidRequest` instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    pub event_type: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub amount: Option<Decimal>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

impl TryFrom<EventRecord> for LedgerEvent {
    type Error = LedgerError;

    /// Validate a raw record
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if:
    /// - The event type is unknown
    /// - A field required by the event type is missing or blank
    /// - The amount is missing or has more than four decimal places
    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let event_type = EventType::parse(&record.event_type)
            .ok_or_else(|| LedgerError::invalid_request("Invalid event type"))?;

        let amount = record
            .amount
            .ok_or_else(|| LedgerError::invalid_request("Amount is required"))?;
        if amount.normalize().scale() > AMOUNT_SCALE {
            return Err(LedgerError::invalid_request(format!(
                "Amount {} has more than {} decimal places",
                amount, AMOUNT_SCALE
            )));
        }

        let origin = present(record.origin);
        let destination = present(record.destination);

        match event_type {
            EventType::Deposit => {
                let destination = destination
                    .ok_or_else(|| LedgerError::invalid_request("Destination is required"))?;
                Ok(LedgerEvent::Deposit {
                    destination,
                    amount,
                })
            }
            EventType::Withdraw => {
                let origin =
                    origin.ok_or_else(|| LedgerError::invalid_request("Origin is required"))?;
                Ok(LedgerEvent::Withdraw { origin, amount })
            }
            EventType::Transfer => match (origin, destination) {
                (Some(origin), Some(destination)) => Ok(LedgerEvent::Transfer {
                    origin,
                    destination,
                    amount,
                }),
                _ => Err(LedgerError::invalid_request(
                    "Origin and destination are required",
                )),
            },
        }
    }
}

/// Both sides of a successful transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    pub origin: Account,
    pub destination: Account,
}

/// Result of applying one event
///
/// Deposits fill `destination`, withdrawals fill `origin`, transfers fill both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    pub origin: Option<Account>,
    pub destination: Option<Account>,
}

impl From<TransferOutcome> for EventOutcome {
    fn from(outcome: TransferOutcome) -> Self {
        EventOutcome {
            origin: Some(outcome.origin),
            destination: Some(outcome.destination),
        }
    }
}
