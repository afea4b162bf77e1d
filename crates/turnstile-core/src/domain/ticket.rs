//! Ticket record and its derived code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{EventId, TicketId, UserId};
use super::status::{InvalidTransition, TicketStatus};

/// Human-shareable ticket code, derived from the ticket identity.
///
/// 同じ TicketId からは常に同じコードが導出されます（決定的）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketCode(String);

impl TicketCode {
    /// Derive the code from a ticket identity: `TKT-` + the first 8
    /// characters of the hyphenated UUID.
    pub fn derive(id: TicketId) -> Self {
        Self(format!("TKT-{}", id.short()))
    }

    /// Wrap an already-formatted code (record decoding, QR parsing).
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ticket record: the reservation for one event attendance.
///
/// Design:
/// - The workflow owns the Ticket while it is being built; after persistence
///   the TicketStore holds the authoritative copy.
/// - Status changes go through [`transition`](Self::transition); fields are
///   otherwise plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub ticket_code: TicketCode,
    pub status: TicketStatus,

    /// Non-negative currency amount. Pricing is not computed here; the
    /// reservation workflow records 0.0.
    pub price: f64,

    pub reserved_at: DateTime<Utc>,

    /// Set only by a check-in flow, which lives outside this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_by: Option<UserId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Build a freshly reserved ticket. All three timestamps are set to the
    /// reservation instant.
    pub fn new(
        id: TicketId,
        event_id: EventId,
        user_id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            user_id,
            email: email.into(),
            name: name.into(),
            ticket_code: TicketCode::derive(id),
            status: TicketStatus::Reserved,
            price: 0.0,
            reserved_at: now,
            checked_in_at: None,
            checked_in_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `next`, enforcing the allowed-transition table.
    pub fn transition(
        &mut self,
        next: TicketStatus,
        now: DateTime<Utc>,
    ) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Record a mutation instant (query/admin updates).
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
