//! Ticket lifecycle states.
//!
//! State transitions:
//! - Reserved -> Confirmed (payment or manual confirmation)
//! - Reserved -> Cancelled
//! - Confirmed -> Used (check-in)
//! - Confirmed -> Cancelled
//!
//! Cancelled and Used are terminal. Every mutation goes through
//! [`TicketStatus::can_transition_to`]; there is no free-form string state.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Closed set of ticket states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Reserved,
    Confirmed,
    Cancelled,
    Used,
}

/// 許可されていない状態遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid status transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: TicketStatus,
    pub to: TicketStatus,
}

impl TicketStatus {
    /// Record/wire representation ("reserved", "confirmed", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Reserved => "reserved",
            TicketStatus::Confirmed => "confirmed",
            TicketStatus::Cancelled => "cancelled",
            TicketStatus::Used => "used",
        }
    }

    /// Inverse of [`as_str`](Self::as_str), for record decoding.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reserved" => Some(TicketStatus::Reserved),
            "confirmed" => Some(TicketStatus::Confirmed),
            "cancelled" => Some(TicketStatus::Cancelled),
            "used" => Some(TicketStatus::Used),
            _ => None,
        }
    }

    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TicketStatus::Cancelled | TicketStatus::Used)
    }

    /// Allowed-transition table. Self-transitions are not allowed.
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (TicketStatus::Reserved, TicketStatus::Confirmed)
                | (TicketStatus::Reserved, TicketStatus::Cancelled)
                | (TicketStatus::Confirmed, TicketStatus::Used)
                | (TicketStatus::Confirmed, TicketStatus::Cancelled)
        )
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
