//! Reservation event published to the notification queue.

use serde::{Deserialize, Serialize};

use super::ids::{EventId, TicketId, UserId};
use super::ticket::Ticket;

/// Message sent after a reservation commits.
///
/// Delivery is best effort; consumers must tolerate duplicates and loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationMessage {
    pub reservation_id: TicketId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub num_tickets: u32,
}

impl ReservationMessage {
    pub fn for_ticket(ticket: &Ticket) -> Self {
        Self {
            reservation_id: ticket.id,
            user_id: ticket.user_id,
            event_id: ticket.event_id,
            num_tickets: 1,
        }
    }
}
