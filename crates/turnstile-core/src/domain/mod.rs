//! Domain model (IDs, tickets, statuses, errors, events).

pub mod ids;
pub mod ticket;
pub mod status;
pub mod errors;
pub mod events;

pub use self::ids::{EventId, TicketId, UserId};
pub use self::ticket::{Ticket, TicketCode};
pub use self::status::{InvalidTransition, TicketStatus};
pub use self::errors::{DecodeError, Step, TicketError};
pub use self::events::ReservationMessage;
