//! TicketStore port - ticket レコードの正本（source of truth）
//!
//! # 設計原則
//! - レコードは `id` をキーとした 1 行（フィールドは record codec が定義）
//! - scan は等値フィルタ + 上限のみ。順序は保証しない
//! - 実装例: InMemoryTicketStore（開発用）、DynamoDB 等（本番用）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DecodeError, EventId, Ticket, TicketId};

/// Store failure, with a human-readable hint attached where the transport
/// allows one (table missing, connection refused, permission denied).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ticket not found: {0}")]
    NotFound(String),

    #[error("ticket already exists: {0}")]
    Conflict(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("ticket store unavailable: {0}")]
    Unavailable(String),
}

/// Equality filters for [`TicketStore::scan`]. Empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub email: Option<String>,
    pub event_id: Option<EventId>,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(email) = &self.email
            && email != &ticket.email
        {
            return false;
        }
        if let Some(event_id) = &self.event_id
            && *event_id != ticket.event_id
        {
            return false;
        }
        true
    }
}

/// TicketStore は状態の正本
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Upsert the record under its id.
    async fn put(&self, ticket: &Ticket) -> Result<(), StoreError>;

    /// Fetch one record; `NotFound` when absent.
    async fn get(&self, id: TicketId) -> Result<Ticket, StoreError>;

    /// Unindexed scan with equality filters, at most `limit` results,
    /// in whatever order the store yields.
    async fn scan(&self, filter: &TicketFilter, limit: usize) -> Result<Vec<Ticket>, StoreError>;

    /// Delete one record; `NotFound` when absent.
    async fn delete(&self, id: TicketId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::{TimeZone, Utc};

    fn ticket(email: &str, event: &str) -> Ticket {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Ticket::new(
            TicketId::from_uuid(uuid::Uuid::new_v4()),
            EventId::parse(event).unwrap(),
            UserId::from_uuid(uuid::Uuid::new_v4()),
            email,
            "Ada",
            now,
        )
    }

    #[test]
    fn empty_filter_matches_everything() {
        let t = ticket("a@b.com", "550e8400-e29b-41d4-a716-446655440003");
        assert!(TicketFilter::default().matches(&t));
    }

    #[test]
    fn filters_are_conjunctive() {
        let event = "550e8400-e29b-41d4-a716-446655440003";
        let t = ticket("a@b.com", event);

        let by_email = TicketFilter {
            email: Some("a@b.com".to_string()),
            event_id: None,
        };
        assert!(by_email.matches(&t));

        let mismatch = TicketFilter {
            email: Some("a@b.com".to_string()),
            event_id: Some(EventId::parse("550e8400-e29b-41d4-a716-446655440004").unwrap()),
        };
        assert!(!mismatch.matches(&t));
    }
}
