//! InMemoryTicketStore - 開発用レコードストア
//!
//! # 実装詳細
//! - `HashMap<String, serde_json::Value>` で行を管理（キーは id の文字列）
//! - 保存形式は record codec の JSON 行（構造体そのものではない）
//! - `tokio::sync::Mutex` で排他制御

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::record::{decode_ticket, encode_ticket};
use crate::domain::{Ticket, TicketId};
use crate::ports::{StoreError, TicketFilter, TicketStore};

/// In-memory ticket store. Rows round-trip through the record codec on
/// every access, so decode failures surface exactly as they would against
/// a real record store.
#[derive(Default)]
pub struct InMemoryTicketStore {
    rows: Arc<Mutex<HashMap<String, Value>>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows (for tests).
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    /// Overwrite a raw row, bypassing the codec (for decode-failure tests).
    #[cfg(test)]
    pub async fn put_raw(&self, id: &str, row: Value) {
        self.rows.lock().await.insert(id.to_string(), row);
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn put(&self, ticket: &Ticket) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        rows.insert(ticket.id.to_string(), encode_ticket(ticket));
        Ok(())
    }

    async fn get(&self, id: TicketId) -> Result<Ticket, StoreError> {
        let rows = self.rows.lock().await;
        let row = rows
            .get(&id.to_string())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(decode_ticket(row)?)
    }

    async fn scan(&self, filter: &TicketFilter, limit: usize) -> Result<Vec<Ticket>, StoreError> {
        let rows = self.rows.lock().await;
        let mut out = Vec::new();
        // HashMap iteration order doubles as the store's "whatever order".
        for row in rows.values() {
            if out.len() >= limit {
                break;
            }
            let ticket = decode_ticket(row)?;
            if filter.matches(&ticket) {
                out.push(ticket);
            }
        }
        Ok(out)
    }

    async fn delete(&self, id: TicketId) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        rows.remove(&id.to_string())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventId, UserId};
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

    const EVENT_A: &str = "550e8400-e29b-41d4-a716-446655440003";
    const EVENT_B: &str = "550e8400-e29b-41d4-a716-446655440004";

    #[tokio::test]
    async fn put_get_roundtrip() {
        let store = InMemoryTicketStore::new();
        let t = ticket("a@b.com", EVENT_A);

        store.put(&t).await.unwrap();
        let back = store.get(t.id).await.unwrap();
        assert_eq!(back, t);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = InMemoryTicketStore::new();
        let id = TicketId::from_uuid(uuid::Uuid::new_v4());

        let err = store.get(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(s) if s == id.to_string()));
    }

    #[tokio::test]
    async fn put_is_an_upsert() {
        let store = InMemoryTicketStore::new();
        let mut t = ticket("a@b.com", EVENT_A);
        store.put(&t).await.unwrap();

        t.email = "new@b.com".to_string();
        store.put(&t).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(t.id).await.unwrap().email, "new@b.com");
    }

    #[tokio::test]
    async fn scan_applies_filters_and_limit() {
        let store = InMemoryTicketStore::new();
        for _ in 0..3 {
            store.put(&ticket("a@b.com", EVENT_A)).await.unwrap();
        }
        store.put(&ticket("c@d.com", EVENT_B)).await.unwrap();

        let by_event = TicketFilter {
            email: None,
            event_id: Some(EventId::parse(EVENT_A).unwrap()),
        };
        let hits = store.scan(&by_event, 10).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|t| t.event_id == EventId::parse(EVENT_A).unwrap()));

        let capped = store.scan(&TicketFilter::default(), 2).await.unwrap();
        assert_eq!(capped.len(), 2);

        let none = store
            .scan(
                &TicketFilter {
                    email: Some("nobody@b.com".to_string()),
                    event_id: None,
                },
                10,
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_row_once() {
        let store = InMemoryTicketStore::new();
        let t = ticket("a@b.com", EVENT_A);
        store.put(&t).await.unwrap();

        store.delete(t.id).await.unwrap();
        let err = store.delete(t.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn corrupt_row_surfaces_a_decode_error() {
        let store = InMemoryTicketStore::new();
        let t = ticket("a@b.com", EVENT_A);
        let mut row = encode_ticket(&t);
        row.as_object_mut().unwrap().remove("status");
        store.put_raw(&t.id.to_string(), row).await;

        let err = store.get(t.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
