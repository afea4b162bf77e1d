//! Ticket query/admin surface.
//!
//! TicketStore のみに依存する薄いサーフェス。HTTP ルーティング層が
//! そのままディスパッチできる粒度で list/get/create/update/delete を提供します。

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::{EventId, Step, Ticket, TicketError, TicketId};
use crate::ports::{Clock, IdGenerator, TicketFilter, TicketStore};

use super::reservation::{DEFAULT_GUEST_NAME, EMAIL_HINT, UUID_HINT};
use super::store_error;

/// Applied when the request omits `limit` or passes 0.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Listing parameters: optional equality filters plus a result cap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub email: Option<String>,
    pub event_id: Option<String>,
    pub limit: Option<usize>,
}

impl ListQuery {
    fn effective_limit(&self) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIST_LIMIT,
        }
    }
}

/// Bare admin insert (no artifacts, no notification).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicket {
    pub email: String,
    pub event_id: String,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketUpdate {
    pub email: Option<String>,
    pub event_id: Option<String>,
}

/// TicketDirectory は照会/管理サーフェス
pub struct TicketDirectory {
    tickets: Arc<dyn TicketStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl TicketDirectory {
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { tickets, clock, ids }
    }

    /// Linear scan with optional equality filters. An empty result is not
    /// an error.
    pub async fn list(&self, query: ListQuery) -> Result<Vec<Ticket>, TicketError> {
        let event_id = match query.event_id.as_deref() {
            Some(raw) => Some(EventId::parse(raw).map_err(|_| {
                TicketError::validation(
                    "event_id",
                    format!("'{raw}' is not a valid UUID"),
                    UUID_HINT,
                )
            })?),
            None => None,
        };

        let filter = TicketFilter {
            email: query.email.clone(),
            event_id,
        };
        self.tickets
            .scan(&filter, query.effective_limit())
            .await
            .map_err(|e| store_error(Step::Scan, e))
    }

    pub async fn get(&self, id: TicketId) -> Result<Ticket, TicketError> {
        self.tickets
            .get(id)
            .await
            .map_err(|e| store_error(Step::Fetch, e))
    }

    pub async fn create(&self, req: CreateTicket) -> Result<Ticket, TicketError> {
        let event_id = EventId::parse(&req.event_id).map_err(|_| {
            TicketError::validation(
                "event_id",
                format!("'{}' is not a valid UUID", req.event_id),
                UUID_HINT,
            )
        })?;
        if req.email.is_empty() {
            return Err(TicketError::validation("email", "email required", EMAIL_HINT));
        }
        if !req.email.contains('@') {
            return Err(TicketError::validation(
                "email",
                format!("'{}' is not a valid address", req.email),
                EMAIL_HINT,
            ));
        }

        let ticket = Ticket::new(
            self.ids.ticket_id(),
            event_id,
            self.ids.user_id(),
            req.email,
            DEFAULT_GUEST_NAME,
            self.clock.now(),
        );
        self.tickets
            .put(&ticket)
            .await
            .map_err(|e| store_error(Step::Persist, e))?;
        Ok(ticket)
    }

    /// Fetch-modify-put. Bumps `updated_at`.
    pub async fn update(&self, id: TicketId, patch: TicketUpdate) -> Result<Ticket, TicketError> {
        let mut ticket = self.get(id).await?;

        if let Some(email) = patch.email.filter(|s| !s.is_empty()) {
            ticket.email = email;
        }
        if let Some(raw) = patch.event_id.as_deref().filter(|s| !s.is_empty()) {
            ticket.event_id = EventId::parse(raw).map_err(|_| {
                TicketError::validation(
                    "event_id",
                    format!("'{raw}' is not a valid UUID"),
                    UUID_HINT,
                )
            })?;
        }
        ticket.touch(self.clock.now());

        self.tickets
            .put(&ticket)
            .await
            .map_err(|e| store_error(Step::Persist, e))?;
        Ok(ticket)
    }

    /// Single delete call; NotFound when the record is absent.
    pub async fn delete(&self, id: TicketId) -> Result<(), TicketError> {
        self.tickets
            .delete(id)
            .await
            .map_err(|e| store_error(Step::Delete, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryTicketStore;
    use crate::ports::{FixedClock, SequentialIdGenerator};
    use chrono::{TimeZone, Utc};

    const EVENT_A: &str = "550e8400-e29b-41d4-a716-446655440003";
    const EVENT_B: &str = "550e8400-e29b-41d4-a716-446655440004";

    fn directory() -> (Arc<InMemoryTicketStore>, TicketDirectory) {
        let store = Arc::new(InMemoryTicketStore::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap());
        let directory = TicketDirectory::new(
            Arc::clone(&store) as Arc<dyn TicketStore>,
            Arc::new(clock),
            Arc::new(SequentialIdGenerator::new()),
        );
        (store, directory)
    }

    async fn seed(directory: &TicketDirectory, n: usize, event: &str) {
        for i in 0..n {
            directory
                .create(CreateTicket {
                    email: format!("user{i}@b.com"),
                    event_id: event.to_string(),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn list_falls_back_to_the_default_limit() {
        let (_, directory) = directory();
        seed(&directory, 12, EVENT_A).await;

        let absent = directory.list(ListQuery::default()).await.unwrap();
        assert_eq!(absent.len(), DEFAULT_LIST_LIMIT);

        let zero = directory
            .list(ListQuery {
                limit: Some(0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(zero.len(), DEFAULT_LIST_LIMIT);

        let explicit = directory
            .list(ListQuery {
                limit: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(explicit.len(), 3);
    }

    #[tokio::test]
    async fn list_filters_by_event_id() {
        let (_, directory) = directory();
        seed(&directory, 2, EVENT_A).await;
        seed(&directory, 3, EVENT_B).await;

        let hits = directory
            .list(ListQuery {
                event_id: Some(EVENT_B.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 3);
        let expected = EventId::parse(EVENT_B).unwrap();
        assert!(hits.iter().all(|t| t.event_id == expected));
    }

    #[tokio::test]
    async fn list_with_no_matches_is_empty_not_an_error() {
        let (_, directory) = directory();
        seed(&directory, 2, EVENT_A).await;

        let hits = directory
            .list(ListQuery {
                email: Some("nobody@b.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn list_rejects_a_malformed_event_filter() {
        let (_, directory) = directory();
        let err = directory
            .list(ListQuery {
                event_id: Some("not-a-uuid".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TicketError::Validation { field: "event_id", .. }));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_, directory) = directory();
        let id = TicketId::from_uuid(uuid::Uuid::new_v4());
        let err = directory.get(id).await.unwrap_err();
        assert!(matches!(err, TicketError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_validates_its_input() {
        let (_, directory) = directory();

        let err = directory
            .create(CreateTicket {
                email: "a@b.com".to_string(),
                event_id: "nope".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TicketError::Validation { field: "event_id", .. }));

        let err = directory
            .create(CreateTicket {
                email: String::new(),
                event_id: EVENT_A.to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TicketError::Validation { field: "email", .. }));
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let (_, directory) = directory();
        let created = directory
            .create(CreateTicket {
                email: "a@b.com".to_string(),
                event_id: EVENT_A.to_string(),
            })
            .await
            .unwrap();

        let updated = directory
            .update(
                created.id,
                TicketUpdate {
                    email: Some("new@b.com".to_string()),
                    event_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "new@b.com");
        assert_eq!(updated.event_id, created.event_id);

        let err = directory
            .update(
                created.id,
                TicketUpdate {
                    email: None,
                    event_id: Some("broken".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TicketError::Validation { field: "event_id", .. }));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_, directory) = directory();
        let id = TicketId::from_uuid(uuid::Uuid::new_v4());
        let err = directory.update(id, TicketUpdate::default()).await.unwrap_err();
        assert!(matches!(err, TicketError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let (_, directory) = directory();
        let created = directory
            .create(CreateTicket {
                email: "a@b.com".to_string(),
                event_id: EVENT_A.to_string(),
            })
            .await
            .unwrap();

        directory.delete(created.id).await.unwrap();
        let err = directory.delete(created.id).await.unwrap_err();
        assert!(matches!(err, TicketError::NotFound(_)));
    }
}
