//! Reservation workflow.
//!
//! 入力検証 → 発番 → QR レンダリング → ステージング → 永続化 → 昇格、の
//! 固定順で実行します。検証エラーは副作用の前に必ず返り、各ステップの失敗は
//! 残りのステップを中断してステップ名付きで報告されます。
//!
//! # Two-phase commit
//! アーティファクトはまず `staging/` 配下の一時キーに置き、レコードの永続化が
//! 成功してから最終キーへ昇格します。永続化前に失敗しても最終キーと正本は
//! 汚れません。昇格に失敗した場合、レコードは確定済みで、アーティファクトは
//! チケットから再生成できます。

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{
    EventId, ReservationMessage, Step, Ticket, TicketError, TicketId, UserId,
};
use crate::ports::artifact_store::{
    qr_key, staged, ticket_text_key, PNG_CONTENT_TYPE, TEXT_CONTENT_TYPE,
};
use crate::ports::{ArtifactStore, Clock, IdGenerator, NotificationQueue, TicketStore};
use crate::qr::{render_png, QrPayload, RenderOptions};

use super::store_error;

pub(crate) const UUID_HINT: &str =
    "a UUID such as 550e8400-e29b-41d4-a716-446655440003";
pub(crate) const EMAIL_HINT: &str = "an address containing '@', such as user@example.com";

pub(crate) const DEFAULT_GUEST_NAME: &str = "Guest";

/// Inbound reservation request, as the routing layer would deserialize it.
///
/// `email` and `user_email` are aliases; either satisfies the email
/// requirement, with `email` taking precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationRequest {
    pub event_id: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub user_email: Option<String>,
    pub name: Option<String>,
}

/// Success payload: the ticket id, both artifact keys, and a snapshot of the
/// persisted ticket.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationReceipt {
    pub ticket_id: TicketId,
    pub ticket_file: String,
    pub qr_code: String,
    pub ticket: Ticket,
}

struct ValidatedReservation {
    event_id: EventId,
    user_id: UserId,
    email: String,
    name: String,
}

fn validate(
    req: &ReservationRequest,
    ids: &dyn IdGenerator,
) -> Result<ValidatedReservation, TicketError> {
    let event_id = EventId::parse(&req.event_id).map_err(|_| {
        TicketError::validation(
            "event_id",
            format!("'{}' is not a valid UUID", req.event_id),
            UUID_HINT,
        )
    })?;

    let user_id = match req.user_id.as_deref() {
        Some(raw) => UserId::parse(raw).map_err(|_| {
            TicketError::validation(
                "user_id",
                format!("'{raw}' is not a valid UUID"),
                UUID_HINT,
            )
        })?,
        None => ids.user_id(),
    };

    let email = req
        .email
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(req.user_email.as_deref().filter(|s| !s.is_empty()))
        .ok_or_else(|| {
            TicketError::validation(
                "email",
                "email required: provide 'email' or 'user_email'",
                EMAIL_HINT,
            )
        })?;
    if !email.contains('@') {
        return Err(TicketError::validation(
            "email",
            format!("'{email}' is not a valid address"),
            EMAIL_HINT,
        ));
    }

    let name = req
        .name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_GUEST_NAME);

    Ok(ValidatedReservation {
        event_id,
        user_id,
        email: email.to_string(),
        name: name.to_string(),
    })
}

/// Plain-text ticket summary stored next to the QR image.
fn ticket_summary(ticket: &Ticket, qr_object_key: &str) -> String {
    format!(
        "TICKET INFORMATION\n\
         ==================\n\
         Ticket ID: {}\n\
         Event ID: {}\n\
         User: {} ({})\n\
         Ticket Code: {}\n\
         Status: {}\n\
         Price: ${:.2}\n\
         Reserved At: {}\n\
         QR Code: {}\n",
        ticket.id,
        ticket.event_id,
        ticket.name,
        ticket.email,
        ticket.ticket_code,
        ticket.status,
        ticket.price,
        ticket.reserved_at.format("%Y-%m-%d %H:%M:%S"),
        qr_object_key,
    )
}

/// ReservationWorkflow は予約リクエストを永続化された Ticket に変換
pub struct ReservationWorkflow {
    tickets: Arc<dyn TicketStore>,
    artifacts: Arc<dyn ArtifactStore>,
    queue: Option<Arc<dyn NotificationQueue>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ReservationWorkflow {
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        artifacts: Arc<dyn ArtifactStore>,
        queue: Option<Arc<dyn NotificationQueue>>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            tickets,
            artifacts,
            queue,
            clock,
            ids,
        }
    }

    /// Run one reservation to completion.
    ///
    /// No retries anywhere: a single failed call terminates the attempt.
    pub async fn reserve(
        &self,
        req: ReservationRequest,
    ) -> Result<ReservationReceipt, TicketError> {
        let input = validate(&req, self.ids.as_ref())?;

        let now = self.clock.now();
        let ticket = Ticket::new(
            self.ids.ticket_id(),
            input.event_id,
            input.user_id,
            input.email,
            input.name,
            now,
        );

        let qr_object_key = qr_key(ticket.id);
        let text_object_key = ticket_text_key(ticket.id);

        // Step: qr_render
        let payload = QrPayload::for_ticket(&ticket);
        let png = render_png(&payload.encode_canonical(), RenderOptions::default())?;

        // Step: qr_upload (staged)
        let staged_qr = staged(&qr_object_key);
        self.artifacts
            .put(&staged_qr, png.clone(), PNG_CONTENT_TYPE)
            .await
            .map_err(|e| TicketError::collaborator(Step::QrUpload, e))?;

        // Step: ticket_file_upload (staged)
        let summary = ticket_summary(&ticket, &qr_object_key);
        let staged_text = staged(&text_object_key);
        self.artifacts
            .put(&staged_text, summary.clone().into_bytes(), TEXT_CONTENT_TYPE)
            .await
            .map_err(|e| TicketError::collaborator(Step::TicketFileUpload, e))?;

        // Step: persist. The record commits the reservation; everything
        // before this point only touched staging keys.
        self.tickets
            .put(&ticket)
            .await
            .map_err(|e| store_error(Step::Persist, e))?;

        // Step: promote. After a failure here the ticket is committed and
        // the artifacts can be regenerated from it.
        self.artifacts
            .put(&qr_object_key, png, PNG_CONTENT_TYPE)
            .await
            .map_err(|e| TicketError::collaborator(Step::Promote, e))?;
        self.artifacts
            .put(&text_object_key, summary.into_bytes(), TEXT_CONTENT_TYPE)
            .await
            .map_err(|e| TicketError::collaborator(Step::Promote, e))?;
        self.artifacts
            .delete(&staged_qr)
            .await
            .map_err(|e| TicketError::collaborator(Step::Promote, e))?;
        self.artifacts
            .delete(&staged_text)
            .await
            .map_err(|e| TicketError::collaborator(Step::Promote, e))?;

        // Step: notify. Best effort after commit; a queue failure must not
        // fail a reservation that already persisted.
        if let Some(queue) = &self.queue {
            if let Err(e) = queue.send(ReservationMessage::for_ticket(&ticket)).await {
                tracing::warn!(ticket_id = %ticket.id, error = %e, "reservation notification failed");
            }
        }

        tracing::info!(
            ticket_id = %ticket.id,
            event_id = %ticket.event_id,
            "ticket reserved"
        );

        Ok(ReservationReceipt {
            ticket_id: ticket.id,
            ticket_file: text_object_key,
            qr_code: qr_object_key,
            ticket,
        })
    }
}
