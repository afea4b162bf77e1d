//! QR operations over stored tickets.
//!
//! 生成系（その場レンダリング・再アップロード）と検証系（構造検証 +
//! 正本との突き合わせ）を提供します。検証は二段階で、構造エラーと
//! 照合エラーを区別して報告します。

use std::sync::Arc;

use crate::domain::{Step, Ticket, TicketError, TicketId};
use crate::ports::artifact_store::{qr_key, PNG_CONTENT_TYPE};
use crate::ports::{ArtifactError, ArtifactStore, TicketStore};
use crate::qr::{self, render_png, FormatError, QrPayload, RenderOptions};

use super::store_error;

/// Outcome of a QR validation request.
///
/// Structural failures and cross-check failures are distinct cases: a
/// syntactically valid payload may still reference a ticket that does not
/// exist, or carry fields that no longer match the stored record.
#[derive(Debug)]
pub enum QrVerdict {
    /// Structure and cross-check both passed.
    Valid { ticket: Ticket },
    /// The content is not a well-formed payload.
    Malformed { reason: FormatError },
    /// Well-formed, but the referenced ticket is not stored.
    UnknownTicket { ticket_id: String },
    /// The ticket exists but its canonical re-encoding differs.
    Mismatch { ticket_id: TicketId },
}

/// QrService は QR 操作のサーフェス
pub struct QrService {
    tickets: Arc<dyn TicketStore>,
    artifacts: Arc<dyn ArtifactStore>,
}

impl QrService {
    pub fn new(tickets: Arc<dyn TicketStore>, artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self { tickets, artifacts }
    }

    /// Regenerate the canonical QR PNG from the stored ticket, on the fly.
    pub async fn ticket_qr_png(&self, id: TicketId) -> Result<Vec<u8>, TicketError> {
        let ticket = self
            .tickets
            .get(id)
            .await
            .map_err(|e| store_error(Step::Fetch, e))?;

        let payload = QrPayload::for_ticket(&ticket);
        Ok(render_png(&payload.encode_canonical(), RenderOptions::default())?)
    }

    /// Fetch the previously uploaded QR artifact.
    ///
    /// The ticket must exist; a missing artifact is reported as NotFound
    /// (the object may never have been promoted, or was cleaned up).
    pub async fn stored_qr_png(&self, id: TicketId) -> Result<Vec<u8>, TicketError> {
        self.tickets
            .get(id)
            .await
            .map_err(|e| store_error(Step::Fetch, e))?;

        let key = qr_key(id);
        self.artifacts.get(&key).await.map_err(|e| match e {
            ArtifactError::Missing(key) => TicketError::NotFound(key),
            other => TicketError::collaborator(Step::ArtifactFetch, other),
        })
    }

    /// Structural validation plus the stored-ticket cross-check.
    pub async fn validate(&self, content: &str) -> Result<QrVerdict, TicketError> {
        if let Err(reason) = qr::validate(content) {
            return Ok(QrVerdict::Malformed { reason });
        }

        let fields = qr::parse_fields(content);
        // Presence passed validation, but the lenient parser may still have
        // dropped the segment (for example "XTICKET:..." satisfies the
        // substring check). Treat that as a structural failure.
        let Some(raw_id) = fields.get(qr::payload::TAG_TICKET) else {
            return Ok(QrVerdict::Malformed {
                reason: FormatError::MissingTag(qr::payload::TAG_TICKET),
            });
        };

        let Ok(id) = TicketId::parse(raw_id) else {
            return Ok(QrVerdict::UnknownTicket {
                ticket_id: raw_id.clone(),
            });
        };

        let ticket = match self.tickets.get(id).await {
            Ok(ticket) => ticket,
            Err(crate::ports::StoreError::NotFound(_)) => {
                return Ok(QrVerdict::UnknownTicket {
                    ticket_id: raw_id.clone(),
                });
            }
            Err(e) => return Err(store_error(Step::Fetch, e)),
        };

        let expected = QrPayload::for_ticket(&ticket).encode_canonical();
        if expected == content {
            Ok(QrVerdict::Valid { ticket })
        } else {
            Ok(QrVerdict::Mismatch { ticket_id: id })
        }
    }

    /// Re-render and re-upload the QR artifact at its final key.
    ///
    /// Returns the object key. Used to repair a ticket whose artifacts were
    /// lost (for example after a failed promote).
    pub async fn regenerate(&self, id: TicketId) -> Result<String, TicketError> {
        let png = self.ticket_qr_png(id).await?;
        let key = qr_key(id);
        self.artifacts
            .put(&key, png, PNG_CONTENT_TYPE)
            .await
            .map_err(|e| TicketError::collaborator(Step::QrUpload, e))?;

        tracing::info!(ticket_id = %id, key = %key, "qr artifact regenerated");
        Ok(key)
    }
}
