//! ArtifactStore port - オブジェクトストレージ（S3/MinIO/Local）
//!
//! ArtifactStore は ticket の派生物（QR 画像, テキスト券面）を保存します。
//!
//! # キー配置
//! - `qrcodes/<id>.png` — QR ラスタ画像
//! - `tickets/<id>.txt` — テキスト券面
//! - `staging/<key>` — 予約コミット前の一時キー（two-phase の前半）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::TicketId;

pub const QR_PREFIX: &str = "qrcodes";
pub const TICKET_PREFIX: &str = "tickets";
pub const STAGING_PREFIX: &str = "staging";

pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Final key of a ticket's QR image.
pub fn qr_key(id: TicketId) -> String {
    format!("{QR_PREFIX}/{id}.png")
}

/// Final key of a ticket's plain-text summary.
pub fn ticket_text_key(id: TicketId) -> String {
    format!("{TICKET_PREFIX}/{id}.txt")
}

/// Temporary key used while a reservation has not committed yet.
pub fn staged(key: &str) -> String {
    format!("{STAGING_PREFIX}/{key}")
}

/// Artifact failure, classified so callers can surface a useful hint:
/// the object/bucket is missing, the store is unreachable, or access
/// was denied.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("object not found: {0}")]
    Missing(String),

    #[error("artifact store unreachable: {0}")]
    Connection(String),

    #[error("access denied: {0}")]
    Denied(String),

    #[error("{0}")]
    Other(String),
}

/// ArtifactStore は名前付きバイト列を保存
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), ArtifactError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, ArtifactError>;

    /// Idempotent: deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), ArtifactError>;
}
