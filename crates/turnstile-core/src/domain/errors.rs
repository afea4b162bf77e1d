//! Error taxonomy.
//!
//! # 分類
//! - `Validation`: 不正・欠落した入力（400 相当、期待フォーマットのヒント付き）
//! - `NotFound`: 参照された ticket が存在しない（404 相当）
//! - `Encoding` / `Format`: QR のレンダリング・ペイロード検証の失敗
//! - `Collaborator`: 外部コラボレータ呼び出しの失敗（失敗したステップ名付き）
//! - `Conflict`: レコードが既に存在する（レコードストア固有、稀）
//! - `Decode`: 保存済みレコードのスキーマ検証失敗
//!
//! Validation errors are always raised before any side effect; collaborator
//! errors abort the remaining steps without undoing earlier ones.

use std::fmt;
use thiserror::Error;

use crate::qr::{FormatError, RenderError};

/// Workflow/operation step names attached to collaborator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    QrRender,
    QrUpload,
    TicketFileUpload,
    Persist,
    Promote,
    Notify,
    Fetch,
    Scan,
    Delete,
    ArtifactFetch,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::QrRender => "qr_render",
            Step::QrUpload => "qr_upload",
            Step::TicketFileUpload => "ticket_file_upload",
            Step::Persist => "persist",
            Step::Promote => "promote",
            Step::Notify => "notify",
            Step::Fetch => "fetch",
            Step::Scan => "scan",
            Step::Delete => "delete",
            Step::ArtifactFetch => "artifact_fetch",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema-validated record decoding failure.
///
/// Decoding stops at the first missing or malformed field and names it,
/// instead of silently leaving fields at a zero value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("malformed field {field}: {reason}")]
    Malformed { field: &'static str, reason: String },
}

/// Top-level error for the reservation core.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("validation failed for {field}: {message} (expected: {expected})")]
    Validation {
        field: &'static str,
        message: String,
        /// Machine-readable hint describing the expected shape.
        expected: &'static str,
    },

    #[error("ticket not found: {0}")]
    NotFound(String),

    #[error("qr payload rejected: {0}")]
    Format(#[from] FormatError),

    #[error("qr encoding failed: {0}")]
    Encoding(#[from] RenderError),

    #[error("step {step} failed: {source}")]
    Collaborator {
        step: Step,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("ticket already exists: {0}")]
    Conflict(String),

    #[error("stored ticket record rejected: {0}")]
    Decode(#[from] DecodeError),
}

impl TicketError {
    pub fn validation(
        field: &'static str,
        message: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        TicketError::Validation {
            field,
            message: message.into(),
            expected,
        }
    }

    pub fn collaborator(
        step: Step,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TicketError::Collaborator {
            step,
            source: Box::new(source),
        }
    }

    /// Which step produced this error, when one was recorded.
    pub fn step(&self) -> Option<Step> {
        match self {
            TicketError::Collaborator { step, .. } => Some(*step),
            TicketError::Encoding(_) => Some(Step::QrRender),
            _ => None,
        }
    }
}
