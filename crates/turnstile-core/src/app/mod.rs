//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: アプリケーションの構築とワイヤリング
//! - **ReservationWorkflow**: 予約（検証 → QR → アーティファクト → 永続化 → 昇格）
//! - **TicketDirectory**: 照会/管理サーフェス（list/get/create/update/delete）
//! - **QrService**: QR 操作（再生成・取得・検証）

pub mod builder;
pub mod reservation;
pub mod tickets;
pub mod qr_service;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::reservation::{ReservationReceipt, ReservationRequest, ReservationWorkflow};
pub use self::qr_service::{QrService, QrVerdict};
pub use self::tickets::{CreateTicket, ListQuery, TicketDirectory, TicketUpdate, DEFAULT_LIST_LIMIT};

use crate::domain::{Step, TicketError};
use crate::ports::StoreError;

/// Map a store failure into the app taxonomy, attaching the step that ran.
pub(crate) fn store_error(step: Step, err: StoreError) -> TicketError {
    match err {
        StoreError::NotFound(id) => TicketError::NotFound(id),
        StoreError::Conflict(id) => TicketError::Conflict(id),
        StoreError::Decode(e) => TicketError::Decode(e),
        err @ StoreError::Unavailable(_) => TicketError::collaborator(step, err),
    }
}
