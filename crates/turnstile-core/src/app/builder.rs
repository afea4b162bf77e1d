//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 必須ポート（TicketStore, ArtifactStore）が欠けていれば build() が
//!   BuildError を返す（最初の呼び出しで panic しない）
//! - NotificationQueue はオプショナル
//! - Clock / IdGenerator は本番用デフォルトを補完

use std::sync::Arc;
use thiserror::Error;

use crate::ports::{
    ArtifactStore, Clock, IdGenerator, NotificationQueue, RandomIdGenerator, SystemClock,
    TicketStore,
};

use super::qr_service::QrService;
use super::reservation::ReservationWorkflow;
use super::tickets::TicketDirectory;

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("missing required port: {0}. Provide it before calling build().")]
    MissingPort(&'static str),
}

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .ticket_store(InMemoryTicketStore::new())
///     .artifact_store(InMemoryArtifactStore::new())
///     .build()?;
/// let receipt = app.reservations.reserve(request).await?;
/// ```
#[derive(Default)]
pub struct AppBuilder {
    tickets: Option<Arc<dyn TicketStore>>,
    artifacts: Option<Arc<dyn ArtifactStore>>,
    queue: Option<Arc<dyn NotificationQueue>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket_store(mut self, store: impl TicketStore + 'static) -> Self {
        self.tickets = Some(Arc::new(store));
        self
    }

    pub fn artifact_store(mut self, store: impl ArtifactStore + 'static) -> Self {
        self.artifacts = Some(Arc::new(store));
        self
    }

    pub fn notification_queue(mut self, queue: impl NotificationQueue + 'static) -> Self {
        self.queue = Some(Arc::new(queue));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    /// Validate the wiring and produce the application surfaces.
    pub fn build(self) -> Result<App, BuildError> {
        let tickets = self
            .tickets
            .ok_or(BuildError::MissingPort("ticket_store"))?;
        let artifacts = self
            .artifacts
            .ok_or(BuildError::MissingPort("artifact_store"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self.ids.unwrap_or_else(|| Arc::new(RandomIdGenerator));

        Ok(App {
            reservations: ReservationWorkflow::new(
                Arc::clone(&tickets),
                Arc::clone(&artifacts),
                self.queue,
                Arc::clone(&clock),
                Arc::clone(&ids),
            ),
            tickets: TicketDirectory::new(Arc::clone(&tickets), clock, ids),
            qr: QrService::new(tickets, artifacts),
        })
    }
}

/// App はアプリケーションのサーフェス一式
///
/// ルーティング層（HTTP など、このクレートの外）はここへディスパッチします。
pub struct App {
    pub reservations: ReservationWorkflow,
    pub tickets: TicketDirectory,
    pub qr: QrService,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}
