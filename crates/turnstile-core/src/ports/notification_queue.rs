//! NotificationQueue port - 予約イベントの配送
//!
//! # 設計原則
//! - オプショナルなコラボレータ（無くても予約は成立する）
//! - 配送保証は at-most-once にも at-least-once にも寄せない（best effort）
//! - receive は timeout 付きの blocking（ポーリング consumer 向け）

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::ReservationMessage;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue unreachable: {0}")]
    Connection(String),

    #[error("send rejected: {0}")]
    Rejected(String),
}

/// NotificationQueue は予約イベントを運ぶ
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    async fn send(&self, message: ReservationMessage) -> Result<(), QueueError>;

    /// Receive up to `max` messages, waiting at most `wait` for the first
    /// one. An empty Vec means the wait elapsed with nothing queued.
    async fn receive(&self, max: usize, wait: Duration)
        -> Result<Vec<ReservationMessage>, QueueError>;
}

// Shared handles are queues too; producers and consumers usually hold the
// same underlying queue through an Arc.
#[async_trait]
impl<T: NotificationQueue + ?Sized> NotificationQueue for std::sync::Arc<T> {
    async fn send(&self, message: ReservationMessage) -> Result<(), QueueError> {
        (**self).send(message).await
    }

    async fn receive(
        &self,
        max: usize,
        wait: Duration,
    ) -> Result<Vec<ReservationMessage>, QueueError> {
        (**self).receive(max, wait).await
    }
}
