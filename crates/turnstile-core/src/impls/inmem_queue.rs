//! InMemoryNotificationQueue - 開発用キュー
//!
//! # 実装詳細
//! - `VecDeque` を `tokio::sync::Mutex` で保護
//! - `Notify` で send 時に待機中の receiver を起こす
//! - receive は deadline までの blocking pop

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

use crate::domain::ReservationMessage;
use crate::ports::{NotificationQueue, QueueError};

#[derive(Default)]
pub struct InMemoryNotificationQueue {
    messages: Arc<Mutex<VecDeque<ReservationMessage>>>,
    notify: Arc<Notify>,
}

impl InMemoryNotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationQueue for InMemoryNotificationQueue {
    async fn send(&self, message: ReservationMessage) -> Result<(), QueueError> {
        {
            let mut messages = self.messages.lock().await;
            messages.push_back(message);
        }
        // Notify outside the lock.
        self.notify.notify_one();
        Ok(())
    }

    async fn receive(
        &self,
        max: usize,
        wait: Duration,
    ) -> Result<Vec<ReservationMessage>, QueueError> {
        let deadline = Instant::now() + wait;
        loop {
            {
                let mut messages = self.messages.lock().await;
                if !messages.is_empty() {
                    let take = max.min(messages.len());
                    return Ok(messages.drain(..take).collect());
                }
            }

            if Instant::now() >= deadline {
                return Ok(Vec::new());
            }

            tokio::select! {
                _ = self.notify.notified() => {}
                _ = tokio::time::sleep_until(deadline) => return Ok(Vec::new()),
            }
        }
    }
}
