//! IdGenerator port - ID 生成の抽象化
//!
//! 予約の契約は UUID 構文を要求するため、ID は UUID v4 を生成します。
//! テスト容易性のために trait として抽象化しています。
//!
//! # Thread Safety
//! - `Send + Sync` を要求（複数タスクから使える）

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::{Builder, Uuid};

use crate::domain::{TicketId, UserId};

/// IdGenerator は衝突可能性が無視できる ID を生成
pub trait IdGenerator: Send + Sync {
    /// Ticket ID を生成
    fn ticket_id(&self) -> TicketId;

    /// User ID を生成（リクエストに user_id が無いとき）
    fn user_id(&self) -> UserId;
}

/// RandomIdGenerator は UUID v4 ベースの ID 生成器（本番用）
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    fn random_uuid() -> Uuid {
        // Builder sets the v4 version and variant bits on the random bytes.
        Builder::from_random_bytes(rand::random()).into_uuid()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn ticket_id(&self) -> TicketId {
        TicketId::from_uuid(Self::random_uuid())
    }

    fn user_id(&self) -> UserId {
        UserId::from_uuid(Self::random_uuid())
    }
}

/// SequentialIdGenerator は決定的な ID を返す（テスト用）
///
/// ticket と user で別のカウンタを持つので、生成順が安定します。
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next_ticket: AtomicU64,
    next_user: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn ticket_id(&self) -> TicketId {
        let n = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        TicketId::from_uuid(Uuid::from_u128(0x1000_0000_0000_0000_0000_0000_0000_0000 + n as u128))
    }

    fn user_id(&self) -> UserId {
        let n = self.next_user.fetch_add(1, Ordering::Relaxed);
        UserId::from_uuid(Uuid::from_u128(0x2000_0000_0000_0000_0000_0000_0000_0000 + n as u128))
    }
}
