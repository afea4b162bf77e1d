//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システム（レコードストア, オブジェクトストレージ,
//! キューなど）へのインターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - TicketStore が ticket レコードの正本（source of truth）
//! - ArtifactStore は派生物（QR 画像, テキスト券面）の保存先
//! - NotificationQueue は best-effort の通知（正本には影響しない）

pub mod ticket_store;
pub mod artifact_store;
pub mod notification_queue;
pub mod clock;
pub mod id_generator;

pub use self::ticket_store::{StoreError, TicketFilter, TicketStore};
pub use self::artifact_store::{ArtifactError, ArtifactStore};
pub use self::notification_queue::{NotificationQueue, QueueError};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
