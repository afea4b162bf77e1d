//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryTicketStore**: JSON 行を保持する開発用レコードストア
//! - **InMemoryArtifactStore**: 開発用オブジェクトストレージ
//! - **InMemoryNotificationQueue**: 開発用キュー
//! - **record**: Ticket と JSON 行の相互変換（スキーマ検証付き decode）
//!
//! # 本番用実装
//! 本番用の実装は別クレートに配置します（DynamoDB/S3/SQS クライアントを
//! それぞれのポートに接続する）。

pub mod record;
pub mod inmem_ticket_store;
pub mod inmem_artifact_store;
pub mod inmem_queue;

pub use self::inmem_artifact_store::InMemoryArtifactStore;
pub use self::inmem_queue::InMemoryNotificationQueue;
pub use self::inmem_ticket_store::InMemoryTicketStore;
pub use self::record::{decode_ticket, encode_ticket};
