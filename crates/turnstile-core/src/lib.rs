//! turnstile-core
//!
//! Core building blocks for the Turnstile ticket reservation service.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, ticket, status, errors, events）
//! - **qr**: 券面 QR のコーデック（payload 文字列 + PNG ラスタ）
//! - **ports**: 抽象化レイヤー（TicketStore, ArtifactStore, NotificationQueue, など）
//! - **impls**: 実装（InMemoryTicketStore など開発用）
//! - **app**: アプリケーションロジック（builder, 予約ワークフロー, 照会/管理, QR 操作）
//!
//! # 設計原則
//! - TicketStore が ticket レコードの正本（source of truth）
//! - ArtifactStore は派生物（QR 画像, テキスト券面）の保存先
//! - NotificationQueue はオプショナル（無くても予約は成立する）

pub mod domain;
pub mod qr;
pub mod ports;
pub mod impls;
pub mod app;
