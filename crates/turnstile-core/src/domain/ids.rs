//! Domain identifiers (strongly-typed IDs).
//!
//! # UUID ベースの ID + ジェネリック実装
//! 予約 API の契約は UUID 構文を要求するため、ID は UUID v4 を使用します。
//! Phantom type パターンを使ってコードの重複を排除しています。
//!
//! ## Phantom Type パターン
//! `Id<T>` というジェネリック型で共通実装を提供しつつ、
//! `T` は実行時には使わない（PhantomData）マーカー型として、
//! コンパイル時の型安全性を提供します。
//! TicketId と EventId は混同できません。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {}

/// ジェネリック ID 型
///
/// `T` は PhantomData で、実行時にはメモリを消費しませんが、
/// コンパイル時に型安全性を提供します。
///
/// Serialization is transparent: an `Id<T>` is a plain hyphenated UUID
/// string on the wire, so record rows and API payloads stay readable.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// UUID から Id を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// 文字列をパースして Id を作成（UUID 構文のみ受け付ける）
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }

    /// 内部の UUID を取得
    pub fn as_uuid(&self) -> Uuid {
        self.uuid
    }

    /// Short form: the first 8 characters of the hyphenated representation.
    /// Ticket codes are derived from this slice.
    pub fn short(&self) -> String {
        let mut s = self.uuid.to_string();
        s.truncate(8);
        s
    }
}

impl<T: IdMarker> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Artifact keys and record rows use the bare hyphenated form.
        self.uuid.fmt(f)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Ticket のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ticket {}

impl IdMarker for Ticket {}

/// Event のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Event {}

impl IdMarker for Event {}

/// User のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum User {}

impl IdMarker for User {}

// ========================================
// Type Alias（使いやすさのため）
// ========================================

/// Identifier of a Ticket (the reservation record).
pub type TicketId = Id<Ticket>;

/// Identifier of an Event (opaque foreign reference).
pub type EventId = Id<Event>;

/// Identifier of a User (opaque foreign reference).
pub type UserId = Id<User>;
