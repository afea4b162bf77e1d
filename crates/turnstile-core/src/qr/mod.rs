//! QR codec - 券面の証明文字列とラスタ画像
//!
//! # 二層構造
//! - **payload**: パイプ区切りのテキスト形式（生成・検証・寛容パース）
//! - **render**: payload 文字列を PNG の QR ラスタへ変換
//!
//! payload は常に Ticket のフィールドから再生成でき、独立に保存されません。

pub mod payload;
pub mod render;

pub use self::payload::{parse_fields, validate, FormatError, PayloadFormat, QrPayload};
pub use self::render::{render_png, ErrorCorrection, RenderError, RenderOptions};
