//! 入力処理
//!
//! キーバインドと入力欄の編集状態

pub mod field;
pub mod keybinding;

pub use field::{FieldKind, TextField};
pub use keybinding::{Action, Direction, Key, KeyCode, KeyMap, KeyModifiers, Scroll};
