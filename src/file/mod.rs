//! ファイル操作モジュール
//!
//! - 相対パスは基準ディレクトリ（既定はカレントディレクトリ）に対して解決
//! - 上書きは一時ファイル経由のアトミック保存
//! - ロックなし（同時編集は後勝ち）

pub mod io;
pub mod path;
pub mod store;

pub use io::{append_with_separator, FileSaver};
pub use path::{derive_filename, expand_name, normalize_filename, DEFAULT_EXTENSION};
pub use store::{FileStore, UpdateReport};
