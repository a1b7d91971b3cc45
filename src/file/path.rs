//! ファイル名処理ユーティリティ
//!
//! 入力欄の文字列からファイル名を導出し、既定の拡張子を付与する

use crate::error::{Result, ValidationError};
use std::path::{Path, PathBuf};

/// 既定の拡張子
pub const DEFAULT_EXTENSION: &str = ".txt";

/// 入力欄の文字列を検証してファイル名に正規化
///
/// 前後の空白を除去し、空なら検証エラー。`.txt` で終わらない場合のみ付与する。
///
/// # Examples
/// ```
/// use crudpad::file::normalize_filename;
///
/// assert_eq!(normalize_filename(" notes ").unwrap(), "notes.txt");
/// assert_eq!(normalize_filename("notes.txt").unwrap(), "notes.txt");
/// assert!(normalize_filename("   ").is_err());
/// ```
pub fn normalize_filename(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyFilename.into());
    }

    if trimmed.ends_with(DEFAULT_EXTENSION) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}{}", trimmed, DEFAULT_EXTENSION))
    }
}

/// 先頭の `~` と、値を持つ `$VAR` / `${VAR}` を展開
///
/// 未定義の変数は文字どおり残すため、`$` を含む名前もそのまま使える。
pub fn expand_name(raw: &str) -> String {
    let home = || dirs::home_dir().map(|dir| dir.to_string_lossy().into_owned());
    shellexpand::full_with_context_no_errors(raw, home, |var| std::env::var(var).ok()).into_owned()
}

/// 入力欄の文字列を展開してから正規化
pub fn derive_filename(raw: &str) -> Result<String> {
    normalize_filename(&expand_name(raw.trim()))
}

/// 基準ディレクトリに対してパスを解決（絶対パスはそのまま）
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
