//! ファイルI/O操作
//!
//! UTF-8テキストファイルの上書き保存（一時ファイル経由）と追記

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// ファイル操作用デバッグマクロ
macro_rules! file_debug_log {
    ($($arg:tt)*) => {
        log::debug!(target: "crudpad::file", $($arg)*)
    };
}

/// 上書き保存処理
pub struct FileSaver {
    atomic_save: bool,
}

impl FileSaver {
    pub fn new() -> Self {
        Self { atomic_save: true }
    }

    /// 一時ファイルを使わず直接書き込む保存器
    pub fn direct() -> Self {
        Self { atomic_save: false }
    }

    /// 内容をそのまま保存（改行コードの変換はしない）
    pub fn save_file(&self, path: &Path, content: &str) -> io::Result<()> {
        file_debug_log!("save_file: {} ({} bytes)", path.display(), content.len());

        let result = if self.atomic_save {
            self.atomic_save_impl(path, content)
        } else {
            fs::write(path, content.as_bytes())
        };

        if let Err(e) = &result {
            file_debug_log!("save operation failed: {}", e);
        }
        result
    }

    /// アトミック保存（一時ファイル経由）
    ///
    /// シンボリックリンクはリンク先を置き換え、既存ファイルの権限を引き継ぐ。
    /// 読み取り専用のファイルは上書きしない。
    fn atomic_save_impl(&self, path: &Path, content: &str) -> io::Result<()> {
        let target = if path.is_symlink() {
            fs::canonicalize(path)?
        } else {
            path.to_path_buf()
        };
        let existing = fs::metadata(&target).ok().filter(|meta| meta.is_file());
        if let Some(meta) = &existing {
            if meta.permissions().readonly() {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("{} is read-only", target.display()),
                ));
            }
        }

        let temp_path = temp_path_for(&target)?;
        file_debug_log!("atomic_save: temp_path: {}", temp_path.display());

        let result = fs::write(&temp_path, content.as_bytes())
            .and_then(|()| match &existing {
                Some(meta) => fs::set_permissions(&temp_path, meta.permissions()),
                None => Ok(()),
            })
            .and_then(|()| fs::rename(&temp_path, &target));

        if result.is_err() {
            // 書き込み途中でも残さない
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl Default for FileSaver {
    fn default() -> Self {
        Self::new()
    }
}

/// 追記（ファイルが無ければ作成）
///
/// 既存内容が空でなく、追記内容も空でない場合のみ改行で区切る
pub fn append_with_separator(path: &Path, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let existing_len = file.metadata()?.len();
    file_debug_log!("append: {} (existing {} bytes)", path.display(), existing_len);

    if existing_len > 0 && !content.is_empty() {
        file.write_all(b"\n")?;
    }
    file.write_all(content.as_bytes())?;
    file.flush()
}

/// 同じディレクトリ内に一意な一時ファイル名を生成
pub(crate) fn temp_path_for(original: &Path) -> io::Result<PathBuf> {
    let filename = original.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid path: {}", original.display()),
        )
    })?;
    let parent = original.parent().unwrap_or_else(|| Path::new(""));

    let temp_name = format!(".{}_{}.tmp", filename.to_string_lossy(), std::process::id());
    Ok(parent.join(temp_name))
}
