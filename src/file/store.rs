//! ファイルストア
//!
//! 作成・読み込み・追記・置換更新・削除の5操作と存在確認を提供する。
//! すべての失敗は `AppError` として返し、呼び出し元で通知する。

use crate::error::{AppError, IoOperation, Result};
use crate::file::io::{append_with_separator, FileSaver};
use crate::file::path::resolve_against;
use std::fs;
use std::path::{Path, PathBuf};

/// 置換更新の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateReport {
    /// 置換した箇所の数
    pub replacements: usize,
}

/// テキストファイル操作の窓口
#[derive(Debug, Clone)]
pub struct FileStore {
    /// 相対パスの基準ディレクトリ
    base_dir: PathBuf,
    saver_atomic: bool,
}

impl FileStore {
    /// 基準ディレクトリを指定して作成
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            saver_atomic: true,
        }
    }

    /// カレントディレクトリ基準のストア
    pub fn in_current_dir() -> Self {
        Self::new(".")
    }

    /// 上書き時に一時ファイルを経由しない
    pub fn with_direct_writes(mut self) -> Self {
        self.saver_atomic = false;
        self
    }

    /// 名前を実パスへ解決
    pub fn resolve<P: AsRef<Path>>(&self, name: P) -> PathBuf {
        resolve_against(&self.base_dir, name.as_ref())
    }

    fn saver(&self) -> FileSaver {
        if self.saver_atomic {
            FileSaver::new()
        } else {
            FileSaver::direct()
        }
    }

    /// 通常ファイルが存在するか
    pub fn exists<P: AsRef<Path>>(&self, name: P) -> bool {
        self.resolve(name).is_file()
    }

    /// 内容で上書き（または新規作成）
    pub fn create<P: AsRef<Path>>(&self, name: P, content: &str) -> Result<()> {
        let path = self.resolve(name);
        self.saver()
            .save_file(&path, content)
            .map_err(|e| AppError::io(IoOperation::Create, e))?;
        log::info!("created {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// 全文を読み込み
    pub fn read<P: AsRef<Path>>(&self, name: P) -> Result<String> {
        let name = name.as_ref();
        if !self.exists(name) {
            return Err(AppError::not_found(name));
        }

        let path = self.resolve(name);
        let content =
            fs::read_to_string(&path).map_err(|e| AppError::io(IoOperation::Read, e))?;
        log::debug!("read {} ({} bytes)", path.display(), content.len());
        Ok(content)
    }

    /// 追記（ファイルが無ければ作成）
    pub fn append<P: AsRef<Path>>(&self, name: P, content: &str) -> Result<()> {
        let path = self.resolve(name);
        append_with_separator(&path, content)
            .map_err(|e| AppError::io(IoOperation::Append, e))?;
        log::info!("appended {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    /// 検索文字列のすべての出現を置換して上書き
    ///
    /// 検索文字列が含まれない場合はファイルに触れずに `SearchTextAbsent` を返す。
    pub fn update<P: AsRef<Path>>(
        &self,
        name: P,
        search: &str,
        replacement: &str,
    ) -> Result<UpdateReport> {
        let name = name.as_ref();
        let content = self.read(name)?;

        let replacements = if search.is_empty() { 0 } else { content.matches(search).count() };
        if replacements == 0 {
            log::warn!("'{}' not found in {}", search, name.display());
            return Err(AppError::SearchTextAbsent {
                search: search.to_string(),
            });
        }

        let updated = content.replace(search, replacement);
        let path = self.resolve(name);
        self.saver()
            .save_file(&path, &updated)
            .map_err(|e| AppError::io(IoOperation::Update, e))?;

        log::info!("updated {} ({} replacements)", path.display(), replacements);
        Ok(UpdateReport { replacements })
    }

    /// ファイルを削除
    pub fn delete<P: AsRef<Path>>(&self, name: P) -> Result<()> {
        let name = name.as_ref();
        if !self.exists(name) {
            return Err(AppError::not_found(name));
        }

        let path = self.resolve(name);
        fs::remove_file(&path).map_err(|e| AppError::io(IoOperation::Delete, e))?;
        log::info!("deleted {}", path.display());
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::in_current_dir()
    }
}
