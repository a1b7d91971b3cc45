//! エラーハンドリングシステム
//!
//! crudpad 全体で使用される統一されたエラー型とユーティリティを定義
//! ファイル操作の失敗はすべてその場で通知され、呼び出し元へパニックとして伝播しない

use std::path::Path;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// ファイル操作エラー
    #[error(transparent)]
    File(#[from] FileError),

    /// 入力検証エラー
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 置換対象の文字列がファイル内に存在しない
    #[error("Text '{search}' not found in the file.")]
    SearchTextAbsent { search: String },

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("File '{path}' not found.")]
    NotFound { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Failed to {operation} file: {message}")]
    Io { operation: IoOperation, message: String },
}

/// 失敗したI/O操作の種類（メッセージ生成用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Create,
    Read,
    Append,
    Update,
    Delete,
}

impl std::fmt::Display for IoOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            IoOperation::Create => "create",
            IoOperation::Read => "read",
            IoOperation::Append => "append to",
            IoOperation::Update => "update",
            IoOperation::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// 入力検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Filename cannot be empty.")]
    EmptyFilename,

    #[error("The 'Search text' field cannot be empty.")]
    EmptySearchText,

    #[error("Input text to append cannot be empty.")]
    EmptyAppendContent,
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing value for option {option}")]
    MissingValue { option: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown option: {option}")]
    UnknownOption { option: String },
}

/// ユーザーに見える失敗分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    IoFailure,
    ValidationFailure,
    SearchTextAbsent,
    Ui,
    Config,
}

impl AppError {
    /// エラー分類を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::File(FileError::NotFound { .. }) => ErrorKind::NotFound,
            AppError::File(FileError::Io { .. }) => ErrorKind::IoFailure,
            AppError::File(FileError::InvalidPath { .. }) => ErrorKind::IoFailure,
            AppError::Validation(_) => ErrorKind::ValidationFailure,
            AppError::SearchTextAbsent { .. } => ErrorKind::SearchTextAbsent,
            AppError::Ui(_) => ErrorKind::Ui,
            AppError::Config(_) => ErrorKind::Config,
        }
    }

    /// ファイル未検出エラーを作成
    pub fn not_found(path: &Path) -> Self {
        AppError::File(FileError::NotFound {
            path: path.display().to_string(),
        })
    }

    /// I/Oエラーを作成
    pub fn io(operation: IoOperation, error: std::io::Error) -> Self {
        AppError::File(FileError::Io {
            operation,
            message: error.to_string(),
        })
    }
}

/// パニックハンドラの設定
///
/// raw モードと代替スクリーンを解除してからパニック位置を出力する
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        crate::frontend::restore_terminal();

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        match panic_info.location() {
            Some(location) => log::error!(
                "PANIC at {}:{}: {}",
                location.file(),
                location.line(),
                message
            ),
            None => log::error!("PANIC: {}", message),
        }

        default_hook(panic_info);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_message_names_file() {
        let error = AppError::not_found(&PathBuf::from("notes.txt"));
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.to_string(), "File 'notes.txt' not found.");
    }

    #[test]
    fn test_io_error_carries_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = AppError::io(IoOperation::Append, io);

        assert_eq!(error.kind(), ErrorKind::IoFailure);
        assert_eq!(error.to_string(), "Failed to append to file: denied");
    }

    #[test]
    fn test_validation_kind() {
        let error: AppError = ValidationError::EmptySearchText.into();
        assert_eq!(error.kind(), ErrorKind::ValidationFailure);
        assert!(error.to_string().contains("Search text"));
    }

    #[test]
    fn test_search_text_absent_message() {
        let error = AppError::SearchTextAbsent {
            search: "needle".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::SearchTextAbsent);
        assert_eq!(error.to_string(), "Text 'needle' not found in the file.");
    }
}
