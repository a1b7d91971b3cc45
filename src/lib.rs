//! crudpad - two-pane terminal editor for plain text files
//!
//! ファイルの作成・読み込み・追記・置換更新・削除を行う

// コアモジュール
pub mod error;
pub mod logging;
pub mod notify;
pub mod options;

// データ層
pub mod file;

// ロジック層
pub mod app;
pub mod controller;
pub mod display;
pub mod input;

// 表示層
pub mod frontend;
pub mod ui;

// 公開API
pub use app::App;
pub use controller::{AppState, Controller, Outcome};
pub use error::{AppError, ErrorKind, Result};
pub use file::FileStore;
pub use frontend::TuiApplication;
pub use notify::{Notification, NotificationQueue, Notifier};
pub use options::AppOptions;
