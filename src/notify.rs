//! 通知インターフェース
//!
//! 操作結果をユーザーへ伝える出口。TUI はモーダル表示、テストは記録用キューを使う。

use crate::error::{AppError, ErrorKind};
use std::collections::VecDeque;

/// 通知レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// 見出し用の既定タイトル
    pub fn default_title(self) -> &'static str {
        match self {
            NoticeLevel::Info => "Success",
            NoticeLevel::Warning => "Update Warning",
            NoticeLevel::Error => "File Error",
        }
    }
}

/// 通知1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
    /// 失敗時の分類（成功通知では None）
    pub kind: Option<ErrorKind>,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: NoticeLevel::Info.default_title().to_string(),
            message: message.into(),
            kind: None,
        }
    }

    /// エラーから通知を作成
    pub fn from_error(error: &AppError) -> Self {
        let kind = error.kind();
        let (level, title) = match kind {
            ErrorKind::SearchTextAbsent => (NoticeLevel::Warning, "Update Warning"),
            ErrorKind::ValidationFailure => (NoticeLevel::Error, "Error"),
            ErrorKind::NotFound | ErrorKind::IoFailure => (NoticeLevel::Error, "File Error"),
            ErrorKind::Ui | ErrorKind::Config => (NoticeLevel::Error, "Error"),
        };
        Self {
            level,
            title: title.to_string(),
            message: error.to_string(),
            kind: Some(kind),
        }
    }
}

/// 通知の受け口
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// 通知を順に溜めるキュー
///
/// TUI では先頭をモーダルとして表示し、確認キーで取り除く。
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示中（先頭）の通知
    pub fn current(&self) -> Option<&Notification> {
        self.pending.front()
    }

    /// 先頭の通知を閉じる
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    /// 最後に届いた通知
    pub fn latest(&self) -> Option<&Notification> {
        self.pending.back()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }
}

impl Notifier for NotificationQueue {
    fn notify(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_queue_dismiss_order() {
        let mut queue = NotificationQueue::new();
        queue.notify(Notification::info("first"));
        queue.notify(Notification::info("second"));

        assert_eq!(queue.current().unwrap().message, "first");
        assert_eq!(queue.latest().unwrap().message, "second");
        assert_eq!(queue.len(), 2);
        queue.dismiss();
        assert_eq!(queue.current().unwrap().message, "second");
        queue.dismiss();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_search_absent_is_warning() {
        let error = AppError::SearchTextAbsent {
            search: "x".to_string(),
        };
        let notification = Notification::from_error(&error);
        assert_eq!(notification.level, NoticeLevel::Warning);
        assert_eq!(notification.kind, Some(ErrorKind::SearchTextAbsent));
    }

    #[test]
    fn test_validation_is_error() {
        let error: AppError = ValidationError::EmptyFilename.into();
        let notification = Notification::from_error(&error);
        assert_eq!(notification.level, NoticeLevel::Error);
        assert_eq!(notification.title, "Error");
        assert_eq!(notification.message, "Filename cannot be empty.");
    }
}
