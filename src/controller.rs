//! コントローラー
//!
//! 画面の入力欄とファイルストアをつなぐ。各操作は
//! ファイル名の導出と検証 → ストア呼び出し → 成功時は表示更新、失敗時は通知
//! の順で進む。

use crate::display::numbered_lines;
use crate::error::{AppError, ErrorKind, Result, ValidationError};
use crate::file::{derive_filename, FileStore};
use crate::input::field::TextField;
use crate::notify::{Notification, Notifier};
use std::path::PathBuf;

/// 操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// 実行が成功したか
    pub success: bool,
    /// 結果メッセージ
    pub message: Option<String>,
    /// 失敗分類
    pub kind: Option<ErrorKind>,
    /// 確認待ちになったか
    pub awaiting_confirmation: bool,
}

impl Outcome {
    /// メッセージ付き成功結果を作成
    pub fn success_with_message(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            kind: None,
            awaiting_confirmation: false,
        }
    }

    /// エラー結果を作成
    pub fn error(error: &AppError) -> Self {
        Self {
            success: false,
            message: Some(error.to_string()),
            kind: Some(error.kind()),
            awaiting_confirmation: false,
        }
    }

    /// 確認待ち結果を作成
    pub fn confirmation(prompt: String) -> Self {
        Self {
            success: true,
            message: Some(prompt),
            kind: None,
            awaiting_confirmation: true,
        }
    }

    /// キャンセル結果を作成
    pub fn cancelled() -> Self {
        Self {
            success: false,
            message: None,
            kind: None,
            awaiting_confirmation: false,
        }
    }
}

/// 操作対象のファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// 展開と正規化を済ませた名前（メッセージ表示用）
    pub name: String,
    /// `~` や環境変数を展開したパス
    pub path: PathBuf,
}

impl Target {
    /// 入力欄の文字列から導出
    pub fn derive(raw: &str) -> Result<Self> {
        let name = derive_filename(raw)?;
        let path = PathBuf::from(&name);
        Ok(Self { name, path })
    }
}

/// 画面の状態
#[derive(Debug, Clone)]
pub struct AppState {
    /// ファイル名欄
    pub filename: TextField,
    /// 書き込み元テキストエリア
    pub input: TextField,
    /// 検索文字列欄
    pub search: TextField,
    /// 置換文字列欄
    pub replace: TextField,
    /// 削除対象欄
    pub delete_target: TextField,
    /// 表示ペイン（行番号付き）
    pub display: Vec<String>,
    /// 表示ペインの先頭行
    pub display_scroll: usize,
    /// 確認待ちの削除対象
    pub pending_delete: Option<Target>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            filename: TextField::single_line(),
            input: TextField::multi_line(),
            search: TextField::single_line(),
            replace: TextField::single_line(),
            delete_target: TextField::single_line(),
            display: Vec::new(),
            display_scroll: 0,
            pending_delete: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// ファイル操作コントローラー
pub struct Controller<N: Notifier> {
    store: FileStore,
    state: AppState,
    notifier: N,
}

impl<N: Notifier> Controller<N> {
    pub fn new(store: FileStore, notifier: N) -> Self {
        Self {
            store,
            state: AppState::new(),
            notifier,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    fn active_target(&self) -> Result<Target> {
        Target::derive(self.state.filename.text())
    }

    fn succeed(&mut self, message: String) -> Outcome {
        log::info!("{}", message);
        self.notifier.notify(Notification::info(message.clone()));
        Outcome::success_with_message(message)
    }

    fn fail(&mut self, error: AppError) -> Outcome {
        match error.kind() {
            ErrorKind::SearchTextAbsent | ErrorKind::ValidationFailure => {
                log::warn!("{}", error)
            }
            _ => log::error!("{}", error),
        }
        self.notifier.notify(Notification::from_error(&error));
        Outcome::error(&error)
    }

    /// 表示ペインを再描画用に更新
    ///
    /// 読み込みに失敗した場合は表示を空にしたまま通知する。
    fn refresh_display(&mut self, target: Option<&Target>) -> Result<()> {
        self.state.display.clear();
        self.state.display_scroll = 0;
        if let Some(target) = target {
            let content = self.store.read(&target.path)?;
            self.state.display = numbered_lines(&content);
        }
        Ok(())
    }

    /// 成功通知の後に表示を更新
    fn succeed_and_refresh(&mut self, message: String, target: &Target) -> Outcome {
        let outcome = self.succeed(message);
        if let Err(e) = self.refresh_display(Some(target)) {
            self.fail(e);
        }
        outcome
    }

    /// 作成: 入力テキストをそのまま書き込む
    pub fn create(&mut self) -> Outcome {
        let target = match self.active_target() {
            Ok(target) => target,
            Err(e) => return self.fail(e),
        };
        let content = self.state.input.text().to_string();

        match self.store.create(&target.path, &content) {
            Ok(()) => {
                let message = format!("File '{}' created successfully!", target.name);
                self.succeed_and_refresh(message, &target)
            }
            Err(e) => self.fail(e),
        }
    }

    /// 読み込み: 表示ペインのみ更新
    pub fn read(&mut self) -> Outcome {
        let target = match self.active_target() {
            Ok(target) => target,
            Err(e) => return self.fail(e),
        };

        match self.refresh_display(Some(&target)) {
            Ok(()) => {
                log::debug!("displayed {} ({} lines)", target.name, self.state.display.len());
                Outcome::success_with_message(format!("File '{}' loaded.", target.name))
            }
            Err(e) => self.fail(e),
        }
    }

    /// 追記: 前後の空白を除いた入力テキストを追加
    pub fn append(&mut self) -> Outcome {
        let target = match self.active_target() {
            Ok(target) => target,
            Err(e) => return self.fail(e),
        };

        let content = self.state.input.text().trim().to_string();
        if content.is_empty() {
            return self.fail(ValidationError::EmptyAppendContent.into());
        }

        match self.store.append(&target.path, &content) {
            Ok(()) => {
                let message = format!("Content appended to '{}' successfully!", target.name);
                self.succeed_and_refresh(message, &target)
            }
            Err(e) => self.fail(e),
        }
    }

    /// 更新: 検索文字列をすべて置換
    pub fn update(&mut self) -> Outcome {
        let target = match self.active_target() {
            Ok(target) => target,
            Err(e) => return self.fail(e),
        };

        let search = self.state.search.text().to_string();
        let replacement = self.state.replace.text().to_string();
        if search.is_empty() {
            return self.fail(ValidationError::EmptySearchText.into());
        }

        match self.store.update(&target.path, &search, &replacement) {
            Ok(report) => {
                let message = format!(
                    "File '{}' was updated. ({} replaced)",
                    target.name, report.replacements
                );
                self.succeed_and_refresh(message, &target)
            }
            Err(e) => self.fail(e),
        }
    }

    /// 削除要求: 確認待ち状態にする
    pub fn request_delete(&mut self) -> Outcome {
        let target = match Target::derive(self.state.delete_target.text()) {
            Ok(target) => target,
            Err(e) => return self.fail(e),
        };

        let prompt = format!("Are you sure you want to delete '{}'?", target.name);
        self.state.pending_delete = Some(target);
        Outcome::confirmation(prompt)
    }

    /// 確認待ちの削除対象
    pub fn pending_delete(&self) -> Option<&Target> {
        self.state.pending_delete.as_ref()
    }

    /// 削除確認への応答
    ///
    /// 削除したファイルが現在のファイル名欄と一致する場合、欄と表示を空にする。
    pub fn confirm_delete(&mut self, accepted: bool) -> Outcome {
        let Some(target) = self.state.pending_delete.take() else {
            return Outcome::cancelled();
        };
        if !accepted {
            log::debug!("delete of {} cancelled", target.name);
            return Outcome::cancelled();
        }

        match self.store.delete(&target.path) {
            Ok(()) => {
                let outcome = self.succeed(format!("File '{}' was deleted.", target.name));
                let is_active = self
                    .active_target()
                    .map(|active| active.path == target.path)
                    .unwrap_or(false);
                if is_active {
                    self.state.filename.clear();
                    self.state.display.clear();
                    self.state.display_scroll = 0;
                }
                outcome
            }
            Err(e) => self.fail(e),
        }
    }

    /// 確認関数を渡して削除を一度に実行
    pub fn delete_with<F>(&mut self, confirm: F) -> Outcome
    where
        F: FnOnce(&str) -> bool,
    {
        let outcome = self.request_delete();
        if !outcome.awaiting_confirmation {
            return outcome;
        }
        let accepted = confirm(outcome.message.as_deref().unwrap_or_default());
        self.confirm_delete(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NoticeLevel, NotificationQueue};
    use tempfile::TempDir;

    fn controller() -> (TempDir, Controller<NotificationQueue>) {
        let dir = TempDir::new().unwrap();
        let controller = Controller::new(FileStore::new(dir.path()), NotificationQueue::new());
        (dir, controller)
    }

    #[test]
    fn test_create_normalizes_and_displays() {
        let (dir, mut controller) = controller();
        controller.state_mut().filename.set_text("notes");
        controller.state_mut().input.set_text("one\n\ntwo");

        let outcome = controller.create();
        assert!(outcome.success);
        assert!(dir.path().join("notes.txt").is_file());
        assert_eq!(controller.state().display, vec!["1. one", "2. two"]);
        assert_eq!(
            controller.notifier().latest().unwrap().message,
            "File 'notes.txt' created successfully!"
        );
    }

    #[test]
    fn test_empty_filename_is_rejected() {
        let (_dir, mut controller) = controller();
        let outcome = controller.read();
        assert!(!outcome.success);
        assert_eq!(outcome.kind, Some(ErrorKind::ValidationFailure));
    }

    #[test]
    fn test_update_without_search_text() {
        let (_dir, mut controller) = controller();
        controller.state_mut().filename.set_text("a");
        let outcome = controller.update();
        assert_eq!(outcome.kind, Some(ErrorKind::ValidationFailure));
        assert_eq!(
            outcome.message.as_deref(),
            Some("The 'Search text' field cannot be empty.")
        );
    }

    #[test]
    fn test_update_reports_warning_when_absent() {
        let (_dir, mut controller) = controller();
        controller.state_mut().filename.set_text("a");
        controller.state_mut().input.set_text("abc");
        controller.create();
        controller.state_mut().search.set_text("zzz");

        let outcome = controller.update();
        assert_eq!(outcome.kind, Some(ErrorKind::SearchTextAbsent));
        assert_eq!(controller.notifier().latest().unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn test_cancelled_delete_keeps_file() {
        let (dir, mut controller) = controller();
        controller.state_mut().filename.set_text("keep");
        controller.create();
        controller.state_mut().delete_target.set_text("keep");

        let outcome = controller.delete_with(|_| false);
        assert!(!outcome.success);
        assert!(dir.path().join("keep.txt").exists());
        assert!(controller.pending_delete().is_none());
    }

    #[test]
    fn test_confirm_without_request_is_noop() {
        let (_dir, mut controller) = controller();
        let outcome = controller.confirm_delete(true);
        assert_eq!(outcome, Outcome::cancelled());
        assert!(controller.notifier().is_empty());
    }

    #[test]
    fn test_dollar_in_filename_is_kept_literally() {
        let (dir, mut controller) = controller();
        controller.state_mut().filename.set_text("price$list");
        controller.state_mut().input.set_text("apple 100");

        let outcome = controller.create();
        assert!(outcome.success, "{:?}", outcome.message);
        assert!(dir.path().join("price$list.txt").is_file());
        assert_eq!(
            controller.notifier().latest().unwrap().message,
            "File 'price$list.txt' created successfully!"
        );
    }

    #[test]
    fn test_variable_expanding_to_txt_name_gets_no_second_extension() {
        let (dir, mut controller) = controller();
        std::env::set_var("CRUDPAD_CONTROLLER_NAME", "already.txt");
        controller.state_mut().filename.set_text("$CRUDPAD_CONTROLLER_NAME");
        controller.state_mut().input.set_text("x");

        controller.create();
        assert!(dir.path().join("already.txt").is_file());
        assert!(!dir.path().join("already.txt.txt").exists());
        assert_eq!(
            controller.notifier().latest().unwrap().message,
            "File 'already.txt' created successfully!"
        );
    }

    #[test]
    fn test_refresh_resets_display_scroll() {
        let (_dir, mut controller) = controller();
        controller.state_mut().filename.set_text("long");
        controller.state_mut().input.set_text("a\nb\nc");
        controller.create();
        controller.state_mut().display_scroll = 2;

        controller.read();
        assert_eq!(controller.state().display_scroll, 0);
    }
}
