//! メインアプリケーション構造体
//!
//! キー入力をコントローラーへ振り分け、フォーカスとモーダル状態を管理する

use crate::controller::{AppState, Controller, Outcome};
use crate::file::FileStore;
use crate::input::field::{FieldKind, TextField};
use crate::input::keybinding::{Action, Direction, Key, KeyCode, KeyMap, Scroll};
use crate::notify::{Notification, NotificationQueue};
use crate::options::AppOptions;
use crossterm::event::{KeyEvent, KeyEventKind};

/// PageUp/PageDown 1回で動かす行数
pub const DISPLAY_PAGE: usize = 10;

/// フォーカス対象の入力欄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filename,
    Input,
    Search,
    Replace,
    DeleteTarget,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Filename,
        Focus::Input,
        Focus::Search,
        Focus::Replace,
        Focus::DeleteTarget,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// 入力欄のラベル
    pub fn label(self) -> &'static str {
        match self {
            Focus::Filename => "File name",
            Focus::Input => "Text",
            Focus::Search => "Search text",
            Focus::Replace => "Update text",
            Focus::DeleteTarget => "Delete file",
        }
    }
}

/// モーダル状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal<'a> {
    /// 削除確認
    Confirm(&'a str),
    /// 通知
    Notice(&'a Notification),
}

/// アプリケーション
pub struct App {
    controller: Controller<NotificationQueue>,
    keymap: KeyMap,
    focus: Focus,
    confirm_prompt: Option<String>,
    running: bool,
}

impl App {
    /// 新しいアプリケーションインスタンスを作成
    pub fn new(options: &AppOptions) -> Self {
        let store = FileStore::new(options.resolved_base_dir());
        let mut controller = Controller::new(store, NotificationQueue::new());
        if let Some(initial) = &options.initial_file {
            controller.state_mut().filename.set_text(initial.clone());
        }

        Self {
            controller,
            keymap: KeyMap::new(),
            focus: Focus::Filename,
            confirm_prompt: None,
            running: true,
        }
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        self.running = false;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    pub fn controller(&self) -> &Controller<NotificationQueue> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<NotificationQueue> {
        &mut self.controller
    }

    /// 現在表示すべきモーダル
    pub fn modal(&self) -> Option<Modal<'_>> {
        if let Some(prompt) = &self.confirm_prompt {
            return Some(Modal::Confirm(prompt.as_str()));
        }
        self.controller.notifier().current().map(Modal::Notice)
    }

    /// フォーカス中の入力欄
    pub fn focused_field(&self) -> &TextField {
        field_of(self.controller.state(), self.focus)
    }

    fn focused_field_mut(&mut self) -> &mut TextField {
        let state = self.controller.state_mut();
        match self.focus {
            Focus::Filename => &mut state.filename,
            Focus::Input => &mut state.input,
            Focus::Search => &mut state.search,
            Focus::Replace => &mut state.replace,
            Focus::DeleteTarget => &mut state.delete_target,
        }
    }

    /// crossterm のキーイベントを処理
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Release {
            return;
        }
        self.handle_key(Key::from(event));
    }

    /// 内部表現のキーを処理
    pub fn handle_key(&mut self, key: Key) {
        if self.confirm_prompt.is_some() {
            self.handle_confirm_key(&key);
            return;
        }

        if self.controller.notifier().current().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.controller.notifier_mut().dismiss();
            }
            return;
        }

        if let Some(action) = self.keymap.lookup(&key) {
            self.execute(action);
        }
    }

    /// 貼り付け（モーダル表示中は無視）
    pub fn paste(&mut self, text: &str) {
        if self.modal().is_none() {
            self.focused_field_mut().insert_str(text);
        }
    }

    fn handle_confirm_key(&mut self, key: &Key) {
        let answer = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            // 既定は「いいえ」
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => Some(false),
            _ => None,
        };
        if let Some(accepted) = answer {
            self.confirm_prompt = None;
            self.controller.confirm_delete(accepted);
        }
    }

    /// アクションを実行
    pub fn execute(&mut self, action: Action) -> Option<Outcome> {
        match action {
            Action::Create => Some(self.controller.create()),
            Action::Read => Some(self.controller.read()),
            Action::Append => Some(self.controller.append()),
            Action::Update => Some(self.controller.update()),
            Action::Delete => {
                let outcome = self.controller.request_delete();
                if outcome.awaiting_confirmation {
                    self.confirm_prompt = outcome.message.clone();
                }
                Some(outcome)
            }
            Action::FocusNext => {
                self.focus = self.focus.next();
                None
            }
            Action::FocusPrevious => {
                self.focus = self.focus.previous();
                None
            }
            Action::InsertNewline => self.handle_enter(),
            Action::InsertChar(ch) => {
                self.focused_field_mut().insert_char(ch);
                None
            }
            Action::DeleteBackward => {
                self.focused_field_mut().backspace();
                None
            }
            Action::DeleteForward => {
                self.focused_field_mut().delete();
                None
            }
            Action::MoveCursor(direction) => {
                let field = self.focused_field_mut();
                match direction {
                    Direction::Up => field.move_up(),
                    Direction::Down => field.move_down(),
                    Direction::Left => field.move_left(),
                    Direction::Right => field.move_right(),
                    Direction::LineStart => field.move_home(),
                    Direction::LineEnd => field.move_end(),
                }
                None
            }
            Action::ScrollDisplay(scroll) => {
                self.scroll_display(scroll);
                None
            }
            Action::Quit => {
                self.shutdown();
                None
            }
        }
    }

    /// 表示ペインをスクロール（最終行が先頭に来るところで止まる）
    fn scroll_display(&mut self, scroll: Scroll) {
        let state = self.controller.state_mut();
        let last = state.display.len().saturating_sub(1);
        state.display_scroll = match scroll {
            Scroll::PageUp => state.display_scroll.saturating_sub(DISPLAY_PAGE),
            Scroll::PageDown => (state.display_scroll + DISPLAY_PAGE).min(last),
        };
    }

    /// Enter: テキストエリアでは改行、1行欄では対応する操作を実行
    fn handle_enter(&mut self) -> Option<Outcome> {
        if self.focused_field().kind() == FieldKind::MultiLine {
            self.focused_field_mut().insert_newline();
            return None;
        }
        match self.focus {
            Focus::Filename => self.execute(Action::Read),
            Focus::Search | Focus::Replace => self.execute(Action::Update),
            Focus::DeleteTarget => self.execute(Action::Delete),
            Focus::Input => None,
        }
    }
}

/// フォーカスに対応する入力欄
pub fn field_of(state: &AppState, focus: Focus) -> &TextField {
    match focus {
        Focus::Filename => &state.filename,
        Focus::Input => &state.input,
        Focus::Search => &state.search,
        Focus::Replace => &state.replace,
        Focus::DeleteTarget => &state.delete_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let options = AppOptions {
            base_dir: Some(dir.path().to_path_buf()),
            ..AppOptions::default()
        };
        (dir, App::new(&options))
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(Key::plain(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::DeleteTarget.next(), Focus::Filename);
        assert_eq!(Focus::Filename.previous(), Focus::DeleteTarget);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let (_dir, mut app) = app();
        type_text(&mut app, "memo");
        app.handle_key(Key::plain(KeyCode::Tab));
        type_text(&mut app, "hi");

        assert_eq!(app.state().filename.text(), "memo");
        assert_eq!(app.state().input.text(), "hi");
    }

    #[test]
    fn test_notification_blocks_input_until_dismissed() {
        let (_dir, mut app) = app();
        app.handle_key(Key::ctrl('r'));
        assert!(matches!(app.modal(), Some(Modal::Notice(_))));

        type_text(&mut app, "x");
        assert_eq!(app.state().filename.text(), "");

        app.handle_key(Key::plain(KeyCode::Enter));
        assert!(app.modal().is_none());
    }

    #[test]
    fn test_delete_prompts_then_confirms() {
        let (dir, mut app) = app();
        std::fs::write(dir.path().join("old.txt"), "bye").unwrap();
        app.set_focus(Focus::DeleteTarget);
        type_text(&mut app, "old");

        app.handle_key(Key::ctrl('d'));
        assert_eq!(
            app.modal(),
            Some(Modal::Confirm("Are you sure you want to delete 'old.txt'?"))
        );

        app.handle_key(Key::plain(KeyCode::Char('y')));
        assert!(!dir.path().join("old.txt").exists());
        assert!(matches!(app.modal(), Some(Modal::Notice(_))));
    }

    #[test]
    fn test_quit_key() {
        let (_dir, mut app) = app();
        app.handle_key(Key::ctrl('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_enter_in_confirm_popup_cancels() {
        let (dir, mut app) = app();
        std::fs::write(dir.path().join("old.txt"), "bye").unwrap();
        app.set_focus(Focus::DeleteTarget);
        type_text(&mut app, "old");

        app.handle_key(Key::plain(KeyCode::Enter));
        assert!(matches!(app.modal(), Some(Modal::Confirm(_))));

        app.handle_key(Key::plain(KeyCode::Enter));
        assert!(dir.path().join("old.txt").exists());
        assert!(app.modal().is_none());
    }

    #[test]
    fn test_esc_does_not_quit() {
        let (_dir, mut app) = app();
        type_text(&mut app, "draft");
        app.handle_key(Key::plain(KeyCode::Esc));
        assert!(app.is_running());
        assert_eq!(app.state().filename.text(), "draft");
    }

    #[test]
    fn test_paste_inserts_into_focused_field() {
        let (_dir, mut app) = app();
        app.set_focus(Focus::Input);
        app.paste("line one\nline two");
        assert_eq!(app.state().input.text(), "line one\nline two");
    }

    #[test]
    fn test_paste_ignored_while_modal_open() {
        let (_dir, mut app) = app();
        app.handle_key(Key::ctrl('r'));
        app.paste("ignored");
        assert_eq!(app.state().filename.text(), "");
    }

    #[test]
    fn test_page_keys_scroll_display() {
        let (dir, mut app) = app();
        let content: Vec<String> = (1..=25).map(|n| format!("row{}", n)).collect();
        std::fs::write(dir.path().join("long.txt"), content.join("\n")).unwrap();
        type_text(&mut app, "long");
        app.handle_key(Key::plain(KeyCode::Enter));
        assert_eq!(app.state().display.len(), 25);

        app.handle_key(Key::plain(KeyCode::PageDown));
        assert_eq!(app.state().display_scroll, DISPLAY_PAGE);
        app.handle_key(Key::plain(KeyCode::PageDown));
        app.handle_key(Key::plain(KeyCode::PageDown));
        assert_eq!(app.state().display_scroll, 24);
        app.handle_key(Key::plain(KeyCode::PageUp));
        assert_eq!(app.state().display_scroll, 14);
    }
}
