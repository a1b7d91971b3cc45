//! キーバインドシステム
//!
//! キー入力をファイル操作・フォーカス移動・編集アクションへ変換する

use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;
use thiserror::Error;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Esc,
    Unknown,
}

impl Key {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: true, alt: false, shift: false },
            code: KeyCode::Char(ch),
        }
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(_)) && !self.modifiers.ctrl && !self.modifiers.alt
    }

    /// 文字表現からパース（例: `C-w`, `S-Tab`, `Enter`）
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut modifiers = KeyModifiers::default();
        let mut remaining = s;

        // 修飾キーの解析
        loop {
            if let Some(rest) = remaining.strip_prefix("C-") {
                modifiers.ctrl = true;
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix("M-") {
                modifiers.alt = true;
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix("S-") {
                modifiers.shift = true;
                remaining = rest;
            } else {
                break;
            }
        }

        let code = match remaining {
            "Enter" => KeyCode::Enter,
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "Tab" if modifiers.shift => {
                modifiers.shift = false;
                KeyCode::BackTab
            }
            "Tab" => KeyCode::Tab,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Esc" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyCode::Char(ch),
                    _ => return Err(KeyParseError::UnknownKey(s.to_string())),
                }
            }
        };

        Ok(Key { modifiers, code })
    }
}

/// キーパースエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty key description")]
    Empty,
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// crossterm統合
impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let mut modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            CrosstermKeyCode::Char(c) => {
                // 大文字は文字自体がシフトを表す
                modifiers.shift = false;
                KeyCode::Char(c)
            }
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::BackTab => {
                modifiers.shift = false;
                KeyCode::BackTab
            }
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::PageUp => KeyCode::PageUp,
            CrosstermKeyCode::PageDown => KeyCode::PageDown,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// アクション定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// ファイル操作
    Create,
    Read,
    Append,
    Update,
    Delete,
    /// フォーカス移動
    FocusNext,
    FocusPrevious,
    /// 編集
    InsertChar(char),
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    MoveCursor(Direction),
    /// 表示ペインのスクロール
    ScrollDisplay(Scroll),
    /// アプリケーション制御
    Quit,
}

/// 移動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
}

/// 表示ペインのスクロール方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    PageUp,
    PageDown,
}

/// キーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

/// 既定のバインド
const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    ("C-w", Action::Create),
    ("C-r", Action::Read),
    ("C-a", Action::Append),
    ("C-u", Action::Update),
    ("C-d", Action::Delete),
    ("C-q", Action::Quit),
    ("Tab", Action::FocusNext),
    ("S-Tab", Action::FocusPrevious),
    ("Enter", Action::InsertNewline),
    ("Backspace", Action::DeleteBackward),
    ("Delete", Action::DeleteForward),
    ("Up", Action::MoveCursor(Direction::Up)),
    ("Down", Action::MoveCursor(Direction::Down)),
    ("Left", Action::MoveCursor(Direction::Left)),
    ("Right", Action::MoveCursor(Direction::Right)),
    ("Home", Action::MoveCursor(Direction::LineStart)),
    ("End", Action::MoveCursor(Direction::LineEnd)),
    ("PageUp", Action::ScrollDisplay(Scroll::PageUp)),
    ("PageDown", Action::ScrollDisplay(Scroll::PageDown)),
];

impl KeyMap {
    /// 既定のキーマップを作成
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        for (desc, action) in DEFAULT_BINDINGS {
            // 既定テーブルは固定文字列なのでパースに失敗しない
            if let Ok(key) = Key::parse(desc) {
                keymap.bindings.insert(key, action.clone());
            }
        }
        keymap
    }

    /// キーをアクションへ変換
    pub fn lookup(&self, key: &Key) -> Option<Action> {
        if let Some(action) = self.bindings.get(key) {
            return Some(action.clone());
        }
        if key.is_insertable_char() {
            if let KeyCode::Char(ch) = key.code {
                return Some(Action::InsertChar(ch));
            }
        }
        None
    }

    /// ヘルプ行用のバインド一覧
    pub fn help_entries() -> &'static [(&'static str, &'static str)] {
        &[
            ("C-w", "Create"),
            ("C-r", "Read"),
            ("C-a", "Append"),
            ("C-u", "Update"),
            ("C-d", "Delete"),
            ("Tab", "Next field"),
            ("PgUp/PgDn", "Scroll"),
            ("C-q", "Quit"),
        ]
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}
