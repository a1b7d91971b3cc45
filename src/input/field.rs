//! テキスト入力欄
//!
//! 1行入力欄と複数行テキストエリアの編集状態を保持する。
//! カーソルは文字単位で管理し、画面上の桁は `unicode-width` で計算する。

use unicode_width::UnicodeWidthStr;

/// 入力欄の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    SingleLine,
    MultiLine,
}

/// 編集可能なテキスト欄
#[derive(Debug, Clone)]
pub struct TextField {
    text: String,
    /// 文字単位のカーソル位置
    cursor: usize,
    kind: FieldKind,
}

impl TextField {
    pub fn single_line() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            kind: FieldKind::SingleLine,
        }
    }

    pub fn multi_line() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            kind: FieldKind::MultiLine,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 内容を置き換え、カーソルを末尾へ
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if self.kind == FieldKind::SingleLine {
            text.retain(|ch| ch != '\n' && ch != '\r');
        }
        self.cursor = text.chars().count();
        self.text = text;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    /// 複数行欄のみ改行を挿入
    pub fn insert_newline(&mut self) {
        if self.kind == FieldKind::MultiLine {
            let idx = self.byte_index(self.cursor);
            self.text.insert(idx, '\n');
            self.cursor += 1;
        }
    }

    /// 貼り付けなどの文字列挿入
    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            match ch {
                '\r' => {}
                '\n' => self.insert_newline(),
                _ => self.insert_char(ch),
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    /// 現在行の先頭へ
    pub fn move_home(&mut self) {
        let (row, _) = self.row_and_column();
        self.cursor = self.line_start(row);
    }

    /// 現在行の末尾へ
    pub fn move_end(&mut self) {
        let (row, _) = self.row_and_column();
        self.cursor = self.line_start(row) + self.line_char_len(row);
    }

    pub fn move_up(&mut self) {
        let (row, column) = self.row_and_column();
        if row > 0 {
            self.cursor = self.line_start(row - 1) + column.min(self.line_char_len(row - 1));
        }
    }

    pub fn move_down(&mut self) {
        let (row, column) = self.row_and_column();
        if row + 1 < self.line_count() {
            self.cursor = self.line_start(row + 1) + column.min(self.line_char_len(row + 1));
        }
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    fn line_count(&self) -> usize {
        self.lines().count()
    }

    fn line_char_len(&self, row: usize) -> usize {
        self.lines().nth(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn line_start(&self, row: usize) -> usize {
        self.lines().take(row).map(|l| l.chars().count() + 1).sum()
    }

    /// カーソルの (行, 文字桁)
    pub fn row_and_column(&self) -> (usize, usize) {
        let mut row = 0;
        let mut column = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                row += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (row, column)
    }

    /// カーソルの (行, 表示桁)。全角文字は2桁として数える
    pub fn display_cursor(&self) -> (usize, usize) {
        let (row, column) = self.row_and_column();
        let line = self.lines().nth(row).unwrap_or("");
        let prefix: String = line.chars().take(column).collect();
        (row, prefix.width())
    }
}
