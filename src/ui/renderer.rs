//! 画面描画
//!
//! アプリケーション状態を ratatui のウィジェットへ変換する

use crate::app::{field_of, App, Focus, Modal};
use crate::input::field::{FieldKind, TextField};
use crate::input::keybinding::KeyMap;
use crate::notify::NoticeLevel;
use crate::ui::layout::{calculate_layout, centered_popup, MIN_HEIGHT, MIN_WIDTH};
use crate::ui::theme::{ComponentType, Theme};
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

/// レンダラー
#[derive(Debug, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1フレーム描画
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>, app: &App) -> io::Result<()> {
        terminal.draw(|frame| self.render_frame(frame, app))?;
        Ok(())
    }

    /// フレームへ描画
    pub fn render_frame(&self, frame: &mut Frame<'_>, app: &App) {
        let area = frame.area();
        let layout = match calculate_layout(area) {
            Ok(layout) => layout,
            Err(_) => {
                let warning = Paragraph::new(format!(
                    "Terminal too small: {}x{} (need {}x{})",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                ))
                .style(self.theme.style(ComponentType::Error))
                .wrap(Wrap { trim: true });
                frame.render_widget(warning, area);
                return;
            }
        };

        let state = app.state();
        let fields = [
            (Focus::Filename, layout.filename),
            (Focus::Input, layout.input),
            (Focus::Search, layout.search),
            (Focus::Replace, layout.replace),
            (Focus::DeleteTarget, layout.delete_target),
        ];
        for (focus, rect) in fields {
            self.render_field(frame, rect, focus.label(), field_of(state, focus), focus == app.focus());
        }

        self.render_display(frame, layout.display, &state.display, state.display_scroll);
        self.render_help(frame, layout.help);

        match app.modal() {
            Some(Modal::Confirm(prompt)) => self.render_confirm(frame, area, prompt),
            Some(Modal::Notice(notification)) => {
                let style = match notification.level {
                    NoticeLevel::Info => self.theme.style(ComponentType::Info),
                    NoticeLevel::Warning => self.theme.style(ComponentType::Warning),
                    NoticeLevel::Error => self.theme.style(ComponentType::Error),
                };
                self.render_popup(
                    frame,
                    area,
                    &notification.title,
                    &notification.message,
                    "[Enter] OK",
                    style,
                );
            }
            None => {
                let rect = fields
                    .iter()
                    .find(|(focus, _)| *focus == app.focus())
                    .map(|(_, rect)| *rect)
                    .unwrap_or(layout.filename);
                if let Some(position) = cursor_position(rect, app.focused_field()) {
                    frame.set_cursor_position(position);
                }
            }
        }
    }

    fn block<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let border = if focused {
            ComponentType::FocusedBorder
        } else {
            ComponentType::Border
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(self.theme.border_type)
            .border_style(self.theme.style(border))
            .title(title)
    }

    fn render_field(
        &self,
        frame: &mut Frame<'_>,
        rect: Rect,
        title: &str,
        field: &TextField,
        focused: bool,
    ) {
        let inner = inner_rect(rect);
        let (row, column) = field.display_cursor();
        let (scroll_y, scroll_x) = scroll_offsets(inner, row, column);

        let lines: Vec<Line<'_>> = field.text().split('\n').map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .style(self.theme.style(ComponentType::Field))
            .block(self.block(title, focused))
            .scroll((scroll_y, scroll_x));
        frame.render_widget(paragraph, rect);
    }

    fn render_display(&self, frame: &mut Frame<'_>, rect: Rect, display: &[String], scroll: usize) {
        // 折り返し後の行数ではなく表示行単位で飛ばす
        let lines: Vec<Line<'_>> = display
            .iter()
            .skip(scroll)
            .map(|l| Line::from(l.as_str()))
            .collect();
        let title = if scroll > 0 {
            format!("Display ({}/{})", scroll + 1, display.len())
        } else {
            "Display".to_string()
        };
        let paragraph = Paragraph::new(lines)
            .style(self.theme.style(ComponentType::Display))
            .block(self.block(&title, false))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, rect);
    }

    fn render_help(&self, frame: &mut Frame<'_>, rect: Rect) {
        let mut spans = Vec::new();
        for (key, description) in KeyMap::help_entries() {
            spans.push(Span::styled(format!(" {} ", key), self.theme.style(ComponentType::HelpKey)));
            spans.push(Span::styled(
                format!(" {}  ", description),
                self.theme.style(ComponentType::HelpLine),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rect);
    }

    fn render_confirm(&self, frame: &mut Frame<'_>, area: Rect, prompt: &str) {
        self.render_popup(
            frame,
            area,
            "Confirm Delete",
            prompt,
            "[y] Yes  [n/Enter] No",
            self.theme.style(ComponentType::Confirm),
        );
    }

    fn render_popup(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        title: &str,
        message: &str,
        footer: &str,
        style: ratatui::style::Style,
    ) {
        let width = (area.width * 2 / 3).max(30);
        let popup = centered_popup(area, width, 7);
        let lines = vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(footer.to_string()),
        ];
        let paragraph = Paragraph::new(lines)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(self.theme.border_type)
                    .border_style(style)
                    .title(title.to_string()),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

/// 枠線の内側
fn inner_rect(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

/// カーソルが見えるようにするスクロール量 (縦, 横)
fn scroll_offsets(inner: Rect, row: usize, column: usize) -> (u16, u16) {
    let height = inner.height.max(1) as usize;
    let width = inner.width.max(1) as usize;
    let scroll_y = (row + 1).saturating_sub(height);
    let scroll_x = (column + 1).saturating_sub(width);
    (
        u16::try_from(scroll_y).unwrap_or(u16::MAX),
        u16::try_from(scroll_x).unwrap_or(u16::MAX),
    )
}

/// 入力欄内のカーソル画面座標
fn cursor_position(rect: Rect, field: &TextField) -> Option<Position> {
    let inner = inner_rect(rect);
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    let (row, column) = field.display_cursor();
    let (scroll_y, scroll_x) = scroll_offsets(inner, row, column);
    let row = if field.kind() == FieldKind::SingleLine { 0 } else { row };

    let x = inner.x as usize + column - scroll_x as usize;
    let y = inner.y as usize + row - scroll_y as usize;
    Some(Position::new(
        u16::try_from(x).ok()?,
        u16::try_from(y).ok()?,
    ))
}
