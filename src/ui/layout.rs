//! TUIレイアウト管理
//!
//! 上段にファイル名欄、中段に入力と表示の2ペイン、下段に更新・削除欄、最下行にヘルプ。
//! 最小サイズは 60x15。

use crate::error::UiError;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 最小幅
pub const MIN_WIDTH: u16 = 60;
/// 最小高さ
pub const MIN_HEIGHT: u16 = 15;

/// 画面全体のレイアウト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    /// ファイル名欄
    pub filename: Rect,
    /// 書き込み元テキストエリア（左）
    pub input: Rect,
    /// 表示ペイン（右）
    pub display: Rect,
    /// 検索文字列欄
    pub search: Rect,
    /// 置換文字列欄
    pub replace: Rect,
    /// 削除対象欄
    pub delete_target: Rect,
    /// ヘルプ行
    pub help: Rect,
}

/// 画面サイズからレイアウトを計算
pub fn calculate_layout(area: Rect) -> Result<AppLayout, UiError> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return Err(UiError::RenderingFailed {
            component: format!("screen too small: {}x{}", area.width, area.height),
        });
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let update_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(bottom[0]);

    let delete_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(bottom[1]);

    Ok(AppLayout {
        filename: rows[0],
        input: panes[0],
        display: panes[1],
        search: update_rows[0],
        replace: update_rows[1],
        delete_target: delete_rows[0],
        help: rows[3],
    })
}

/// 中央に配置したポップアップ領域
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
