//! テーマシステム
//!
//! 画面部品ごとの色設定

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::BorderType,
};
use std::collections::HashMap;

/// UIコンポーネントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 入力欄の本文
    Field,
    /// フォーカス中の枠
    FocusedBorder,
    /// 通常の枠
    Border,
    /// 表示ペインの行番号付き本文
    Display,
    /// ヘルプ行
    HelpLine,
    /// ヘルプ行のキー表記
    HelpKey,
    /// 情報メッセージ
    Info,
    /// 警告メッセージ
    Warning,
    /// エラーメッセージ
    Error,
    /// 確認ダイアログ
    Confirm,
}

/// カラー設定
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// 前景色
    pub foreground: Color,
    /// 背景色
    pub background: Color,
    /// 修飾子（太字、下線など）
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(self.modifiers)
    }
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    /// コンポーネント別のカラー設定
    colors: HashMap<ComponentType, ColorScheme>,
    /// ボーダータイプ
    pub border_type: BorderType,
}

impl Theme {
    /// 16色端末向けの既定テーマ
    pub fn dark() -> Self {
        let mut theme = Self {
            colors: HashMap::new(),
            border_type: BorderType::Rounded,
        };

        theme.set_color(ComponentType::Field, ColorScheme::new(Color::White, Color::Reset));
        theme.set_color(
            ComponentType::FocusedBorder,
            ColorScheme::new(Color::Yellow, Color::Reset).with_modifier(Modifier::BOLD),
        );
        theme.set_color(ComponentType::Border, ColorScheme::new(Color::DarkGray, Color::Reset));
        theme.set_color(ComponentType::Display, ColorScheme::new(Color::Cyan, Color::Reset));
        theme.set_color(ComponentType::HelpLine, ColorScheme::new(Color::Gray, Color::Reset));
        theme.set_color(
            ComponentType::HelpKey,
            ColorScheme::new(Color::Black, Color::Gray).with_modifier(Modifier::BOLD),
        );
        theme.set_color(ComponentType::Info, ColorScheme::new(Color::Green, Color::Reset));
        theme.set_color(ComponentType::Warning, ColorScheme::new(Color::Yellow, Color::Reset));
        theme.set_color(
            ComponentType::Error,
            ColorScheme::new(Color::Red, Color::Reset).with_modifier(Modifier::BOLD),
        );
        theme.set_color(ComponentType::Confirm, ColorScheme::new(Color::Magenta, Color::Reset));
        theme
    }

    /// 特定のコンポーネントのスタイルを取得
    pub fn style(&self, component: ComponentType) -> Style {
        self.colors
            .get(&component)
            .map(|cs| cs.to_style())
            .unwrap_or_default()
    }

    /// カラー設定を追加
    pub fn set_color(&mut self, component: ComponentType, color_scheme: ColorScheme) {
        self.colors.insert(component, color_scheme);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_style_is_bold_red() {
        let style = Theme::dark().style(ComponentType::Error);
        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_override_color() {
        let mut theme = Theme::dark();
        theme.set_color(ComponentType::Info, ColorScheme::new(Color::Blue, Color::Reset));
        assert_eq!(theme.style(ComponentType::Info).fg, Some(Color::Blue));
    }
}
